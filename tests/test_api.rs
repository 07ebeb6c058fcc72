#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mealmatch::api::{router, AppState};
    use mealmatch::fetchers::PageFetcher;
    use mealmatch::{MealMatchError, Recipe, RecipeScraper, RecipeStore};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::net::TcpListener;

    const SEARCH_PAGE: &str = r#"
        <div class="recipe-card"><a href="/recipes/1"><h3>Tempe Bacem</h3></a></div>
        <div class="recipe-card"><a href="/recipes/2"><h3>Orek Tempe</h3></a></div>
    "#;

    /// Serves fixed HTML per URL and 404s everything else.
    struct StaticPages(HashMap<String, String>);

    #[async_trait]
    impl PageFetcher for StaticPages {
        async fn fetch(&self, url: &str) -> Result<String, MealMatchError> {
            self.0
                .get(url)
                .cloned()
                .ok_or_else(|| MealMatchError::HttpStatus {
                    status: 404,
                    url: url.to_string(),
                })
        }
    }

    fn scraper(fallback: bool) -> RecipeScraper {
        let pages = HashMap::from([(
            "https://cookpad.com/search/tempe".to_string(),
            SEARCH_PAGE.to_string(),
        )]);
        let builder = RecipeScraper::builder()
            .origin("https://cookpad.com")
            .fetcher(Arc::new(StaticPages(pages)));
        let builder = if fallback {
            builder
        } else {
            builder.without_sample_fallback()
        };
        builder.build().unwrap()
    }

    struct TestApp {
        base: String,
        store: Arc<RecipeStore>,
        client: reqwest::Client,
        _dir: TempDir,
    }

    async fn spawn_app(scraper: RecipeScraper) -> TestApp {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(RecipeStore::new(dir.path().join("recipes.json")));
        store.ensure_initialized().await.unwrap();

        let state = AppState {
            store: store.clone(),
            scraper: Arc::new(scraper),
        };
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state, "/api")).await.unwrap();
        });

        TestApp {
            base: format!("http://{address}/api"),
            store,
            client: reqwest::Client::new(),
            _dir: dir,
        }
    }

    impl TestApp {
        async fn scrape(&self, body: Value) -> reqwest::Response {
            self.client
                .post(format!("{}/scrape", self.base))
                .json(&body)
                .send()
                .await
                .unwrap()
        }

        async fn recipes(&self) -> Vec<Recipe> {
            self.client
                .get(format!("{}/recipes", self.base))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap()
        }
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let app = spawn_app(scraper(true)).await;
        assert!(app.recipes().await.is_empty());
    }

    #[tokio::test]
    async fn test_scrape_requires_search_term() {
        let app = spawn_app(scraper(true)).await;

        for body in [json!({}), json!({ "searchTerm": "" }), json!({ "searchTerm": "   " })] {
            let response = app.scrape(body).await;
            assert_eq!(response.status(), 400);
            let error: Value = response.json().await.unwrap();
            assert_eq!(error, json!({ "error": "Search term is required" }));
        }

        let response = app
            .client
            .post(format!("{}/scrape", app.base))
            .header("content-type", "application/json")
            .body("not json")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);

        assert!(app.store.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_scrape_stores_only_new_recipes() {
        let app = spawn_app(scraper(true)).await;

        let response = app.scrape(json!({ "searchTerm": "tempe" })).await;
        assert_eq!(response.status(), 200);
        let added: Vec<Recipe> = response.json().await.unwrap();
        assert_eq!(added.len(), 2);
        assert_eq!(added[0].url.as_deref(), Some("https://cookpad.com/recipes/1"));

        let again: Vec<Recipe> = app
            .scrape(json!({ "searchTerm": "tempe" }))
            .await
            .json()
            .await
            .unwrap();
        assert!(again.is_empty());

        let stored = app.recipes().await;
        assert_eq!(stored, added);
    }

    #[tokio::test]
    async fn test_scrape_falls_back_to_placeholders() {
        let app = spawn_app(scraper(true)).await;

        let added: Vec<Recipe> = app
            .scrape(json!({ "searchTerm": "nasi goreng" }))
            .await
            .json()
            .await
            .unwrap();
        assert_eq!(added.len(), 3);
        assert_eq!(added[0].title, "nasi goreng Recipe 1");

        // Placeholders share the search URL, so a repeat search stores nothing
        let again: Vec<Recipe> = app
            .scrape(json!({ "searchTerm": "nasi goreng" }))
            .await
            .json()
            .await
            .unwrap();
        assert!(again.is_empty());
        assert_eq!(app.recipes().await.len(), 3);
    }

    #[tokio::test]
    async fn test_scrape_failure_is_a_server_error() {
        let app = spawn_app(scraper(false)).await;

        let response = app.scrape(json!({ "searchTerm": "rendang" })).await;
        assert_eq!(response.status(), 500);
        let error: Value = response.json().await.unwrap();
        assert_eq!(error, json!({ "error": "Failed to scrape recipes" }));
    }

    #[tokio::test]
    async fn test_delete_recipe() {
        let app = spawn_app(scraper(true)).await;
        let added: Vec<Recipe> = app
            .scrape(json!({ "searchTerm": "tempe" }))
            .await
            .json()
            .await
            .unwrap();

        let delete = |id: String| {
            let request = app.client.delete(format!("{}/recipes/{}", app.base, id));
            async move { request.send().await.unwrap().json::<Value>().await.unwrap() }
        };

        assert_eq!(delete("missing".to_string()).await, json!({ "success": true }));
        assert_eq!(app.recipes().await.len(), 2);

        assert_eq!(delete(added[0].id.clone()).await, json!({ "success": true }));
        let remaining = app.recipes().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, added[1].id);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let app = spawn_app(scraper(true)).await;

        let response = app
            .client
            .get(format!("{}/recipes", app.base))
            .header("origin", "http://localhost:5173")
            .send()
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
