pub mod error;
pub mod recipes;
pub mod scrape;

use crate::builder::RecipeScraper;
use crate::config::AppConfig;
use crate::error::MealMatchError;
use crate::store::RecipeStore;
use axum::routing::{delete, get, post};
use axum::Router;
use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecipeStore>,
    pub scraper: Arc<RecipeScraper>,
}

/// Routes for the recipe API, mounted under `prefix` (`""` or `"/"` for the root)
pub fn router(state: AppState, prefix: &str) -> Router {
    let api = Router::new()
        .route("/recipes", get(recipes::list_recipes))
        .route("/recipes/{id}", delete(recipes::delete_recipe))
        .route("/scrape", post(scrape::scrape_recipes));

    let prefix = prefix.trim_matches('/');
    let app = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(&format!("/{prefix}"), api)
    };

    app.layer(CorsLayer::permissive()).with_state(state)
}

/// Runs the API until Ctrl-C.
pub async fn serve(config: &AppConfig) -> Result<(), MealMatchError> {
    let store = RecipeStore::new(&config.store.path);
    if let Err(e) = store.ensure_initialized().await {
        error!("Could not initialize {}: {}", store.path().display(), e);
    }

    let state = AppState {
        store: Arc::new(store),
        scraper: Arc::new(RecipeScraper::from_config(config)?),
    };
    let app = router(state, &config.server.api_prefix);

    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&address).await?;
    info!("MealMatch API server running on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
