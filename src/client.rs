//! Client side of MealMatch: talks to the API, keeps the pantry, and stays
//! usable when the server cannot be reached.
//!
//! Client state lives in a small JSON key/value file ([`LocalStorage`]) with
//! one entry for the pantry and one for a mirror of the recipe collection.

use crate::config::AppConfig;
use crate::error::MealMatchError;
use crate::model::Recipe;
use crate::pantry::Pantry;
use crate::pipelines::search_url;
use crate::samples::{generate_samples, SampleCatalog};
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::collections::{BTreeMap, HashSet};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

pub const PANTRY_KEY: &str = "myIngredients";
pub const RECIPES_KEY: &str = "recipes";

pub const LOAD_FAILED: &str = "Failed to load recipes. Please try again.";
pub const SCRAPE_FAILED: &str = "Failed to scrape recipes. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete recipe. Please try again.";

/// String values stored under fixed keys in one JSON file.
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> BTreeMap<String, String> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!("Could not read {}: {}", self.path.display(), e);
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&data).unwrap_or_else(|e| {
            warn!("Ignoring malformed {}: {}", self.path.display(), e);
            BTreeMap::new()
        })
    }

    async fn save(&self, items: &BTreeMap<String, String>) -> Result<(), MealMatchError> {
        tokio::fs::write(&self.path, serde_json::to_string_pretty(items)?).await?;
        Ok(())
    }

    pub async fn get_item(&self, key: &str) -> Option<String> {
        self.load().await.remove(key)
    }

    pub async fn set_item(&self, key: &str, value: &str) -> Result<(), MealMatchError> {
        let mut items = self.load().await;
        items.insert(key.to_string(), value.to_string());
        self.save(&items).await
    }

    pub async fn remove_item(&self, key: &str) -> Result<(), MealMatchError> {
        let mut items = self.load().await;
        if items.remove(key).is_some() {
            self.save(&items).await?;
        }
        Ok(())
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get_item(key).await?;
        serde_json::from_str(&value)
            .map_err(|e| warn!("Ignoring malformed '{}' entry: {}", key, e))
            .ok()
    }

    pub async fn set_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), MealMatchError> {
        self.set_item(key, &serde_json::to_string(value)?).await
    }
}

/// A value plus the user-facing message when it came from the offline path.
#[derive(Debug)]
pub struct Outcome<T> {
    pub data: T,
    pub error: Option<&'static str>,
}

impl<T> Outcome<T> {
    fn online(data: T) -> Self {
        Self { data, error: None }
    }

    fn offline(data: T, error: &'static str) -> Self {
        Self {
            data,
            error: Some(error),
        }
    }
}

pub struct MealMatchClient {
    http: Client,
    api_url: String,
    storage: LocalStorage,
    origin: String,
    search_path: String,
    catalog: SampleCatalog,
}

impl MealMatchClient {
    pub fn from_config(config: &AppConfig) -> Result<Self, MealMatchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.client.timeout))
            .build()?;

        Ok(Self {
            http,
            api_url: config.client.api_url.trim_end_matches('/').to_string(),
            storage: LocalStorage::new(&config.client.state_path),
            origin: config.scraper.origin.clone(),
            search_path: config.scraper.search_path.clone(),
            catalog: config.samples.clone(),
        })
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    pub async fn cached_recipes(&self) -> Vec<Recipe> {
        self.storage.get_json(RECIPES_KEY).await.unwrap_or_default()
    }

    async fn cache_recipes(&self, recipes: &[Recipe]) {
        if let Err(e) = self.storage.set_json(RECIPES_KEY, &recipes).await {
            warn!("Could not cache recipes: {}", e);
        }
    }

    async fn fetch_recipes(&self) -> Result<Vec<Recipe>, MealMatchError> {
        let url = format!("{}/recipes", self.api_url);
        let recipes = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(recipes)
    }

    async fn request_scrape(&self, term: &str) -> Result<Vec<Recipe>, MealMatchError> {
        let url = format!("{}/scrape", self.api_url);
        let recipes = self
            .http
            .post(&url)
            .json(&json!({ "searchTerm": term }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(recipes)
    }

    /// The server's recipes, or the cached copy when the server is unreachable.
    pub async fn load_recipes(&self) -> Outcome<Vec<Recipe>> {
        match self.fetch_recipes().await {
            Ok(recipes) => {
                self.cache_recipes(&recipes).await;
                Outcome::online(recipes)
            }
            Err(e) => {
                warn!("Error loading recipes: {}", e);
                Outcome::offline(self.cached_recipes().await, LOAD_FAILED)
            }
        }
    }

    /// Asks the server to scrape `term` and returns the recipes it added.
    ///
    /// When the server cannot be reached, placeholder recipes are generated
    /// locally with the same generator the server uses and added to the cache.
    pub async fn scrape(&self, term: &str) -> Result<Outcome<Vec<Recipe>>, MealMatchError> {
        let mut cached = self.cached_recipes().await;

        match self.request_scrape(term).await {
            Ok(added) => {
                cached.extend(added.iter().cloned());
                self.cache_recipes(&cached).await;
                Ok(Outcome::online(added))
            }
            Err(e) => {
                warn!("Error scraping recipes: {}", e);
                let url = search_url(&self.origin, &self.search_path, term)?;
                let known: HashSet<Option<String>> =
                    cached.iter().map(|recipe| recipe.url.clone()).collect();
                let added: Vec<Recipe> = generate_samples(term, &url, &self.catalog)
                    .into_iter()
                    .filter(|recipe| !known.contains(&recipe.url))
                    .collect();

                debug!("Generated {} offline recipes", added.len());
                cached.extend(added.iter().cloned());
                self.cache_recipes(&cached).await;
                Ok(Outcome::offline(added, SCRAPE_FAILED))
            }
        }
    }

    /// Deletes on the server and from the local cache.
    pub async fn delete(&self, id: &str) -> Outcome<()> {
        let url = format!("{}/recipes/{}", self.api_url, id);
        let result = async {
            self.http.delete(&url).send().await?.error_for_status()?;
            Ok::<_, MealMatchError>(())
        }
        .await;

        let mut cached = self.cached_recipes().await;
        let before = cached.len();
        cached.retain(|recipe| recipe.id != id);
        if cached.len() != before {
            self.cache_recipes(&cached).await;
        }

        match result {
            Ok(()) => Outcome::online(()),
            Err(e) => {
                warn!("Error deleting recipe: {}", e);
                Outcome::offline((), DELETE_FAILED)
            }
        }
    }

    pub async fn pantry(&self) -> Pantry {
        self.storage.get_json(PANTRY_KEY).await.unwrap_or_default()
    }

    pub async fn save_pantry(&self, pantry: &Pantry) -> Result<(), MealMatchError> {
        self.storage.set_json(PANTRY_KEY, pantry).await
    }

    /// Adds each ingredient; returns the ones that were new.
    pub async fn add_ingredients<S: AsRef<str>>(
        &self,
        ingredients: &[S],
    ) -> Result<Vec<String>, MealMatchError> {
        let mut pantry = self.pantry().await;
        let added: Vec<String> = ingredients
            .iter()
            .map(|ingredient| ingredient.as_ref())
            .filter(|ingredient| pantry.add(ingredient))
            .map(|ingredient| ingredient.trim().to_lowercase())
            .collect();
        self.save_pantry(&pantry).await?;
        Ok(added)
    }

    /// Removes an ingredient, matched the way [`Pantry::add`] stores it.
    pub async fn remove_ingredient(&self, ingredient: &str) -> Result<bool, MealMatchError> {
        let mut pantry = self.pantry().await;
        let removed = pantry.remove(&ingredient.trim().to_lowercase());
        self.save_pantry(&pantry).await?;
        Ok(removed)
    }

    pub async fn clear_ingredients(&self) -> Result<(), MealMatchError> {
        self.save_pantry(&Pantry::new()).await
    }
}
