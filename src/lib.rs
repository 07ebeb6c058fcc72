pub mod api;
pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod matching;
pub mod model;
pub mod normalize;
pub mod pantry;
pub mod pipelines;
pub mod samples;
pub mod store;

pub use builder::{RecipeScraper, RecipeScraperBuilder};
pub use client::{LocalStorage, MealMatchClient, Outcome};
pub use config::{load_config, AppConfig};
pub use error::MealMatchError;
pub use extractors::Strategy;
pub use matching::{match_recipes, score_recipe, MatchScore, RecipeMatch};
pub use model::Recipe;
pub use pantry::Pantry;
pub use samples::{generate_samples, SampleCatalog};
pub use store::RecipeStore;

/// Scrape recipes for a search term with the default configuration.
///
/// Falls back to placeholder recipes when the site yields nothing.
///
/// # Example
/// ```no_run
/// # async fn run() -> Result<(), mealmatch::MealMatchError> {
/// let recipes = mealmatch::scrape_recipes("ayam goreng").await?;
/// println!("found {} recipes", recipes.len());
/// # Ok(())
/// # }
/// ```
pub async fn scrape_recipes(term: &str) -> Result<Vec<Recipe>, MealMatchError> {
    RecipeScraper::builder().build()?.scrape(term).await
}
