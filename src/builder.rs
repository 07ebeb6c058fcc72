use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppConfig, ScraperConfig};
use crate::extractors::Strategy;
use crate::fetchers::{PageFetcher, RequestFetcher};
use crate::pipelines::{process, search_url};
use crate::samples::SampleCatalog;
use crate::{MealMatchError, Recipe};

/// Builder for configuring a [`RecipeScraper`]
#[derive(Default)]
pub struct RecipeScraperBuilder {
    config: ScraperConfig,
    catalog: SampleCatalog,
    fetcher: Option<Arc<dyn PageFetcher>>,
}

impl RecipeScraperBuilder {
    /// Start from an existing scraper configuration
    pub fn config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the site origin searched and used to resolve relative links
    ///
    /// # Example
    /// ```
    /// use mealmatch::RecipeScraper;
    ///
    /// let builder = RecipeScraper::builder()
    ///     .origin("https://cookpad.com");
    /// ```
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.config.origin = origin.into();
        self
    }

    /// Set the path of the search page below the origin
    pub fn search_path(mut self, path: impl Into<String>) -> Self {
        self.config.search_path = path.into();
        self
    }

    /// Choose between recipe cards and detail pages
    ///
    /// # Example
    /// ```
    /// use mealmatch::{RecipeScraper, Strategy};
    ///
    /// let builder = RecipeScraper::builder()
    ///     .strategy(Strategy::DetailPages)
    ///     .max_detail_pages(5);
    /// ```
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Cap the number of recipe pages followed per search
    pub fn max_detail_pages(mut self, count: usize) -> Self {
        self.config.max_detail_pages = count;
        self
    }

    /// Set a timeout for HTTP requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.config.timeout = duration.as_secs();
        self
    }

    /// Return an error instead of placeholder recipes when nothing is found
    pub fn without_sample_fallback(mut self) -> Self {
        self.config.fallback_to_samples = false;
        self
    }

    /// Replace the keyword table used for placeholder recipes
    pub fn catalog(mut self, catalog: SampleCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Use a custom page fetcher instead of the reqwest-based one
    pub fn fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Build the scraper
    ///
    /// # Errors
    /// Returns `MealMatchError` if:
    /// - The origin is not an absolute URL
    /// - `max_detail_pages` is zero
    /// - The HTTP client cannot be created
    pub fn build(self) -> Result<RecipeScraper, MealMatchError> {
        // Validates origin and search path up front so scraping never fails on them
        search_url(&self.config.origin, &self.config.search_path, "")?;

        if self.config.max_detail_pages == 0 {
            return Err(MealMatchError::BuilderError(
                "max_detail_pages must be at least 1".to_string(),
            ));
        }

        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(RequestFetcher::new(
                Some(Duration::from_secs(self.config.timeout)),
                &self.config.user_agent,
            )?),
        };

        Ok(RecipeScraper {
            config: self.config,
            catalog: self.catalog,
            fetcher,
        })
    }
}

/// Scrapes a recipe site for a search term.
pub struct RecipeScraper {
    config: ScraperConfig,
    catalog: SampleCatalog,
    fetcher: Arc<dyn PageFetcher>,
}

impl RecipeScraper {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use mealmatch::RecipeScraper;
    ///
    /// let scraper = RecipeScraper::builder().build();
    /// assert!(scraper.is_ok());
    /// ```
    pub fn builder() -> RecipeScraperBuilder {
        RecipeScraperBuilder::default()
    }

    /// Scraper set up from the `scraper` and `samples` configuration sections
    pub fn from_config(config: &AppConfig) -> Result<Self, MealMatchError> {
        Self::builder()
            .config(config.scraper.clone())
            .catalog(config.samples.clone())
            .build()
    }

    /// Scrape recipes for `term`, see [`crate::pipelines::scrape::process`]
    ///
    /// # Example
    /// ```no_run
    /// # use mealmatch::RecipeScraper;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let scraper = RecipeScraper::builder().build()?;
    /// let recipes = scraper.scrape("ayam goreng").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scrape(&self, term: &str) -> Result<Vec<Recipe>, MealMatchError> {
        process(term, &self.config, self.fetcher.as_ref(), &self.catalog).await
    }
}
