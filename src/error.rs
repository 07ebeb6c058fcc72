use thiserror::Error;

/// Errors that can occur while scraping, storing or matching recipes
#[derive(Error, Debug)]
pub enum MealMatchError {
    /// Failed to fetch a page or call the API
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The remote answered with a non-success status
    #[error("HTTP error! status: {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// A URL could not be built or parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Reading or writing a file, or binding a socket, failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serializing or deserializing JSON failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Scraping produced nothing and the sample fallback is disabled
    #[error("No recipes found for '{0}'")]
    NoRecipesFound(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
