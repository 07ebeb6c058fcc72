use crate::error::MealMatchError;
use crate::extractors::{Strategy, DEFAULT_MIN_INSTRUCTION_LEN};
use crate::fetchers::DEFAULT_USER_AGENT;
use crate::samples::SampleCatalog;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP API settings
    pub server: ServerConfig,
    /// Recipe store location
    pub store: StoreConfig,
    /// Where and how recipes are scraped
    pub scraper: ScraperConfig,
    /// Command-line client settings
    pub client: ClientConfig,
    /// Keyword table for placeholder recipes
    pub samples: SampleCatalog,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Prefix the API routes are mounted under; empty mounts them at the root
    pub api_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            api_prefix: "/api".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "recipes.json".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScraperConfig {
    /// Site origin; relative links are resolved against it
    pub origin: String,
    /// Path segment of the search page, the term is appended after it
    pub search_path: String,
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout: u64,
    pub strategy: Strategy,
    /// Upper bound on recipe pages followed per search
    pub max_detail_pages: usize,
    /// Instruction entries must be longer than this many characters
    pub min_instruction_len: usize,
    /// Return placeholder recipes instead of an error when nothing is found
    pub fallback_to_samples: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            origin: "https://cookpad.com".to_string(),
            search_path: "search".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: default_timeout(),
            strategy: Strategy::default(),
            max_detail_pages: 10,
            min_instruction_len: DEFAULT_MIN_INSTRUCTION_LEN,
            fallback_to_samples: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the API, including its prefix
    pub api_url: String,
    /// JSON file holding the pantry and the offline recipe cache
    pub state_path: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3001/api".to_string(),
            state_path: "mealmatch-state.json".to_string(),
            timeout: 10,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from `mealmatch.toml` and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MEALMATCH__ prefix
    /// 2. mealmatch.toml file in current directory (or `path` when given)
    /// 3. Default values
    ///
    /// Environment variable format: MEALMATCH__SCRAPER__MAX_DETAIL_PAGES
    pub fn load(path: Option<&Path>) -> Result<Self, MealMatchError> {
        Ok(load_config(path)?)
    }
}

pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("mealmatch").required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        // Use double underscore for nested: MEALMATCH__SERVER__PORT
        .add_source(
            Environment::with_prefix("MEALMATCH")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
