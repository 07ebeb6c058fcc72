use crate::error::MealMatchError;
use async_trait::async_trait;

mod request;

pub use request::{RequestFetcher, DEFAULT_USER_AGENT};

/// Something that can turn a URL into page HTML.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, MealMatchError>;
}
