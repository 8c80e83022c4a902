//! External Service Integrations
//!
//! Client traits for the services the agents' tools call, with one HTTP
//! implementation each and in-memory mocks for tests.

mod fal;
mod firecrawl;
mod mock;
mod pexels;
mod tavily;

pub use fal::{FalClient, FalConfig};
pub use firecrawl::{FirecrawlClient, FirecrawlConfig};
pub use mock::{MockImageGenerator, MockScrapeClient, MockSearchClient, MockStockImageClient};
pub use pexels::{PexelsClient, PexelsConfig};
pub use tavily::{TavilyClient, TavilyConfig};

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{BlogError, Result};

/// One web search hit
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// One stock photo
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockPhoto {
    /// Original-size source URL
    pub url: String,
    pub alt: String,
}

/// Web search (Strategy pattern)
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;

    fn name(&self) -> &str;
}

/// Fetch a page as markdown
#[async_trait]
pub trait ScrapeClient: Send + Sync {
    async fn scrape_markdown(&self, url: &str) -> Result<String>;

    fn name(&self) -> &str;
}

/// Stock photo search
#[async_trait]
pub trait StockImageClient: Send + Sync {
    async fn search_photos(&self, query: &str) -> Result<Vec<StockPhoto>>;

    fn name(&self) -> &str;
}

/// Text-to-image generation, returning the URL of the generated image
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    fn name(&self) -> &str;
}

pub(crate) fn http_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| BlogError::Config(e.to_string()))
}

/// Turn a non-2xx response into an integration error carrying the body
pub(crate) async fn ensure_success(service: &'static str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BlogError::Integration {
        service,
        message: format!("{status}: {body}"),
    })
}

pub(crate) fn required_env(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| BlogError::Config(format!("{key} not set")))
}

pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
