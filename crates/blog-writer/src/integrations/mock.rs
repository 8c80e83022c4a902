//! Mock Integrations
//!
//! For testing and demo purposes. Return static, realistic data and count
//! how often they are called.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{ImageGenerator, ScrapeClient, SearchClient, SearchHit, StockImageClient, StockPhoto};
use crate::error::{BlogError, Result};

fn unavailable(service: &'static str) -> BlogError {
    BlogError::Integration {
        service,
        message: "503 Service Unavailable: mock outage".into(),
    }
}

/// Search client returning three fixed hits per query
#[derive(Default)]
pub struct MockSearchClient {
    failing: bool,
    calls: AtomicUsize,
}

impl MockSearchClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every search fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(unavailable("mock-search"));
        }
        let slug = query.to_lowercase().replace(' ', "-");
        Ok((1..=3)
            .map(|i| SearchHit {
                title: format!("{query}: perspective {i}"),
                url: format!("https://news.example.com/{slug}/{i}"),
                snippet: format!("Key finding {i} about {query}."),
            })
            .collect())
    }

    fn name(&self) -> &str {
        "mock-search"
    }
}

/// Scraper returning a short markdown page for any URL
#[derive(Default)]
pub struct MockScrapeClient {
    failing: bool,
}

impl MockScrapeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { failing: true }
    }
}

#[async_trait]
impl ScrapeClient for MockScrapeClient {
    async fn scrape_markdown(&self, url: &str) -> Result<String> {
        if self.failing {
            return Err(unavailable("mock-scrape"));
        }
        Ok(format!("# Scraped\n\nSource: {url}\n\nThe page discusses the topic in depth."))
    }

    fn name(&self) -> &str {
        "mock-scrape"
    }
}

/// Stock photo client returning two portrait photos per query
#[derive(Default)]
pub struct MockStockImageClient;

impl MockStockImageClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StockImageClient for MockStockImageClient {
    async fn search_photos(&self, query: &str) -> Result<Vec<StockPhoto>> {
        let slug = query.to_lowercase().replace(' ', "-");
        Ok((1..=2)
            .map(|i| StockPhoto {
                url: format!("https://images.pexels.com/photos/{slug}-{i}.jpeg"),
                alt: format!("{query} photo {i}"),
            })
            .collect())
    }

    fn name(&self) -> &str {
        "mock-stock"
    }
}

/// Image generator returning a deterministic URL per prompt
#[derive(Default)]
pub struct MockImageGenerator {
    failing: bool,
}

impl MockImageGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { failing: true }
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if self.failing {
            return Err(unavailable("mock-image"));
        }
        Ok(format!("https://fal.media/files/generated/{}.jpg", prompt.len()))
    }

    fn name(&self) -> &str {
        "mock-image"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_search() {
        let client = MockSearchClient::new();
        let hits = client.search("Solar Power").await.unwrap();
        assert_eq!(hits.len(), 3);
        assert!(hits[0].url.contains("solar-power"));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_failing_mocks() {
        assert!(MockSearchClient::failing().search("x").await.is_err());
        assert!(MockScrapeClient::failing().scrape_markdown("https://x").await.is_err());
        assert!(MockImageGenerator::failing().generate("x").await.is_err());
    }
}
