//! Firecrawl page scraping

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ensure_success, http_client, required_env, ScrapeClient};
use crate::error::{BlogError, Result};

#[derive(Clone, Debug)]
pub struct FirecrawlConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for FirecrawlConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.firecrawl.dev".into(),
            api_key: String::new(),
            timeout_secs: 60,
        }
    }
}

impl FirecrawlConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: required_env("FIRECRAWL_API_KEY")?,
            ..Default::default()
        })
    }
}

pub struct FirecrawlClient {
    client: reqwest::Client,
    config: FirecrawlConfig,
}

impl FirecrawlClient {
    pub fn new(config: FirecrawlConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(BlogError::Config("Firecrawl API key is empty".into()));
        }
        Ok(Self {
            client: http_client(config.timeout_secs)?,
            config,
        })
    }
}

#[async_trait]
impl ScrapeClient for FirecrawlClient {
    async fn scrape_markdown(&self, url: &str) -> Result<String> {
        let endpoint = format!("{}/v2/scrape", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&json!({"url": url, "formats": ["markdown"]}))
            .send()
            .await?;

        let body: Value = ensure_success("firecrawl", response).await?.json().await?;

        if body.get("success").and_then(Value::as_bool) == Some(false) {
            let reason = body.get("error").and_then(Value::as_str).unwrap_or("unknown error");
            return Err(BlogError::Integration {
                service: "firecrawl",
                message: reason.to_string(),
            });
        }

        body.pointer("/data/markdown")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| BlogError::Integration {
                service: "firecrawl",
                message: format!("no markdown returned for {url}"),
            })
    }

    fn name(&self) -> &str {
        "firecrawl"
    }
}
