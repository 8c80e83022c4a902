//! Tavily web search

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{ensure_success, env_or, http_client, required_env, SearchClient, SearchHit};
use crate::error::{BlogError, Result};

#[derive(Clone, Debug)]
pub struct TavilyConfig {
    pub base_url: String,
    pub api_key: String,
    /// `general` or `news`
    pub topic: String,
    pub max_results: u32,
    pub timeout_secs: u64,
}

impl Default for TavilyConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.tavily.com".into(),
            api_key: String::new(),
            topic: "general".into(),
            max_results: 5,
            timeout_secs: 30,
        }
    }
}

impl TavilyConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: required_env("TAVILY_API_KEY")?,
            max_results: env_or("TAVILY_MAX_RESULTS", 5),
            ..Default::default()
        })
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Deserialize)]
struct RawResult {
    #[serde(default)]
    title: String,
    url: String,
    #[serde(default)]
    content: String,
}

pub struct TavilyClient {
    client: reqwest::Client,
    config: TavilyConfig,
}

impl TavilyClient {
    pub fn new(config: TavilyConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(BlogError::Config("Tavily API key is empty".into()));
        }
        Ok(Self {
            client: http_client(config.timeout_secs)?,
            config,
        })
    }
}

#[async_trait]
impl SearchClient for TavilyClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&json!({
                "query": query,
                "topic": self.config.topic,
                "max_results": self.config.max_results,
            }))
            .send()
            .await?;

        let body: SearchResponse = ensure_success("tavily", response).await?.json().await?;
        Ok(body
            .results
            .into_iter()
            .map(|r| SearchHit {
                title: r.title,
                url: r.url,
                snippet: r.content,
            })
            .collect())
    }

    fn name(&self) -> &str {
        "tavily"
    }
}
