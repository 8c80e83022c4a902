//! Pexels stock photo search

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

use super::{ensure_success, http_client, required_env, StockImageClient, StockPhoto};
use crate::error::{BlogError, Result};

#[derive(Clone, Debug)]
pub struct PexelsConfig {
    pub base_url: String,
    pub api_key: String,
    /// `landscape`, `portrait` or `square`
    pub orientation: String,
    pub per_page: u32,
    pub timeout_secs: u64,
}

impl Default for PexelsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.pexels.com".into(),
            api_key: String::new(),
            orientation: "portrait".into(),
            per_page: 15,
            timeout_secs: 30,
        }
    }
}

impl PexelsConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: required_env("PEXELS_API_KEY")?,
            ..Default::default()
        })
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Deserialize)]
struct Photo {
    src: PhotoSource,
    #[serde(default)]
    alt: String,
}

#[derive(Deserialize)]
struct PhotoSource {
    original: String,
}

pub struct PexelsClient {
    client: reqwest::Client,
    config: PexelsConfig,
}

impl PexelsClient {
    pub fn new(config: PexelsConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(BlogError::Config("Pexels API key is empty".into()));
        }
        Ok(Self {
            client: http_client(config.timeout_secs)?,
            config,
        })
    }
}

#[async_trait]
impl StockImageClient for PexelsClient {
    async fn search_photos(&self, query: &str) -> Result<Vec<StockPhoto>> {
        let url = format!("{}/v1/search", self.config.base_url.trim_end_matches('/'));
        let per_page = self.config.per_page.to_string();
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, &self.config.api_key)
            .query(&[
                ("query", query),
                ("orientation", self.config.orientation.as_str()),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await?;

        let body: SearchResponse = ensure_success("pexels", response).await?.json().await?;
        Ok(body
            .photos
            .into_iter()
            .map(|p| StockPhoto {
                url: p.src.original,
                alt: p.alt,
            })
            .collect())
    }

    fn name(&self) -> &str {
        "pexels"
    }
}
