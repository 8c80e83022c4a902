//! fal.ai image generation

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::{json, Value};

use super::{ensure_success, http_client, required_env, ImageGenerator};
use crate::error::{BlogError, Result};

#[derive(Clone, Debug)]
pub struct FalConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for FalConfig {
    fn default() -> Self {
        Self {
            base_url: "https://fal.run".into(),
            api_key: String::new(),
            model: "fal-ai/flux/dev".into(),
            timeout_secs: 120,
        }
    }
}

impl FalConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: required_env("FAL_API_KEY")?,
            ..Default::default()
        })
    }
}

pub struct FalClient {
    client: reqwest::Client,
    config: FalConfig,
}

impl FalClient {
    pub fn new(config: FalConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(BlogError::Config("fal API key is empty".into()));
        }
        Ok(Self {
            client: http_client(config.timeout_secs)?,
            config,
        })
    }
}

#[async_trait]
impl ImageGenerator for FalClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), self.config.model);
        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Key {}", self.config.api_key))
            .json(&json!({"prompt": prompt}))
            .send()
            .await?;

        let body: Value = ensure_success("fal", response).await?.json().await?;
        body.pointer("/images/0/url")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| BlogError::Integration {
                service: "fal",
                message: "response contained no images".into(),
            })
    }

    fn name(&self) -> &str {
        "fal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> FalClient {
        FalClient::new(FalConfig {
            base_url: server.uri(),
            api_key: "fal-test".into(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/fal-ai/flux/dev"))
            .and(header("authorization", "Key fal-test"))
            .and(body_json(json!({"prompt": "a lighthouse at dawn"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "images": [{"url": "https://fal.media/files/abc.jpg", "width": 1024, "height": 768}],
                "seed": 42
            })))
            .mount(&server)
            .await;

        let url = client(&server).generate("a lighthouse at dawn").await.unwrap();
        assert_eq!(url, "https://fal.media/files/abc.jpg");
    }

    #[tokio::test]
    async fn test_no_images() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"images": []})))
            .mount(&server)
            .await;

        let err = client(&server).generate("x").await.unwrap_err();
        assert!(matches!(err, BlogError::Integration { service: "fal", .. }));
    }
}
