//! OpenAI-compatible LLM Provider
//!
//! Implementation of `LlmProvider` over the chat-completions API, with native
//! tool calling and strict `json_schema` response formats.

use std::collections::HashMap;
use std::time::Duration;

use agent_core::{
    error::{AgentError, Result},
    message::{Message, Role},
    provider::{Completion, CompletionOptions, FinishReason, LlmProvider, ResponseMode, TokenUsage},
    tool::ToolCall,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

/// Provider configuration
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    /// API base URL (without the `/v1` suffix)
    pub base_url: String,

    /// Bearer token
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            api_key: String::new(),
            timeout_secs: 120,
        }
    }
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| AgentError::Config("OPENAI_API_KEY not set".into()))?;
        let base_url = std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com".into());
        let timeout_secs = std::env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(120);

        Ok(Self {
            base_url,
            api_key,
            timeout_secs,
        })
    }
}

/// OpenAI-compatible chat-completions provider
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(AgentError::Config("API key is empty".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Convert agent messages to the chat-completions wire format
    fn convert_messages(messages: &[Message]) -> Vec<Value> {
        messages
            .iter()
            .map(|m| match m.role {
                Role::System | Role::User => json!({
                    "role": m.role.to_string(),
                    "content": m.content,
                }),
                Role::Assistant if m.has_tool_calls() => {
                    let calls: Vec<Value> = m
                        .tool_calls
                        .iter()
                        .map(|call| {
                            json!({
                                "id": call.id,
                                "type": "function",
                                "function": {
                                    "name": call.name,
                                    "arguments": call.arguments_value().to_string(),
                                }
                            })
                        })
                        .collect();
                    let content = if m.content.is_empty() {
                        Value::Null
                    } else {
                        Value::String(m.content.clone())
                    };
                    json!({
                        "role": "assistant",
                        "content": content,
                        "tool_calls": calls,
                    })
                }
                Role::Assistant => json!({
                    "role": "assistant",
                    "content": m.content,
                }),
                Role::Tool => json!({
                    "role": "tool",
                    "tool_call_id": m.tool_call_id.clone().unwrap_or_default(),
                    "content": m.content,
                }),
            })
            .collect()
    }

    /// Build the request body
    fn build_payload(messages: &[Message], options: &CompletionOptions) -> Value {
        let generation = &options.generation;
        let mut payload = json!({
            "model": generation.model,
            "messages": Self::convert_messages(messages),
        });

        if let Some(temperature) = generation.temperature {
            payload["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = generation.max_tokens {
            payload["max_tokens"] = json!(max_tokens);
        }
        if let Some(top_p) = generation.top_p {
            payload["top_p"] = json!(top_p);
        }

        match &options.mode {
            ResponseMode::Text => {}
            ResponseMode::Tools(tools) => {
                let specs: Vec<Value> = tools
                    .iter()
                    .map(|tool| {
                        json!({
                            "type": "function",
                            "function": {
                                "name": tool.name,
                                "description": tool.description,
                                "parameters": tool.to_json_schema(),
                            }
                        })
                    })
                    .collect();
                payload["tools"] = Value::Array(specs);
            }
            ResponseMode::Structured(schema) => {
                payload["response_format"] = json!({
                    "type": "json_schema",
                    "json_schema": {
                        "name": schema.name,
                        "description": schema.description,
                        "schema": schema.schema,
                        "strict": schema.strict,
                    }
                });
            }
        }

        payload
    }

    /// Convert a chat-completions response into a completion
    fn parse_response(body: &Value, requested_model: &str) -> Result<Completion> {
        if let Some(error) = body.get("error") {
            return Err(AgentError::Provider(format!("API error: {error}")));
        }

        let choice = body
            .get("choices")
            .and_then(|c| c.get(0))
            .ok_or_else(|| AgentError::Parse("response has no choices".into()))?;
        let message = choice
            .get("message")
            .ok_or_else(|| AgentError::Parse("choice has no message".into()))?;

        let content = message
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let tool_calls = match message.get("tool_calls").and_then(Value::as_array) {
            Some(calls) => calls.iter().map(Self::parse_tool_call).collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        let usage = body.get("usage").map(|u| {
            let read = |key: &str| u.get(key).and_then(Value::as_u64).unwrap_or(0) as u32;
            TokenUsage {
                prompt_tokens: read("prompt_tokens"),
                completion_tokens: read("completion_tokens"),
                total_tokens: read("total_tokens"),
            }
        });

        Ok(Completion {
            message: Message::assistant_with_tool_calls(content, tool_calls),
            model: body
                .get("model")
                .and_then(Value::as_str)
                .unwrap_or(requested_model)
                .to_string(),
            usage,
            finish_reason: choice
                .get("finish_reason")
                .and_then(Value::as_str)
                .map(FinishReason::from_provider),
            refusal: message
                .get("refusal")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    fn parse_tool_call(raw: &Value) -> Result<ToolCall> {
        let id = raw
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| AgentError::Parse("tool call without id".into()))?;
        let function = raw
            .get("function")
            .ok_or_else(|| AgentError::Parse(format!("tool call {id} without function")))?;
        let name = function
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| AgentError::Parse(format!("tool call {id} without name")))?;

        let raw_args = function.get("arguments").and_then(Value::as_str).unwrap_or("");
        let arguments: HashMap<String, Value> = if raw_args.trim().is_empty() {
            HashMap::new()
        } else {
            serde_json::from_str(raw_args)
                .map_err(|e| AgentError::Parse(format!("arguments of tool call {id} are not a JSON object: {e}")))?
        };

        Ok(ToolCall::new(name, arguments).with_id(id))
    }

    fn map_transport_error(&self, err: &reqwest::Error) -> AgentError {
        if err.is_timeout() {
            AgentError::Timeout(self.config.timeout_secs)
        } else if err.is_connect() {
            AgentError::ProviderUnavailable(err.to_string())
        } else {
            AgentError::Provider(err.to_string())
        }
    }

    async fn post(&self, payload: &Value) -> Result<Value> {
        let response = self
            .client
            .post(self.endpoint("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| AgentError::Parse(format!("invalid response body: {e}")));
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AgentError::Auth(body),
            StatusCode::TOO_MANY_REQUESTS => AgentError::RateLimited(body),
            s if s.is_server_error() => AgentError::ProviderUnavailable(format!("{s}: {body}")),
            s => AgentError::Provider(format!("{s}: {body}")),
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.endpoint("models"))
            .bearer_auth(&self.config.api_key)
            .send()
            .await;

        match response {
            Ok(r) => Ok(r.status().is_success()),
            Err(e) => {
                tracing::warn!("Model provider health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(&self, messages: &[Message], options: &CompletionOptions) -> Result<Completion> {
        let payload = Self::build_payload(messages, options);
        tracing::debug!(
            model = %options.generation.model,
            messages = messages.len(),
            "Sending chat completion request"
        );

        let body = self.post(&payload).await?;
        Self::parse_response(&body, &options.generation.model)
    }
}
