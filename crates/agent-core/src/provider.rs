//! LLM Provider Strategy Pattern
//!
//! Defines a common interface for all LLM providers so agents work with any
//! backend without code changes.
//!
//! A request carries exactly one [`ResponseMode`]: plain text, tool calling,
//! or structured output. Tool access and a mandatory output schema are
//! mutually exclusive.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_core::provider::{CompletionOptions, LlmProvider};
//!
//! let provider = OpenAiProvider::new(config)?;
//! let completion = provider.complete(&messages, &CompletionOptions::text(generation)).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::message::Message;
use crate::tool::ToolSchema;

/// Sampling configuration for LLM generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "gpt-4o-mini")
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Top-p nucleus sampling
    #[serde(default)]
    pub top_p: Option<f32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".into(),
            temperature: None,
            max_tokens: None,
            top_p: None,
        }
    }
}

/// A mandatory JSON Schema the model response must satisfy
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputSchema {
    /// Schema name reported to the provider
    pub name: String,

    /// What the structure represents
    pub description: String,

    /// JSON Schema document
    pub schema: Value,

    /// Ask the provider for strict schema-constrained decoding
    #[serde(default = "default_strict")]
    pub strict: bool,
}

fn default_strict() -> bool {
    true
}

impl OutputSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
            strict: true,
        }
    }
}

/// What the model is allowed to return
#[derive(Clone, Debug, Default)]
pub enum ResponseMode {
    /// Free text only
    #[default]
    Text,
    /// Free text or requests for any of these tools
    Tools(Vec<ToolSchema>),
    /// A JSON document conforming to the schema, no tools
    Structured(OutputSchema),
}

/// Options for a single completion request
#[derive(Clone, Debug, Default)]
pub struct CompletionOptions {
    pub generation: GenerationOptions,
    pub mode: ResponseMode,
}

impl CompletionOptions {
    pub fn text(generation: GenerationOptions) -> Self {
        Self {
            generation,
            mode: ResponseMode::Text,
        }
    }

    pub fn with_tools(generation: GenerationOptions, tools: Vec<ToolSchema>) -> Self {
        let mode = if tools.is_empty() {
            ResponseMode::Text
        } else {
            ResponseMode::Tools(tools)
        };
        Self { generation, mode }
    }

    pub fn structured(generation: GenerationOptions, schema: OutputSchema) -> Self {
        Self {
            generation,
            mode: ResponseMode::Structured(schema),
        }
    }
}

/// Response from an LLM completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The assistant message, including any requested tool calls
    pub message: Message,

    /// Model that generated this response
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,

    /// Finish reason
    pub finish_reason: Option<FinishReason>,

    /// Refusal text when the model declined to produce structured output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refusal: Option<String>,
}

impl Completion {
    /// A plain final answer
    pub fn text(model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            message: Message::assistant(content),
            model: model.into(),
            usage: None,
            finish_reason: Some(FinishReason::Stop),
            refusal: None,
        }
    }

    /// A turn requesting tool calls
    pub fn tool_calls(model: impl Into<String>, calls: Vec<crate::tool::ToolCall>) -> Self {
        Self {
            message: Message::assistant_with_tool_calls("", calls),
            model: model.into(),
            usage: None,
            finish_reason: Some(FinishReason::ToolUse),
            refusal: None,
        }
    }

    /// Whether the model asked for tools
    pub fn is_tool_use(&self) -> bool {
        self.message.has_tool_calls()
    }
}

/// Token usage statistics
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Reason for completion finishing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolUse,
    ContentFilter,
    Other(String),
}

impl FinishReason {
    /// Map the provider's finish reason string
    pub fn from_provider(reason: &str) -> Self {
        match reason {
            "stop" => FinishReason::Stop,
            "length" => FinishReason::Length,
            "tool_calls" | "function_call" => FinishReason::ToolUse,
            "content_filter" => FinishReason::ContentFilter,
            other => FinishReason::Other(other.to_string()),
        }
    }
}

/// Strategy trait for LLM providers
///
/// Implement this trait to add support for new LLM backends.
/// Agents work exclusively through this interface.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logs and health output
    fn name(&self) -> &str;

    /// Check if the provider is reachable and configured correctly
    async fn health_check(&self) -> Result<bool>;

    /// Send the conversation and return the model's next message
    async fn complete(&self, messages: &[Message], options: &CompletionOptions) -> Result<Completion>;
}
