//! # agent-runtime
//!
//! Runtime providers for agent-core.
//!
//! ## Providers
//!
//! - **OpenAI-compatible** (default): any `/v1/chat/completions` endpoint with
//!   native tool calling and `json_schema` response formats. Local servers
//!   that expose the same API (Ollama, vLLM, LM Studio) work by pointing
//!   `base_url` at them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::openai::{OpenAiConfig, OpenAiProvider};
//!
//! let provider = OpenAiProvider::new(OpenAiConfig::from_env()?)?;
//! let agent = AgentBuilder::new()
//!     .provider(Arc::new(provider))
//!     .build()?;
//! ```

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "openai")]
pub use openai::{OpenAiConfig, OpenAiProvider};

// Re-export core types for convenience
pub use agent_core::{
    Agent, AgentBuilder, AgentError, LlmProvider, Message, Result, Role, StructuredAgent, Tool, ToolRegistry,
};
