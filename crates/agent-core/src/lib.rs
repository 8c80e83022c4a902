//! # agent-core
//!
//! Provider-agnostic tool-calling agent loop, closed tool registries and
//! schema-enforced structured output.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Agent                               │
//! │  ┌──────────────┐  ┌──────────────┐  ┌────────────────────┐  │
//! │  │ Tool-calling │  │    Tool      │  │   LlmProvider      │  │
//! │  │    Loop      │──│   Registry   │──│   (Strategy)       │  │
//! │  └──────────────┘  └──────────────┘  └────────────────────┘  │
//! │          │                                                   │
//! │          └── AgentObserver (one event per turn / tool)       │
//! └──────────────────────────────────────────────────────────────┘
//!
//! StructuredAgent: one call, no tools, mandatory OutputSchema
//! ```
//!
//! The `LlmProvider` trait lets agents run against any chat-completions
//! backend without changing agent logic.

pub mod error;
pub mod message;
pub mod mock;
pub mod observer;
pub mod provider;
pub mod reasoning;
pub mod structured;
pub mod tool;

pub use error::{AgentError, Result};
pub use message::{Conversation, Message, Role};
pub use observer::{AgentEvent, AgentObserver, TracingObserver};
pub use provider::{Completion, CompletionOptions, GenerationOptions, LlmProvider, OutputSchema, ResponseMode};
pub use reasoning::{Agent, AgentBuilder, AgentConfig, LoopState, RunReport};
pub use structured::{StructuredAgent, StructuredConfig};
pub use tool::{ParameterSchema, Tool, ToolCall, ToolRegistry, ToolResult, ToolSchema};
