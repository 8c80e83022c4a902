//! Error Types for Blog Writer

use agent_core::AgentError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlogError>;

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Blog not found: {0}")]
    NotFound(String),

    #[error("Formatting failed: {0}")]
    Formatting(String),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("{service} request failed: {message}")]
    Integration { service: &'static str, message: String },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BlogError {
    /// HTTP status for this error
    pub fn status_code(&self) -> u16 {
        match self {
            BlogError::Validation(_) => 400,
            BlogError::NotFound(_) => 404,
            BlogError::Formatting(_) | BlogError::Agent(AgentError::Formatting(_)) => 422,
            BlogError::Agent(AgentError::ProviderUnavailable(_) | AgentError::Timeout(_)) => 503,
            BlogError::Agent(e) if e.is_model_invocation() => 502,
            BlogError::Agent(AgentError::ToolNotFound(_)) | BlogError::Integration { .. } | BlogError::Network(_) => {
                502
            }
            _ => 500,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            BlogError::Validation(_) => "VALIDATION_ERROR",
            BlogError::NotFound(_) => "NOT_FOUND",
            BlogError::Formatting(_) | BlogError::Agent(AgentError::Formatting(_)) => "FORMATTING_ERROR",
            BlogError::Agent(AgentError::ToolNotFound(_)) => "UNKNOWN_TOOL",
            BlogError::Agent(e) if e.is_model_invocation() => "MODEL_INVOCATION_ERROR",
            BlogError::Integration { .. } | BlogError::Network(_) => "INTEGRATION_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to API clients
    pub fn user_message(&self) -> String {
        match self {
            BlogError::Agent(e) => e.user_message(),
            BlogError::Store(_) | BlogError::Config(_) | BlogError::Serialization(_) => {
                "An unexpected error occurred.".into()
            }
            other => other.to_string(),
        }
    }
}
