//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider returned an error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// No model response within the configured timeout
    #[error("Model did not respond within {0} seconds")]
    Timeout(u64),

    /// Model requested a tool that is not in the agent's toolset
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool arguments did not match the tool's schema
    #[error("Tool validation error: {0}")]
    ToolValidation(String),

    /// Tool execution failed
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// Maximum iterations reached in the tool-calling loop
    #[error("Maximum iterations ({0}) reached")]
    MaxIterations(usize),

    /// Malformed model response (e.g. unparseable tool call arguments)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Model output does not satisfy the required output schema
    #[error("Formatting error: {0}")]
    Formatting(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limited
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AgentError::ProviderUnavailable(_) | AgentError::Timeout(_) | AgentError::RateLimited(_)
        )
    }

    /// Whether this error came from invoking the model (as opposed to tools,
    /// configuration or output formatting)
    pub fn is_model_invocation(&self) -> bool {
        matches!(
            self,
            AgentError::Provider(_)
                | AgentError::ProviderUnavailable(_)
                | AgentError::Timeout(_)
                | AgentError::RateLimited(_)
                | AgentError::Auth(_)
                | AgentError::Parse(_)
                | AgentError::MaxIterations(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Provider(msg) => format!("The AI service encountered an error: {msg}"),
            AgentError::ProviderUnavailable(_) | AgentError::Timeout(_) => {
                "The AI service is currently unavailable. Please try again.".into()
            }
            AgentError::ToolNotFound(name) => format!("The tool '{name}' is not available."),
            AgentError::ToolValidation(msg) => format!("Invalid tool input: {msg}"),
            AgentError::ToolExecution(msg) => format!("Tool error: {msg}"),
            AgentError::MaxIterations(_) => {
                "The request took too long to process. Please try a simpler prompt.".into()
            }
            AgentError::Formatting(msg) => format!("The response could not be structured: {msg}"),
            AgentError::RateLimited(_) => "Too many requests to the AI service. Please wait a moment.".into(),
            AgentError::Auth(_) => "Authentication with the AI service failed. Check the API key.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }
}
