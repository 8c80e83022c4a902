//! Application State

use std::sync::Arc;

use agent_core::LlmProvider;
use blog_writer::BlogPipeline;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Blog generation and editing
    pub pipeline: Arc<BlogPipeline>,

    /// LLM provider, kept for health reporting
    pub provider: Arc<dyn LlmProvider>,
}
