//! Formatter Agent

use std::sync::Arc;

use agent_core::{AgentError, StructuredAgent, StructuredConfig};

use super::AgentContext;
use crate::error::{BlogError, Result};
use crate::model::BlogDocument;
use crate::schema;
use crate::FORMATTER_PROMPT;

/// Turns free text into a validated [`BlogDocument`] with one model call
pub struct FormatterAgent {
    agent: StructuredAgent,
}

impl FormatterAgent {
    pub fn new(ctx: &AgentContext) -> Self {
        let config = StructuredConfig {
            name: "formatter".into(),
            system_prompt: FORMATTER_PROMPT.into(),
            schema: schema::output_schema(),
            generation: ctx.settings.generation(),
            model_timeout: ctx.settings.model_timeout(),
        };
        let agent = StructuredAgent::new(Arc::clone(&ctx.provider), config);
        let agent = match &ctx.observer {
            Some(observer) => agent.with_observer(observer.clone()),
            None => agent,
        };
        Self { agent }
    }

    /// Structure the draft; anything short of a complete document is a
    /// formatting error
    pub async fn invoke(&self, draft: &str) -> Result<BlogDocument> {
        tracing::info!(chars = draft.len(), "Formatter started");

        let value = self.agent.invoke_value(draft).await.map_err(|e| match e {
            AgentError::Formatting(msg) => BlogError::Formatting(msg),
            other => BlogError::Agent(other),
        })?;

        schema::parse_document(&value).map_err(BlogError::Formatting)
    }
}
