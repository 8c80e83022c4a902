//! Blog Agents
//!
//! Researcher and writer are tool-calling agents; the formatter is a
//! single structured call.

mod formatter;
mod researcher;
mod writer;

pub use formatter::FormatterAgent;
pub use researcher::ResearcherAgent;
pub use writer::WriterAgent;

use std::sync::Arc;

use agent_core::{AgentBuilder, AgentObserver, LlmProvider};

use crate::config::BlogSettings;

/// What every agent is built from
#[derive(Clone)]
pub struct AgentContext {
    pub provider: Arc<dyn LlmProvider>,
    pub settings: BlogSettings,
    pub observer: Option<Arc<dyn AgentObserver>>,
}

impl AgentContext {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: BlogSettings) -> Self {
        Self {
            provider,
            settings,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn AgentObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Builder preloaded with provider, limits and observer
    pub(crate) fn builder(&self, name: &str, system_prompt: impl Into<String>) -> AgentBuilder {
        let builder = AgentBuilder::new()
            .provider(self.provider.clone())
            .name(name)
            .system_prompt(system_prompt)
            .generation(self.settings.generation())
            .max_iterations(self.settings.max_iterations)
            .model_timeout(self.settings.model_timeout());

        match &self.observer {
            Some(observer) => builder.observer(observer.clone()),
            None => builder,
        }
    }
}
