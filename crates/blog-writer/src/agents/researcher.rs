//! Researcher Agent

use std::sync::Arc;

use agent_core::{Agent, RunReport};

use super::AgentContext;
use crate::error::Result;
use crate::integrations::{ScrapeClient, SearchClient};
use crate::svckit::{ScrapePageTool, WebSearchTool};
use crate::RESEARCHER_PROMPT;

/// Researches a topic or a set of URLs with web search and page scraping
pub struct ResearcherAgent {
    agent: Agent,
}

impl ResearcherAgent {
    pub fn new(ctx: &AgentContext, search: Arc<dyn SearchClient>, scraper: Arc<dyn ScrapeClient>) -> Result<Self> {
        let agent = ctx
            .builder("researcher", RESEARCHER_PROMPT)
            .tool(WebSearchTool::new(search))
            .tool(ScrapePageTool::new(scraper))
            .build()?;
        Ok(Self { agent })
    }

    /// Research summary for the prompt
    pub async fn invoke(&self, prompt: &str) -> Result<String> {
        tracing::info!(chars = prompt.len(), "Researcher started");
        Ok(self.agent.run(prompt).await?)
    }

    /// Run and report how the loop ended
    pub async fn invoke_detailed(&self, prompt: &str) -> RunReport {
        self.agent.run_detailed(prompt).await
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.agent.tools().names()
    }
}
