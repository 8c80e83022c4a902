//! Scrape Page Tool
//!
//! Fetches a web page and returns its content as markdown.

use std::sync::Arc;

use agent_core::{tool::ParameterSchema, AgentError, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};
use async_trait::async_trait;

use crate::integrations::ScrapeClient;

pub const SCRAPE_PAGE: &str = "scrape_page";

/// Tool for scraping a page to markdown
pub struct ScrapePageTool {
    client: Arc<dyn ScrapeClient>,
}

impl ScrapePageTool {
    pub fn new(client: Arc<dyn ScrapeClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ScrapePageTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: SCRAPE_PAGE.into(),
            description: "Scrape the content of a web page. Returns the page as markdown.".into(),
            parameters: vec![ParameterSchema::required_string("url", "Absolute URL of the page")],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let url = call.str_arg("url")?;
        tracing::debug!(url, client = self.client.name(), "Scraping page");

        let markdown = self
            .client
            .scrape_markdown(url)
            .await
            .map_err(|e| AgentError::ToolExecution(e.to_string()))?;

        Ok(ToolResult::success(SCRAPE_PAGE, markdown))
    }
}
