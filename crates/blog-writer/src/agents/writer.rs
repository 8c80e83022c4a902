//! Writer Agent

use std::sync::Arc;

use agent_core::{Agent, RunReport};

use super::AgentContext;
use crate::error::Result;
use crate::integrations::{ImageGenerator, StockImageClient};
use crate::schema;
use crate::svckit::{GenerateImageTool, StockImagesTool};
use crate::WRITER_PROMPT;

/// Writer instruction followed by the blog schema it should answer in
pub fn writer_system_prompt() -> String {
    format!("{WRITER_PROMPT}\n{}", schema::schema_prompt_text())
}

/// Drafts a blog from research, fetching images with its tools
///
/// The draft is asked to follow the blog schema but is not checked; the
/// formatter enforces it.
pub struct WriterAgent {
    agent: Agent,
}

impl WriterAgent {
    pub fn new(
        ctx: &AgentContext,
        stock_images: Arc<dyn StockImageClient>,
        image_generator: Arc<dyn ImageGenerator>,
    ) -> Result<Self> {
        let agent = ctx
            .builder("writer", writer_system_prompt())
            .tool(StockImagesTool::new(stock_images))
            .tool(GenerateImageTool::new(image_generator))
            .build()?;
        Ok(Self { agent })
    }

    /// Draft blog text for the research summary
    pub async fn invoke(&self, research: &str) -> Result<String> {
        tracing::info!(chars = research.len(), "Writer started");
        Ok(self.agent.run(research).await?)
    }

    pub async fn invoke_detailed(&self, research: &str) -> RunReport {
        self.agent.run_detailed(research).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BlogSettings;
    use crate::integrations::{MockImageGenerator, MockStockImageClient};
    use crate::svckit::GENERATE_IMAGE;
    use agent_core::mock::ScriptedProvider;
    use agent_core::provider::Completion;
    use agent_core::{LoopState, ToolCall};
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_prompt_embeds_schema() {
        let prompt = writer_system_prompt();
        assert!(prompt.starts_with(WRITER_PROMPT));
        assert!(prompt.contains(schema::SCHEMA_NAME));
    }

    #[tokio::test]
    async fn test_failing_image_tool_is_reported_to_model() {
        let provider = Arc::new(ScriptedProvider::from_completions(vec![
            Completion::tool_calls(
                "m",
                vec![ToolCall::new(GENERATE_IMAGE, HashMap::from([("prompt".to_string(), json!("a dam"))]))
                    .with_id("g1")],
            ),
            Completion::text("m", "{\"title\": \"Hydro\", \"blocks\": []}"),
        ]));
        let ctx = AgentContext::new(provider.clone(), BlogSettings::default());
        let writer = WriterAgent::new(
            &ctx,
            Arc::new(MockStockImageClient::new()),
            Arc::new(MockImageGenerator::failing()),
        )
        .unwrap();

        let report = writer.invoke_detailed("hydro research").await;
        assert_eq!(report.state, LoopState::Done);

        let tool_message = report.conversation.tool_messages().next().unwrap();
        assert!(tool_message.content.starts_with("Error:"));
        assert!(tool_message.content.contains("mock outage"));

        let second = &provider.requests().await[1];
        assert_eq!(second.messages.len(), 4);
    }
}
