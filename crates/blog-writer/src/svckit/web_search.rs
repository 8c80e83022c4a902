//! Web Search Tool
//!
//! Searches the web and returns the hits as JSON text.

use std::sync::Arc;

use agent_core::{tool::ParameterSchema, AgentError, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};
use async_trait::async_trait;

use crate::integrations::SearchClient;

pub const WEB_SEARCH: &str = "web_search";

/// Tool for searching the web
pub struct WebSearchTool {
    client: Arc<dyn SearchClient>,
}

impl WebSearchTool {
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: WEB_SEARCH.into(),
            description: "Search the web for a topic. Returns a JSON list of results with title, url and snippet."
                .into(),
            parameters: vec![ParameterSchema::required_string("query", "What to search for")],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let query = call.str_arg("query")?;
        tracing::debug!(query, client = self.client.name(), "Searching the web");

        let hits = self
            .client
            .search(query)
            .await
            .map_err(|e| AgentError::ToolExecution(e.to_string()))?;

        Ok(ToolResult::success(WEB_SEARCH, serde_json::to_string(&hits)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::MockSearchClient;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn call(query: &str) -> ToolCall {
        ToolCall::new(WEB_SEARCH, HashMap::from([("query".to_string(), json!(query))]))
    }

    #[tokio::test]
    async fn test_results_are_json() {
        let tool = WebSearchTool::new(Arc::new(MockSearchClient::new()));
        let result = tool.execute(&call("heat pumps")).await.unwrap();
        assert!(result.success);

        let hits: Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(hits.as_array().unwrap().len(), 3);
        assert!(hits[0]["snippet"].as_str().unwrap().contains("heat pumps"));
    }

    #[tokio::test]
    async fn test_client_failure_is_tool_error() {
        let tool = WebSearchTool::new(Arc::new(MockSearchClient::failing()));
        let err = tool.execute(&call("x")).await.unwrap_err();
        assert!(matches!(err, AgentError::ToolExecution(_)));
    }
}
