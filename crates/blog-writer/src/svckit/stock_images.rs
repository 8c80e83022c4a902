//! Stock Images Tool
//!
//! Finds portrait stock photos for a query.

use std::sync::Arc;

use agent_core::{tool::ParameterSchema, AgentError, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};
use async_trait::async_trait;

use crate::integrations::StockImageClient;

pub const STOCK_IMAGES: &str = "stock_images";

/// Tool for looking up stock photos
pub struct StockImagesTool {
    client: Arc<dyn StockImageClient>,
}

impl StockImagesTool {
    pub fn new(client: Arc<dyn StockImageClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for StockImagesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: STOCK_IMAGES.into(),
            description: "Get stock images for a query. Returns a JSON list of images with url and alt text.".into(),
            parameters: vec![ParameterSchema::required_string("query", "What the images should show")],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let query = call.str_arg("query")?;
        tracing::debug!(query, client = self.client.name(), "Searching stock photos");

        let photos = self
            .client
            .search_photos(query)
            .await
            .map_err(|e| AgentError::ToolExecution(e.to_string()))?;

        Ok(ToolResult::success(STOCK_IMAGES, serde_json::to_string(&photos)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::MockStockImageClient;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_photos_as_json() {
        let tool = StockImagesTool::new(Arc::new(MockStockImageClient::new()));
        let call = ToolCall::new(STOCK_IMAGES, HashMap::from([("query".to_string(), json!("forest"))]));
        let result = tool.execute(&call).await.unwrap();

        let photos: Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(photos[0]["url"], "https://images.pexels.com/photos/forest-1.jpeg");
        assert_eq!(photos[0]["alt"], "forest photo 1");
    }
}
