//! Generate Image Tool
//!
//! Generates an image from a text prompt and returns its URL.

use std::sync::Arc;

use agent_core::{tool::ParameterSchema, AgentError, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};
use async_trait::async_trait;

use crate::integrations::ImageGenerator;

pub const GENERATE_IMAGE: &str = "generate_image";

/// Tool for text-to-image generation
pub struct GenerateImageTool {
    generator: Arc<dyn ImageGenerator>,
}

impl GenerateImageTool {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Tool for GenerateImageTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: GENERATE_IMAGE.into(),
            description: "Generate an image from a prompt. Returns the URL of the generated image.".into(),
            parameters: vec![ParameterSchema::required_string("prompt", "Description of the image")],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let prompt = call.str_arg("prompt")?;
        tracing::debug!(client = self.generator.name(), "Generating image");

        let url = self
            .generator
            .generate(prompt)
            .await
            .map_err(|e| AgentError::ToolExecution(e.to_string()))?;

        Ok(ToolResult::success(GENERATE_IMAGE, url))
    }
}
