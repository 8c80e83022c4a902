//! Structured Output
//!
//! A single-shot agent: one model call, no tools, a mandatory output schema.
//! The response must parse as JSON, validate against the schema and
//! deserialize into the target type, otherwise the call fails with
//! [`AgentError::Formatting`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AgentError, Result};
use crate::message::Conversation;
use crate::observer::{AgentEvent, AgentObserver};
use crate::provider::{CompletionOptions, GenerationOptions, LlmProvider, OutputSchema};
use crate::reasoning::complete_with_timeout;
use crate::tool::validate_against_schema;

/// Structured agent configuration
#[derive(Clone, Debug)]
pub struct StructuredConfig {
    /// Name used in logs and events
    pub name: String,

    /// System instruction
    pub system_prompt: String,

    /// Schema the answer must satisfy
    pub schema: OutputSchema,

    /// Generation options
    pub generation: GenerationOptions,

    /// Time allowed for the model call
    pub model_timeout: Option<Duration>,
}

/// One-call agent returning a schema-validated value
pub struct StructuredAgent {
    provider: Arc<dyn LlmProvider>,
    config: StructuredConfig,
    observer: Option<Arc<dyn AgentObserver>>,
}

impl StructuredAgent {
    pub fn new(provider: Arc<dyn LlmProvider>, config: StructuredConfig) -> Self {
        Self {
            provider,
            config,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn AgentObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &StructuredConfig {
        &self.config
    }

    /// Ask the model and return the raw JSON value once it validates
    pub async fn invoke_value(&self, input: &str) -> Result<Value> {
        let conversation = Conversation::start(self.config.system_prompt.clone(), input);
        let options = CompletionOptions::structured(self.config.generation.clone(), self.config.schema.clone());

        let started = Instant::now();
        let result = complete_with_timeout(
            self.provider.as_ref(),
            conversation.messages(),
            &options,
            self.config.model_timeout,
        )
        .await;

        let completion = match result {
            Ok(completion) => completion,
            Err(e) => {
                self.finish(false);
                return Err(e);
            }
        };

        if let Some(observer) = &self.observer {
            observer.on_event(&AgentEvent::ModelTurn {
                agent: self.config.name.clone(),
                iteration: 1,
                tool_calls: 0,
                elapsed: started.elapsed(),
            });
        }

        let outcome = Self::parse(&self.config.schema, completion.refusal.as_deref(), &completion.message.content);
        self.finish(outcome.is_ok());
        outcome
    }

    /// Ask the model and deserialize the validated answer
    pub async fn invoke<T: DeserializeOwned>(&self, input: &str) -> Result<T> {
        let value = self.invoke_value(input).await?;
        serde_json::from_value(value).map_err(|e| AgentError::Formatting(e.to_string()))
    }

    fn parse(schema: &OutputSchema, refusal: Option<&str>, content: &str) -> Result<Value> {
        if let Some(reason) = refusal {
            return Err(AgentError::Formatting(format!("model refused: {reason}")));
        }

        let value: Value = serde_json::from_str(strip_code_fence(content))
            .map_err(|e| AgentError::Formatting(format!("response is not valid JSON: {e}")))?;

        validate_against_schema(&schema.schema, &value)
            .map_err(|e| AgentError::Formatting(format!("{} violates schema: {e}", schema.name)))?;

        Ok(value)
    }

    fn finish(&self, success: bool) {
        if let Some(observer) = &self.observer {
            observer.on_event(&AgentEvent::Finished {
                agent: self.config.name.clone(),
                success,
                iterations: 1,
                tool_executions: 0,
            });
        }
    }
}

/// Some models wrap JSON in a markdown fence even in JSON mode
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map_or(trimmed, str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::ScriptedProvider;
    use crate::provider::{Completion, ResponseMode};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Person {
        name: String,
        age: u32,
    }

    fn person_schema() -> OutputSchema {
        OutputSchema::new(
            "person",
            "A person",
            json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "age": {"type": "integer"}
                },
                "required": ["name", "age"],
                "additionalProperties": false
            }),
        )
    }

    fn agent(provider: Arc<ScriptedProvider>) -> StructuredAgent {
        StructuredAgent::new(
            provider,
            StructuredConfig {
                name: "formatter".into(),
                system_prompt: "Format the input.".into(),
                schema: person_schema(),
                generation: GenerationOptions::default(),
                model_timeout: None,
            },
        )
    }

    #[tokio::test]
    async fn test_valid_structured_output() {
        let provider = Arc::new(ScriptedProvider::from_completions(vec![Completion::text(
            "m",
            r#"{"name": "Ada", "age": 36}"#,
        )]));
        let person: Person = agent(provider.clone()).invoke("Ada is 36").await.unwrap();
        assert_eq!(person.name, "Ada");
        assert_eq!(person.age, 36);

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 1);
        assert!(matches!(&requests[0].mode, ResponseMode::Structured(s) if s.name == "person"));
    }

    #[tokio::test]
    async fn test_fenced_json_accepted() {
        let provider = Arc::new(ScriptedProvider::from_completions(vec![Completion::text(
            "m",
            "```json\n{\"name\": \"Ada\", \"age\": 36}\n```",
        )]));
        let person: Person = agent(provider).invoke("Ada").await.unwrap();
        assert_eq!(person.age, 36);
    }

    #[tokio::test]
    async fn test_schema_violation_is_formatting_error() {
        let provider = Arc::new(ScriptedProvider::from_completions(vec![Completion::text(
            "m",
            r#"{"name": "Ada", "age": "old", "extra": true}"#,
        )]));
        let err = agent(provider).invoke_value("Ada").await.unwrap_err();
        assert!(matches!(err, AgentError::Formatting(_)));
    }

    #[tokio::test]
    async fn test_prose_is_formatting_error() {
        let provider = Arc::new(ScriptedProvider::from_completions(vec![Completion::text(
            "m",
            "I could not do that.",
        )]));
        let err = agent(provider).invoke_value("?").await.unwrap_err();
        assert!(matches!(err, AgentError::Formatting(msg) if msg.contains("not valid JSON")));
    }

    #[tokio::test]
    async fn test_refusal_is_formatting_error() {
        let mut refused = Completion::text("m", "");
        refused.refusal = Some("policy".into());
        let provider = Arc::new(ScriptedProvider::from_completions(vec![refused]));
        let err = agent(provider).invoke_value("?").await.unwrap_err();
        assert!(matches!(err, AgentError::Formatting(msg) if msg.contains("policy")));
    }

    #[tokio::test]
    async fn test_provider_error_propagates_unchanged() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(AgentError::Auth("bad key".into()))]));
        let err = agent(provider).invoke_value("?").await.unwrap_err();
        assert!(matches!(err, AgentError::Auth(_)));
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
    }
}
