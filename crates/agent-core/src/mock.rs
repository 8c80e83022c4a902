//! Scripted provider for tests and offline demos.
//!
//! Replays a fixed sequence of completions and records every request it
//! receives, so callers can assert on the exact conversation sent each turn.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{AgentError, Result};
use crate::message::Message;
use crate::provider::{Completion, CompletionOptions, LlmProvider, ResponseMode};

/// A request as seen by the provider
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub mode: ResponseMode,
}

/// Provider that answers from a script
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<Completion>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedProvider {
    /// Responses are returned in order; an exhausted script is a provider error
    pub fn new(responses: Vec<Result<Completion>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Script made only of successful completions
    pub fn from_completions(completions: Vec<Completion>) -> Self {
        Self::new(completions.into_iter().map(Ok).collect())
    }

    /// Every request received so far
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    /// Responses not yet consumed
    pub async fn remaining(&self) -> usize {
        self.responses.lock().await.len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn complete(&self, messages: &[Message], options: &CompletionOptions) -> Result<Completion> {
        self.requests.lock().await.push(RecordedRequest {
            messages: messages.to_vec(),
            mode: options.mode.clone(),
        });

        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::Provider("script exhausted".into())))
    }
}
