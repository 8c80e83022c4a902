//! Tool-Calling Loop
//!
//! The agent sends the conversation to the model, runs any tools the model
//! asks for, appends their results and asks again, until the model answers
//! without tool calls.
//!
//! ```text
//!            tool calls                 results appended
//! AWAITING_MODEL ──────▶ EXECUTING_TOOLS ───────────────▶ AWAITING_MODEL
//!      │  │                     │
//!      │  └─ final answer ─▶ DONE
//!      └──── model error / cap ─▶ FAILED ◀── unknown tool
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{AgentError, Result};
use crate::message::{Conversation, Message};
use crate::observer::{AgentEvent, AgentObserver};
use crate::provider::{Completion, CompletionOptions, GenerationOptions, LlmProvider};
use crate::tool::{Tool, ToolCall, ToolRegistry};

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";
const DEFAULT_MAX_ITERATIONS: usize = 10;
const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(120);

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Name used in logs and events
    pub name: String,

    /// System instruction
    pub system_prompt: String,

    /// Maximum model turns before the run fails
    pub max_iterations: usize,

    /// Generation options
    pub generation: GenerationOptions,

    /// Time allowed for a single model call
    pub model_timeout: Option<Duration>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "agent".into(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            generation: GenerationOptions::default(),
            model_timeout: Some(DEFAULT_MODEL_TIMEOUT),
        }
    }
}

/// Loop state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    AwaitingModel,
    ExecutingTools,
    Done,
    Failed,
}

impl LoopState {
    pub fn is_terminal(self) -> bool {
        matches!(self, LoopState::Done | LoopState::Failed)
    }
}

/// Outcome of one agent invocation
#[derive(Debug)]
pub struct RunReport {
    /// `Done` or `Failed`
    pub state: LoopState,

    /// Final answer, or the failure description
    pub output: String,

    /// Set when `state` is `Failed`
    pub error: Option<AgentError>,

    /// Model turns taken
    pub iterations: usize,

    /// Tool calls executed
    pub tool_executions: usize,

    /// The full conversation of this invocation
    pub conversation: Conversation,
}

impl RunReport {
    /// The final answer, or the error that ended the run
    pub fn into_result(self) -> Result<String> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.output),
        }
    }
}

/// Send one request, bounded by `timeout`
pub(crate) async fn complete_with_timeout(
    provider: &dyn LlmProvider,
    messages: &[Message],
    options: &CompletionOptions,
    timeout: Option<Duration>,
) -> Result<Completion> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, provider.complete(messages, options))
            .await
            .map_err(|_| AgentError::Timeout(limit.as_secs()))?,
        None => provider.complete(messages, options).await,
    }
}

/// An LLM bound to a system instruction and a closed toolset
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
    observer: Option<Arc<dyn AgentObserver>>,
}

impl Agent {
    /// Create a new agent
    pub fn new(provider: Arc<dyn LlmProvider>, tools: Arc<ToolRegistry>, config: AgentConfig) -> Self {
        Self {
            provider,
            tools,
            config,
            observer: None,
        }
    }

    /// Attach an observer
    pub fn with_observer(mut self, observer: Arc<dyn AgentObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Run the loop on a user prompt and return the final answer
    pub async fn run(&self, prompt: &str) -> Result<String> {
        self.run_detailed(prompt).await.into_result()
    }

    /// Run the loop on a user prompt and report how it ended
    pub async fn run_detailed(&self, prompt: &str) -> RunReport {
        let mut conversation = Conversation::start(self.config.system_prompt.clone(), prompt);
        let options = CompletionOptions::with_tools(self.config.generation.clone(), self.tools.schemas());

        let mut state = LoopState::AwaitingModel;
        let mut pending: Vec<ToolCall> = Vec::new();
        let mut failure: Option<AgentError> = None;
        let mut iterations = 0;
        let mut tool_executions = 0;

        while !state.is_terminal() {
            state = match state {
                LoopState::AwaitingModel => {
                    if iterations >= self.config.max_iterations {
                        failure = Some(AgentError::MaxIterations(self.config.max_iterations));
                        LoopState::Failed
                    } else {
                        iterations += 1;
                        let started = Instant::now();
                        match complete_with_timeout(
                            self.provider.as_ref(),
                            conversation.messages(),
                            &options,
                            self.config.model_timeout,
                        )
                        .await
                        {
                            Ok(completion) => {
                                pending = completion.message.tool_calls.clone();
                                self.emit(AgentEvent::ModelTurn {
                                    agent: self.config.name.clone(),
                                    iteration: iterations,
                                    tool_calls: pending.len(),
                                    elapsed: started.elapsed(),
                                });
                                let empty_answer = pending.is_empty() && completion.message.content.trim().is_empty();
                                conversation.push(completion.message);
                                if empty_answer {
                                    tracing::error!(agent = %self.config.name, "Model returned an empty final answer");
                                    failure = Some(AgentError::Parse("model returned an empty final answer".into()));
                                    LoopState::Failed
                                } else if pending.is_empty() {
                                    LoopState::Done
                                } else {
                                    LoopState::ExecutingTools
                                }
                            }
                            Err(e) => {
                                tracing::error!(agent = %self.config.name, error = %e, "Model invocation failed");
                                failure = Some(e);
                                LoopState::Failed
                            }
                        }
                    }
                }
                LoopState::ExecutingTools => {
                    let calls = std::mem::take(&mut pending);
                    match self
                        .execute_calls(&calls, &mut conversation, &mut tool_executions)
                        .await
                    {
                        Ok(()) => LoopState::AwaitingModel,
                        Err(e) => {
                            tracing::error!(agent = %self.config.name, error = %e, "Tool dispatch failed");
                            failure = Some(e);
                            LoopState::Failed
                        }
                    }
                }
                terminal => terminal,
            };
        }

        self.emit(AgentEvent::Finished {
            agent: self.config.name.clone(),
            success: failure.is_none(),
            iterations,
            tool_executions,
        });

        let output = match &failure {
            Some(e) => e.to_string(),
            None => conversation
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default(),
        };

        RunReport {
            state,
            output,
            error: failure,
            iterations,
            tool_executions,
            conversation,
        }
    }

    /// Run each call in request order and append its result
    async fn execute_calls(
        &self,
        calls: &[ToolCall],
        conversation: &mut Conversation,
        tool_executions: &mut usize,
    ) -> Result<()> {
        for call in calls {
            tracing::debug!(agent = %self.config.name, tool = %call.name, args = ?call.arguments, "Executing tool");
            let started = Instant::now();
            let result = self.tools.dispatch(call).await?;
            *tool_executions += 1;

            self.emit(AgentEvent::ToolExecuted {
                agent: self.config.name.clone(),
                tool: call.name.clone(),
                call_id: call.id.clone(),
                success: result.success,
                elapsed: started.elapsed(),
            });

            conversation.push(Message::tool(call.id.clone(), result.content()));
        }
        Ok(())
    }

    fn emit(&self, event: AgentEvent) {
        if let Some(observer) = &self.observer {
            observer.on_event(&event);
        }
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Builder for Agent configuration
pub struct AgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    tools: Vec<Arc<dyn Tool>>,
    config: AgentConfig,
    observer: Option<Arc<dyn AgentObserver>>,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tools: Vec::new(),
            config: AgentConfig::default(),
            observer: None,
        }
    }

    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.push(Arc::new(tool));
        self
    }

    pub fn shared_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    pub fn generation(mut self, generation: GenerationOptions) -> Self {
        self.config.generation = generation;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.generation.temperature = Some(temp);
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn model_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.model_timeout = timeout;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn AgentObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::Config("Provider is required".into()))?;
        if self.config.max_iterations == 0 {
            return Err(AgentError::Config("max_iterations must be at least 1".into()));
        }

        let mut registry = ToolRegistry::new();
        for tool in self.tools {
            registry.register_shared(tool)?;
        }

        let mut agent = Agent::new(provider, Arc::new(registry), self.config);
        agent.observer = self.observer;
        Ok(agent)
    }
}
