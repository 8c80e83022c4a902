//! Agent Observability
//!
//! Agents report one [`AgentEvent`] per model turn and per tool execution,
//! plus one when the run terminates. Observers are optional.

use std::time::Duration;

/// Event emitted by a running agent
#[derive(Clone, Debug)]
pub enum AgentEvent {
    /// The model answered one turn
    ModelTurn {
        agent: String,
        iteration: usize,
        tool_calls: usize,
        elapsed: Duration,
    },

    /// One tool call finished (successfully or not)
    ToolExecuted {
        agent: String,
        tool: String,
        call_id: String,
        success: bool,
        elapsed: Duration,
    },

    /// The run reached a terminal state
    Finished {
        agent: String,
        success: bool,
        iterations: usize,
        tool_executions: usize,
    },
}

/// Receives agent events
pub trait AgentObserver: Send + Sync {
    fn on_event(&self, event: &AgentEvent);
}

/// Writes events through `tracing` with structured fields
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl AgentObserver for TracingObserver {
    fn on_event(&self, event: &AgentEvent) {
        match event {
            AgentEvent::ModelTurn {
                agent,
                iteration,
                tool_calls,
                elapsed,
            } => tracing::info!(
                agent = %agent,
                iteration,
                tool_calls,
                elapsed_ms = elapsed.as_millis() as u64,
                "Model turn"
            ),
            AgentEvent::ToolExecuted {
                agent,
                tool,
                call_id,
                success,
                elapsed,
            } => {
                if *success {
                    tracing::info!(
                        agent = %agent,
                        tool = %tool,
                        call_id = %call_id,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "Tool executed"
                    );
                } else {
                    tracing::warn!(
                        agent = %agent,
                        tool = %tool,
                        call_id = %call_id,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "Tool failed"
                    );
                }
            }
            AgentEvent::Finished {
                agent,
                success,
                iterations,
                tool_executions,
            } => tracing::info!(
                agent = %agent,
                success,
                iterations,
                tool_executions,
                "Agent finished"
            ),
        }
    }
}
