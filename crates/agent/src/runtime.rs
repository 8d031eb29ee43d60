use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::chat::{ChatRequest, Message, ToolCall};
use crate::llm::{LlmClient, LlmError};
use crate::prompt::INVENTORY_MANAGER;
use crate::session::Session;
use crate::tools::ToolRegistry;

pub const DEFAULT_MAX_TURNS: u32 = 10;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("model returned no choices")]
    EmptyResponse,
    #[error("model did not produce a final answer within {max_turns} turns")]
    MaxTurnsExceeded { max_turns: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolInvocation {
    pub name: String,
    pub arguments: String,
    pub output: String,
    pub is_error: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutput {
    pub final_output: String,
    pub tool_invocations: Vec<ToolInvocation>,
    pub turns: u32,
}

/// Drives the model through tool calls until it answers in plain text.
///
/// The model decides which tools to call and in what order; the runtime only
/// executes them against the session store, one at a time, in the order the
/// model listed them.
pub struct AgentRuntime {
    llm: Arc<dyn LlmClient>,
    registry: ToolRegistry,
    model: String,
    instructions: String,
    max_turns: u32,
}

impl AgentRuntime {
    pub fn new(llm: Arc<dyn LlmClient>, registry: ToolRegistry, model: impl Into<String>) -> Self {
        Self {
            llm,
            registry,
            model: model.into(),
            instructions: INVENTORY_MANAGER.to_string(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns.max(1);
        self
    }

    pub async fn run(&self, session: &mut Session, input: &str) -> Result<RunOutput, AgentError> {
        let mut messages = vec![Message::system(&self.instructions), Message::user(input)];
        let mut tool_invocations = Vec::new();

        info!(event_name = "agent.run.started", model = %self.model, "agent run started");

        for turn in 1..=self.max_turns {
            let request = ChatRequest {
                model: self.model.clone(),
                messages: messages.clone(),
                tools: self.registry.definitions(),
                tool_choice: Some("auto".to_string()),
            };

            let response = self.llm.complete(&request).await?;
            let message = response.first_message().cloned().ok_or(AgentError::EmptyResponse)?;

            if message.tool_calls.is_empty() {
                info!(
                    event_name = "agent.run.completed",
                    turns = turn,
                    tool_calls = tool_invocations.len(),
                    "agent produced final answer"
                );
                return Ok(RunOutput {
                    final_output: message.content.unwrap_or_default(),
                    tool_invocations,
                    turns: turn,
                });
            }

            let calls = message.tool_calls.clone();
            messages.push(message);
            for call in calls {
                let invocation = self.invoke(session, &call, turn);
                messages.push(Message::tool_result(&call.id, &invocation.output));
                tool_invocations.push(invocation);
            }
        }

        warn!(event_name = "agent.run.turn_limit", max_turns = self.max_turns, "turn limit reached");
        Err(AgentError::MaxTurnsExceeded { max_turns: self.max_turns })
    }

    fn invoke(&self, session: &mut Session, call: &ToolCall, turn: u32) -> ToolInvocation {
        let name = &call.function.name;
        let arguments = &call.function.arguments;

        match self.registry.dispatch(name, arguments, &mut session.store) {
            Ok(output) => {
                debug!(
                    event_name = "agent.tool.invoked",
                    tool = %name,
                    turn,
                    arguments = %arguments,
                    output = %output,
                    "tool call succeeded"
                );
                ToolInvocation {
                    name: name.clone(),
                    arguments: arguments.clone(),
                    output,
                    is_error: false,
                }
            }
            Err(error) => {
                warn!(
                    event_name = "agent.tool.rejected",
                    tool = %name,
                    turn,
                    arguments = %arguments,
                    error_class = error.error_class(),
                    error = %error,
                    "tool call rejected"
                );
                ToolInvocation {
                    name: name.clone(),
                    arguments: arguments.clone(),
                    output: format!("error: {error}"),
                    is_error: true,
                }
            }
        }
    }
}
