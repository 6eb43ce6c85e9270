//! Run Chat use case.
//!
//! Drives one chat run: opens a model session seeded with the conversation
//! history and the registered tools, sends the new user message, then keeps
//! executing requested tools and feeding their results back until the model
//! answers with plain text.
//!
//! ```text
//! open(history, tools) ─▶ send(last_message)
//!                              │
//!            ┌─────────────────┘
//!            ▼
//!     tool calls? ── no ──▶ reply
//!            │ yes
//!     turns += 1 ── > max_turns ──▶ LoopLimitExceeded
//!            │
//!     invoke_all (concurrent, request order)
//!            │
//!     send_tool_results ──▶ (back to "tool calls?")
//! ```
//!
//! Tool failures never abort the run; they are returned to the model as
//! failed results. Session failures abort immediately with no partial reply.

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use crate::use_cases::invoke_tools::ToolInvoker;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use toolchat_domain::util::preview;
use toolchat_domain::{ConversationHistory, ErrorKind, ToolCall, ToolResult};
use tracing::{debug, info, warn};

/// Errors that abort a chat run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunChatError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Tool loop exceeded {max_turns} turns")]
    LoopLimitExceeded { max_turns: usize },

    #[error("No response from model")]
    EmptyResponse,
}

impl RunChatError {
    /// Error kind reported at the request boundary.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunChatError::Gateway(e) => e.kind(),
            RunChatError::LoopLimitExceeded { .. } => ErrorKind::LoopLimitExceeded,
            RunChatError::EmptyResponse => ErrorKind::UnknownError,
        }
    }
}

/// Input for the [`RunChatUseCase`].
#[derive(Debug, Clone)]
pub struct RunChatInput {
    /// Every turn before the new user message.
    pub history: ConversationHistory,
    /// The new user message.
    pub last_message: String,
    /// Turn cap and per-tool time limit.
    pub execution: ExecutionParams,
}

impl RunChatInput {
    pub fn new(
        history: ConversationHistory,
        last_message: impl Into<String>,
        execution: ExecutionParams,
    ) -> Self {
        Self {
            history,
            last_message: last_message.into(),
            execution,
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunChatOutput {
    pub reply: String,
    pub model: String,
    /// Intermediate (tool-calling) responses handled before the reply.
    pub turns: usize,
    /// Total tool calls executed across all turns.
    pub tool_calls: usize,
}

/// Use case for running a chat request through the tool loop.
///
/// Holds only shared, read-only dependencies; one instance serves every
/// concurrent run.
#[derive(Clone)]
pub struct RunChatUseCase {
    gateway: Arc<dyn LlmGateway>,
    tool_executor: Arc<dyn ToolExecutorPort>,
    tool_schema: Arc<dyn ToolSchemaPort>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunChatUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        tool_executor: Arc<dyn ToolExecutorPort>,
        tool_schema: Arc<dyn ToolSchemaPort>,
    ) -> Self {
        Self {
            gateway,
            tool_executor,
            tool_schema,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Model identifier runs are opened against.
    pub fn model_name(&self) -> &str {
        self.gateway.model_name()
    }

    /// Execute one chat run.
    pub async fn execute(&self, input: RunChatInput) -> Result<RunChatOutput, RunChatError> {
        info!(
            "Starting chat run ({} prior messages): {}",
            input.history.len(),
            preview(&input.last_message, 100)
        );

        self.conversation_logger.log(ConversationEvent::new(
            "user_message",
            json!({
                "history_len": input.history.len(),
                "text": input.last_message,
            }),
        ));

        match self.run(&input).await {
            Ok(output) => {
                info!(
                    "Chat run completed in {} tool turns ({} tool calls)",
                    output.turns, output.tool_calls
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "final_reply",
                    json!({
                        "model": output.model,
                        "turns": output.turns,
                        "bytes": output.reply.len(),
                        "text": output.reply,
                    }),
                ));
                Ok(output)
            }
            Err(e) => {
                warn!("Chat run failed: {}", e);
                self.conversation_logger.log(ConversationEvent::new(
                    "run_failed",
                    json!({
                        "error": e.kind().as_str(),
                        "message": e.to_string(),
                    }),
                ));
                Err(e)
            }
        }
    }

    async fn run(&self, input: &RunChatInput) -> Result<RunChatOutput, RunChatError> {
        let tools = self
            .tool_schema
            .all_tools_schema(self.tool_executor.tool_spec());
        let session = self.gateway.open_session(&input.history, &tools).await?;

        debug!(
            "Chat: using model {}, {} tools available",
            session.model(),
            tools.len()
        );

        let invoker = ToolInvoker::new(self.tool_executor.clone())
            .with_timeout(input.execution.tool_timeout);
        let max_turns = input.execution.max_turns;
        let mut turn_count = 0;
        let mut tool_call_count = 0;

        let mut response = session.send(&input.last_message).await?;

        loop {
            let tool_calls = response.tool_calls();
            if tool_calls.is_empty() {
                break;
            }

            turn_count += 1;
            if turn_count > max_turns {
                warn!("Chat tool loop exceeded max_turns ({})", max_turns);
                return Err(RunChatError::LoopLimitExceeded { max_turns });
            }

            self.log_tool_calls(turn_count, &tool_calls);
            let results = invoker.invoke_all(&tool_calls).await;
            tool_call_count += results.len();
            self.log_tool_results(turn_count, &results);

            debug!(
                "Chat tool turn {}/{}: sending {} tool results",
                turn_count,
                max_turns,
                results.len()
            );
            response = session.send_tool_results(&results).await?;
        }

        let reply = response.text().ok_or(RunChatError::EmptyResponse)?;

        Ok(RunChatOutput {
            reply,
            model: session.model().to_string(),
            turns: turn_count,
            tool_calls: tool_call_count,
        })
    }

    fn log_tool_calls(&self, turn: usize, calls: &[ToolCall]) {
        let calls: Vec<_> = calls
            .iter()
            .map(|c| json!({ "name": c.name, "args": c.arguments_json() }))
            .collect();
        self.conversation_logger.log(ConversationEvent::new(
            "tool_calls",
            json!({ "turn": turn, "calls": calls }),
        ));
    }

    fn log_tool_results(&self, turn: usize, results: &[ToolResult]) {
        // Durations are left out so identical runs produce identical transcripts.
        let results: Vec<_> = results
            .iter()
            .map(|r| {
                json!({
                    "name": r.tool_name,
                    "success": r.success,
                    "payload": r.payload,
                    "error": r.error_message(),
                })
            })
            .collect();
        self.conversation_logger.log(ConversationEvent::new(
            "tool_results",
            json!({ "turn": turn, "results": results }),
        ));
    }
}
