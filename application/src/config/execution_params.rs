//! Execution parameters for the chat loop.
//!
//! [`ExecutionParams`] groups the static parameters that bound one run of
//! [`RunChatUseCase`](crate::use_cases::run_chat::RunChatUseCase).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Loop control parameters for a chat run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum number of tool-calling turns before the run is aborted.
    pub max_turns: usize,
    /// Time limit for a single tool call. `None` disables the limit.
    pub tool_timeout: Option<Duration>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_turns: 8,
            tool_timeout: Some(Duration::from_secs(15)),
        }
    }
}

impl ExecutionParams {
    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }

    pub fn with_tool_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.tool_timeout = timeout;
        self
    }
}
