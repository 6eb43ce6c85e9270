//! Tool invoker.
//!
//! Runs model-requested tool calls against a [`ToolExecutorPort`], turning
//! every failure mode into a failed [`ToolResult`]:
//!
//! ```text
//! invoke(call)
//!   ├─ name not in ToolSpec      → NOT_FOUND "unknown tool: <name>"
//!   ├─ arguments fail validation → INVALID_ARGUMENT
//!   ├─ time limit elapsed        → TIMEOUT
//!   └─ otherwise                 → executor's result (success or EXECUTION_FAILED)
//! ```
//!
//! [`ToolInvoker::invoke_all`] fans a batch out concurrently and returns the
//! results in request order, whatever order the calls finish in.

use crate::ports::tool_executor::ToolExecutorPort;
use std::sync::Arc;
use std::time::{Duration, Instant};
use toolchat_domain::tool::{
    entities::ToolCall,
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
use tracing::{debug, warn};

/// Executes tool calls with contract validation and a per-call time limit.
#[derive(Clone)]
pub struct ToolInvoker {
    executor: Arc<dyn ToolExecutorPort>,
    timeout: Option<Duration>,
}

impl ToolInvoker {
    pub fn new(executor: Arc<dyn ToolExecutorPort>) -> Self {
        Self {
            executor,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Invoke one tool call. Never fails; errors are captured in the result.
    pub async fn invoke(&self, call: &ToolCall) -> ToolResult {
        let Some(definition) = self.executor.get_tool(&call.name) else {
            warn!(tool = %call.name, "Model requested an unknown tool");
            return ToolResult::failure(&call.name, ToolError::unknown_tool(&call.name));
        };

        if let Err(e) = DefaultToolValidator.validate(call, definition) {
            warn!(tool = %call.name, "Rejected tool arguments: {}", e);
            return ToolResult::failure(&call.name, ToolError::invalid_argument(e));
        }

        debug!(tool = %call.name, args = %call.arguments_json(), "Invoking tool");
        let start = Instant::now();

        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.executor.execute(call)).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(tool = %call.name, "Tool call timed out after {:?}", limit);
                    ToolResult::failure(&call.name, ToolError::timeout(&call.name, limit))
                }
            },
            None => self.executor.execute(call).await,
        };

        let result = if result.duration_ms.is_none() {
            result.with_duration(start.elapsed().as_millis() as u64)
        } else {
            result
        };

        if let Some(error) = result.error() {
            warn!(tool = %call.name, "Tool call failed: {}", error);
        }
        result
    }

    /// Invoke every call concurrently; `results[i]` belongs to `calls[i]`.
    pub async fn invoke_all(&self, calls: &[ToolCall]) -> Vec<ToolResult> {
        let futures = calls.iter().map(|call| self.invoke(call));
        futures::future::join_all(futures).await
    }
}
