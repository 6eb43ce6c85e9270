//! Local tool executor: the concrete implementation of [`ToolExecutorPort`].
//!
//! Routes each call to its [`BuiltinTool`] handler. Contract validation and
//! time limits are applied by the application layer's tool invoker before a
//! call gets here.

use super::builtin::BuiltinTool;
use super::weather::WeatherClient;
use async_trait::async_trait;
use toolchat_application::ports::tool_executor::ToolExecutorPort;
use toolchat_domain::tool::{
    entities::{ToolCall, ToolSpec},
    value_objects::{ToolError, ToolResult},
};

/// Executor for the built-in weather tools.
///
/// Immutable after construction and shared by every concurrent run.
#[derive(Debug, Clone)]
pub struct LocalToolExecutor {
    /// Available tools
    tool_spec: ToolSpec,
    /// Weather data provider used by both weather tools
    weather: WeatherClient,
}

impl LocalToolExecutor {
    /// Create a new executor with all built-in tools.
    pub fn new(weather: WeatherClient) -> Self {
        Self::with_tools(super::default_tool_spec(), weather)
    }

    /// Create an executor with a custom tool spec
    pub fn with_tools(tool_spec: ToolSpec, weather: WeatherClient) -> Self {
        Self { tool_spec, weather }
    }
}

#[async_trait]
impl ToolExecutorPort for LocalToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let tool = BuiltinTool::from_name(&call.name)
            .filter(|_| self.tool_spec.contains(&call.name));
        match tool {
            Some(tool) => tool.execute(&self.weather, call).await,
            None => ToolResult::failure(&call.name, ToolError::unknown_tool(&call.name)),
        }
    }
}
