//! Tool loop configuration (`[agent]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use toolchat_application::ExecutionParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Maximum tool-calling turns per chat run
    pub max_turns: usize,
    /// Per-tool-call timeout in seconds (0 disables the limit)
    pub tool_timeout_seconds: u64,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            max_turns: params.max_turns,
            tool_timeout_seconds: params.tool_timeout.map_or(0, |t| t.as_secs()),
        }
    }
}

impl FileAgentConfig {
    pub fn to_execution_params(&self) -> ExecutionParams {
        let timeout = (self.tool_timeout_seconds > 0)
            .then(|| Duration::from_secs(self.tool_timeout_seconds));
        ExecutionParams::default()
            .with_max_turns(self.max_turns)
            .with_tool_timeout(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_execution_params() {
        assert_eq!(
            FileAgentConfig::default().to_execution_params(),
            ExecutionParams::default()
        );
    }

    #[test]
    fn test_zero_timeout_disables_limit() {
        let config = FileAgentConfig {
            max_turns: 3,
            tool_timeout_seconds: 0,
        };
        let params = config.to_execution_params();
        assert_eq!(params.max_turns, 3);
        assert!(params.tool_timeout.is_none());
    }
}
