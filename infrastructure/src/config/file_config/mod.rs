//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

mod agent;
mod logging;
mod providers;
mod server;

pub use agent::FileAgentConfig;
pub use logging::FileLoggingConfig;
pub use providers::{FileGeminiConfig, FileWeatherConfig};
pub use server::FileServerConfig;

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP server settings
    pub server: FileServerConfig,
    /// Model provider settings
    pub gemini: FileGeminiConfig,
    /// Weather data provider settings
    pub weather: FileWeatherConfig,
    /// Tool loop settings
    pub agent: FileAgentConfig,
    /// Transcript logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Check value ranges that TOML types alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.max_turns == 0 {
            return Err(ConfigError::Invalid(
                "agent.max_turns must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.gemini.temperature) {
            return Err(ConfigError::Invalid(format!(
                "gemini.temperature must be between 0.0 and 2.0 (got {})",
                self.gemini.temperature
            )));
        }
        if self.gemini.model.trim().is_empty() {
            return Err(ConfigError::Invalid("gemini.model is empty".to_string()));
        }
        if self.gemini.max_output_tokens == 0 {
            return Err(ConfigError::Invalid(
                "gemini.max_output_tokens must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
