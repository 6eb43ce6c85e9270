//! Configuration file loading for toolchat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TOOLCHAT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./toolchat.toml`
//! 4. Global: `~/.config/toolchat/config.toml`
//! 5. Default values

mod error;
mod file_config;
mod loader;

pub use error::ConfigError;
pub use file_config::{
    FileAgentConfig, FileConfig, FileGeminiConfig, FileLoggingConfig, FileServerConfig,
    FileWeatherConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILE};
