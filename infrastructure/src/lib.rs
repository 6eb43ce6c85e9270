//! Infrastructure layer for toolchat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Gemini model provider, the weather tools,
//! the tool schema converter and the JSONL transcript logger, plus
//! configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod tools;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use logging::JsonlConversationLogger;
pub use providers::gemini::{GeminiConfig, GeminiGateway};
pub use tools::{
    BuiltinTool, JsonSchemaToolConverter, LocalToolExecutor, WeatherClient, WeatherError,
    default_tool_spec,
};
