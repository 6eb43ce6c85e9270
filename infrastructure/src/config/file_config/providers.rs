//! External service configuration (`[gemini]` and `[weather]` sections)

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Gemini API provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Base URL for the Generative Language API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Maximum output tokens per response.
    pub max_output_tokens: u32,
    /// Sampling temperature (0.0 - 2.0).
    pub temperature: f64,
    /// Optional system instruction.
    pub system_prompt: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            max_output_tokens: 1000,
            temperature: 0.7,
            system_prompt: None,
            timeout_seconds: 60,
        }
    }
}

impl FileGeminiConfig {
    /// Inline key if set, otherwise the named environment variable.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        resolve_api_key("gemini", self.api_key.as_deref(), &self.api_key_env)
    }
}

/// OpenWeather configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWeatherConfig {
    /// Environment variable name for the API key (default: "OPENWEATHER_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Base URL for the OpenWeather API.
    pub base_url: String,
    /// Language of condition descriptions.
    pub lang: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FileWeatherConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENWEATHER_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            lang: "zh_tw".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl FileWeatherConfig {
    /// Inline key if set, otherwise the named environment variable.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        resolve_api_key("weather", self.api_key.as_deref(), &self.api_key_env)
    }
}

fn resolve_api_key(
    provider: &'static str,
    inline: Option<&str>,
    env_var: &str,
) -> Result<String, ConfigError> {
    inline
        .map(str::to_string)
        .or_else(|| std::env::var(env_var).ok())
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingApiKey {
            provider,
            env_var: env_var.to_string(),
        })
}
