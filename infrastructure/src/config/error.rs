//! Configuration errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("missing API key for {provider}: set {env_var} or `{provider}.api_key`")]
    MissingApiKey {
        provider: &'static str,
        env_var: String,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
