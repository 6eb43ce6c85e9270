//! HTTP server configuration (`[server]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Browser origins allowed by CORS. Setting this replaces the defaults.
    pub allowed_origins: Vec<String>,
}

/// Local dev server and the deployed web front end.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] =
    ["http://localhost:5173", "https://ai-agent-pi-nine.vercel.app"];

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.map(String::from).to_vec(),
        }
    }
}
