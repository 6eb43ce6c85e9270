//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for toolchat
#[derive(Parser, Debug)]
#[command(name = "toolchat")]
#[command(author, version, about = "Chat backend that lets a model call weather tools")]
#[command(long_about = r#"
toolchat serves a chat endpoint backed by a Gemini model. When the model asks
for weather data, toolchat runs the requested tools concurrently, feeds the
results back and returns the model's final answer.

Configuration files are loaded from (in priority order):
1. TOOLCHAT_* environment variables (e.g. TOOLCHAT_AGENT__MAX_TURNS=4)
2. --config <path>     Explicit config file
3. ./toolchat.toml     Project-level config
4. ~/.config/toolchat/config.toml   Global config

API keys are read from GEMINI_API_KEY and OPENWEATHER_API_KEY unless set
in the config file.

Example:
  toolchat serve --port 3001
  toolchat ask "What's the weather like in Taipei this week?"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

impl Cli {
    /// The subcommand to run; `serve` when none is given.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve {
            host: None,
            port: None,
        })
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP chat server
    Serve {
        /// Interface to bind (overrides [server] host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides [server] port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run a single chat turn and print the reply
    Ask {
        /// The message to send
        message: String,
    },
}
