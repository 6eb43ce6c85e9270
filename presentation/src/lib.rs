//! Presentation layer for toolchat
//!
//! This crate contains the CLI definitions and the HTTP boundary that turns
//! chat requests into runs of the chat use case.

pub mod cli;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use server::{AppState, ApiError, ServerError, router, serve};
