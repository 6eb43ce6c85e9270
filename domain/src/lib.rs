//! Domain layer for toolchat
//!
//! This crate contains the entities and value objects shared by every other
//! layer. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! A chat request carries a [`ConversationHistory`] (every turn before the new
//! user message) plus the new message itself. The history is read-only input:
//! nothing in the system mutates it.
//!
//! ## Tools
//!
//! The model may answer with [`ToolCall`]s instead of text. Each call names a
//! tool declared in the [`ToolSpec`] and carries JSON arguments that are checked
//! against the tool's [`ToolDefinition`] before anything runs. Every call
//! produces exactly one [`ToolResult`], successful or not.
//!
//! ## Errors
//!
//! [`ErrorKind`] is the closed taxonomy surfaced at the request boundary.

pub mod core;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use core::error::ErrorKind;
pub use session::{
    entities::{ConversationHistory, Message, Role},
    response::{ContentBlock, ModelResponse},
};
pub use tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
