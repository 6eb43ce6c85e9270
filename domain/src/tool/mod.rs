//! Tool domain module
//!
//! Defines how the model's capabilities are declared, requested and reported.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (contracts)  │    │ (request)    │    │ (outcome)    │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! - [`ToolSpec`]: closed set of declared tools, keyed by name
//! - [`ToolDefinition`]: one tool's name, description and parameter contract
//! - [`ToolCall`]: a model-issued request with JSON arguments
//! - [`ToolResult`]: success payload or captured error for one call
//! - [`ToolValidator`]: checks a call's arguments against its contract
//!
//! Executing tools is an application/infrastructure concern; this module is
//! pure data and validation.

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ParamType, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult};
