//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain) from "how they are declared to the
//! model" (infrastructure).

use toolchat_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to capability declarations.
///
/// A declaration has the shape `{ name, description, parameters }` where
/// `parameters` is an object-typed JSON Schema.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to a declaration.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools to declarations (sorted by name).
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        spec.all()
            .into_iter()
            .map(|t| self.tool_to_schema(t))
            .collect()
    }
}
