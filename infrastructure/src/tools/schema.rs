//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the provider-neutral
//! declaration `{name, description, parameters}` advertised to the model.

use toolchat_application::ports::tool_schema::ToolSchemaPort;
use toolchat_domain::tool::entities::ToolDefinition;

/// Default implementation producing provider-neutral JSON Schema.
///
/// `parameters` is an object schema built straight from the tool's
/// [`ToolParameter`](toolchat_domain::ToolParameter)s, so the declaration can
/// never drift from what the validator enforces.
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            properties.insert(
                param.name.clone(),
                serde_json::json!({
                    "type": param.param_type.as_str(),
                    "description": param.description,
                }),
            );

            if param.required {
                required.push(serde_json::json!(param.name));
            }
        }

        serde_json::json!({
            "name": tool.name,
            "description": tool.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }
}
