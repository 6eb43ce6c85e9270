//! Tool domain traits
//!
//! Pure validation of tool calls against their declared contracts. The
//! async execution port lives in the application layer.

use super::entities::{ToolCall, ToolDefinition};

/// Validator for tool calls
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
///
/// Rejects calls that miss a required parameter, pass a parameter the tool
/// does not declare, or pass a value of the wrong JSON type. A `null` value
/// for an optional parameter is treated as absent.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in definition.required_parameters() {
            match call.arguments.get(&param.name) {
                None | Some(serde_json::Value::Null) => {
                    return Err(format!(
                        "Missing required parameter '{}' for tool '{}'",
                        param.name, definition.name
                    ));
                }
                Some(_) => {}
            }
        }

        for (arg_name, value) in &call.arguments {
            let Some(param) = definition.parameter(arg_name) else {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            };
            if value.is_null() && !param.required {
                continue;
            }
            if !param.param_type.accepts(value) {
                return Err(format!(
                    "Parameter '{}' for tool '{}' must be a {}",
                    arg_name, definition.name, param.param_type
                ));
            }
        }

        Ok(())
    }
}
