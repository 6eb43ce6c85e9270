//! Tool implementations
//!
//! The service exposes a closed set of tools ([`BuiltinTool`]), all backed by
//! the weather data provider in [`weather`].

pub mod builtin;
pub mod weather;

mod executor;
mod schema;

pub use builtin::BuiltinTool;
pub use executor::LocalToolExecutor;
pub use schema::JsonSchemaToolConverter;
pub use weather::{WeatherClient, WeatherError};

use toolchat_domain::tool::entities::ToolSpec;

/// Create the tool specification with every built-in tool
pub fn default_tool_spec() -> ToolSpec {
    BuiltinTool::ALL
        .into_iter()
        .fold(ToolSpec::new(), |spec, tool| spec.register(tool.definition()))
}
