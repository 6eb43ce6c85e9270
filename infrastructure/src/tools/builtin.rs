//! Closed registry of the tools this service implements.
//!
//! Every callable capability is a [`BuiltinTool`] variant carrying its name,
//! its declared contract and its handler. Dispatch is a match on the variant.

use super::weather::{
    WeatherClient,
    current::{self, GET_CURRENT_WEATHER},
    forecast::{self, GET_WEATHER_FORECAST},
};
use toolchat_domain::tool::{
    entities::{ToolCall, ToolDefinition},
    value_objects::ToolResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTool {
    CurrentWeather,
    WeatherForecast,
}

impl BuiltinTool {
    pub const ALL: [BuiltinTool; 2] = [BuiltinTool::CurrentWeather, BuiltinTool::WeatherForecast];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinTool::CurrentWeather => GET_CURRENT_WEATHER,
            BuiltinTool::WeatherForecast => GET_WEATHER_FORECAST,
        }
    }

    /// Contract advertised to the model and enforced before execution.
    pub fn definition(&self) -> ToolDefinition {
        match self {
            BuiltinTool::CurrentWeather => current::current_weather_definition(),
            BuiltinTool::WeatherForecast => forecast::weather_forecast_definition(),
        }
    }

    pub async fn execute(&self, weather: &WeatherClient, call: &ToolCall) -> ToolResult {
        match self {
            BuiltinTool::CurrentWeather => current::execute_current_weather(weather, call).await,
            BuiltinTool::WeatherForecast => forecast::execute_weather_forecast(weather, call).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_roundtrip() {
        for tool in BuiltinTool::ALL {
            assert_eq!(BuiltinTool::from_name(tool.name()), Some(tool));
            assert_eq!(tool.definition().name, tool.name());
        }
        assert_eq!(BuiltinTool::from_name("getAirQuality"), None);
    }
}
