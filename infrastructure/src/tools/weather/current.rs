//! getCurrentWeather tool: current conditions for a city

use super::client::{CurrentWeather, WeatherClient};
use toolchat_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult},
};

/// Tool name constant
pub const GET_CURRENT_WEATHER: &str = "getCurrentWeather";

/// Get the tool definition for getCurrentWeather
pub fn current_weather_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_CURRENT_WEATHER,
        "Get the current weather for a city, including temperature, humidity and conditions",
    )
    .with_parameter(ToolParameter::new(
        "city",
        "City name, e.g. Taipei, Tokyo, New York, London",
        true,
    ))
}

/// Human-readable summary of current conditions.
pub fn format_current(w: &CurrentWeather) -> String {
    format!(
        "Current weather in {}:\n- Conditions: {}\n- Temperature: {}°C (feels like {}°C)\n- Humidity: {}%\n- Wind: {} m/s",
        w.city, w.description, w.temperature, w.feels_like, w.humidity, w.wind_speed
    )
}

/// Execute the getCurrentWeather tool
pub async fn execute_current_weather(client: &WeatherClient, call: &ToolCall) -> ToolResult {
    let city = match call.require_string("city") {
        Ok(c) => c,
        Err(e) => return ToolResult::failure(GET_CURRENT_WEATHER, ToolError::invalid_argument(e)),
    };

    let weather = match client.current(city).await {
        Ok(w) => w,
        Err(e) => {
            return ToolResult::failure(
                GET_CURRENT_WEATHER,
                ToolError::execution_failed(e.to_string()),
            );
        }
    };

    match serde_json::to_value(&weather) {
        Ok(mut payload) => {
            payload["summary"] = serde_json::json!(format_current(&weather));
            ToolResult::success(GET_CURRENT_WEATHER, payload)
        }
        Err(e) => ToolResult::failure(
            GET_CURRENT_WEATHER,
            ToolError::execution_failed(e.to_string()),
        ),
    }
}
