//! getWeatherForecast tool: daily forecast for a city

use super::client::{DailyForecast, Forecast, ForecastEntry, WeatherClient};
use toolchat_domain::tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult},
};

/// Tool name constant
pub const GET_WEATHER_FORECAST: &str = "getWeatherForecast";

/// Days returned when the model does not ask for a count; also the upper bound
/// the provider's free forecast covers.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Get the tool definition for getWeatherForecast
pub fn weather_forecast_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_WEATHER_FORECAST,
        "Get the daily weather forecast for a city for up to 5 days; use for questions about tomorrow or this week",
    )
    .with_parameter(ToolParameter::new(
        "city",
        "City name, e.g. Taipei, Tokyo, New York, London",
        true,
    ))
    .with_parameter(
        ToolParameter::new("days", "Number of days to forecast, 1 to 5 (default 5)", false)
            .with_type(ParamType::Number),
    )
}

/// Collapse 3-hourly entries to one per day and keep the first `days` days.
///
/// A day is represented by its `12:00:00` entry, or by its first entry when
/// there is no noon reading. Days keep the order they first appear in.
pub(crate) fn reduce_to_daily(entries: &[ForecastEntry], days: usize) -> Vec<DailyForecast> {
    let mut daily: Vec<DailyForecast> = Vec::new();

    for entry in entries {
        let (date, time) = entry.date_time();
        match daily.iter_mut().find(|d| d.date == date) {
            Some(existing) if time == "12:00:00" => *existing = entry.to_daily(),
            Some(_) => {}
            None => daily.push(entry.to_daily()),
        }
    }

    daily.truncate(days);
    daily
}

/// Resolve the `days` argument: absent means [`MAX_FORECAST_DAYS`], larger
/// values are capped, values below one are rejected.
fn requested_days(call: &ToolCall) -> Result<usize, String> {
    match call.get_f64("days") {
        None => Ok(MAX_FORECAST_DAYS),
        Some(d) if d < 1.0 => Err(format!("days must be between 1 and {}", MAX_FORECAST_DAYS)),
        Some(d) => Ok((d.floor() as usize).min(MAX_FORECAST_DAYS)),
    }
}

/// Human-readable summary of a forecast.
pub fn format_forecast(f: &Forecast) -> String {
    let lines: Vec<String> = f
        .forecast
        .iter()
        .map(|day| {
            format!(
                "{}: {}, {}°C (feels like {}°C), humidity {}%",
                day.date, day.description, day.temperature, day.feels_like, day.humidity
            )
        })
        .collect();
    format!("Weather forecast for {}:\n{}", f.city, lines.join("\n"))
}

/// Execute the getWeatherForecast tool
pub async fn execute_weather_forecast(client: &WeatherClient, call: &ToolCall) -> ToolResult {
    let city = match call.require_string("city") {
        Ok(c) => c,
        Err(e) => return ToolResult::failure(GET_WEATHER_FORECAST, ToolError::invalid_argument(e)),
    };
    let days = match requested_days(call) {
        Ok(d) => d,
        Err(e) => return ToolResult::failure(GET_WEATHER_FORECAST, ToolError::invalid_argument(e)),
    };

    let forecast = match client.forecast(city, days).await {
        Ok(f) => f,
        Err(e) => {
            return ToolResult::failure(
                GET_WEATHER_FORECAST,
                ToolError::execution_failed(e.to_string()),
            );
        }
    };

    match serde_json::to_value(&forecast) {
        Ok(mut payload) => {
            payload["summary"] = serde_json::json!(format_forecast(&forecast));
            ToolResult::success(GET_WEATHER_FORECAST, payload)
        }
        Err(e) => ToolResult::failure(
            GET_WEATHER_FORECAST,
            ToolError::execution_failed(e.to_string()),
        ),
    }
}
