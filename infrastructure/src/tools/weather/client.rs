//! OpenWeather HTTP client.
//!
//! Two reads keyed by city name: `/weather` (current conditions) and
//! `/forecast` (3-hourly entries for the next five days). Both are requested
//! with `units=metric` and the configured language.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default OpenWeather API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Errors from the weather data provider.
///
/// The `Display` text is what the model sees in the failed tool result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    #[error("city not found: {0}")]
    CityNotFound(String),

    #[error("weather API error: {0}")]
    Api(u16),

    #[error("weather request failed: {0}")]
    Request(String),

    #[error("invalid weather response: {0}")]
    InvalidResponse(String),
}

/// Current conditions for a city.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub city: String,
    /// Degrees Celsius, rounded
    pub temperature: i64,
    pub feels_like: i64,
    /// Percent
    pub humidity: u64,
    pub description: String,
    /// Metres per second
    pub wind_speed: f64,
}

/// One day of a forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// `YYYY-MM-DD`
    pub date: String,
    pub temperature: i64,
    pub feels_like: i64,
    pub humidity: u64,
    pub description: String,
    pub wind_speed: f64,
}

/// Daily forecast for a city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub city: String,
    pub forecast: Vec<DailyForecast>,
}

// ─── Wire types ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Readings {
    temp: f64,
    feels_like: f64,
    humidity: u64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    main: Readings,
    weather: Vec<Condition>,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastEntry {
    pub(crate) dt_txt: String,
    main: Readings,
    weather: Vec<Condition>,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct ForecastCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    city: ForecastCity,
    list: Vec<ForecastEntry>,
}

fn first_description(conditions: &[Condition]) -> String {
    conditions
        .first()
        .map(|c| c.description.clone())
        .unwrap_or_default()
}

impl From<CurrentResponse> for CurrentWeather {
    fn from(r: CurrentResponse) -> Self {
        Self {
            city: r.name,
            temperature: r.main.temp.round() as i64,
            feels_like: r.main.feels_like.round() as i64,
            humidity: r.main.humidity,
            description: first_description(&r.weather),
            wind_speed: r.wind.speed,
        }
    }
}

impl ForecastEntry {
    /// Date and time halves of `dt_txt` (`"2025-01-15 12:00:00"`).
    pub(crate) fn date_time(&self) -> (&str, &str) {
        self.dt_txt
            .split_once(' ')
            .unwrap_or((self.dt_txt.as_str(), ""))
    }

    pub(crate) fn to_daily(&self) -> DailyForecast {
        DailyForecast {
            date: self.date_time().0.to_string(),
            temperature: self.main.temp.round() as i64,
            feels_like: self.main.feels_like.round() as i64,
            humidity: self.main.humidity,
            description: first_description(&self.weather),
            wind_speed: self.wind.speed,
        }
    }
}

/// Client for the OpenWeather REST API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    lang: String,
}

impl WeatherClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        lang: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            lang: lang.into(),
        })
    }

    /// Current conditions for `city`.
    pub async fn current(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let response: CurrentResponse = self.get("weather", city).await?;
        Ok(response.into())
    }

    /// Daily forecast for `city`, at most `days` days.
    pub async fn forecast(&self, city: &str, days: usize) -> Result<Forecast, WeatherError> {
        let response: ForecastResponse = self.get("forecast", city).await?;
        Ok(Forecast {
            city: response.city.name,
            forecast: super::forecast::reduce_to_daily(&response.list, days),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(endpoint, city, "Weather API request");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(WeatherError::CityNotFound(city.to_string()));
        }
        if !status.is_success() {
            return Err(WeatherError::Api(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_server;
    use axum::{
        Json, Router,
        extract::Query,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::get,
    };
    use serde_json::json;
    use std::collections::HashMap;

    async fn current_handler(Query(q): Query<HashMap<String, String>>) -> Response {
        if q.get("appid").map(String::as_str) != Some("test-key") {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        match q.get("q").map(String::as_str) {
            Some("Atlantis") => StatusCode::NOT_FOUND.into_response(),
            Some(city) => Json(json!({
                "name": city,
                "main": { "temp": 27.6, "feels_like": 31.2, "humidity": 74 },
                "weather": [{ "description": format!("clouds ({})", q["units"]) }],
                "wind": { "speed": 3.1 }
            }))
            .into_response(),
            None => StatusCode::BAD_REQUEST.into_response(),
        }
    }

    async fn forecast_handler() -> Json<serde_json::Value> {
        let entry = |dt: &str, temp: f64| {
            json!({
                "dt_txt": dt,
                "main": { "temp": temp, "feels_like": temp, "humidity": 60 },
                "weather": [{ "description": "rain" }],
                "wind": { "speed": 2.0 }
            })
        };
        Json(json!({
            "city": { "name": "Tokyo" },
            "list": [
                entry("2025-01-15 09:00:00", 10.0),
                entry("2025-01-15 12:00:00", 14.0),
                entry("2025-01-16 00:00:00", 8.0),
                entry("2025-01-17 12:00:00", 12.0),
            ]
        }))
    }

    async fn client() -> WeatherClient {
        let app = Router::new()
            .route("/weather", get(current_handler))
            .route("/forecast", get(forecast_handler))
            .route("/broken/weather", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let base = spawn_server(app).await;
        WeatherClient::new("test-key", base, "en", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_current_weather() {
        let weather = client().await.current("Taipei").await.unwrap();

        assert_eq!(weather.city, "Taipei");
        assert_eq!(weather.temperature, 28);
        assert_eq!(weather.feels_like, 31);
        assert_eq!(weather.humidity, 74);
        assert_eq!(weather.description, "clouds (metric)");
        assert_eq!(weather.wind_speed, 3.1);
    }

    #[tokio::test]
    async fn test_city_not_found() {
        let err = client().await.current("Atlantis").await.unwrap_err();
        assert_eq!(err, WeatherError::CityNotFound("Atlantis".to_string()));
        assert_eq!(err.to_string(), "city not found: Atlantis");
    }

    #[tokio::test]
    async fn test_upstream_error_status() {
        let mut client = client().await;
        client.api_key = "wrong".to_string();

        let err = client.current("Taipei").await.unwrap_err();
        assert_eq!(err.to_string(), "weather API error: 401");
    }

    #[tokio::test]
    async fn test_service_unavailable() {
        let mut client = client().await;
        client.base_url = format!("{}/broken", client.base_url);

        let err = client.current("Taipei").await.unwrap_err();
        assert_eq!(err, WeatherError::Api(503));
    }

    #[tokio::test]
    async fn test_forecast_reduced_to_days() {
        let forecast = client().await.forecast("Tokyo", 2).await.unwrap();

        assert_eq!(forecast.city, "Tokyo");
        let dates: Vec<_> = forecast.forecast.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-01-15", "2025-01-16"]);
        // The noon entry represents its day.
        assert_eq!(forecast.forecast[0].temperature, 14);
    }

    #[tokio::test]
    async fn test_connection_failure() {
        let client =
            WeatherClient::new("k", "http://127.0.0.1:9", "en", Duration::from_secs(2)).unwrap();
        let err = client.current("Taipei").await.unwrap_err();
        assert!(matches!(err, WeatherError::Request(_)));
    }
}
