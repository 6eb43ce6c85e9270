//! Weather tools backed by the OpenWeather REST API.

pub mod client;
pub mod current;
pub mod forecast;

pub use client::{WeatherClient, WeatherError};
