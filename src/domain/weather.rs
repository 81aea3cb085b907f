//! Weather provider abstraction and the data that flows through it.
//!
//! `WeatherData` mirrors the subset of the OpenWeatherMap current-weather
//! response the front-end reads. `WeatherReport` is the view model handed
//! to the renderer. The conversion between the two is pure and lives here
//! so it can be tested without HTTP.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Offset between Kelvin (provider units) and Celsius.
const KELVIN_OFFSET: f64 = 273.15;

/// Icon images are served from here as `<code>.png`.
pub const ICON_URL_BASE: &str = "http://openweathermap.org/img/w/";

/// Decoded provider response.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherData {
    pub main: MainReadings,

    /// May be empty or absent; only the first entry is displayed.
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    /// Temperature in Kelvin.
    pub temp: f64,

    /// Relative humidity, percent.
    pub humidity: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCondition {
    pub description: String,
    pub icon: String,
}

/// Failure talking to the weather provider.
///
/// Every variant is recoverable: the HTTP layer maps it to a response and
/// the server keeps running.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Network failure, DNS failure, timeout, or a body that could not be read.
    #[error("failed to contact weather provider: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("weather provider returned {status_text}")]
    Upstream { status: u16, status_text: String },

    /// The provider body was not the expected JSON shape.
    #[error("failed to decode weather provider response: {0}")]
    Decode(String),
}

/// Source of current weather for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + 'static {
    async fn current_weather(&self, city: &str) -> Result<WeatherData, WeatherError>;
}

pub type WeatherProviderPtr = Arc<dyn WeatherProvider>;

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// View model rendered by the weather page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub city_name: String,

    /// Celsius, unrounded.
    pub temperature: f64,
    pub description: Option<String>,
    pub humidity: u32,
    pub icon_url: Option<String>,
}

impl WeatherReport {
    pub fn new(city: &str, data: &WeatherData) -> Self {
        // ---
        let condition = data.weather.first();

        WeatherReport {
            city_name: city.to_string(),
            temperature: kelvin_to_celsius(data.main.temp),
            description: condition.map(|c| c.description.clone()),
            humidity: data.main.humidity,
            icon_url: condition.map(|c| format!("{ICON_URL_BASE}{}.png", c.icon)),
        }
    }
}
