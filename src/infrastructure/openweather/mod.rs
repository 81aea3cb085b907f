//! OpenWeatherMap current-weather client.

use crate::config::WeatherConfig;
use crate::domain::{WeatherData, WeatherError, WeatherProvider, WeatherProviderPtr};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

/// Calls `GET {api_url}?q={city}&appid={key}`.
///
/// The underlying `reqwest::Client` carries the configured timeout, so a
/// hung provider surfaces as [`WeatherError::Transport`] instead of
/// holding the request open indefinitely.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig) -> anyhow::Result<Self> {
        // ---
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build OpenWeatherMap HTTP client")?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[tracing::instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<WeatherData, WeatherError> {
        // ---
        let res = self
            .http
            .get(&self.api_url)
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|err| {
                tracing::debug!(timeout = err.is_timeout(), "OpenWeatherMap request failed");
                WeatherError::Transport(err.to_string())
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::Upstream {
                status: status.as_u16(),
                status_text: status.to_string(),
            });
        }

        let body = res
            .bytes()
            .await
            .map_err(|err| WeatherError::Transport(err.to_string()))?;

        serde_json::from_slice(&body).map_err(|err| WeatherError::Decode(err.to_string()))
    }
}

/// Creates the OpenWeatherMap-backed provider.
pub fn create(config: &WeatherConfig) -> anyhow::Result<WeatherProviderPtr> {
    tracing::info!(api_url = %config.api_url, timeout = ?config.timeout, "Initializing OpenWeatherMap client");

    Ok(Arc::new(OpenWeatherClient::new(config)?))
}
