//! In-process stand-ins for the injected services, shared by unit tests.

use crate::app_state::AppState;
use crate::domain::{
    MainReadings, Metrics, ViewError, ViewRenderer, WeatherCondition, WeatherData, WeatherError,
    WeatherProvider, WeatherReport,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Records every `record_request` call instead of counting.
#[derive(Default)]
pub struct RecordingMetrics {
    requests: Mutex<Vec<(String, String)>>,
}

impl RecordingMetrics {
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Metrics for RecordingMetrics {
    fn render(&self) -> anyhow::Result<String> {
        Ok(format!("recorded_requests {}\n", self.requests.lock().unwrap().len()))
    }

    fn record_request(&self, route: &str, client_ip: &str) {
        self.requests
            .lock()
            .unwrap()
            .push((route.to_string(), client_ip.to_string()));
    }
}

/// Answers every lookup with a fixed outcome and counts the calls.
pub struct StubProvider {
    outcome: fn() -> Result<WeatherData, WeatherError>,
    calls: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn new(outcome: fn() -> Result<WeatherData, WeatherError>) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherData, WeatherError> {
        self.calls.lock().unwrap().push(city.to_string());
        (self.outcome)()
    }
}

pub fn light_rain() -> Result<WeatherData, WeatherError> {
    Ok(WeatherData {
        main: MainReadings {
            temp: 288.71,
            humidity: 81,
        },
        weather: vec![WeatherCondition {
            description: "light rain".to_string(),
            icon: "10d".to_string(),
        }],
    })
}

/// Renders view models as plain text so assertions stay readable.
pub struct PlainViews;

impl ViewRenderer for PlainViews {
    fn render_index(&self) -> Result<String, ViewError> {
        Ok("index".to_string())
    }

    fn render_weather(&self, report: &WeatherReport) -> Result<String, ViewError> {
        Ok(format!(
            "{}|{}|{}|{}|{}",
            report.city_name,
            report.temperature,
            report.description.as_deref().unwrap_or("-"),
            report.humidity,
            report.icon_url.as_deref().unwrap_or("-"),
        ))
    }
}

/// Fails every render, as a broken template directory would.
pub struct FailingViews;

impl ViewRenderer for FailingViews {
    fn render_index(&self) -> Result<String, ViewError> {
        Err(ViewError::Render("index.html: variable `title` not found".to_string()))
    }

    fn render_weather(&self, _report: &WeatherReport) -> Result<String, ViewError> {
        Err(ViewError::Render("weather.html: variable `city_name` not found".to_string()))
    }
}

pub fn stub_state(metrics: Arc<RecordingMetrics>) -> AppState {
    AppState::new(
        metrics,
        Arc::new(StubProvider::new(light_rain)),
        Arc::new(PlainViews),
        false,
    )
}
