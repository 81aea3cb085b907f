// Test helpers are intentionally partially used
#![allow(dead_code)]

use reqwest::Client;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;
use weather_web::{
    create_router_with_config, AppConfig, AssetsConfig, ServerConfig, WeatherConfig,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PROVIDER_PATH: &str = "/data/2.5/weather";
pub const TEST_API_KEY: &str = "test-key";

// ============================================================================
// Test Setup
// ============================================================================

/// Configuration pointing the provider client at `provider_url`.
pub fn test_config(provider_url: String) -> AppConfig {
    // ---
    AppConfig {
        server: ServerConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            trust_proxy_headers: false,
        },
        weather: WeatherConfig {
            api_key: TEST_API_KEY.to_string(),
            api_url: provider_url,
            timeout: Duration::from_secs(2),
        },
        assets: AssetsConfig {
            static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
            templates_dir: None,
        },
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestServer {
    // ---
    /// Serves the router against a mock OpenWeatherMap.
    pub async fn new(provider: &MockServer) -> Self {
        // --
        Self::with_config(test_config(format!("{}{}", provider.uri(), PROVIDER_PATH))).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        // ---
        let app = create_router_with_config(&config).expect("Should be able to create router");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        // ---
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request")
    }

    /// Current `/metrics` body. Note the scrape itself is counted.
    pub async fn metrics(&self) -> String {
        // ---
        let response = self.get("/metrics").await;
        assert!(response.status().is_success());
        response.text().await.expect("Failed to read metrics body")
    }
}

// ============================================================================
// Provider mocks
// ============================================================================

pub fn weather_body(kelvin: f64, conditions: serde_json::Value) -> serde_json::Value {
    // ---
    serde_json::json!({
        "coord": { "lon": -0.13, "lat": 51.51 },
        "weather": conditions,
        "main": { "temp": kelvin, "humidity": 81, "pressure": 1012 },
        "name": "London",
        "cod": 200
    })
}

pub fn light_rain(kelvin: f64) -> serde_json::Value {
    weather_body(
        kelvin,
        serde_json::json!([{ "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }]),
    )
}

/// Mount a provider response for any city.
pub async fn mock_provider(server: &MockServer, response: ResponseTemplate) {
    // ---
    Mock::given(method("GET"))
        .and(path(PROVIDER_PATH))
        .and(query_param("appid", TEST_API_KEY))
        .respond_with(response)
        .mount(server)
        .await;
}

// ============================================================================
// Metrics parsing
// ============================================================================

/// Value of the sample whose name and labels equal `series`,
/// e.g. `web_page_views_total{path="/weather"}`.
pub fn sample(metrics: &str, series: &str) -> u64 {
    // ---
    metrics
        .lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let (name, value) = line.rsplit_once(' ')?;
            (name == series).then(|| value.parse().ok()).flatten()
        })
        .unwrap_or(0)
}
