//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers and middleware via the `State` extractor. The `AppState`
//! holds the injected services (metrics, weather provider, view renderer)
//! behind `Arc` handles, so it is cheap to clone for each request.

use crate::domain::{MetricsPtr, ViewRendererPtr, WeatherProviderPtr};

/// Shared application state passed to all Axum handlers.
///
/// This struct serves as the Dependency Injection container for the application.
/// Nothing here is ambient global state: production wiring and tests build
/// their own instance and hand it to the router.
///
/// # Design Principles
///
/// - **Dependency Inversion**: Handlers depend on abstractions (`Metrics`,
///   `WeatherProvider`, `ViewRenderer`), not concrete implementations.
/// - **Immutable After Initialization**: State is built once at startup and
///   never mutated. Counters mutate internally through atomics.
/// - **Cheap Cloning**: Every service is wrapped in `Arc`.
///
/// # Lifecycle
///
/// 1. Created once in `create_router_with_config()` during application startup
/// 2. Attached to the Axum router via `.with_state(app_state)` and to the
///    middleware via `from_fn_with_state`
/// 3. Cloned automatically by Axum for each incoming HTTP request
/// 4. Handlers extract via `State(state): State<AppState>`
#[derive(Clone)]
pub struct AppState {
    /// Request counters exposed on `/metrics`.
    metrics: MetricsPtr,

    /// Source of current weather for the `/weather` handler.
    weather: WeatherProviderPtr,

    /// HTML renderer for the index and weather pages.
    views: ViewRendererPtr,

    /// Whether `X-Forwarded-For` / `X-Real-IP` identify the client.
    trust_proxy_headers: bool,
}

impl AppState {
    // ---

    pub fn new(
        metrics: MetricsPtr,
        weather: WeatherProviderPtr,
        views: ViewRendererPtr,
        trust_proxy_headers: bool,
    ) -> Self {
        // ---
        AppState {
            metrics,
            weather,
            views,
            trust_proxy_headers,
        }
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    /// Get a reference to the weather provider.
    pub(crate) fn weather(&self) -> &WeatherProviderPtr {
        // ---
        &self.weather
    }

    /// Get a reference to the view renderer.
    pub(crate) fn views(&self) -> &ViewRendererPtr {
        // ---
        &self.views
    }

    pub(crate) fn trust_proxy_headers(&self) -> bool {
        self.trust_proxy_headers
    }
}
