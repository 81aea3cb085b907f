// src/lib.rs
use anyhow::Result;
use axum::{routing::get, Router};
use std::path::Path;
use tower_http::services::ServeDir;

use handlers::{health_check, metrics_handler, not_found, root_handler, weather_handler};

// Public exports (visible outside this module)
pub mod domain;
pub mod logging;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;
mod middleware;

#[cfg(test)]
mod test_support;

pub use app_state::AppState;
pub use config::*;
pub use middleware::{STATIC_ROUTE, UNKNOWN_CLIENT, UNMATCHED_ROUTE};

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_openweather_provider, // ---
    create_prom_metrics,
    create_tera_views,
    OpenWeatherClient,
    TeraViews,
};

/// Build the HTTP router with configuration read from the environment.
pub fn create_router() -> Result<Router> {
    // ---
    let config = AppConfig::from_env()?;
    create_router_with_config(&config)
}

/// Build the HTTP router with production services wired from `config`.
pub fn create_router_with_config(config: &AppConfig) -> Result<Router> {
    // ---
    let metrics = create_prom_metrics()?;
    let weather = create_openweather_provider(&config.weather)?;
    let views = create_tera_views(config.assets.templates_dir.as_deref())?;

    let app_state = AppState::new(metrics, weather, views, config.server.trust_proxy_headers);

    Ok(build_router(app_state, &config.assets.static_dir))
}

/// Build the router around already constructed services.
///
/// Every route, the static file service and the fallback sit inside the
/// metrics and logging middleware.
pub fn build_router(app_state: AppState, static_dir: &Path) -> Router {
    // ---
    let router = Router::new()
        .route("/", get(root_handler))
        .route("/weather", get(weather_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_check))
        .nest_service(middleware::STATIC_PREFIX, ServeDir::new(static_dir))
        .fallback(not_found);

    middleware::apply(router, &app_state).with_state(app_state)
}
