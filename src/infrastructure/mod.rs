pub mod metrics;
mod openweather;
mod templates;

// Re-export the factory functions for easy access
pub use metrics::create_prom_metrics;
pub use openweather::{create as create_openweather_provider, OpenWeatherClient};
pub use templates::{create as create_tera_views, TeraViews};
