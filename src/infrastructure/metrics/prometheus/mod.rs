mod counters;
mod prometheus_metrics;
mod recorder;

pub use prometheus_metrics::PrometheusMetrics;
use std::sync::Arc;

// Re-export utilities for internal use within this module
pub(crate) use recorder::render_registry;

/// Creates a new Prometheus metrics implementation.
///
/// Counters are held in a registry owned by the returned instance and
/// exposed through the `/metrics` endpoint for scraping.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!("Initializing Prometheus metrics");

    Ok(Arc::new(PrometheusMetrics::new()?))
}
