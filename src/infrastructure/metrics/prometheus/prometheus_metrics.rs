//! Prometheus metrics implementation.
//!
//! This module provides a concrete implementation of the `Metrics` trait
//! backed by the `prometheus` crate. Each instance owns its own
//! `Registry`, so two routers (or two tests) never share counter values.
//! Counter definitions live in `counters.rs` and text encoding in
//! `recorder.rs`.

use super::counters::RequestCounters;
use crate::domain::Metrics;
use prometheus::Registry;

/// Prometheus-based metrics implementation.
pub struct PrometheusMetrics {
    registry: Registry,
    counters: RequestCounters,
}

impl PrometheusMetrics {
    pub fn new() -> anyhow::Result<Self> {
        tracing::info!("Creating Prometheus metrics");
        let registry = Registry::new();
        let counters = RequestCounters::register(&registry)?;

        Ok(PrometheusMetrics { registry, counters })
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> anyhow::Result<String> {
        super::render_registry(&self.registry)
    }

    fn record_request(&self, route: &str, client_ip: &str) {
        tracing::debug!(route, client_ip, "Recording request");
        self.counters.increment(route, client_ip);
    }
}
