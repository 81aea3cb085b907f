use std::sync::Arc;

/// Abstraction over the request counters exposed on `/metrics`.
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Render current counters in Prometheus text exposition format.
    fn render(&self) -> anyhow::Result<String>;

    /// Record one inbound request.
    ///
    /// `route` is the matched route template (not the raw URL), so requests
    /// differing only in query string or path parameters share a label.
    fn record_request(&self, route: &str, client_ip: &str);
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;
