use anyhow::Context;
use prometheus::{Encoder, Registry, TextEncoder};

/// Render every metric family in `registry` in Prometheus text format.
pub fn render_registry(registry: &Registry) -> anyhow::Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&registry.gather(), &mut buffer)
        .context("failed to encode metrics")?;

    String::from_utf8(buffer).context("metrics output was not valid UTF-8")
}
