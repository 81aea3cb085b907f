use crate::app_state::AppState;
use crate::handlers::shared_types::ApiError;
use axum::{extract::State, http::StatusCode, response::IntoResponse};

/// Handler for the `/metrics` endpoint.
///
/// Returns the request counters in Prometheus text format for scraping.
pub async fn metrics_handler(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    // ---
    tracing::debug!("Handling metrics request");

    let metrics_text = app_state.metrics().render().map_err(|err| {
        tracing::error!(error = %err, "Failed to render metrics");
        ApiError::internal("Error rendering metrics")
    })?;

    Ok((
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        metrics_text,
    ))
}
