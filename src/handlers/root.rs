use crate::app_state::AppState;
use crate::handlers::shared_types::{ApiError, INDEX_RENDER_FAILED};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};

/// Landing page with the city search form.
pub async fn root_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    // ---
    let html = state.views().render_index().map_err(|err| {
        tracing::error!(error = %err, "Failed to render index page");
        ApiError::internal(INDEX_RENDER_FAILED)
    })?;

    Ok(Html(html))
}

/// Fallback for requests that match no route.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 page not found")
}
