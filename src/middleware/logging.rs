//! Post-handler access logging.

use super::client_ip::client_ip;
use crate::app_state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Runs the handler, then emits one info event describing the exchange.
///
/// The status code is read from the response the handler produced, so it
/// always reflects the final outcome of the request.
pub async fn log_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    // ---
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let ip = client_ip(&request, state.trust_proxy_headers());

    let response = next.run(request).await;

    tracing::info!(
        status_code = response.status().as_u16(),
        method = %method,
        path = %path,
        ip = %ip,
        "Request handled"
    );

    response
}
