//! Pre-handler request counting.

use super::client_ip::client_ip;
use crate::app_state::AppState;
use axum::{
    extract::{MatchedPath, OriginalUri, Request, State},
    middleware::Next,
    response::Response,
};

/// Route label for requests that matched no route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Mount point of the static file service.
pub const STATIC_PREFIX: &str = "/static";

/// Route label shared by every request under [`STATIC_PREFIX`].
pub const STATIC_ROUTE: &str = "/static/*";

/// Counts the request, then delegates.
///
/// Counting happens before the handler runs, so every request is counted
/// exactly once whatever the handler returns. The page-view label is the
/// matched route template, never the raw URL.
pub async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    // ---
    let route = route_label(&request);
    let ip = client_ip(&request, state.trust_proxy_headers());

    state.metrics().record_request(&route, &ip);

    next.run(request).await
}

/// Nested services carry no `MatchedPath`, so the static mount is
/// labeled by prefix before falling back to the router's template.
fn route_label(request: &Request) -> String {
    // ---
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path())
        .unwrap_or_else(|| request.uri().path());

    if is_static(path) {
        return STATIC_ROUTE.to_owned();
    }

    request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_owned())
}

fn is_static(path: &str) -> bool {
    path.strip_prefix(STATIC_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
