// Gateway module - controls the middleware chain applied to every route
// Modules are private, only exported symbols are public

mod client_ip;
mod logging;
mod metrics;

pub use client_ip::UNKNOWN_CLIENT;
pub use logging::log_requests;
pub use metrics::{track_requests, STATIC_PREFIX, STATIC_ROUTE, UNMATCHED_ROUTE};

use crate::app_state::AppState;
use axum::{middleware::from_fn_with_state, Router};

/// Wraps `router` in the request chain: metrics (outermost) then logging.
///
/// Must be called after every route and the fallback are registered;
/// `Router::layer` only wraps what already exists.
pub(crate) fn apply(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    // ---
    router
        .layer(from_fn_with_state(state.clone(), log_requests))
        .layer(from_fn_with_state(state.clone(), track_requests))
}
