// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod health;
mod metrics;
mod root;
mod shared_types;
mod weather;

// Core handlers
pub use health::health_check;
pub use metrics::metrics_handler;
pub use root::{not_found, root_handler};

// Weather lookup
pub use weather::weather_handler;
