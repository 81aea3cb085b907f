use crate::domain::WeatherError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub const CITY_REQUIRED: &str = "City parameter is required";
pub const PROVIDER_UNREACHABLE: &str = "Error contacting OpenWeatherMap API";
pub const PROVIDER_UNPARSABLE: &str = "Error parsing OpenWeatherMap API response";
pub const WEATHER_RENDER_FAILED: &str = "Error rendering weather page";
pub const INDEX_RENDER_FAILED: &str = "Error rendering index page";

/// JSON error body: `{"error": "..."}`.
#[derive(Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

/// Error returned by handlers; rendered as a status code plus [`ErrorBody`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, axum::Json(ErrorBody { error: &self.message })).into_response()
    }
}

/// Maps provider failures onto HTTP outcomes.
///
/// A non-success provider status is passed through with its status line
/// (e.g. `404 Not Found`) as the message; transport and decode failures
/// become 500s with fixed messages.
impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        // ---
        match err {
            WeatherError::Transport(_) => ApiError::internal(PROVIDER_UNREACHABLE),
            WeatherError::Decode(_) => ApiError::internal(PROVIDER_UNPARSABLE),
            WeatherError::Upstream {
                status,
                status_text,
            } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                ApiError::new(status, status_text)
            }
        }
    }
}
