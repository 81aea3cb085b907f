use crate::app_state::AppState;
use crate::domain::WeatherReport;
use crate::handlers::shared_types::{ApiError, CITY_REQUIRED, WEATHER_RENDER_FAILED};
use axum::{
    extract::{Query, State},
    response::Html,
};

/// Raw query pairs; a repeated `city` is not a deserialization error.
type QueryPairs = Vec<(String, String)>;

/// A repeated `city` resolves to its first occurrence.
fn first_city(pairs: QueryPairs) -> Option<String> {
    pairs
        .into_iter()
        .find_map(|(key, value)| (key == "city").then_some(value))
}

/// Handler for the current-weather page (GET /weather?city=...).
///
/// - Missing or empty `city` responds with `400 Bad Request`; the provider
///   is not called.
/// - Provider failures are mapped by [`ApiError::from`]: transport and
///   decode failures become `500`, a provider error status is passed
///   through with its status line as the message.
/// - On success, renders the weather page with the temperature in Celsius.
///
/// None of these outcomes affect other requests or the process.
#[tracing::instrument(skip(state))]
pub async fn weather_handler(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Html<String>, ApiError> {
    // ---
    let Some(city) = first_city(pairs).filter(|city| !city.is_empty()) else {
        tracing::warn!("City parameter is required");
        return Err(ApiError::bad_request(CITY_REQUIRED));
    };

    let data = state
        .weather()
        .current_weather(&city)
        .await
        .map_err(|err| {
            tracing::error!(city = %city, error = %err, "Weather lookup failed");
            ApiError::from(err)
        })?;

    let report = WeatherReport::new(&city, &data);

    let html = state.views().render_weather(&report).map_err(|err| {
        tracing::error!(city = %city, error = %err, "Failed to render weather page");
        ApiError::internal(WEATHER_RENDER_FAILED)
    })?;

    Ok(Html(html))
}
