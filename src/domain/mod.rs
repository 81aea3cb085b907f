mod metrics;
mod views;
mod weather;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Weather provider abstraction and the data flowing through it
pub use weather::{
    kelvin_to_celsius, MainReadings, WeatherCondition, WeatherData, WeatherError, WeatherProvider,
    WeatherProviderPtr, WeatherReport, ICON_URL_BASE,
};

// HTML rendering abstraction
pub use views::{ViewError, ViewRenderer, ViewRendererPtr};
