use super::WeatherReport;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("template compilation failed: {0}")]
    Compile(String),

    #[error("template rendering failed: {0}")]
    Render(String),
}

/// Turns view models into HTML. The HTTP layer treats this as a black box.
pub trait ViewRenderer: Send + Sync + 'static {
    // ---
    /// Landing page with the city search form.
    fn render_index(&self) -> Result<String, ViewError>;

    /// Current conditions for one city.
    fn render_weather(&self, report: &WeatherReport) -> Result<String, ViewError>;
}

pub type ViewRendererPtr = Arc<dyn ViewRenderer>;
