//! Tera-backed HTML views.
//!
//! `index.html` and `weather.html` are embedded at compile time. When a
//! templates directory is configured, files of the same name there replace
//! the embedded ones; a missing or broken override fails startup rather
//! than the first request.

use crate::domain::{ViewError, ViewRenderer, ViewRendererPtr, WeatherReport};
use std::path::Path;
use std::sync::Arc;
use tera::{Context, Tera};

const INDEX: &str = "index.html";
const WEATHER: &str = "weather.html";

mod embedded {
    pub const INDEX_HTML: &str = include_str!("../../../templates/index.html");
    pub const WEATHER_HTML: &str = include_str!("../../../templates/weather.html");
}

impl From<tera::Error> for ViewError {
    fn from(err: tera::Error) -> Self {
        // Tera nests the useful message in its source chain.
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        ViewError::Render(message)
    }
}

pub struct TeraViews {
    tera: Tera,
}

impl TeraViews {
    pub fn new(templates_dir: Option<&Path>) -> Result<Self, ViewError> {
        // ---
        let mut tera = Tera::default();

        match templates_dir {
            Some(dir) => {
                for name in [INDEX, WEATHER] {
                    let path = dir.join(name);
                    tera.add_template_file(&path, Some(name)).map_err(|err| {
                        ViewError::Compile(format!("{}: {err}", path.display()))
                    })?;
                }
                tracing::info!(dir = %dir.display(), "Loaded templates from directory");
            }
            None => {
                tera.add_raw_templates(vec![
                    (INDEX, embedded::INDEX_HTML),
                    (WEATHER, embedded::WEATHER_HTML),
                ])
                .map_err(|err| ViewError::Compile(err.to_string()))?;
            }
        }

        Ok(Self { tera })
    }
}

impl ViewRenderer for TeraViews {
    fn render_index(&self) -> Result<String, ViewError> {
        Ok(self.tera.render(INDEX, &Context::new())?)
    }

    fn render_weather(&self, report: &WeatherReport) -> Result<String, ViewError> {
        // ---
        let context = Context::from_serialize(report)?;
        Ok(self.tera.render(WEATHER, &context)?)
    }
}

/// Creates the Tera renderer, embedded or directory-backed.
pub fn create(templates_dir: Option<&Path>) -> anyhow::Result<ViewRendererPtr> {
    Ok(Arc::new(TeraViews::new(templates_dir)?))
}
