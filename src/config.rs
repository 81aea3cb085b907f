// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the service.
//! Configuration is validated eagerly and failures are treated as
//! deployment errors rather than recoverable runtime conditions.

use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// # Behavior
/// - Fails fast if the variable is missing or empty
/// - Produces a clear, human-readable error message
/// - Intended for startup-time configuration validation
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used. This macro is appropriate for non-critical
/// tuning parameters where fallback behavior is acceptable.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.trim().parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// Logging configuration is deliberately not part of this struct: it is
/// loaded first (see [`LoggingConfig::from_env`]) so that failures here
/// can be reported through the configured log sink.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: server::ServerConfig,
    pub weather: weather::WeatherConfig,
    pub assets: assets::AssetsConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or invalid.
    /// This function is intended to be called exactly once at startup.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            server: server::ServerConfig::from_env(),
            weather: weather::WeatherConfig::from_env()?,
            assets: assets::AssetsConfig::from_env(),
        })
    }
}

// ============================================================
// Server configuration
// ============================================================

mod server {
    // ---

    /// Listener and request-identity settings.
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        /// Socket address to bind. Defaults to `0.0.0.0:8080`.
        pub bind_addr: String,

        /// Honor `X-Forwarded-For` / `X-Real-IP` when resolving the client IP.
        /// Only enable behind a proxy that overwrites these headers. Defaults to false.
        pub trust_proxy_headers: bool,
    }

    impl ServerConfig {
        pub fn from_env() -> Self {
            // ---
            let bind_addr =
                std::env::var("WEATHER_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
            let trust_proxy_headers = optional_env_parse!("WEATHER_TRUST_PROXY_HEADERS", bool, false);

            Self {
                bind_addr,
                trust_proxy_headers,
            }
        }
    }
}
pub use server::ServerConfig;

// ============================================================
// Weather provider configuration
// ============================================================

mod weather {
    // ---
    use super::*;

    pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// OpenWeatherMap client configuration.
    #[derive(Debug, Clone)]
    pub struct WeatherConfig {
        /// OpenWeatherMap API key, sent as the `appid` query parameter.
        pub api_key: String,

        /// Current-weather endpoint.
        pub api_url: String,

        /// Upper bound for one provider call, connect through body. Defaults to 10 seconds.
        pub timeout: Duration,
    }

    impl WeatherConfig {
        /// Builds a [`WeatherConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `OPENWEATHERMAP_API_KEY` is missing or empty.
        pub fn from_env() -> Result<Self> {
            // ---
            let api_key = required_env!("OPENWEATHERMAP_API_KEY");
            let api_url =
                std::env::var("WEATHER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
            // Zero would fail every lookup; treat it like an unparsable value.
            let timeout_secs =
                match optional_env_parse!("WEATHER_API_TIMEOUT_SEC", u64, DEFAULT_TIMEOUT_SECS) {
                    0 => DEFAULT_TIMEOUT_SECS,
                    secs => secs,
                };

            Ok(Self {
                api_key,
                api_url,
                timeout: Duration::from_secs(timeout_secs),
            })
        }
    }
}
pub use weather::WeatherConfig;

// ============================================================
// Static assets and templates
// ============================================================

mod assets {
    // ---
    use super::*;

    #[derive(Debug, Clone)]
    pub struct AssetsConfig {
        /// Directory served under `/static`. Defaults to `static`.
        pub static_dir: PathBuf,

        /// Optional directory holding `index.html` / `weather.html` overrides.
        /// When unset the embedded templates are used.
        pub templates_dir: Option<PathBuf>,
    }

    impl AssetsConfig {
        pub fn from_env() -> Self {
            // ---
            let static_dir = optional_env_parse!("WEATHER_STATIC_DIR", PathBuf, PathBuf::from("static"));
            let templates_dir = std::env::var("WEATHER_TEMPLATES_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from);

            Self {
                static_dir,
                templates_dir,
            }
        }
    }
}
pub use assets::AssetsConfig;

// ============================================================
// Logging configuration
// ============================================================

mod logging {
    // ---
    use super::*;
    use std::fmt;
    use std::str::FromStr;

    /// Rendering of a single log event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum LogFormat {
        /// `[timestamp] LEVEL: message key=value`
        Line,
        /// One JSON object per event.
        Json,
    }

    /// Where log events are written.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum LogDestination {
        Stdout,
        File,
        Both,
    }

    impl LogDestination {
        /// True when events reach the log file.
        pub fn includes_file(self) -> bool {
            matches!(self, LogDestination::File | LogDestination::Both)
        }
    }

    impl FromStr for LogFormat {
        type Err = anyhow::Error;

        fn from_str(s: &str) -> Result<Self> {
            match s.to_ascii_lowercase().as_str() {
                "line" | "text" => Ok(LogFormat::Line),
                "json" => Ok(LogFormat::Json),
                other => Err(anyhow::anyhow!("unknown log format '{other}'")),
            }
        }
    }

    impl FromStr for LogDestination {
        type Err = anyhow::Error;

        fn from_str(s: &str) -> Result<Self> {
            match s.to_ascii_lowercase().as_str() {
                "stdout" | "console" => Ok(LogDestination::Stdout),
                "file" => Ok(LogDestination::File),
                "both" => Ok(LogDestination::Both),
                other => Err(anyhow::anyhow!("unknown log destination '{other}'")),
            }
        }
    }

    impl fmt::Display for LogFormat {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                LogFormat::Line => "line",
                LogFormat::Json => "json",
            })
        }
    }

    impl fmt::Display for LogDestination {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                LogDestination::Stdout => "stdout",
                LogDestination::File => "file",
                LogDestination::Both => "both",
            })
        }
    }

    /// Log sink configuration. Never fails to load: unknown values fall
    /// back to the defaults so the logger can always come up.
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        pub format: LogFormat,
        pub destination: LogDestination,

        /// Append-only log file, used when the destination includes a file.
        pub file_path: PathBuf,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                format: LogFormat::Line,
                destination: LogDestination::Stdout,
                file_path: PathBuf::from("weather.log"),
            }
        }
    }

    impl LoggingConfig {
        pub fn from_env() -> Self {
            // ---
            let defaults = Self::default();

            Self {
                format: optional_env_parse!("WEATHER_LOG_FORMAT", LogFormat, defaults.format),
                destination: optional_env_parse!(
                    "WEATHER_LOG_DESTINATION",
                    LogDestination,
                    defaults.destination
                ),
                file_path: optional_env_parse!("WEATHER_LOG_FILE", PathBuf, defaults.file_path),
            }
        }
    }
}
pub use logging::{LogDestination, LogFormat, LoggingConfig};

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use anyhow::Result;
    use serial_test::serial;

    fn clear_weather_env() {
        // ---
        for key in [
            "OPENWEATHERMAP_API_KEY",
            "WEATHER_API_URL",
            "WEATHER_API_TIMEOUT_SEC",
            "WEATHER_BIND_ADDR",
            "WEATHER_TRUST_PROXY_HEADERS",
            "WEATHER_STATIC_DIR",
            "WEATHER_TEMPLATES_DIR",
            "WEATHER_LOG_FORMAT",
            "WEATHER_LOG_DESTINATION",
            "WEATHER_LOG_FILE",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn missing_api_key_fails() -> Result<()> {
        // ---
        clear_weather_env();

        assert_missing_config!(weather::WeatherConfig::from_env(), "OPENWEATHERMAP_API_KEY");
        assert_missing_config!(AppConfig::from_env(), "OPENWEATHERMAP_API_KEY");

        Ok(())
    }

    #[test]
    #[serial]
    fn empty_api_key_fails() -> Result<()> {
        // ---
        clear_weather_env();
        std::env::set_var("OPENWEATHERMAP_API_KEY", "   ");

        assert_missing_config!(weather::WeatherConfig::from_env(), "OPENWEATHERMAP_API_KEY");

        Ok(())
    }

    #[test]
    #[serial]
    fn weather_defaults_applied() -> Result<()> {
        // ---
        clear_weather_env();
        std::env::set_var("OPENWEATHERMAP_API_KEY", "secret");

        let cfg = weather::WeatherConfig::from_env()?;
        assert_eq!(cfg.api_key, "secret");
        assert_eq!(cfg.api_url, weather::DEFAULT_API_URL);
        assert_eq!(cfg.timeout.as_secs(), 10);

        Ok(())
    }

    #[test]
    #[serial]
    fn overrides_defaults() -> Result<()> {
        // ---
        clear_weather_env();
        std::env::set_var("OPENWEATHERMAP_API_KEY", "secret");
        std::env::set_var("WEATHER_API_URL", "http://localhost:9999/weather");
        std::env::set_var("WEATHER_API_TIMEOUT_SEC", "3");
        std::env::set_var("WEATHER_BIND_ADDR", "127.0.0.1:3000");
        std::env::set_var("WEATHER_TRUST_PROXY_HEADERS", "true");
        std::env::set_var("WEATHER_STATIC_DIR", "/srv/static");
        std::env::set_var("WEATHER_TEMPLATES_DIR", "/srv/templates");

        let cfg = AppConfig::from_env()?;
        assert_eq!(cfg.weather.api_url, "http://localhost:9999/weather");
        assert_eq!(cfg.weather.timeout.as_secs(), 3);
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:3000");
        assert!(cfg.server.trust_proxy_headers);
        assert_eq!(cfg.assets.static_dir, PathBuf::from("/srv/static"));
        assert_eq!(cfg.assets.templates_dir, Some(PathBuf::from("/srv/templates")));

        clear_weather_env();
        Ok(())
    }

    #[test]
    #[serial]
    fn unparsable_timeout_falls_back() -> Result<()> {
        // ---
        clear_weather_env();
        std::env::set_var("OPENWEATHERMAP_API_KEY", "secret");
        std::env::set_var("WEATHER_API_TIMEOUT_SEC", "soon");

        let cfg = weather::WeatherConfig::from_env()?;
        assert_eq!(cfg.timeout.as_secs(), 10);

        clear_weather_env();
        Ok(())
    }

    #[test]
    #[serial]
    fn zero_timeout_falls_back() -> Result<()> {
        // ---
        clear_weather_env();
        std::env::set_var("OPENWEATHERMAP_API_KEY", "secret");
        std::env::set_var("WEATHER_API_TIMEOUT_SEC", "0");

        let cfg = weather::WeatherConfig::from_env()?;
        assert_eq!(cfg.timeout.as_secs(), 10);

        clear_weather_env();
        Ok(())
    }

    #[test]
    #[serial]
    fn logging_defaults_and_overrides() {
        // ---
        clear_weather_env();

        let cfg = LoggingConfig::from_env();
        assert_eq!(cfg.format, LogFormat::Line);
        assert_eq!(cfg.destination, LogDestination::Stdout);
        assert_eq!(cfg.file_path, PathBuf::from("weather.log"));

        std::env::set_var("WEATHER_LOG_FORMAT", "JSON");
        std::env::set_var("WEATHER_LOG_DESTINATION", "both");
        std::env::set_var("WEATHER_LOG_FILE", "/var/log/weather.log");

        let cfg = LoggingConfig::from_env();
        assert_eq!(cfg.format, LogFormat::Json);
        assert_eq!(cfg.destination, LogDestination::Both);
        assert!(cfg.destination.includes_file());
        assert!(!LogDestination::Stdout.includes_file());
        assert_eq!(cfg.file_path, PathBuf::from("/var/log/weather.log"));

        std::env::set_var("WEATHER_LOG_FORMAT", "xml");
        assert_eq!(LoggingConfig::from_env().format, LogFormat::Line);

        clear_weather_env();
    }
}
