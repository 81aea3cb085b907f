//! Process-wide structured logging.
//!
//! Every component logs through the `tracing` macros. This module owns the
//! single subscriber those events flow into: an `EnvFilter` (`RUST_LOG`,
//! default `info`) in front of one `fmt` layer whose event format and
//! writer are chosen from [`LoggingConfig`].

use crate::config::{LogDestination, LogFormat, LoggingConfig};
use anyhow::{anyhow, Context, Result};
use chrono::{SecondsFormat, Utc};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Single-line event format: `[2024-05-01T10:00:00Z] INFO: message key=value`.
///
/// String values are written bare (`path=/weather`), everything else
/// through its `Debug` (or, with `%`, `Display`) form.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

/// Collects the message and trailing `key=value` pairs of one event.
#[derive(Default)]
struct LineFields {
    message: String,
    pairs: String,
}

impl LineFields {
    fn push(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.pairs.push_str(&format!(" {}={}", field.name(), value));
        }
    }
}

impl Visit for LineFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, format_args!("{value}"));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format_args!("{value:?}"));
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        // ---
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut fields = LineFields::default();
        event.record(&mut fields);

        writeln!(
            writer,
            "[{}] {}: {}{}",
            timestamp,
            event.metadata().level(),
            fields.message,
            fields.pairs
        )
    }
}

/// Opens the log file in append mode, creating it (but not its parent
/// directory) when missing.
fn open_log_file(config: &LoggingConfig) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file_path)
        .with_context(|| format!("failed to open log file {}", config.file_path.display()))
}

/// Builds the writer for the configured destination.
///
/// The file handle is acquired here and lives as long as the subscriber.
/// It sits behind a `Mutex` so concurrent events are written whole.
fn make_writer(config: &LoggingConfig) -> Result<BoxMakeWriter> {
    // ---
    let writer = match config.destination {
        LogDestination::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogDestination::File => BoxMakeWriter::new(Mutex::new(open_log_file(config)?)),
        LogDestination::Both => {
            let file = Mutex::new(open_log_file(config)?);
            BoxMakeWriter::new(std::io::stdout.and(file))
        }
    };
    Ok(writer)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Builds the subscriber described by `config` without installing it.
///
/// Tests use this with `tracing::subscriber::with_default` so each one
/// gets its own sink.
pub fn build_subscriber(config: &LoggingConfig) -> Result<Box<dyn Subscriber + Send + Sync>> {
    // ---
    let writer = make_writer(config)?;
    let registry = tracing_subscriber::registry().with(env_filter());

    // Escape codes only make sense on a terminal, never in the log file.
    let ansi = !config.destination.includes_file();

    let subscriber: Box<dyn Subscriber + Send + Sync> = match config.format {
        LogFormat::Line => Box::new(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .event_format(LineFormat)
                    .with_ansi(ansi)
                    .with_writer(writer),
            ),
        ),
        LogFormat::Json => Box::new(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(writer),
            ),
        ),
    };

    Ok(subscriber)
}

/// Installs the process-wide subscriber.
///
/// # Errors
/// Fails if the log file cannot be opened or a global subscriber is
/// already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // ---
    let subscriber = build_subscriber(config)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    tracing::info!(
        format = %config.format,
        destination = %config.destination,
        "Logging initialized"
    );
    Ok(())
}

/// Logs `err` at the highest severity and terminates the process.
///
/// Reserved for startup failures that make serving impossible (missing
/// configuration, unbindable listener). Request-time failures are mapped
/// to HTTP responses instead.
pub fn fatal(err: &anyhow::Error) -> ! {
    // ---
    tracing::error!(fatal = true, "{err:#}");
    let _ = std::io::stdout().flush();
    std::process::exit(1)
}
