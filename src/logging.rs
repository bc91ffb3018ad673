//! Tracing setup: a console layer plus three size-rotated log files.
//!
//! - `error.log`: error events only
//! - `combined.log`: every event passing the configured level
//! - `performance.log`: events with target `performance`
//!
//! File lines look like
//! `2026-01-01T09:00:00.000+08:00 [INFO] message {"key":"value"}`.

use crate::config::LogConfig;
use anyhow::Context;
use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use std::sync::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::{filter_fn, LevelFilter};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Rotate a log file once it reaches this size.
pub const MAX_LOG_BYTES: usize = 5 * 1024 * 1024;
/// Files kept per log, the live file included.
pub const MAX_LOG_FILES: usize = 5;
/// Target routed to `performance.log`.
pub const PERFORMANCE_TARGET: &str = "performance";

/// Size-rotated file writer usable as a `MakeWriter`.
pub type RotatingWriter = Mutex<FileRotate<AppendCount>>;

pub fn rotating_writer(path: &Path) -> RotatingWriter {
    rotating_writer_with_limit(path, MAX_LOG_BYTES)
}

fn rotating_writer_with_limit(path: &Path, max_bytes: usize) -> RotatingWriter {
    Mutex::new(FileRotate::new(
        path,
        AppendCount::new(MAX_LOG_FILES - 1),
        ContentLimit::Bytes(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    ))
}

/// Render one line: timestamp, level, message, then fields as JSON.
pub fn render_line(
    timestamp: &str,
    level: &Level,
    message: &str,
    fields: &Map<String, Value>,
) -> String {
    if fields.is_empty() {
        format!("{timestamp} [{level}] {message}")
    } else {
        format!(
            "{timestamp} [{level}] {message} {}",
            Value::Object(fields.clone())
        )
    }
}

/// Event formatter for the log files.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

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
        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let timestamp = chrono::Local::now()
            .format("%Y-%m-%dT%H:%M:%S%.3f%:z")
            .to_string();
        let line = render_line(
            &timestamp,
            event.metadata().level(),
            &visitor.message,
            &visitor.fields,
        );
        writeln!(writer, "{line}")
    }
}

/// Collects the `message` field and every other field as JSON.
#[derive(Default)]
struct JsonVisitor {
    message: String,
    fields: Map<String, Value>,
}

impl JsonVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for JsonVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.insert(field, Value::from(value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.insert(field, Value::from(format!("{value:?}")));
        }
    }
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Creates the log directory if needed.
pub fn init(config: &LogConfig) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", config.log_dir))?;

    let console = tracing_subscriber::fmt::layer()
        .with_ansi(config.ansi())
        .with_filter(level_filter(&config.level));

    let error_file = tracing_subscriber::fmt::layer()
        .event_format(LineFormat)
        .with_ansi(false)
        .with_writer(rotating_writer(&config.log_dir.join("error.log")))
        .with_filter(LevelFilter::ERROR);

    let combined_file = tracing_subscriber::fmt::layer()
        .event_format(LineFormat)
        .with_ansi(false)
        .with_writer(rotating_writer(&config.log_dir.join("combined.log")))
        .with_filter(level_filter(&config.level));

    let performance_file = tracing_subscriber::fmt::layer()
        .event_format(LineFormat)
        .with_ansi(false)
        .with_writer(rotating_writer(&config.log_dir.join("performance.log")))
        .with_filter(filter_fn(|metadata| metadata.target() == PERFORMANCE_TARGET));

    tracing_subscriber::registry()
        .with(console)
        .with(error_file)
        .with(combined_file)
        .with(performance_file)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_line_without_fields() {
        let line = render_line(
            "2026-01-01T09:00:00.000+08:00",
            &Level::INFO,
            "Schema initialized",
            &Map::new(),
        );
        assert_eq!(
            line,
            "2026-01-01T09:00:00.000+08:00 [INFO] Schema initialized"
        );
    }

    #[test]
    fn test_render_line_with_fields() {
        let mut fields = Map::new();
        fields.insert("phase".to_string(), Value::from("salaries"));
        fields.insert("rows".to_string(), Value::from(25u64));
        let line = render_line("ts", &Level::ERROR, "Phase failed", &fields);
        assert_eq!(
            line,
            r#"ts [ERROR] Phase failed {"phase":"salaries","rows":25}"#
        );
    }

    #[test]
    fn test_file_layers_route_events() {
        let dir = tempfile::tempdir().unwrap();
        let error_path = dir.path().join("error.log");
        let performance_path = dir.path().join("performance.log");

        let subscriber = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(LineFormat)
                    .with_ansi(false)
                    .with_writer(rotating_writer(&error_path))
                    .with_filter(LevelFilter::ERROR),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(LineFormat)
                    .with_ansi(false)
                    .with_writer(rotating_writer(&performance_path))
                    .with_filter(filter_fn(|m| m.target() == PERFORMANCE_TARGET)),
            );

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("plain info");
            tracing::error!(phase = "attendance", "phase failed");
            tracing::info!(target: "performance", rows = 10u64, "phase complete");
        });

        let errors = std::fs::read_to_string(&error_path).unwrap();
        assert!(errors.contains(r#"[ERROR] phase failed {"phase":"attendance"}"#));
        assert!(!errors.contains("plain info"));

        let performance = std::fs::read_to_string(&performance_path).unwrap();
        assert!(performance.contains(r#"[INFO] phase complete {"rows":10}"#));
        assert!(!performance.contains("phase failed"));
    }

    #[test]
    fn test_rotation_keeps_bounded_file_count() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let writer = rotating_writer_with_limit(&dir.path().join("app.log"), 16);
        for i in 0..20 {
            let mut file = writer.lock().unwrap();
            writeln!(file, "line {i:02} of the log").unwrap();
        }

        let files = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, MAX_LOG_FILES);
    }
}
