//! Structured logging for the greatify binary.
//!
//! Provides dual-mode logging:
//! - Human-readable console output for interactive use
//! - Machine-parseable JSONL for scripted runs
//!
//! # Design Notes
//!
//! - stdout is reserved for report output (HTML or data URL)
//! - stderr receives all log output (human or JSONL)
//! - Every `report` run opens a span carrying a `run_id` for correlation
//! - Event names are shared with the pipeline (see [`event_names`])

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Standard event names used in logging.
pub mod event_names {
    pub use gr_report::logging::event_names::*;

    pub const CONFIG_LOADED: &str = "config.loaded";
    pub const CONFIG_ERROR: &str = "config.error";
    pub const SNAPSHOT_LOADED: &str = "snapshot.loaded";
    pub const SNAPSHOT_ERROR: &str = "snapshot.error";
    pub const OUTPUT_WRITTEN: &str = "output.written";
}

/// Crates whose events pass the default filter.
const LOG_TARGETS: [&str; 5] = ["greatify", "gr_core", "gr_report", "gr_config", "gr_common"];

/// Build the env filter: RUST_LOG when set, else the configured level for our crates.
fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = LevelFilter::from(config.level);
        let directives = LOG_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, level))
            .collect::<Vec<_>>()
            .join(",");
        EnvFilter::new(directives)
    })
}

/// Initialize the logging subsystem.
///
/// Call once at startup. Returns false when a global subscriber was
/// already installed.
pub fn init_logging(config: &LogConfig) -> bool {
    let filter = build_filter(config);

    let result = match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => {
            let jsonl_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .with_span_list(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(jsonl_layer)
                .try_init()
        }
    };
    result.is_ok()
}

/// Generate a unique run ID for this invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    // First 12 hex chars are enough to correlate one run's events.
    format!("run-{}", &uuid.simple().to_string()[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_run_id() {
        let id1 = generate_run_id();
        let id2 = generate_run_id();

        assert!(id1.starts_with("run-"));
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 16);
        assert!(id1[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_event_names_include_pipeline_events() {
        assert_eq!(event_names::REPORT_STARTED, "report.started");
        assert_eq!(event_names::CONFIG_LOADED, "config.loaded");
    }

    #[test]
    fn test_log_config_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.format, LogFormat::Human);
        assert_eq!(config.level, LogLevel::Warn);
    }
}
