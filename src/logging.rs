//! Logging System
//!
//! Structured logging via the `tracing` crate. Level and format come from CLI
//! flags or the `INTEGRITY_LOG` environment variable; progress output for the
//! console is separate and always printed.

use crate::error::IntegrityError;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    pub level: String,
    /// Output format: json, text
    pub format: String,
    /// Colored output (text format only)
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            color: true,
        }
    }
}

/// Initialize the logging system.
///
/// `INTEGRITY_LOG` overrides the configured level when set. Logs go to
/// stderr so they never interleave with the per-file progress lines on
/// stdout.
pub fn init_logging(config: &LoggingConfig) -> Result<(), IntegrityError> {
    let filter = build_env_filter(config);
    let base = Registry::default().with(filter);

    match config.format.as_str() {
        "json" => {
            base.with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .init();
        }
        "text" => {
            base.with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .init();
        }
        other => {
            return Err(IntegrityError::Config(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            )))
        }
    }

    Ok(())
}

fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env("INTEGRITY_LOG") {
        return filter;
    }
    EnvFilter::new(config.level.as_str())
}
