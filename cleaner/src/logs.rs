//! Progress logging for cleaning runs.
//!
//! Pipeline stages report through the `log_*` helpers; entries are emitted
//! as `tracing` events so the binary controls formatting and filtering.
//! Stdout stays free for command output.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "life_expectancy=info";

/// Log level of a pipeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into() }
    }

    /// Emit this entry as a tracing event.
    pub fn emit(&self) {
        match self.level {
            LogLevel::Info => tracing::info!("{}", self.message),
            LogLevel::Success => tracing::info!(success = true, "{}", self.message),
            LogLevel::Warning => tracing::warn!("{}", self.message),
        }
    }
}

/// Install the stderr subscriber. Safe to call more than once.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

pub fn log_info(msg: impl Into<String>) {
    LogEntry::info(msg).emit();
}

pub fn log_success(msg: impl Into<String>) {
    LogEntry::success(msg).emit();
}

pub fn log_warning(msg: impl Into<String>) {
    LogEntry::warning(msg).emit();
}
