#![deny(missing_docs)]
//! Shared logging utilities for the shelf workspace.
//!
//! This crate provides the `shelf_*` logging macros, the [`LogSink`]
//! capability that is handed to the pipeline and exporters, and a minimal
//! test initializer for the global logger.

use std::sync::Mutex;

pub use log::Level;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! shelf_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! shelf_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! shelf_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! shelf_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! shelf_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for operator-facing log lines.
///
/// Components receive a sink explicitly instead of reaching for a global
/// logger, so a caller decides where their messages end up.
pub trait LogSink: Send + Sync {
    /// Records one message at the given level.
    fn record(&self, level: Level, message: &str);

    /// Records a debug-level message.
    fn debug(&self, message: &str) {
        self.record(Level::Debug, message);
    }

    /// Records an info-level message.
    fn info(&self, message: &str) {
        self.record(Level::Info, message);
    }

    /// Records a warn-level message.
    fn warn(&self, message: &str) {
        self.record(Level::Warn, message);
    }

    /// Records an error-level message.
    fn error(&self, message: &str) {
        self.record(Level::Error, message);
    }
}

/// Forwards every record to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeLog;

impl LogSink for FacadeLog {
    fn record(&self, level: Level, message: &str) {
        match level {
            Level::Error => shelf_error!("{message}"),
            Level::Warn => shelf_warn!("{message}"),
            Level::Info => shelf_info!("{message}"),
            Level::Debug => shelf_debug!("{message}"),
            Level::Trace => shelf_trace!("{message}"),
        }
    }
}

/// Keeps records in memory; used by tests to assert on what was logged.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<(Level, String)>>,
}

impl MemoryLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded entry, oldest first.
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Returns true if an entry at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|(l, message)| *l == level && message.contains(needle))
    }
}

impl LogSink for MemoryLog {
    fn record(&self, level: Level, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((level, message.to_string()));
    }
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
