//! Logging initialization for shelf_app.
//!
//! Everything at the configured level goes to the terminal and to the
//! application log; errors are also copied to a separate error log. Both
//! files live in the configured log directory and are appended to.

use std::fs::{self, File, OpenOptions};
use std::path::Path;

use log::LevelFilter;
use shelf_engine::LoggingConfig;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Maps a config level name to a filter; anything unrecognized is `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    match name.trim().to_ascii_uppercase().as_str() {
        "TRACE" => LevelFilter::Trace,
        "DEBUG" => LevelFilter::Debug,
        "WARN" | "WARNING" => LevelFilter::Warn,
        "ERROR" => LevelFilter::Error,
        "OFF" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Installs the global logger. A log file that cannot be opened is
/// reported on stderr and skipped; the terminal logger always stays.
pub fn initialize(settings: &LoggingConfig) {
    let level = parse_level(&settings.level);
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Err(err) = fs::create_dir_all(&settings.directory) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            settings.directory, err
        );
    } else {
        let files = [
            (settings.files.application_log.as_str(), level),
            (settings.files.error_log.as_str(), LevelFilter::Error),
        ];
        for (name, file_level) in files {
            if let Some(file) = open_log_file(&settings.directory, name) {
                loggers.push(WriteLogger::new(file_level, config.clone(), file));
            }
        }
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn open_log_file(dir: &Path, name: &str) -> Option<File> {
    let log_path = dir.join(name);
    match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => Some(file),
        Err(err) => {
            eprintln!("Warning: Could not open log file at {:?}: {}", log_path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("ERROR"), LevelFilter::Error);
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
        assert_eq!(parse_level(""), LevelFilter::Info);
    }

    #[test]
    fn log_files_are_appended_not_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = open_log_file(dir.path(), "app.log").unwrap();
        writeln!(first, "first run").unwrap();
        drop(first);

        let mut second = open_log_file(dir.path(), "app.log").unwrap();
        writeln!(second, "second run").unwrap();
        drop(second);

        let content = fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert_eq!(content, "first run\nsecond run\n");
    }

    #[test]
    fn missing_directory_yields_no_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_log_file(&dir.path().join("absent"), "app.log").is_none());
    }
}
