//! Logging configuration for the folder packer
//!
//! Logs are written to both the terminal and a file at:
//! `{data_local_dir}/Audio-Folder-Packer/logs/folder-packer.log`

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

const LOG_FILE_NAME: &str = "folder-packer.log";

/// Rotate the log once it grows past this size
const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;

/// Get the log directory path
pub fn get_log_directory() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("Audio-Folder-Packer").join("logs"))
}

/// Get the current log file path
pub fn get_log_file_path() -> Option<PathBuf> {
    get_log_directory().map(|d| d.join(LOG_FILE_NAME))
}

/// Terminal level for a `-v` count: 0 = info, 1 = debug, 2+ = trace
pub fn terminal_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn log_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build()
}

/// Initialize the logging system
///
/// Sets up combined logging to:
/// - Terminal, at a level chosen by `verbosity`
/// - File, at debug and above
///
/// Returns the path to the log file on success
pub fn init_logging(verbosity: u8) -> Option<PathBuf> {
    let term_level = terminal_level(verbosity);

    let log_dir = match get_log_directory() {
        Some(d) => d,
        None => {
            eprintln!("Warning: Could not determine log directory");
            init_terminal_only(term_level);
            return None;
        }
    };

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Could not create log directory: {}", e);
        init_terminal_only(term_level);
        return None;
    }

    let log_path = log_dir.join(LOG_FILE_NAME);

    if let Ok(metadata) = fs::metadata(&log_path) {
        if metadata.len() > MAX_LOG_BYTES {
            let backup_path = log_dir.join(format!("{}.old", LOG_FILE_NAME));
            let _ = fs::rename(&log_path, &backup_path);
        }
    }

    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file: {}", e);
            init_terminal_only(term_level);
            return None;
        }
    };

    let config = log_config();
    let loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(term_level, config.clone(), TerminalMode::Mixed, ColorChoice::Auto),
        WriteLogger::new(LevelFilter::Debug, config, log_file),
    ];

    if CombinedLogger::init(loggers).is_err() {
        eprintln!("Warning: Logger already initialized");
    }

    log::debug!("=== Folder packer session started ===");
    log::debug!("Log file: {}", log_path.display());

    Some(log_path)
}

/// Initialize terminal-only logging (fallback if file logging fails)
fn init_terminal_only(level: LevelFilter) {
    let _ = TermLogger::init(level, log_config(), TerminalMode::Mixed, ColorChoice::Auto);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_log_file_path_returns_path() {
        let path = get_log_file_path();
        assert!(path.is_some(), "Should return a log file path");

        let file_path = path.unwrap();
        assert!(
            file_path.to_string_lossy().ends_with("folder-packer.log"),
            "Path should end with log filename"
        );
    }

    #[test]
    fn test_log_file_path_is_inside_log_directory() {
        let dir = get_log_directory().unwrap();
        let file = get_log_file_path().unwrap();

        assert!(
            file.starts_with(&dir),
            "Log file should be inside log directory"
        );
        assert!(dir.to_string_lossy().contains("Audio-Folder-Packer"));
    }

    #[test]
    fn test_terminal_level() {
        assert_eq!(terminal_level(0), LevelFilter::Info);
        assert_eq!(terminal_level(1), LevelFilter::Debug);
        assert_eq!(terminal_level(2), LevelFilter::Trace);
        assert_eq!(terminal_level(9), LevelFilter::Trace);
    }
}
