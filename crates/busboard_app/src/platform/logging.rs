//! Platform logging initialization for busboard.
//!
//! Writes logs to `./busboard.log` in the current working directory by default,
//! since the terminal itself is used to draw the board.

use std::env;
use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_ENV: &str = "BUSBOARD_LOG";
const LOG_FILE: &str = "./busboard.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to ./busboard.log in current directory.
    File,
    /// Write to terminal (stderr).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

impl LogDestination {
    /// Reads `$BUSBOARD_LOG` (`file`, `terminal` or `both`); anything else means `File`.
    pub fn from_env() -> Self {
        env::var(LOG_ENV)
            .map(|value| Self::from_name(&value))
            .unwrap_or(LogDestination::File)
    }

    fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "terminal" => LogDestination::Terminal,
            "both" => LogDestination::Both,
            _ => LogDestination::File,
        }
    }
}

/// Initialize the logger with the specified destination.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File => {
            if let Some(file_logger) = create_file_logger(level, config) {
                vec![file_logger]
            } else {
                return;
            }
        }
        LogDestination::Terminal => {
            vec![TermLogger::new(
                level,
                config,
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )]
        }
        LogDestination::Both => {
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
                level,
                config.clone(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )];
            if let Some(file_logger) = create_file_logger(level, config) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(level: LevelFilter, config: Config) -> Option<Box<WriteLogger<File>>> {
    let log_path = PathBuf::from(LOG_FILE);
    match File::create(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LogDestination;

    #[test]
    fn destination_names_are_case_insensitive() {
        assert_eq!(LogDestination::from_name("Terminal"), LogDestination::Terminal);
        assert_eq!(LogDestination::from_name(" both "), LogDestination::Both);
        assert_eq!(LogDestination::from_name("syslog"), LogDestination::File);
    }
}
