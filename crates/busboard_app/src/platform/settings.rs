//! Board settings loaded from a RON file.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use busboard_core::BoardConfig;
use thiserror::Error;

const CONFIG_ENV: &str = "BUSBOARD_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "busboard.ron";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings from {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// `$BUSBOARD_CONFIG`, or `./busboard.ron`.
pub fn config_path() -> PathBuf {
    env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub fn load(path: &Path) -> Result<BoardConfig, SettingsError> {
    let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text, path)
}

pub fn parse(text: &str, path: &Path) -> Result<BoardConfig, SettingsError> {
    let config: BoardConfig = ron::from_str(text).map_err(|err| SettingsError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    validate(&config)?;
    Ok(config)
}

// Empty stop id and credentials are allowed here; the board shows a prompt for them.
fn validate(config: &BoardConfig) -> Result<(), SettingsError> {
    if config.limit == 0 {
        return Err(SettingsError::Invalid {
            field: "limit",
            reason: "must be at least 1",
        });
    }
    if config.update_interval_ms == 0 {
        return Err(SettingsError::Invalid {
            field: "update_interval_ms",
            reason: "must be greater than zero",
        });
    }
    if config.fade_point.is_nan() {
        return Err(SettingsError::Invalid {
            field: "fade_point",
            reason: "must be a number",
        });
    }
    if config.max_delay_minutes > 0 {
        return Err(SettingsError::Invalid {
            field: "max_delay_minutes",
            reason: "is expressed as a negative number of minutes",
        });
    }
    Ok(())
}
