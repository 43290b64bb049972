// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{Logging, Paths, SessionSettings};
use crate::consts::{APP_DIR_NAME, DEFAULT_INACTIVITY_TIMEOUT_SECS};

pub const DEFAULT_CONFIG_PATH: &str = "record-vault.toml";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// `<platform data dir>/record-vault`, or `./record-vault` when the platform has none
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

pub fn default_paths() -> Paths {
    Paths {
        data_dir: default_data_dir(),
    }
}

pub fn default_session() -> SessionSettings {
    SessionSettings {
        inactivity_timeout_secs: DEFAULT_INACTIVITY_TIMEOUT_SECS,
    }
}

pub fn default_logging() -> Logging {
    Logging {
        filter: DEFAULT_LOG_FILTER.into(),
    }
}
