// src/config/app.rs
use super::defaults::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{CoreError, Result};

/// Path of the TOML config file
pub const CONFIG_ENV: &str = "RECORD_VAULT_CONFIG";
/// Overrides `paths.data_dir`
pub const DATA_DIR_ENV: &str = "RECORD_VAULT_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub session: SessionSettings,
    pub logging: Logging,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub inactivity_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: default_paths(),
            session: default_session(),
            logging: default_logging(),
        }
    }
}

impl Default for Paths {
    fn default() -> Self {
        default_paths()
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        default_session()
    }
}

impl Default for Logging {
    fn default() -> Self {
        default_logging()
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let conf: Self = toml::from_str(content)?;
        conf.validate()?;
        Ok(conf)
    }

    /// A zero timeout would expire every session on its first use
    pub fn validate(&self) -> Result<()> {
        if self.session.inactivity_timeout_secs == 0 {
            return Err(CoreError::Config(
                "session.inactivity_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CoreError::Config(format!("cannot read {}: {e}", path.as_ref().display()))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.session.inactivity_timeout_secs)
    }

    /// Apply `RECORD_VAULT_DATA_DIR` if set
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            self.paths.data_dir = PathBuf::from(dir);
        }
        self
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config at runtime — falls back to defaults if missing or invalid
pub fn load() -> &'static Config {
    CONFIG.get_or_init(|| {
        let config_path =
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let conf = if Path::new(&config_path).exists() {
            Config::from_file(&config_path).unwrap_or_else(|err| {
                warn!(path = %config_path, error = %err, "invalid config, using built-in defaults");
                Config::default()
            })
        } else {
            debug!(path = %config_path, "config file not found, using built-in defaults");
            Config::default()
        };

        conf.with_env_overrides()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let conf = Config::from_toml_str(
            r#"
            [session]
            inactivity_timeout_secs = 60
            "#,
        )
        .unwrap();

        assert_eq!(conf.inactivity_timeout(), Duration::from_secs(60));
        assert_eq!(conf.paths, default_paths());
        assert_eq!(conf.logging.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_full_toml() {
        let conf = Config::from_toml_str(
            r#"
            [paths]
            data_dir = "/tmp/vault-data"

            [session]
            inactivity_timeout_secs = 300

            [logging]
            filter = "record_vault=debug"
            "#,
        )
        .unwrap();

        assert_eq!(conf.paths.data_dir, PathBuf::from("/tmp/vault-data"));
        assert_eq!(conf.logging.filter, "record_vault=debug");
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = Config::from_toml_str("[session]\ninactivity_timeout_secs = \"soon\"");
        assert!(matches!(err, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = Config::from_toml_str("[session]\ninactivity_timeout_secs = 0");
        assert!(matches!(err, Err(CoreError::Config(msg)) if msg.contains("inactivity_timeout_secs")));
    }

    #[test]
    fn test_default_timeout_is_five_minutes() {
        assert_eq!(Config::default().inactivity_timeout(), Duration::from_secs(300));
    }
}
