//! Runtime configuration for chirper processes.
//!
//! Values are resolved from (in order of precedence):
//! 1. Explicit overrides supplied by the caller (CLI flags)
//! 2. Environment variables (`CHIRPER_*`)
//! 3. Defaults
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - `log_dir` is always absolute.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "CHIRPER_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "CHIRPER_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "CHIRPER_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "chirper.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "chirper-logs";

/// Resolved process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirperConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

/// Caller-supplied values that win over the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeLogDir(path) => write!(
                f,
                "log directory must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

impl Default for ChirperConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        }
    }
}

impl ChirperConfig {
    /// Loads configuration from overrides, then the process environment.
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolves configuration with an injectable environment lookup.
    pub fn resolve(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let lookup = |key: &str| {
            env(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = overrides
            .db_path
            .or_else(|| lookup(DB_PATH_ENV).map(PathBuf::from))
            .unwrap_or(defaults.db_path);
        let log_level = overrides
            .log_level
            .or_else(|| lookup(LOG_LEVEL_ENV))
            .unwrap_or(defaults.log_level);
        let log_dir = overrides
            .log_dir
            .or_else(|| lookup(LOG_DIR_ENV).map(PathBuf::from))
            .unwrap_or(defaults.log_dir);

        if !log_dir.is_absolute() {
            return Err(ConfigError::RelativeLogDir(log_dir));
        }

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ChirperConfig, ConfigError, ConfigOverrides, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV,
    };
    use std::path::PathBuf;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn falls_back_to_defaults_when_env_is_empty() {
        let config = ChirperConfig::resolve(ConfigOverrides::default(), no_env).unwrap();
        assert_eq!(config, ChirperConfig::default());
    }

    #[test]
    fn env_values_apply_and_blank_values_are_ignored() {
        let config = ChirperConfig::resolve(ConfigOverrides::default(), |key| match key {
            DB_PATH_ENV => Some(" /var/lib/chirper/app.db ".to_string()),
            LOG_DIR_ENV => Some("   ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/chirper/app.db"));
        assert_eq!(config.log_dir, ChirperConfig::default().log_dir);
    }

    #[test]
    fn overrides_win_over_env() {
        let overrides = ConfigOverrides {
            log_level: Some("warn".to_string()),
            ..ConfigOverrides::default()
        };
        let config = ChirperConfig::resolve(overrides, |key| {
            (key == LOG_LEVEL_ENV).then(|| "error".to_string())
        })
        .unwrap();
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let overrides = ConfigOverrides {
            log_dir: Some(PathBuf::from("logs")),
            ..ConfigOverrides::default()
        };
        let err = ChirperConfig::resolve(overrides, no_env).unwrap_err();
        assert_eq!(err, ConfigError::RelativeLogDir(PathBuf::from("logs")));
    }
}
