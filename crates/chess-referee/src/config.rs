//! Referee configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Referee service configuration, loaded from a TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct RefereeConfig {
    /// Path of the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Events buffered per subscriber before a slow one starts lagging.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("referee.db")
}

fn default_event_capacity() -> usize {
    100
}

impl Default for RefereeConfig {
    fn default() -> Self {
        RefereeConfig {
            database_path: default_database_path(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl RefereeConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Load configuration from a TOML file, falling back to defaults
    /// when the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RefereeConfig::default();
        assert_eq!(config.database_path, PathBuf::from("referee.db"));
        assert_eq!(config.event_capacity, 100);
    }

    #[test]
    fn test_load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_path = \"games.db\"").unwrap();
        writeln!(file, "event_capacity = 8").unwrap();

        let config = RefereeConfig::load(file.path()).unwrap();
        assert_eq!(config.database_path, PathBuf::from("games.db"));
        assert_eq!(config.event_capacity, 8);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_path = \"games.db\"").unwrap();

        let config = RefereeConfig::load(file.path()).unwrap();
        assert_eq!(config.database_path, PathBuf::from("games.db"));
        assert_eq!(config.event_capacity, 100);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let config = RefereeConfig::load_or_default("no-such-referee.toml").unwrap();
        assert_eq!(config.event_capacity, 100);
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "event_capacity = \"lots\"").unwrap();

        let err = RefereeConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
