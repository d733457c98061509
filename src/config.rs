//! User configuration
//!
//! Read from `<config-dir>/recall/config.toml`; every field is optional.
//!
//! ```toml
//! default_scheduler = "fixed"
//! max_cards_per_session = 30
//! data_dir = "/home/me/recall-data"
//!
//! [[intervals]]
//! key = "10_minutes"
//! minutes = 10
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chunking::tester::DEFAULT_MAX_TEST_SIZE;
use crate::flashcards::error::SchedulingError;
use crate::flashcards::intervals::{IntervalTable, DEFAULT_INTERVALS};
use crate::flashcards::SchedulerKind;
use crate::storage::{FileStorage, StorageError};

pub const DEFAULT_MAX_CARDS_PER_SESSION: usize = 20;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid value for {field}: {message}")]
    Validation { field: String, message: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalEntry {
    pub key: String,
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallConfig {
    pub intervals: Vec<IntervalEntry>,
    pub max_cards_per_session: usize,
    pub default_scheduler: SchedulerKind,
    pub max_test_size: u32,
    /// Overrides the platform data directory
    pub data_dir: Option<PathBuf>,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            intervals: DEFAULT_INTERVALS
                .iter()
                .map(|(key, minutes)| IntervalEntry {
                    key: key.to_string(),
                    minutes: *minutes,
                })
                .collect(),
            max_cards_per_session: DEFAULT_MAX_CARDS_PER_SESSION,
            default_scheduler: SchedulerKind::default(),
            max_test_size: DEFAULT_MAX_TEST_SIZE,
            data_dir: None,
        }
    }
}

impl RecallConfig {
    /// Path of the user config file, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("recall").join("config.toml"))
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&content, &path.display().to_string())?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Self::parse(toml_str, "<string>")
    }

    fn parse(toml_str: &str, path: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.interval_table()?;
        if self.max_cards_per_session == 0 {
            return Err(ConfigError::Validation {
                field: "max_cards_per_session".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.max_test_size < 3 {
            return Err(ConfigError::Validation {
                field: "max_test_size".to_string(),
                message: "must be at least 3".to_string(),
            });
        }
        Ok(())
    }

    pub fn interval_table(&self) -> Result<IntervalTable> {
        IntervalTable::from_minutes(
            self.intervals
                .iter()
                .map(|e| (e.key.clone(), e.minutes))
                .collect(),
        )
        .map_err(|e: SchedulingError| ConfigError::Validation {
            field: "intervals".to_string(),
            message: e.to_string(),
        })
    }

    /// Configured data directory, falling back to the platform default
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(FileStorage::default_data_dir()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = RecallConfig::load(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, RecallConfig::default());
        assert_eq!(config.max_cards_per_session, 20);
        assert_eq!(config.default_scheduler, SchedulerKind::Adaptive);
        assert_eq!(config.interval_table().unwrap(), IntervalTable::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
default_scheduler = "fixed"
data_dir = "/tmp/recall-data"

[[intervals]]
key = "10_minutes"
minutes = 10

[[intervals]]
key = "1_day"
minutes = 1440
"#,
        )
        .unwrap();

        let config = RecallConfig::load(&path).unwrap();
        assert_eq!(config.default_scheduler, SchedulerKind::Fixed);
        assert_eq!(config.max_cards_per_session, 20);
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/recall-data"));

        let table = config.interval_table().unwrap();
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["10_minutes", "1_day"]);
    }

    #[test]
    fn test_rejects_bad_intervals() {
        let result = RecallConfig::from_toml(
            r#"
[[intervals]]
key = "long"
minutes = 600

[[intervals]]
key = "short"
minutes = 5
"#,
        );
        assert!(matches!(result, Err(ConfigError::Validation { ref field, .. }) if field == "intervals"));
    }

    #[test]
    fn test_rejects_out_of_range_minutes() {
        let result = RecallConfig::from_toml(
            r#"
[[intervals]]
key = "x"
minutes = 9223372036854775807
"#,
        );
        assert!(matches!(result, Err(ConfigError::Validation { ref field, .. }) if field == "intervals"));
    }

    #[test]
    fn test_rejects_invalid_toml_and_values() {
        assert!(matches!(
            RecallConfig::from_toml("max_cards_per_session = ["),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            RecallConfig::from_toml("max_cards_per_session = 0"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            RecallConfig::from_toml("default_scheduler = \"leitner\""),
            Err(ConfigError::Parse { .. })
        ));
    }
}
