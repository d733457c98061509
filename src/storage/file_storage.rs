use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Deck not found: {0}")]
    DeckNotFound(Uuid),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Root of the on-disk data layout
///
/// ```text
/// {data-dir}/
/// ├── decks/{deck-id}.json     # Deck with its cards
/// ├── logs/{deck-id}.json      # Study log per deck
/// └── profiles/{user-id}.json  # Chunking profile per learner
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("recall"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Initialize storage directories
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.decks_dir())?;
        fs::create_dir_all(self.logs_dir())?;
        fs::create_dir_all(self.profiles_dir())?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn decks_dir(&self) -> PathBuf {
        self.base_path.join("decks")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base_path.join("logs")
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.base_path.join("profiles")
    }
}

/// Read a JSON file into `T`
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write `value` as pretty JSON, creating the parent directory if needed
pub(crate) fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_layout() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("recall"));
        storage.init().unwrap();

        assert!(storage.decks_dir().is_dir());
        assert!(storage.logs_dir().is_dir());
        assert!(storage.profiles_dir().is_dir());
    }

    #[test]
    fn test_json_helpers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("value.json");

        write_json(&path, &vec![1, 2, 3]).unwrap();
        let value: Vec<u32> = read_json(&path).unwrap();
        assert_eq!(value, vec![1, 2, 3]);

        let missing: Result<Vec<u32>> = read_json(&temp_dir.path().join("missing.json"));
        assert!(matches!(missing, Err(StorageError::Io(_))));
    }
}
