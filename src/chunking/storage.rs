//! Chunking profiles stored as `profiles/{user-id}.json`

use std::path::PathBuf;

use super::models::ChunkingProfile;
use crate::storage::{read_json, write_json, FileStorage, Result, StorageError};

pub struct ProfileStorage {
    base_path: PathBuf,
}

impl ProfileStorage {
    pub fn new(storage: &FileStorage) -> Result<Self> {
        storage.init()?;
        Ok(Self {
            base_path: storage.profiles_dir(),
        })
    }

    fn profile_path(&self, user_id: &str) -> Result<PathBuf> {
        let valid = !user_id.is_empty()
            && user_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !user_id.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidOperation(format!("Invalid user id '{}'", user_id)));
        }
        Ok(self.base_path.join(format!("{}.json", user_id)))
    }

    /// Load a learner's profile, or start a default one
    pub fn load_or_new(&self, user_id: &str) -> Result<ChunkingProfile> {
        let path = self.profile_path(user_id)?;
        if !path.exists() {
            log::info!("Creating chunking profile for '{}'", user_id);
            return Ok(ChunkingProfile::new(user_id));
        }
        read_json(&path)
    }

    pub fn save(&self, profile: &ChunkingProfile) -> Result<()> {
        write_json(&self.profile_path(&profile.user_id)?, profile)
    }
}
