//! Storage operations for decks and their study logs
//!
//! ```text
//! decks/{deck-id}.json   # Deck with all of its cards
//! logs/{deck-id}.json    # StudyLog for the deck
//! ```

use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use super::models::Deck;
use crate::stats::StudyLog;
use crate::storage::{read_json, write_json, FileStorage, Result, StorageError};

/// Storage manager for decks
pub struct DeckStorage {
    decks_path: PathBuf,
    logs_path: PathBuf,
}

impl DeckStorage {
    pub fn new(storage: &FileStorage) -> Result<Self> {
        storage.init()?;
        Ok(Self {
            decks_path: storage.decks_dir(),
            logs_path: storage.logs_dir(),
        })
    }

    fn deck_path(&self, deck_id: Uuid) -> PathBuf {
        self.decks_path.join(format!("{}.json", deck_id))
    }

    fn log_path(&self, deck_id: Uuid) -> PathBuf {
        self.logs_path.join(format!("{}.json", deck_id))
    }

    /// List all decks, sorted by name
    pub fn list_decks(&self) -> Result<Vec<Deck>> {
        let mut decks = Vec::new();
        if !self.decks_path.exists() {
            return Ok(decks);
        }

        for entry in fs::read_dir(&self.decks_path)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().map_or(false, |ext| ext == "json") {
                match read_json::<Deck>(&path) {
                    Ok(deck) => decks.push(deck),
                    Err(e) => {
                        log::warn!("Failed to load deck from {:?}: {}", path, e);
                    }
                }
            }
        }

        decks.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(decks)
    }

    pub fn get_deck(&self, deck_id: Uuid) -> Result<Deck> {
        let path = self.deck_path(deck_id);
        if !path.exists() {
            return Err(StorageError::DeckNotFound(deck_id));
        }
        read_json(&path)
    }

    /// Create or overwrite a deck
    pub fn save_deck(&self, deck: &Deck) -> Result<()> {
        write_json(&self.deck_path(deck.id), deck)
    }

    /// Delete a deck and its study log
    pub fn delete_deck(&self, deck_id: Uuid) -> Result<()> {
        let path = self.deck_path(deck_id);
        if !path.exists() {
            return Err(StorageError::DeckNotFound(deck_id));
        }
        fs::remove_file(&path)?;

        let log_path = self.log_path(deck_id);
        if log_path.exists() {
            fs::remove_file(&log_path)?;
        }

        log::info!("Deleted deck {}", deck_id);
        Ok(())
    }

    /// Study log for a deck; empty if none was saved yet
    pub fn load_log(&self, deck_id: Uuid) -> Result<StudyLog> {
        let path = self.log_path(deck_id);
        if !path.exists() {
            return Ok(StudyLog::new());
        }
        read_json(&path)
    }

    pub fn save_log(&self, deck_id: Uuid, log: &StudyLog) -> Result<()> {
        write_json(&self.log_path(deck_id), log)
    }
}
