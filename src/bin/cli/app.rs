use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use uuid::Uuid;

use recall_lib::chunking::ProfileStorage;
use recall_lib::config::RecallConfig;
use recall_lib::flashcards::{Deck, DeckScheduler, DeckStorage, Flashcard, IntervalTable};
use recall_lib::storage::FileStorage;

/// Shared application state for CLI commands
pub struct App {
    pub config: RecallConfig,
    pub decks: DeckStorage,
    pub profiles: ProfileStorage,
    pub table: Arc<IntervalTable>,
}

impl App {
    /// Load config and open storage; `data_dir` overrides the configured directory
    pub fn new(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config = match config_path.or_else(RecallConfig::default_path) {
            Some(path) => RecallConfig::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => RecallConfig::default(),
        };

        let data_dir = match data_dir {
            Some(dir) => dir,
            None => config.data_dir().context("Failed to get data directory")?,
        };
        let storage = FileStorage::new(data_dir);

        let decks = DeckStorage::new(&storage).context("Failed to initialize deck storage")?;
        let profiles =
            ProfileStorage::new(&storage).context("Failed to initialize profile storage")?;
        let table = Arc::new(config.interval_table().context("Invalid interval table")?);

        Ok(Self {
            config,
            decks,
            profiles,
            table,
        })
    }

    pub fn scheduler_for(&self, deck: &Deck) -> DeckScheduler {
        DeckScheduler::for_kind(deck.scheduler, Arc::clone(&self.table))
    }

    pub fn list_decks(&self) -> Result<Vec<Deck>> {
        self.decks.list_decks().context("Failed to list decks")
    }

    pub fn save_deck(&self, deck: &Deck) -> Result<()> {
        self.decks
            .save_deck(deck)
            .with_context(|| format!("Failed to save deck '{}'", deck.name))
    }

    /// Find a deck by name (case-insensitive prefix match)
    pub fn find_deck(&self, name: &str) -> Result<Deck> {
        let decks = self.list_decks()?;
        let name_lower = name.to_lowercase();

        // Exact match first
        if let Some(deck) = decks.iter().find(|d| d.name.to_lowercase() == name_lower) {
            return Ok(deck.clone());
        }

        let matches: Vec<&Deck> = decks
            .iter()
            .filter(|d| d.name.to_lowercase().starts_with(&name_lower))
            .collect();

        match matches.len() {
            0 => bail!(
                "No deck matching '{}'. Available decks:\n{}",
                name,
                decks
                    .iter()
                    .map(|d| format!("  - {}", d.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous deck name '{}'. Matches:\n{}",
                name,
                matches
                    .iter()
                    .map(|d| format!("  - {}", d.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    /// Find a card by id prefix or by front text (case-insensitive prefix match)
    pub fn find_card(deck: &Deck, query: &str) -> Result<Uuid> {
        if let Ok(id) = Uuid::parse_str(query) {
            if deck.card(id).is_some() {
                return Ok(id);
            }
        }

        let query_lower = query.to_lowercase();
        let matches: Vec<&Flashcard> = deck
            .cards
            .iter()
            .filter(|c| {
                c.id.to_string().starts_with(&query_lower)
                    || c.front.to_lowercase().starts_with(&query_lower)
            })
            .collect();

        match matches.len() {
            0 => bail!("No card matching '{}' in deck '{}'", query, deck.name),
            1 => Ok(matches[0].id),
            _ => bail!(
                "Ambiguous card '{}'. Matches:\n{}",
                query,
                matches
                    .iter()
                    .map(|c| format!("  - {} {}", short_id(c.id), c.front))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }
}

/// First eight hex digits of an id, enough to select a card
pub fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}
