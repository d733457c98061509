//! Flashcard and spaced repetition system
//!
//! This module provides:
//! - Fixed-step scheduling over a table of named intervals
//! - SM-2 style adaptive scheduling
//! - Due-card retrieval
//! - Study sessions driven by an external recall source
//! - JSON storage for decks and study logs

pub mod algorithm;
pub mod error;
pub mod fixed;
pub mod intervals;
pub mod models;
pub mod queue;
pub mod scheduler;
pub mod session;
pub mod storage;

pub use algorithm::AdaptiveScheduler;
pub use error::SchedulingError;
pub use fixed::FixedStepScheduler;
pub use intervals::IntervalTable;
pub use models::*;
pub use queue::{due_cards, Scheduled};
pub use scheduler::{DeckScheduler, ReviewOutcome, ReviewScheduler};
pub use session::{review_card, study_session, Recall, RecallSource, SessionError};
pub use storage::DeckStorage;
