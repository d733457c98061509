//! Data models for the flashcard system

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::SchedulingError;

/// Minimum ease factor allowed
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease factor for a card that has never been reviewed
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Which scheduling policy a deck uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerKind {
    /// Walks a table of named fixed intervals
    Fixed,
    /// SM-2 style growing intervals
    #[default]
    Adaptive,
}

impl fmt::Display for SchedulerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Adaptive => write!(f, "adaptive"),
        }
    }
}

impl FromStr for SchedulerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "adaptive" => Ok(Self::Adaptive),
            other => Err(format!("Unknown scheduler '{}'. Expected 'fixed' or 'adaptive'", other)),
        }
    }
}

/// Three-level recall signal used by the fixed-step scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedRecall {
    /// Advance to the next interval
    Easy,
    /// Keep the current interval
    Medium,
    /// Back to the shortest interval
    Hard,
}

impl FixedRecall {
    pub const ALL: [FixedRecall; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl FromStr for FixedRecall {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(SchedulingError::InvalidRecallSignal {
                signal: other.to_string(),
                expected: "easy, medium, hard".to_string(),
            }),
        }
    }
}

impl fmt::Display for FixedRecall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four-level recall signal used by the adaptive scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdaptiveRecall {
    Easy,
    Good,
    Hard,
    /// Forgotten; restarts the repetition sequence
    Again,
}

impl AdaptiveRecall {
    pub const ALL: [AdaptiveRecall; 4] = [Self::Easy, Self::Good, Self::Hard, Self::Again];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Good => "good",
            Self::Hard => "hard",
            Self::Again => "again",
        }
    }
}

impl FromStr for AdaptiveRecall {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "good" => Ok(Self::Good),
            "hard" => Ok(Self::Hard),
            "again" => Ok(Self::Again),
            other => Err(SchedulingError::InvalidRecallSignal {
                signal: other.to_string(),
                expected: "easy, good, hard, again".to_string(),
            }),
        }
    }
}

impl fmt::Display for AdaptiveRecall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current spaced repetition state for a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardState {
    /// Key into the interval table (fixed-step scheduling)
    pub interval_position: String,
    /// Consecutive successful reviews since the last reset
    #[serde(default)]
    pub repetition_count: u32,
    /// SM-2 ease factor (default 2.5, never below 1.3)
    #[serde(default = "default_ease_factor")]
    pub easiness_factor: f64,
    /// Current interval in days (adaptive scheduling)
    #[serde(default = "default_interval_days")]
    pub current_interval_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// When the card is due for review
    pub next_review_at: DateTime<Utc>,
    #[serde(default)]
    pub total_attempts: u32,
    #[serde(default)]
    pub correct_attempts: u32,
}

fn default_ease_factor() -> f64 {
    DEFAULT_EASE_FACTOR
}

fn default_interval_days() -> u32 {
    1
}

impl CardState {
    /// Fresh state positioned at `initial_key`, due immediately
    pub fn new(initial_key: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            interval_position: initial_key.into(),
            repetition_count: 0,
            easiness_factor: DEFAULT_EASE_FACTOR,
            current_interval_days: default_interval_days(),
            last_reviewed_at: None,
            next_review_at: now,
            total_attempts: 0,
            correct_attempts: 0,
        }
    }

    /// Check if the card is due at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }

    /// Fraction of attempts answered correctly, 0 when never attempted
    pub fn success_rate(&self) -> f64 {
        if self.total_attempts == 0 {
            0.0
        } else {
            self.correct_attempts as f64 / self.total_attempts as f64
        }
    }

    pub fn record_attempt(&mut self, correct: bool) {
        self.total_attempts += 1;
        if correct {
            self.correct_attempts += 1;
        }
    }
}

/// A flashcard with question (front) and answer (back)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub front: String,
    pub back: String,
    /// Memory palace location the card is placed at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loci_id: Option<String>,
    /// Route through the memory palace to reach the locus
    #[serde(default)]
    pub memory_path: Vec<String>,
    #[serde(default)]
    pub personal_associations: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub position: i32,
    pub state: CardState,
    pub created_at: DateTime<Utc>,
}

impl Flashcard {
    pub fn new(deck_id: Uuid, front: String, back: String, state: CardState, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            deck_id,
            front,
            back,
            loci_id: None,
            memory_path: Vec::new(),
            personal_associations: Vec::new(),
            tags: Vec::new(),
            position: 0,
            state,
            created_at: now,
        }
    }
}

/// A deck is a collection of flashcards reviewed with one scheduling policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub scheduler: SchedulerKind,
    #[serde(default)]
    pub cards: Vec<Flashcard>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deck {
    pub fn new(name: String, scheduler: SchedulerKind, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description: None,
            scheduler,
            cards: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a card, assigning it the next position and this deck's id
    pub fn push_card(&mut self, mut card: Flashcard) -> &Flashcard {
        card.deck_id = self.id;
        card.position = self.cards.len() as i32;
        self.cards.push(card);
        &self.cards[self.cards.len() - 1]
    }

    pub fn card(&self, card_id: Uuid) -> Option<&Flashcard> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    pub fn card_mut(&mut self, card_id: Uuid) -> Option<&mut Flashcard> {
        self.cards.iter_mut().find(|c| c.id == card_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_new_card_state_defaults() {
        let state = CardState::new("1_hour", now());
        assert_eq!(state.interval_position, "1_hour");
        assert_eq!(state.repetition_count, 0);
        assert_eq!(state.easiness_factor, DEFAULT_EASE_FACTOR);
        assert_eq!(state.current_interval_days, 1);
        assert!(state.last_reviewed_at.is_none());
        assert_eq!(state.next_review_at, now());
        assert!(state.is_due(now()));
    }

    #[test]
    fn test_success_rate() {
        let mut state = CardState::new("1_hour", now());
        assert_eq!(state.success_rate(), 0.0);

        state.record_attempt(true);
        state.record_attempt(false);
        state.record_attempt(true);
        state.record_attempt(true);
        assert_eq!(state.total_attempts, 4);
        assert_eq!(state.correct_attempts, 3);
        assert!((state.success_rate() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_parse_fixed_recall() {
        assert_eq!("easy".parse::<FixedRecall>().unwrap(), FixedRecall::Easy);
        assert_eq!("medium".parse::<FixedRecall>().unwrap(), FixedRecall::Medium);
        assert_eq!("hard".parse::<FixedRecall>().unwrap(), FixedRecall::Hard);
        assert!(matches!(
            "good".parse::<FixedRecall>(),
            Err(SchedulingError::InvalidRecallSignal { .. })
        ));
    }

    #[test]
    fn test_parse_adaptive_recall() {
        for signal in AdaptiveRecall::ALL {
            assert_eq!(signal.as_str().parse::<AdaptiveRecall>().unwrap(), signal);
        }
        assert!(matches!(
            "medium".parse::<AdaptiveRecall>(),
            Err(SchedulingError::InvalidRecallSignal { .. })
        ));
    }

    #[test]
    fn test_deck_push_card_assigns_position() {
        let mut deck = Deck::new("Capitals".to_string(), SchedulerKind::Fixed, now());
        for i in 0..3 {
            let card = Flashcard::new(
                Uuid::nil(),
                format!("Q{}", i),
                format!("A{}", i),
                CardState::new("1_hour", now()),
                now(),
            );
            deck.push_card(card);
        }
        assert_eq!(deck.cards[2].position, 2);
        assert!(deck.cards.iter().all(|c| c.deck_id == deck.id));
    }

    #[test]
    fn test_card_state_serde_defaults() {
        let json = r#"{"intervalPosition":"3_hours","nextReviewAt":"2024-03-01T09:00:00Z"}"#;
        let state: CardState = serde_json::from_str(json).unwrap();
        assert_eq!(state.interval_position, "3_hours");
        assert_eq!(state.easiness_factor, DEFAULT_EASE_FACTOR);
        assert_eq!(state.current_interval_days, 1);
        assert_eq!(state.total_attempts, 0);
    }
}
