//! Study sessions over a deck
//!
//! A session takes the due cards of a deck (earliest first, capped at a
//! per-session maximum), asks a [`RecallSource`] how well each card was
//! remembered, reschedules it and folds the outcome into the caller's
//! [`StudyLog`].

use thiserror::Error;
use uuid::Uuid;

use chrono::{DateTime, Utc};

use super::error::SchedulingError;
use super::models::{Deck, Flashcard, SchedulerKind};
use super::queue::due_indices;
use super::scheduler::DeckScheduler;
use crate::clock::Clock;
use crate::stats::{CardOutcome, SessionAccumulator, SessionStats, StudyLog};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Scheduling(#[from] SchedulingError),

    #[error("Card not found: {0}")]
    CardNotFound(Uuid),

    #[error("Deck uses the {deck} scheduler but a {given} scheduler was supplied")]
    SchedulerMismatch {
        deck: SchedulerKind,
        given: SchedulerKind,
    },

    #[error("Recall source failed: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// A learner's judgment for one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recall {
    pub signal: String,
    /// Interval key to jump to (fixed-step decks only)
    pub explicit_key: Option<String>,
}

impl Recall {
    pub fn signal(signal: impl Into<String>) -> Self {
        Self {
            signal: signal.into(),
            explicit_key: None,
        }
    }
}

/// Where recall judgments come from: a person at a prompt, a grader, a script
pub trait RecallSource {
    /// Judge one card. `Ok(None)` ends the session early.
    fn recall(&mut self, card: &Flashcard, scheduler: &DeckScheduler) -> Result<Option<Recall>>;
}

impl<F> RecallSource for F
where
    F: FnMut(&Flashcard) -> Option<Recall>,
{
    fn recall(&mut self, card: &Flashcard, _scheduler: &DeckScheduler) -> Result<Option<Recall>> {
        Ok(self(card))
    }
}

fn check_scheduler(deck: &Deck, scheduler: &DeckScheduler) -> Result<()> {
    if deck.scheduler != scheduler.kind() {
        return Err(SessionError::SchedulerMismatch {
            deck: deck.scheduler,
            given: scheduler.kind(),
        });
    }
    Ok(())
}

/// Review a single card and update its attempt counters
pub fn review_card(
    deck: &mut Deck,
    scheduler: &DeckScheduler,
    card_id: Uuid,
    recall: &Recall,
    now: DateTime<Utc>,
) -> Result<CardOutcome> {
    check_scheduler(deck, scheduler)?;

    let card = deck
        .card_mut(card_id)
        .ok_or(SessionError::CardNotFound(card_id))?;

    let outcome = scheduler.review(
        &mut card.state,
        &recall.signal,
        recall.explicit_key.as_deref(),
        now,
    )?;
    card.state.record_attempt(outcome.correct);
    deck.updated_at = now;

    Ok(CardOutcome {
        card_id,
        correct: outcome.correct,
        signal: outcome.signal,
        next_review_at: outcome.next_review_at,
    })
}

/// Run one study session.
///
/// Returns `Ok(None)` when nothing is due or the source stopped before
/// the first card; no session is logged in that case. Each card is
/// reviewed at its own `clock.now()`.
pub fn study_session<C, S>(
    deck: &mut Deck,
    scheduler: &DeckScheduler,
    max_cards: usize,
    clock: &C,
    source: &mut S,
    log: &mut StudyLog,
) -> Result<Option<SessionStats>>
where
    C: Clock,
    S: RecallSource,
{
    check_scheduler(deck, scheduler)?;

    let started_at = clock.now();
    let mut due = due_indices(&deck.cards, started_at);
    due.truncate(max_cards);

    if due.is_empty() {
        log::info!("No cards due in deck '{}'", deck.name);
        return Ok(None);
    }

    log::info!("Starting session on '{}' with {} due cards", deck.name, due.len());

    let mut acc = SessionAccumulator::start(started_at);
    for idx in due {
        let recall = match source.recall(&deck.cards[idx], scheduler)? {
            Some(recall) => recall,
            None => break,
        };
        let card_id = deck.cards[idx].id;
        let outcome = review_card(deck, scheduler, card_id, &recall, clock.now())?;
        acc.record(outcome);
    }

    if acc.is_empty() {
        return Ok(None);
    }

    let session = acc.finish(clock.now());
    log::info!(
        "Session on '{}' finished: {} cards, {} correct, {:.1}s",
        deck.name,
        session.cards_studied,
        session.correct_answers,
        session.study_time_seconds()
    );
    log.record_session(session.clone());

    Ok(Some(session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::flashcards::intervals::IntervalTable;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn deck_with_cards(kind: SchedulerKind, count: usize) -> (Deck, DeckScheduler) {
        let scheduler = DeckScheduler::for_kind(kind, Arc::new(IntervalTable::default()));
        let mut deck = Deck::new("Test".to_string(), kind, start());
        for i in 0..count {
            // earlier cards are due earlier
            let created = start() - Duration::minutes((count - i) as i64);
            let card = Flashcard::new(
                deck.id,
                format!("Q{}", i),
                format!("A{}", i),
                scheduler.initial_state(created),
                created,
            );
            deck.push_card(card);
        }
        (deck, scheduler)
    }

    #[test]
    fn test_session_reviews_due_cards_in_order() {
        let (mut deck, scheduler) = deck_with_cards(SchedulerKind::Adaptive, 4);
        let clock = ManualClock::new(start());
        let mut log = StudyLog::new();

        let mut seen = Vec::new();
        let mut signals = vec!["good", "good", "again", "easy"].into_iter();
        let mut source = |card: &Flashcard| {
            seen.push(card.front.clone());
            signals.next().map(Recall::signal)
        };

        let session = study_session(&mut deck, &scheduler, 20, &clock, &mut source, &mut log)
            .unwrap()
            .unwrap();

        assert_eq!(seen, vec!["Q0", "Q1", "Q2", "Q3"]);
        assert_eq!(session.cards_studied, 4);
        assert_eq!(session.correct_answers, 3);
        assert_eq!(session.accuracy().unwrap(), 0.75);
        assert_eq!(log.sessions.len(), 1);
        assert_eq!(log.day(start().date_naive()).unwrap().cards_studied, 4);

        assert_eq!(deck.cards[2].state.total_attempts, 1);
        assert_eq!(deck.cards[2].state.correct_attempts, 0);
        assert_eq!(deck.cards[0].state.correct_attempts, 1);
        assert!(deck.cards.iter().all(|c| c.state.next_review_at > start()));
    }

    #[test]
    fn test_session_respects_max_cards() {
        let (mut deck, scheduler) = deck_with_cards(SchedulerKind::Fixed, 5);
        let clock = ManualClock::new(start());
        let mut log = StudyLog::new();
        let mut source = |_: &Flashcard| Some(Recall::signal("medium"));

        let session = study_session(&mut deck, &scheduler, 2, &clock, &mut source, &mut log)
            .unwrap()
            .unwrap();
        assert_eq!(session.cards_studied, 2);
        assert_eq!(session.correct_answers, 2);
        assert_eq!(crate::flashcards::queue::due_count(&deck.cards, start()), 3);
    }

    #[test]
    fn test_no_due_cards_returns_none() {
        let (mut deck, scheduler) = deck_with_cards(SchedulerKind::Adaptive, 2);
        let clock = ManualClock::new(start() - Duration::hours(1));
        let mut log = StudyLog::new();
        let mut source = |_: &Flashcard| Some(Recall::signal("good"));

        let result = study_session(&mut deck, &scheduler, 20, &clock, &mut source, &mut log).unwrap();
        assert!(result.is_none());
        assert!(log.sessions.is_empty());
    }

    #[test]
    fn test_source_can_stop_early() {
        let (mut deck, scheduler) = deck_with_cards(SchedulerKind::Adaptive, 3);
        let clock = ManualClock::new(start());
        let mut log = StudyLog::new();
        let mut answers = vec![Some(Recall::signal("good")), None].into_iter();
        let mut source = |_: &Flashcard| answers.next().flatten();

        let session = study_session(&mut deck, &scheduler, 20, &clock, &mut source, &mut log)
            .unwrap()
            .unwrap();
        assert_eq!(session.cards_studied, 1);
    }

    #[test]
    fn test_scheduler_mismatch() {
        let (mut deck, _) = deck_with_cards(SchedulerKind::Adaptive, 1);
        let fixed = DeckScheduler::for_kind(SchedulerKind::Fixed, Arc::new(IntervalTable::default()));
        let card_id = deck.cards[0].id;

        let result = review_card(&mut deck, &fixed, card_id, &Recall::signal("easy"), start());
        assert!(matches!(result, Err(SessionError::SchedulerMismatch { .. })));
    }

    #[test]
    fn test_review_card_with_override() {
        let (mut deck, scheduler) = deck_with_cards(SchedulerKind::Fixed, 1);
        let card_id = deck.cards[0].id;
        let recall = Recall {
            signal: "easy".to_string(),
            explicit_key: Some("3_days".to_string()),
        };

        let outcome = review_card(&mut deck, &scheduler, card_id, &recall, start()).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.next_review_at, start() + Duration::days(3));
        assert_eq!(deck.cards[0].state.interval_position, "3_days");
    }

    #[test]
    fn test_review_unknown_card() {
        let (mut deck, scheduler) = deck_with_cards(SchedulerKind::Fixed, 1);
        let result = review_card(&mut deck, &scheduler, Uuid::new_v4(), &Recall::signal("easy"), start());
        assert!(matches!(result, Err(SessionError::CardNotFound(_))));
    }

    #[test]
    fn test_invalid_signal_leaves_card_untouched() {
        let (mut deck, scheduler) = deck_with_cards(SchedulerKind::Fixed, 1);
        let card_id = deck.cards[0].id;
        let before = deck.cards[0].state.clone();

        let result = review_card(&mut deck, &scheduler, card_id, &Recall::signal("again"), start());
        assert!(matches!(
            result,
            Err(SessionError::Scheduling(SchedulingError::InvalidRecallSignal { .. }))
        ));
        assert_eq!(deck.cards[0].state, before);
    }
}
