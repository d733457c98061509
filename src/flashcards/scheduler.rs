//! The scheduling capability shared by both policies
//!
//! [`ReviewScheduler`] is implemented by the fixed-step and the adaptive
//! scheduler with their own signal types. [`DeckScheduler`] picks one per
//! deck and accepts signals as raw strings, so callers that read ratings
//! from a user or a file do not need to know the policy up front.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::algorithm::AdaptiveScheduler;
use super::error::{Result, SchedulingError};
use super::fixed::FixedStepScheduler;
use super::intervals::IntervalTable;
use super::models::{AdaptiveRecall, CardState, FixedRecall, SchedulerKind};

/// Produces a next-due timestamp from a recall signal
pub trait ReviewScheduler {
    type Signal: FromStr<Err = SchedulingError> + Copy + fmt::Display;

    fn kind(&self) -> SchedulerKind;

    /// State for a card that has never been reviewed
    fn initial_state(&self, now: DateTime<Utc>) -> CardState;

    /// Apply a review to `card` and return when it is due next
    fn schedule_next(
        &self,
        card: &mut CardState,
        signal: Self::Signal,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>>;

    /// Whether a signal counts as a correct answer in statistics
    fn counts_as_correct(signal: Self::Signal) -> bool;
}

/// Outcome of a review applied through a [`DeckScheduler`]
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    /// Normalized signal name
    pub signal: String,
    pub correct: bool,
    pub next_review_at: DateTime<Utc>,
}

/// Scheduler selected for a deck
#[derive(Debug, Clone)]
pub enum DeckScheduler {
    Fixed(FixedStepScheduler),
    Adaptive(AdaptiveScheduler),
}

impl DeckScheduler {
    pub fn for_kind(kind: SchedulerKind, table: Arc<IntervalTable>) -> Self {
        match kind {
            SchedulerKind::Fixed => Self::Fixed(FixedStepScheduler::new(table)),
            SchedulerKind::Adaptive => Self::Adaptive(AdaptiveScheduler::new()),
        }
    }

    pub fn kind(&self) -> SchedulerKind {
        match self {
            Self::Fixed(s) => s.kind(),
            Self::Adaptive(s) => s.kind(),
        }
    }

    pub fn initial_state(&self, now: DateTime<Utc>) -> CardState {
        match self {
            Self::Fixed(s) => s.initial_state(now),
            Self::Adaptive(s) => s.initial_state(now),
        }
    }

    /// Signals accepted by the selected policy
    pub fn accepted_signals(&self) -> &'static [&'static str] {
        match self {
            Self::Fixed(_) => &["easy", "medium", "hard"],
            Self::Adaptive(_) => &["easy", "good", "hard", "again"],
        }
    }

    /// Parse and apply a raw signal.
    ///
    /// The signal is validated even when an explicit interval is given,
    /// since it still decides whether the answer counts as correct.
    pub fn review(
        &self,
        card: &mut CardState,
        signal: &str,
        explicit_key: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<ReviewOutcome> {
        let signal = signal.trim().to_lowercase();
        match self {
            Self::Fixed(scheduler) => {
                let parsed: FixedRecall = signal.parse()?;
                let next_review_at = scheduler.schedule_next_with(card, parsed, explicit_key, now)?;
                Ok(ReviewOutcome {
                    signal: parsed.to_string(),
                    correct: FixedStepScheduler::counts_as_correct(parsed),
                    next_review_at,
                })
            }
            Self::Adaptive(scheduler) => {
                let parsed: AdaptiveRecall = signal.parse()?;
                if explicit_key.is_some() {
                    return Err(SchedulingError::OverrideUnsupported);
                }
                let next_review_at = scheduler.schedule_next(card, parsed, now)?;
                Ok(ReviewOutcome {
                    signal: parsed.to_string(),
                    correct: AdaptiveScheduler::counts_as_correct(parsed),
                    next_review_at,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn table() -> Arc<IntervalTable> {
        Arc::new(IntervalTable::default())
    }

    #[test]
    fn test_for_kind() {
        assert_eq!(DeckScheduler::for_kind(SchedulerKind::Fixed, table()).kind(), SchedulerKind::Fixed);
        assert_eq!(
            DeckScheduler::for_kind(SchedulerKind::Adaptive, table()).kind(),
            SchedulerKind::Adaptive
        );
    }

    #[test]
    fn test_fixed_review_from_string() {
        let scheduler = DeckScheduler::for_kind(SchedulerKind::Fixed, table());
        let mut card = scheduler.initial_state(now());

        let outcome = scheduler.review(&mut card, " Easy ", None, now()).unwrap();
        assert_eq!(outcome.signal, "easy");
        assert!(outcome.correct);
        assert_eq!(outcome.next_review_at, now() + Duration::hours(3));

        let outcome = scheduler.review(&mut card, "hard", None, now()).unwrap();
        assert!(!outcome.correct);
        assert_eq!(card.interval_position, "1_hour");
    }

    #[test]
    fn test_fixed_rejects_adaptive_only_signal() {
        let scheduler = DeckScheduler::for_kind(SchedulerKind::Fixed, table());
        let mut card = scheduler.initial_state(now());
        let before = card.clone();

        let result = scheduler.review(&mut card, "again", None, now());
        assert!(matches!(result, Err(SchedulingError::InvalidRecallSignal { .. })));
        assert_eq!(card, before);
    }

    #[test]
    fn test_bad_signal_with_valid_override_leaves_card_untouched() {
        let scheduler = DeckScheduler::for_kind(SchedulerKind::Fixed, table());
        let mut card = scheduler.initial_state(now());
        let before = card.clone();

        let result = scheduler.review(&mut card, "bogus", Some("3_days"), now());
        assert!(matches!(
            result,
            Err(SchedulingError::InvalidRecallSignal { ref signal, .. }) if signal == "bogus"
        ));
        assert_eq!(card, before);
    }

    #[test]
    fn test_fixed_override_through_deck_scheduler() {
        let scheduler = DeckScheduler::for_kind(SchedulerKind::Fixed, table());
        let mut card = scheduler.initial_state(now());

        let outcome = scheduler.review(&mut card, "hard", Some("7_days"), now()).unwrap();
        assert_eq!(card.interval_position, "7_days");
        assert_eq!(outcome.next_review_at, now() + Duration::days(7));
    }

    #[test]
    fn test_adaptive_review_from_string() {
        let scheduler = DeckScheduler::for_kind(SchedulerKind::Adaptive, table());
        let mut card = scheduler.initial_state(now());

        let outcome = scheduler.review(&mut card, "good", None, now()).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.next_review_at, now() + Duration::days(1));

        let result = scheduler.review(&mut card, "medium", None, now());
        assert!(matches!(result, Err(SchedulingError::InvalidRecallSignal { .. })));
    }

    #[test]
    fn test_adaptive_rejects_override() {
        let scheduler = DeckScheduler::for_kind(SchedulerKind::Adaptive, table());
        let mut card = scheduler.initial_state(now());
        let before = card.clone();

        let result = scheduler.review(&mut card, "good", Some("3_days"), now());
        assert_eq!(result, Err(SchedulingError::OverrideUnsupported));
        assert_eq!(card, before);
    }
}
