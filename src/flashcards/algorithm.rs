//! SM-2 style adaptive scheduling
//!
//! Intervals grow multiplicatively with a per-card ease factor:
//! - First successful review: 1 day
//! - Second successful review: 6 days
//! - Afterwards: previous interval times the ease factor, rounded down,
//!   capped at [`MAX_INTERVAL_DAYS`]
//!
//! Ratings adjust the ease after the interval is computed:
//! - easy: +0.10
//! - good: unchanged
//! - hard: -0.15
//! - again: -0.20, and the repetition sequence restarts

use chrono::{DateTime, Duration, Utc};

use super::error::{Result, SchedulingError};
use super::intervals::IntervalTable;
use super::models::{AdaptiveRecall, CardState, SchedulerKind, MIN_EASE_FACTOR};
use super::scheduler::ReviewScheduler;

/// Longest interval the adaptive scheduler hands out, about a century
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Result of calculating the next review, before it is applied to a card
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewResult {
    pub repetition_count: u32,
    pub interval_days: u32,
    pub easiness_factor: f64,
}

/// Calculate the next repetition count, interval and ease for a rating
pub fn calculate_next_review(state: &CardState, rating: AdaptiveRecall) -> ReviewResult {
    let mut repetition_count = state.repetition_count;
    let mut interval_days = state.current_interval_days;
    let mut easiness_factor = state.easiness_factor;

    if rating == AdaptiveRecall::Again {
        repetition_count = 0;
        interval_days = 1;
    } else {
        interval_days = match repetition_count {
            0 => 1,
            1 => 6,
            _ => (interval_days as f64 * easiness_factor)
                .floor()
                .min(MAX_INTERVAL_DAYS as f64) as u32,
        };
        repetition_count += 1;
    }

    match rating {
        AdaptiveRecall::Easy => easiness_factor += 0.1,
        AdaptiveRecall::Good => {}
        AdaptiveRecall::Hard => easiness_factor -= 0.15,
        AdaptiveRecall::Again => easiness_factor -= 0.2,
    }

    // Ensure minimum ease factor
    easiness_factor = easiness_factor.max(MIN_EASE_FACTOR);

    ReviewResult {
        repetition_count,
        interval_days,
        easiness_factor,
    }
}

/// Calculate the preview intervals (in days) for each rating:
/// easy, good, hard, again
pub fn preview_intervals(state: &CardState) -> [u32; 4] {
    AdaptiveRecall::ALL.map(|rating| calculate_next_review(state, rating).interval_days)
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: u32) -> String {
    if days == 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}

/// Continuous-interval scheduler
#[derive(Debug, Clone, Default)]
pub struct AdaptiveScheduler;

impl AdaptiveScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl ReviewScheduler for AdaptiveScheduler {
    type Signal = AdaptiveRecall;

    fn kind(&self) -> SchedulerKind {
        SchedulerKind::Adaptive
    }

    fn initial_state(&self, now: DateTime<Utc>) -> CardState {
        CardState::new(IntervalTable::default().first_key(), now)
    }

    fn schedule_next(
        &self,
        card: &mut CardState,
        signal: AdaptiveRecall,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>> {
        let ReviewResult {
            repetition_count,
            interval_days,
            easiness_factor,
        } = calculate_next_review(card, signal);

        let next_review_at = now
            .checked_add_signed(Duration::days(interval_days as i64))
            .ok_or(SchedulingError::ReviewOutOfRange)?;

        card.repetition_count = repetition_count;
        card.current_interval_days = interval_days;
        card.easiness_factor = easiness_factor;
        card.next_review_at = next_review_at;
        card.last_reviewed_at = Some(now);

        log::debug!(
            "Adaptive review '{}': interval {}d, ease {:.2}, repetitions {}",
            signal,
            interval_days,
            easiness_factor,
            repetition_count
        );

        Ok(next_review_at)
    }

    fn counts_as_correct(signal: AdaptiveRecall) -> bool {
        matches!(signal, AdaptiveRecall::Easy | AdaptiveRecall::Good)
    }
}
