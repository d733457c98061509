//! Fixed-step scheduling over a table of named intervals

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::error::{Result, SchedulingError};
use super::intervals::IntervalTable;
use super::models::{CardState, FixedRecall, SchedulerKind};
use super::scheduler::ReviewScheduler;

/// Moves a card along the interval table: `easy` advances one step
/// (saturating at the longest interval), `medium` holds, `hard` resets
/// to the shortest interval.
#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    table: Arc<IntervalTable>,
}

impl FixedStepScheduler {
    pub fn new(table: Arc<IntervalTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &IntervalTable {
        &self.table
    }

    /// Schedule the next review, optionally forcing the interval.
    ///
    /// An explicit key always wins over the signal. Unknown keys, either
    /// the override or a stale card position, fail before the card changes.
    pub fn schedule_next_with(
        &self,
        card: &mut CardState,
        signal: FixedRecall,
        explicit_key: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>> {
        let position = match explicit_key {
            Some(key) => self.table.index_of(key)?,
            None => {
                let current = self.table.index_of(&card.interval_position)?;
                match signal {
                    FixedRecall::Easy => (current + 1).min(self.table.last_index()),
                    FixedRecall::Medium => current,
                    FixedRecall::Hard => 0,
                }
            }
        };

        let (key, duration) = &self.table.entries()[position];
        let next_review_at = now
            .checked_add_signed(*duration)
            .ok_or(SchedulingError::ReviewOutOfRange)?;

        card.interval_position = key.clone();
        card.next_review_at = next_review_at;

        log::debug!(
            "Fixed review '{}'{}: interval {}",
            signal,
            if explicit_key.is_some() { " (override)" } else { "" },
            key
        );

        Ok(next_review_at)
    }
}

impl Default for FixedStepScheduler {
    fn default() -> Self {
        Self::new(Arc::new(IntervalTable::default()))
    }
}

impl ReviewScheduler for FixedStepScheduler {
    type Signal = FixedRecall;

    fn kind(&self) -> SchedulerKind {
        SchedulerKind::Fixed
    }

    fn initial_state(&self, now: DateTime<Utc>) -> CardState {
        CardState::new(self.table.first_key(), now)
    }

    fn schedule_next(
        &self,
        card: &mut CardState,
        signal: FixedRecall,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>> {
        self.schedule_next_with(card, signal, None, now)
    }

    fn counts_as_correct(signal: FixedRecall) -> bool {
        matches!(signal, FixedRecall::Easy | FixedRecall::Medium)
    }
}
