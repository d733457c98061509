//! Due-card retrieval

use chrono::{DateTime, Utc};

use super::models::{CardState, Flashcard};

/// Anything carrying a schedule
pub trait Scheduled {
    fn card_state(&self) -> &CardState;
}

impl Scheduled for CardState {
    fn card_state(&self) -> &CardState {
        self
    }
}

impl Scheduled for Flashcard {
    fn card_state(&self) -> &CardState {
        &self.state
    }
}

impl<T: Scheduled> Scheduled for &T {
    fn card_state(&self) -> &CardState {
        (*self).card_state()
    }
}

/// Items due at `now`, earliest first.
///
/// Items sharing a due time keep their input order. No limit is applied;
/// truncate the result for a per-session cap.
pub fn due_cards<T: Scheduled>(items: &[T], now: DateTime<Utc>) -> Vec<&T> {
    let mut due: Vec<&T> = items
        .iter()
        .filter(|item| item.card_state().is_due(now))
        .collect();

    // sort_by_key is stable
    due.sort_by_key(|item| item.card_state().next_review_at);
    due
}

/// Positions in `items` of the due items, earliest first
pub fn due_indices<T: Scheduled>(items: &[T], now: DateTime<Utc>) -> Vec<usize> {
    let mut due: Vec<usize> = (0..items.len())
        .filter(|&i| items[i].card_state().is_due(now))
        .collect();
    due.sort_by_key(|&i| items[i].card_state().next_review_at);
    due
}

pub fn due_count<T: Scheduled>(items: &[T], now: DateTime<Utc>) -> usize {
    items
        .iter()
        .filter(|item| item.card_state().is_due(now))
        .count()
}

/// Earliest review time across all items
pub fn next_due_at<T: Scheduled>(items: &[T]) -> Option<DateTime<Utc>> {
    items
        .iter()
        .map(|item| item.card_state().next_review_at)
        .min()
}
