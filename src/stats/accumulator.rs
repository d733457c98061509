//! Session folding and the daily study log

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::models::{CardOutcome, DailyStats, SessionStats, StudyAnalytics};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("No cards were studied in this session")]
    EmptySession,
}

pub type Result<T> = std::result::Result<T, StatsError>;

/// Folds per-card outcomes of a session in progress
#[derive(Debug, Clone)]
pub struct SessionAccumulator {
    started_at: DateTime<Utc>,
    cards_studied: u32,
    correct_answers: u32,
    card_results: Vec<CardOutcome>,
}

impl SessionAccumulator {
    pub fn start(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            cards_studied: 0,
            correct_answers: 0,
            card_results: Vec::new(),
        }
    }

    /// Fold a complete sequence of outcomes
    pub fn from_outcomes<I>(started_at: DateTime<Utc>, outcomes: I) -> Self
    where
        I: IntoIterator<Item = CardOutcome>,
    {
        let mut acc = Self::start(started_at);
        for outcome in outcomes {
            acc.record(outcome);
        }
        acc
    }

    pub fn record(&mut self, outcome: CardOutcome) {
        self.cards_studied += 1;
        if outcome.correct {
            self.correct_answers += 1;
        }
        self.card_results.push(outcome);
    }

    pub fn cards_studied(&self) -> u32 {
        self.cards_studied
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    pub fn is_empty(&self) -> bool {
        self.cards_studied == 0
    }

    pub fn accuracy(&self) -> Result<f64> {
        accuracy(self.correct_answers, self.cards_studied)
    }

    pub fn finish(self, ended_at: DateTime<Utc>) -> SessionStats {
        SessionStats {
            id: Uuid::new_v4(),
            cards_studied: self.cards_studied,
            correct_answers: self.correct_answers,
            started_at: self.started_at,
            ended_at,
            card_results: self.card_results,
        }
    }
}

impl SessionStats {
    pub fn accuracy(&self) -> Result<f64> {
        accuracy(self.correct_answers, self.cards_studied)
    }
}

fn accuracy(correct: u32, studied: u32) -> Result<f64> {
    if studied == 0 {
        return Err(StatsError::EmptySession);
    }
    Ok(correct as f64 / studied as f64)
}

/// Every finished session plus per-day totals.
///
/// Owned by the caller; lives as long as the caller keeps it. Days are
/// keyed by the UTC date of each session's start and are never evicted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyLog {
    #[serde(default)]
    pub sessions: Vec<SessionStats>,
    #[serde(default)]
    pub daily: BTreeMap<NaiveDate, DailyStats>,
}

impl StudyLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished session and add it to its day's bucket
    pub fn record_session(&mut self, session: SessionStats) {
        let bucket = self.daily.entry(session.study_date()).or_default();
        bucket.cards_studied += session.cards_studied;
        bucket.correct_answers += session.correct_answers;
        bucket.study_time_seconds += session.study_time_seconds();
        self.sessions.push(session);
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DailyStats> {
        self.daily.get(&date)
    }

    /// Totals over all sessions, `None` before the first session
    pub fn analytics(&self, total_cards_in_system: usize, current_capacity: u32) -> Option<StudyAnalytics> {
        if self.sessions.is_empty() {
            return None;
        }

        let total_cards_studied: u32 = self.sessions.iter().map(|s| s.cards_studied).sum();
        let total_correct: u32 = self.sessions.iter().map(|s| s.correct_answers).sum();

        Some(StudyAnalytics {
            total_sessions: self.sessions.len(),
            total_cards_studied,
            overall_accuracy: accuracy(total_correct, total_cards_studied).unwrap_or(0.0),
            current_capacity,
            total_cards_in_system,
            daily_stats: self.daily.clone(),
        })
    }
}
