//! Study statistics data models

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of reviewing one card within a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardOutcome {
    pub card_id: Uuid,
    pub correct: bool,
    /// Recall signal as given by the learner
    pub signal: String,
    pub next_review_at: DateTime<Utc>,
}

/// A finished study session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub id: Uuid,
    pub cards_studied: u32,
    pub correct_answers: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    #[serde(default)]
    pub card_results: Vec<CardOutcome>,
}

impl SessionStats {
    pub fn study_time_seconds(&self) -> f64 {
        (self.ended_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Calendar day (UTC) the session is counted under
    pub fn study_date(&self) -> NaiveDate {
        self.started_at.date_naive()
    }
}

/// Per-day aggregate across sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub cards_studied: u32,
    pub correct_answers: u32,
    pub study_time_seconds: f64,
}

/// Summary over every recorded session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyAnalytics {
    pub total_sessions: usize,
    pub total_cards_studied: u32,
    pub overall_accuracy: f64,
    pub current_capacity: u32,
    pub total_cards_in_system: usize,
    pub daily_stats: BTreeMap<NaiveDate, DailyStats>,
}
