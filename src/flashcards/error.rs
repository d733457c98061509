//! Scheduling error types

use thiserror::Error;

/// Errors surfaced by the schedulers and the interval table.
///
/// All of these are caller input errors. Nothing is written to a card
/// before validation succeeds, so a failed call leaves the card untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingError {
    #[error("Invalid recall signal '{signal}'. Expected one of: {expected}")]
    InvalidRecallSignal { signal: String, expected: String },

    #[error("Unknown interval key '{0}'")]
    UnknownIntervalKey(String),

    #[error("Invalid interval table: {0}")]
    InvalidIntervalTable(String),

    #[error("Explicit interval overrides are only supported by the fixed-step scheduler")]
    OverrideUnsupported,

    #[error("Next review falls outside the representable date range")]
    ReviewOutOfRange,
}

impl From<SchedulingError> for String {
    fn from(err: SchedulingError) -> Self {
        err.to_string()
    }
}

/// Result type alias for scheduling operations
pub type Result<T> = std::result::Result<T, SchedulingError>;
