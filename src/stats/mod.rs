//! Session and daily study statistics

pub mod accumulator;
pub mod models;

pub use accumulator::{SessionAccumulator, StatsError, StudyLog};
pub use models::*;
