//! Spaced-repetition scheduling with working-memory aware chunking
//!
//! - [`flashcards`]: interval tables, the fixed-step and adaptive
//!   schedulers, due queues, study sessions and deck storage
//! - [`chunking`]: capacity profiles, capacity tests and chunked lessons
//! - [`stats`]: session accumulation and study analytics
//! - [`config`]: user configuration

pub mod chunking;
pub mod clock;
pub mod config;
pub mod flashcards;
pub mod stats;
pub mod storage;
