//! Working-memory capacity and chunked lessons
//!
//! This module provides:
//! - Per-learner capacity profiles adapted from test results
//! - Sequence-based capacity testing
//! - Splitting lessons into capacity-sized chunks placed at memory palace loci

pub mod lesson;
pub mod models;
pub mod storage;
pub mod tester;

pub use lesson::{chunk_lesson, LessonChunk, LociStructure, Locus};
pub use models::*;
pub use storage::ProfileStorage;
pub use tester::{CapacityReport, CapacityTester, SequenceBank, SequenceJudge};
