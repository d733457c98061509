//! Capacity testing with memorization sequences
//!
//! The tester walks sequence sizes upward from 3, asks a [`SequenceJudge`]
//! whether each presented sequence was reproduced, and feeds the best
//! reliable result into the learner's [`ChunkingProfile`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::models::{CapacityTest, ChunkingProfile, Result, MIN_CAPACITY, SHRINK_THRESHOLD};

/// Largest sequence size tested by default
pub const DEFAULT_MAX_TEST_SIZE: u32 = 12;

const TRIALS_PER_SIZE: usize = 3;

/// Testing stops after a size scoring below this
const STOP_BELOW: f64 = 0.5;

const DIGIT_SEQUENCES: &[&[&str]] = &[
    &["1", "4", "7"],
    &["2", "8", "5"],
    &["9", "3", "6"],
    &["1", "4", "7", "2", "9"],
    &["3", "8", "5", "1", "6"],
    &["7", "2", "9", "4", "3"],
    &["1", "4", "7", "2", "9", "5", "3"],
    &["8", "1", "6", "9", "2", "7", "4"],
    &["1", "4", "7", "2", "9", "5", "3", "8", "6"],
    &["7", "2", "9", "4", "1", "8", "5", "3", "6"],
];

const WORD_SEQUENCES: &[&[&str]] = &[
    &["apple", "banana", "grape"],
    &["cat", "dog", "rabbit"],
    &["apple", "banana", "grape", "strawberry", "orange"],
    &["book", "pencil", "eraser", "ruler", "bag"],
    &["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"],
    &["red", "orange", "yellow", "green", "blue", "indigo", "violet"],
];

/// Memorization sequences grouped by length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceBank {
    sequences: BTreeMap<u32, Vec<Vec<String>>>,
}

impl SequenceBank {
    pub fn empty() -> Self {
        Self {
            sequences: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, sequence: Vec<String>) {
        self.sequences
            .entry(sequence.len() as u32)
            .or_default()
            .push(sequence);
    }

    pub fn for_size(&self, size: u32) -> &[Vec<String>] {
        self.sequences.get(&size).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn sizes(&self) -> impl Iterator<Item = u32> + '_ {
        self.sequences.keys().copied()
    }
}

/// Digit and word sequences merged per size.
///
/// Sizes 3, 5 and 7 hold both kinds, so a test there runs every digit and
/// word sequence of that length (five trials at 3 and 5, four at 7) rather
/// than only the two word sequences.
impl Default for SequenceBank {
    fn default() -> Self {
        let mut bank = Self::empty();
        for seq in DIGIT_SEQUENCES.iter().chain(WORD_SEQUENCES.iter()) {
            bank.add(seq.iter().map(|s| s.to_string()).collect());
        }
        bank
    }
}

/// Decides whether a presented sequence was reproduced correctly
pub trait SequenceJudge {
    fn judge(&mut self, sequence: &[String]) -> bool;
}

impl<F> SequenceJudge for F
where
    F: FnMut(&[String]) -> bool,
{
    fn judge(&mut self, sequence: &[String]) -> bool {
        self(sequence)
    }
}

/// What a test run measured and what it changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityReport {
    pub results: Vec<CapacityTest>,
    /// Result fed into the profile, if any size was tested
    pub chosen: Option<CapacityTest>,
    pub capacity: u32,
}

#[derive(Debug, Clone)]
pub struct CapacityTester {
    bank: SequenceBank,
    max_test_size: u32,
}

impl CapacityTester {
    pub fn new(bank: SequenceBank, max_test_size: u32) -> Self {
        Self { bank, max_test_size }
    }

    /// Run a test and update `profile` with the best result.
    ///
    /// Sizes from 3 up to one past the current capacity (bounded by the
    /// maximum test size) are tried, up to three sequences each.
    pub fn run<J: SequenceJudge>(
        &self,
        profile: &mut ChunkingProfile,
        judge: &mut J,
    ) -> Result<CapacityReport> {
        let upper = (profile.current_capacity + 1).min(self.max_test_size);
        let mut results = Vec::new();

        for size in MIN_CAPACITY..=upper {
            let sequences = self.bank.for_size(size);
            if sequences.is_empty() {
                continue;
            }

            let trials = sequences.len().min(TRIALS_PER_SIZE);
            let passed = sequences[..trials]
                .iter()
                .filter(|seq| judge.judge(seq))
                .count();
            let success_rate = passed as f64 / trials as f64;

            log::debug!("Capacity test size {}: {}/{} recalled", size, passed, trials);
            results.push(CapacityTest {
                attempted_size: size,
                success_rate,
            });

            if success_rate < STOP_BELOW {
                break;
            }
        }

        let chosen = best_result(&results);
        if let Some(best) = chosen {
            profile.update_capacity(best.attempted_size, best.success_rate)?;
        }

        Ok(CapacityReport {
            results,
            chosen,
            capacity: profile.current_capacity,
        })
    }
}

impl Default for CapacityTester {
    fn default() -> Self {
        Self::new(SequenceBank::default(), DEFAULT_MAX_TEST_SIZE)
    }
}

/// Highest success rate among results at or above the shrink threshold,
/// earliest on ties; the first result when none qualifies.
fn best_result(results: &[CapacityTest]) -> Option<CapacityTest> {
    let score = |t: &CapacityTest| {
        if t.success_rate >= SHRINK_THRESHOLD {
            t.success_rate
        } else {
            0.0
        }
    };

    let mut iter = results.iter();
    let mut best = *iter.next()?;
    for candidate in iter {
        if score(candidate) > score(&best) {
            best = *candidate;
        }
    }
    Some(best)
}
