//! Working-memory capacity profile

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Miller's magic number
pub const DEFAULT_BASE_CAPACITY: u32 = 7;

/// Capacity never drops below this
pub const MIN_CAPACITY: u32 = 3;

/// Success rate at or above which a larger test size is adopted
pub const GROW_THRESHOLD: f64 = 0.8;

/// Success rate below which capacity shrinks by one
pub const SHRINK_THRESHOLD: f64 = 0.6;

/// Growth cap beyond the best size tested so far
pub const MAX_GROWTH_STEP: u32 = 2;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChunkingError {
    #[error("Invalid capacity test: attempted size {attempted_size}, success rate {success_rate}")]
    InvalidCapacityTest { attempted_size: u32, success_rate: f64 },

    #[error("Invalid chunking profile '{user_id}': {message}")]
    InvalidProfile { user_id: String, message: String },
}

pub type Result<T> = std::result::Result<T, ChunkingError>;

/// One capacity test result, as recorded in the history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityTest {
    pub attempted_size: u32,
    pub success_rate: f64,
}

/// A learner's estimated working-memory capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ProfileRecord")]
pub struct ChunkingProfile {
    pub user_id: String,
    pub base_capacity: u32,
    pub current_capacity: u32,
    pub max_tested_capacity: u32,
    /// Append-only audit trail of test results
    test_history: Vec<CapacityTest>,
}

/// Profile as stored, checked before it becomes a [`ChunkingProfile`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRecord {
    user_id: String,
    #[serde(default = "default_capacity")]
    base_capacity: u32,
    #[serde(default = "default_capacity")]
    current_capacity: u32,
    #[serde(default = "default_capacity")]
    max_tested_capacity: u32,
    #[serde(default)]
    test_history: Vec<CapacityTest>,
}

fn default_capacity() -> u32 {
    DEFAULT_BASE_CAPACITY
}

impl TryFrom<ProfileRecord> for ChunkingProfile {
    type Error = ChunkingError;

    fn try_from(record: ProfileRecord) -> Result<Self> {
        let capacities = [
            ("baseCapacity", record.base_capacity),
            ("currentCapacity", record.current_capacity),
            ("maxTestedCapacity", record.max_tested_capacity),
        ];
        for (field, value) in capacities {
            if value < MIN_CAPACITY {
                return Err(ChunkingError::InvalidProfile {
                    user_id: record.user_id,
                    message: format!("{} {} is below {}", field, value, MIN_CAPACITY),
                });
            }
        }

        Ok(Self {
            user_id: record.user_id,
            base_capacity: record.base_capacity,
            current_capacity: record.current_capacity,
            max_tested_capacity: record.max_tested_capacity,
            test_history: record.test_history,
        })
    }
}

impl ChunkingProfile {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self::with_base_capacity(user_id, DEFAULT_BASE_CAPACITY)
    }

    pub fn with_base_capacity(user_id: impl Into<String>, base_capacity: u32) -> Self {
        let base_capacity = base_capacity.max(MIN_CAPACITY);
        Self {
            user_id: user_id.into(),
            base_capacity,
            current_capacity: base_capacity,
            max_tested_capacity: base_capacity,
            test_history: Vec::new(),
        }
    }

    pub fn test_history(&self) -> &[CapacityTest] {
        &self.test_history
    }

    /// Adapt capacity from a test result and return the new capacity.
    ///
    /// Grows only when a larger size was recalled reliably, and then by at
    /// most two past the best size tested; shrinks by one on poor recall,
    /// never below three; holds otherwise.
    pub fn update_capacity(&mut self, attempted_size: u32, success_rate: f64) -> Result<u32> {
        if attempted_size == 0 || !(0.0..=1.0).contains(&success_rate) {
            return Err(ChunkingError::InvalidCapacityTest {
                attempted_size,
                success_rate,
            });
        }

        self.test_history.push(CapacityTest {
            attempted_size,
            success_rate,
        });

        let previous = self.current_capacity;
        if success_rate >= GROW_THRESHOLD {
            if attempted_size > self.current_capacity {
                self.current_capacity =
                    attempted_size.min(self.max_tested_capacity + MAX_GROWTH_STEP);
                self.max_tested_capacity = self.max_tested_capacity.max(attempted_size);
            }
        } else if success_rate < SHRINK_THRESHOLD {
            self.current_capacity = self.current_capacity.saturating_sub(1).max(MIN_CAPACITY);
        }

        if previous != self.current_capacity {
            log::info!(
                "Capacity for '{}' changed {} -> {} (size {}, rate {:.0}%)",
                self.user_id,
                previous,
                self.current_capacity,
                attempted_size,
                success_rate * 100.0
            );
        }

        Ok(self.current_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let profile = ChunkingProfile::new("student_001");
        assert_eq!(profile.base_capacity, 7);
        assert_eq!(profile.current_capacity, 7);
        assert_eq!(profile.max_tested_capacity, 7);
        assert!(profile.test_history().is_empty());
    }

    #[test]
    fn test_growth_is_capped() {
        let mut profile = ChunkingProfile::new("u");
        let capacity = profile.update_capacity(10, 0.9).unwrap();
        assert_eq!(capacity, 9);
        assert_eq!(profile.current_capacity, 9);
        assert_eq!(profile.max_tested_capacity, 10);
    }

    #[test]
    fn test_growth_to_attempted_size() {
        let mut profile = ChunkingProfile::new("u");
        assert_eq!(profile.update_capacity(8, 0.8).unwrap(), 8);
        assert_eq!(profile.max_tested_capacity, 8);
    }

    #[test]
    fn test_shrinks_and_floors() {
        let mut profile = ChunkingProfile::new("u");
        assert_eq!(profile.update_capacity(5, 0.5).unwrap(), 6);

        for _ in 0..10 {
            profile.update_capacity(5, 0.2).unwrap();
        }
        assert_eq!(profile.current_capacity, MIN_CAPACITY);
    }

    #[test]
    fn test_middle_band_holds() {
        let mut profile = ChunkingProfile::new("u");
        assert_eq!(profile.update_capacity(9, 0.7).unwrap(), 7);
        // reliable recall at or below current capacity does not grow it
        assert_eq!(profile.update_capacity(5, 1.0).unwrap(), 7);
        assert_eq!(profile.max_tested_capacity, 7);
    }

    #[test]
    fn test_can_grow_after_shrinking() {
        let mut profile = ChunkingProfile::new("u");
        profile.update_capacity(7, 0.3).unwrap();
        profile.update_capacity(7, 0.3).unwrap();
        assert_eq!(profile.current_capacity, 5);

        assert_eq!(profile.update_capacity(7, 0.9).unwrap(), 7);
        assert_eq!(profile.update_capacity(12, 1.0).unwrap(), 9);
        assert_eq!(profile.max_tested_capacity, 12);
    }

    #[test]
    fn test_history_is_append_only() {
        let mut profile = ChunkingProfile::new("u");
        profile.update_capacity(5, 0.5).unwrap();
        profile.update_capacity(9, 0.7).unwrap();
        profile.update_capacity(10, 0.9).unwrap();

        let history = profile.test_history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0], CapacityTest { attempted_size: 5, success_rate: 0.5 });
        assert_eq!(history[2].attempted_size, 10);
    }

    #[test]
    fn test_deserialize_checks_capacity_floor() {
        let profile: ChunkingProfile = serde_json::from_str(r#"{"userId": "u", "currentCapacity": 5}"#).unwrap();
        assert_eq!(profile.base_capacity, 7);
        assert_eq!(profile.current_capacity, 5);

        let result: std::result::Result<ChunkingProfile, _> =
            serde_json::from_str(r#"{"userId": "u", "currentCapacity": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_invalid_input() {
        let mut profile = ChunkingProfile::new("u");
        assert!(profile.update_capacity(0, 0.9).is_err());
        assert!(profile.update_capacity(5, 1.5).is_err());
        assert!(profile.update_capacity(5, -0.1).is_err());
        assert!(profile.update_capacity(5, f64::NAN).is_err());
        assert!(profile.test_history().is_empty());
        assert_eq!(profile.current_capacity, 7);
    }
}
