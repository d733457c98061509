//! Named review intervals for the fixed-step scheduler
//!
//! The table order is the progression order: position 0 is the shortest
//! interval, the last position the longest.

use chrono::Duration;

use super::error::{Result, SchedulingError};

/// Default progression: 1 hour, 3 hours, 24 hours, 3 days, 7 days
pub const DEFAULT_INTERVALS: [(&str, i64); 5] = [
    ("1_hour", 60),
    ("3_hours", 3 * 60),
    ("24_hours", 24 * 60),
    ("3_days", 3 * 24 * 60),
    ("7_days", 7 * 24 * 60),
];

/// An ordered, immutable mapping from interval key to duration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTable {
    entries: Vec<(String, Duration)>,
}

impl IntervalTable {
    /// Build a table from `(key, duration)` pairs.
    ///
    /// Keys must be unique and durations strictly ascending.
    pub fn new<K: Into<String>>(entries: Vec<(K, Duration)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(SchedulingError::InvalidIntervalTable(
                "table has no entries".to_string(),
            ));
        }

        let entries: Vec<(String, Duration)> =
            entries.into_iter().map(|(k, d)| (k.into(), d)).collect();

        for (i, (key, duration)) in entries.iter().enumerate() {
            if *duration <= Duration::zero() {
                return Err(SchedulingError::InvalidIntervalTable(format!(
                    "interval '{}' must be positive",
                    key
                )));
            }
            if entries[..i].iter().any(|(k, _)| k == key) {
                return Err(SchedulingError::InvalidIntervalTable(format!(
                    "duplicate key '{}'",
                    key
                )));
            }
            if i > 0 && entries[i - 1].1 >= *duration {
                return Err(SchedulingError::InvalidIntervalTable(format!(
                    "'{}' is not longer than '{}'",
                    key,
                    entries[i - 1].0
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Build a table from `(key, minutes)` pairs
    pub fn from_minutes<K: Into<String>>(entries: Vec<(K, i64)>) -> Result<Self> {
        let entries = entries
            .into_iter()
            .map(|(k, m)| {
                let key = k.into();
                match Duration::try_minutes(m) {
                    Some(duration) => Ok((key, duration)),
                    None => Err(SchedulingError::InvalidIntervalTable(format!(
                        "interval '{}' of {} minutes is out of range",
                        key, m
                    ))),
                }
            })
            .collect::<Result<Vec<(String, Duration)>>>()?;
        Self::new(entries)
    }

    /// Duration for a key
    pub fn lookup(&self, key: &str) -> Result<Duration> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, d)| *d)
            .ok_or_else(|| SchedulingError::UnknownIntervalKey(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// All keys, shortest interval first
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// All entries, shortest interval first
    pub fn entries(&self) -> &[(String, Duration)] {
        &self.entries
    }

    pub fn index_of(&self, key: &str) -> Result<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k == key)
            .ok_or_else(|| SchedulingError::UnknownIntervalKey(key.to_string()))
    }

    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(k, _)| k.as_str())
    }

    /// Key of the shortest interval
    pub fn first_key(&self) -> &str {
        &self.entries[0].0
    }

    pub fn last_index(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_INTERVALS
                .iter()
                .map(|(k, m)| (k.to_string(), Duration::minutes(*m)))
                .collect(),
        }
    }
}

/// Format an interval duration as a short human-readable string
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    if minutes < 60 {
        format!("{}m", minutes)
    } else if minutes < 24 * 60 {
        format!("{}h", minutes / 60)
    } else {
        format!("{}d", minutes / (24 * 60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_order() {
        let table = IntervalTable::default();
        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys, vec!["1_hour", "3_hours", "24_hours", "3_days", "7_days"]);
        assert_eq!(table.first_key(), "1_hour");
        assert_eq!(table.last_index(), 4);
    }

    #[test]
    fn test_lookup() {
        let table = IntervalTable::default();
        assert_eq!(table.lookup("3_hours").unwrap(), Duration::hours(3));
        assert_eq!(table.lookup("7_days").unwrap(), Duration::days(7));
        assert_eq!(
            table.lookup("2_weeks"),
            Err(SchedulingError::UnknownIntervalKey("2_weeks".to_string()))
        );
    }

    #[test]
    fn test_index_and_key_roundtrip() {
        let table = IntervalTable::default();
        assert_eq!(table.index_of("24_hours").unwrap(), 2);
        assert_eq!(table.key_at(2), Some("24_hours"));
        assert_eq!(table.key_at(5), None);
        assert!(table.index_of("nope").is_err());
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let result = IntervalTable::from_minutes(vec![("a", 10), ("a", 20)]);
        assert!(matches!(result, Err(SchedulingError::InvalidIntervalTable(_))));
    }

    #[test]
    fn test_rejects_unordered_durations() {
        let result = IntervalTable::from_minutes(vec![("long", 60), ("short", 10)]);
        assert!(matches!(result, Err(SchedulingError::InvalidIntervalTable(_))));

        let result = IntervalTable::from_minutes(vec![("a", 10), ("b", 10)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_out_of_range_minutes() {
        let result = IntervalTable::from_minutes(vec![("1_hour", 60), ("forever", i64::MAX)]);
        assert!(matches!(result, Err(SchedulingError::InvalidIntervalTable(_))));
    }

    #[test]
    fn test_rejects_empty_table() {
        let result = IntervalTable::new(Vec::<(String, Duration)>::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::minutes(30)), "30m");
        assert_eq!(format_duration(Duration::hours(3)), "3h");
        assert_eq!(format_duration(Duration::days(7)), "7d");
    }
}
