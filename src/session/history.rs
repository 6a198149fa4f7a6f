//! Calculation history: completed calculations in insertion order.

use serde::Serialize;
use std::collections::VecDeque;
use std::time::SystemTime;

/// One completed, successfully evaluated calculation.
///
/// Records are immutable once created; equality is by value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculationRecord {
    /// The exact expression text that was submitted.
    pub input: String,
    /// The evaluated numeric result.
    pub value: f64,
    /// When the calculation completed. Non-decreasing across successive
    /// records within one session.
    pub recorded_at: SystemTime,
}

/// Ordered store of calculation records, oldest first.
///
/// Grows only through [`append`](Self::append) and resets only through
/// [`clear`](Self::clear). An optional retention limit bounds memory:
/// appending past the limit evicts the oldest record.
#[derive(Debug, Default)]
pub struct HistoryStore {
    records: VecDeque<CalculationRecord>,
    limit: Option<usize>,
}

impl HistoryStore {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that retains at most `limit` records.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(limit),
            limit: Some(limit),
        }
    }

    /// Append a record, evicting the oldest one if the store is full.
    pub fn append(&mut self, record: CalculationRecord) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while self.records.len() >= limit {
                self.records.pop_front();
            }
        }
        self.records.push_back(record);
    }

    /// Remove all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// An independent ordered copy of the records, oldest first.
    ///
    /// Mutating the returned vector never affects the store, and later
    /// appends never change a previously returned snapshot.
    pub fn snapshot(&self) -> Vec<CalculationRecord> {
        self.records.iter().cloned().collect()
    }

    /// The most recently appended record, if any.
    pub fn last(&self) -> Option<&CalculationRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The configured retention limit, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn record(input: &str, value: f64) -> CalculationRecord {
        CalculationRecord {
            input: input.to_string(),
            value,
            recorded_at: SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000),
        }
    }

    #[test]
    fn test_append_then_snapshot() {
        let mut store = HistoryStore::new();
        store.append(record("2+3", 5.0));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.last(), Some(&record("2+3", 5.0)));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = HistoryStore::new();
        store.append(record("1+1", 2.0));
        store.append(record("2+2", 4.0));
        store.append(record("3+3", 6.0));

        let snapshot = store.snapshot();
        let inputs: Vec<&str> = snapshot.iter().map(|r| r.input.as_str()).collect();
        assert_eq!(inputs, vec!["1+1", "2+2", "3+3"]);
    }

    #[test]
    fn test_clear_empties_store() {
        let mut store = HistoryStore::new();
        for i in 0..10 {
            store.append(record("x", i as f64));
        }
        store.clear();

        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_snapshot_is_a_defensive_copy() {
        let mut store = HistoryStore::new();
        store.append(record("2+3", 5.0));

        let mut snapshot = store.snapshot();
        snapshot.clear();
        snapshot.push(record("9*9", 81.0));

        let fresh = store.snapshot();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].input, "2+3");
    }

    #[test]
    fn test_later_appends_do_not_touch_old_snapshots() {
        let mut store = HistoryStore::new();
        store.append(record("1+1", 2.0));

        let before = store.snapshot();
        store.append(record("2+2", 4.0));

        assert_eq!(before.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_limit_evicts_oldest_first() {
        let mut store = HistoryStore::with_limit(3);
        for i in 0..5 {
            store.append(record(&format!("{i}+0"), i as f64));
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].input, "2+0");
        assert_eq!(snapshot[2].input, "4+0");
        assert_eq!(store.limit(), Some(3));
    }

    #[test]
    fn test_zero_limit_retains_nothing() {
        let mut store = HistoryStore::with_limit(0);
        store.append(record("2+3", 5.0));
        assert!(store.is_empty());
    }

    #[test]
    fn test_last_is_newest() {
        let mut store = HistoryStore::new();
        assert!(store.last().is_none());
        store.append(record("1+1", 2.0));
        store.append(record("2+2", 4.0));
        assert_eq!(store.last().map(|r| r.input.as_str()), Some("2+2"));
    }
}
