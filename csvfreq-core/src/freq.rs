use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::table::Cell;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub value: String,
    pub count: u64,
}

/// Accumulates occurrence counts for one column's values. Null cells
/// contribute to neither the counts nor the total.
pub struct FrequencyCounter {
    counts: HashMap<String, u64>,
    first_seen: Vec<String>,
    total: u64,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            first_seen: Vec::new(),
            total: 0,
        }
    }

    pub fn add(&mut self, cell: &Cell) {
        let Some(value) = cell.as_value() else { return };
        match self.counts.get_mut(value) {
            Some(n) => *n += 1,
            None => {
                self.counts.insert(value.to_owned(), 1);
                self.first_seen.push(value.to_owned());
            }
        }
        self.total += 1;
    }

    /// Number of non-null cells seen so far.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn distinct(&self) -> usize {
        self.first_seen.len()
    }

    /// Consume the counter into a sequence sorted by count descending.
    /// Entries with equal counts keep the order their value was first seen,
    /// so re-running on the same column always yields the same sequence.
    pub fn rank(self) -> Vec<RankedEntry> {
        let counts = self.counts;
        let mut entries: Vec<RankedEntry> = self
            .first_seen
            .into_iter()
            .map(|value| {
                let count = counts[&value];
                RankedEntry { value, count }
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count)); // stable
        entries
    }
}

impl Default for FrequencyCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_over(values: &[Option<&str>]) -> FrequencyCounter {
        let mut counter = FrequencyCounter::new();
        for v in values {
            let cell = match v {
                Some(s) => Cell::Value((*s).to_owned()),
                None => Cell::Null,
            };
            counter.add(&cell);
        }
        counter
    }

    #[test]
    fn counts_sum_to_non_null_total() {
        let c = counter_over(&[Some("a"), Some("b"), Some("a"), None, Some("c")]);
        assert_eq!(c.total(), 4);
        assert_eq!(c.distinct(), 3);
        let ranked = c.rank();
        assert_eq!(ranked.iter().map(|e| e.count).sum::<u64>(), 4);
    }

    #[test]
    fn nulls_count_nowhere() {
        let c = counter_over(&[None, None]);
        assert_eq!(c.total(), 0);
        assert!(c.rank().is_empty());
    }

    #[test]
    fn rank_is_descending_by_count() {
        let c = counter_over(&[Some("a"), Some("b"), Some("a"), Some("c"), Some("b"), Some("a")]);
        let ranked = c.rank();
        assert_eq!(
            ranked,
            vec![
                RankedEntry { value: "a".into(), count: 3 },
                RankedEntry { value: "b".into(), count: 2 },
                RankedEntry { value: "c".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let c = counter_over(&[Some("z"), Some("m"), Some("a"), Some("m"), Some("z"), Some("a")]);
        let ranked = c.rank();
        let values: Vec<&str> = ranked.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, ["z", "m", "a"]);
    }

    #[test]
    fn empty_input_yields_empty_map() {
        let c = counter_over(&[]);
        assert_eq!(c.total(), 0);
        assert_eq!(c.distinct(), 0);
    }
}
