//! Keyed collection of measures with bounded top-K rankings.
//!
//! Used for the hot-spot lists: the key is a formatted top frame, the value
//! is either an allocation size or a sample weight of 1.

use super::measure::LongMeasure;
use crate::utils::config::TOP_FRAMES_LIMIT;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Snapshot of one histogram entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramRecord {
    pub key: String,
    pub count: u64,
    pub last_value: i64,
    pub total: i64,
}

/// Histogram of integer measures keyed by label
#[derive(Debug, Clone, Default)]
pub struct Histogram {
    entries: HashMap<String, LongMeasure>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sample to the measure for `key`, creating it if needed
    pub fn add(&mut self, key: &str, value: i64) {
        match self.entries.get_mut(key) {
            Some(measure) => measure.add(value),
            None => {
                let mut measure = LongMeasure::new();
                measure.add(value);
                self.entries.insert(key.to_string(), measure);
            }
        }
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot every entry, in no particular order
    pub fn records(&self) -> Vec<HistogramRecord> {
        self.entries
            .iter()
            .map(|(key, measure)| HistogramRecord {
                key: key.clone(),
                count: measure.count(),
                last_value: measure.last(),
                total: measure.total(),
            })
            .collect()
    }

    /// Top entries by summed value, descending
    pub fn top_by_total(&self) -> Vec<HistogramRecord> {
        self.top_by(|a, b| b.total.cmp(&a.total))
    }

    /// Top entries by number of samples, descending
    pub fn top_by_count(&self) -> Vec<HistogramRecord> {
        self.top_by(|a, b| b.count.cmp(&a.count))
    }

    // Equal entries are ordered by key so the output is reproducible
    fn top_by<F>(&self, compare: F) -> Vec<HistogramRecord>
    where
        F: Fn(&HistogramRecord, &HistogramRecord) -> Ordering,
    {
        let mut records = self.records();
        records.sort_by(|a, b| compare(a, b).then_with(|| a.key.cmp(&b.key)));
        records.truncate(TOP_FRAMES_LIMIT);
        records
    }
}
