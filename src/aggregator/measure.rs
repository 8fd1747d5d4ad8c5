//! Incremental statistics over a stream of samples.
//!
//! A `Measure` keeps the sample count, the running total, the last value and
//! a "max" that only compares the new value against the previous one.

use std::fmt::Debug;
use std::ops::AddAssign;

/// Numeric sample type a `Measure` can accumulate
pub trait Sample: Copy + Default + PartialOrd + AddAssign + Debug {
    fn to_f64(self) -> f64;
}

impl Sample for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Sample for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

/// Running statistics for one metric
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measure<T> {
    count: u64,
    total: T,
    max: T,
    last: T,
}

/// Measure over integer samples (sizes, nanoseconds, counters)
pub type LongMeasure = Measure<i64>;

/// Measure over floating samples (loads, rates)
pub type DoubleMeasure = Measure<f64>;

impl<T: Sample> Measure<T> {
    /// Create an empty measure
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a measure holding a single sample
    pub fn with_value(value: T) -> Self {
        Self {
            count: 1,
            total: value,
            max: value,
            last: value,
        }
    }

    /// Add a sample
    ///
    /// `max` becomes the larger of the new value and the previously added
    /// value, not the largest value seen so far.
    pub fn add(&mut self, value: T) {
        self.count += 1;
        self.total += value;
        self.max = if value > self.last { value } else { self.last };
        self.last = value;
    }

    /// Mean of all samples; `total` when nothing was added
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return self.total.to_f64();
        }
        self.total.to_f64() / self.count as f64
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn total(&self) -> T {
        self.total
    }

    pub fn max(&self) -> T {
        self.max
    }

    /// Most recently added sample
    pub fn last(&self) -> T {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_measure() {
        let measure = LongMeasure::new();
        assert_eq!(measure.count(), 0);
        assert_eq!(measure.total(), 0);
        assert_eq!(measure.average(), 0.0);

        let measure = DoubleMeasure::new();
        assert!(!measure.average().is_nan());
    }

    #[test]
    fn test_add_updates_count_total_last() {
        let mut measure = LongMeasure::new();
        for value in [4, 8, 6] {
            measure.add(value);
        }

        assert_eq!(measure.count(), 3);
        assert_eq!(measure.total(), 18);
        assert_eq!(measure.last(), 6);
        assert_eq!(measure.average(), 6.0);
    }

    #[test]
    fn test_max_compares_with_previous_value_only() {
        let mut measure = LongMeasure::new();
        measure.add(10);
        measure.add(3);
        assert_eq!(measure.max(), 10);

        measure.add(5);
        assert_eq!(measure.max(), 5);
    }

    #[test]
    fn test_average_is_not_truncated() {
        let mut measure = LongMeasure::new();
        measure.add(1);
        measure.add(2);
        assert_eq!(measure.average(), 1.5);
    }

    #[test]
    fn test_with_value() {
        let measure = DoubleMeasure::with_value(2.5);
        assert_eq!(measure.count(), 1);
        assert_eq!(measure.total(), 2.5);
        assert_eq!(measure.max(), 2.5);
        assert_eq!(measure.last(), 2.5);
    }
}
