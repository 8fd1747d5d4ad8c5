//! Allocation rate estimation from irregular timestamped samples.
//!
//! The first sample fixes the baseline timestamp. Every later sample yields
//! `1000 * total_allocated / elapsed_millis`, i.e. bytes per second averaged
//! since the baseline, which is fed into a running measure.

use super::measure::DoubleMeasure;
use log::trace;

/// Running bytes-per-second estimate
#[derive(Debug, Clone, Default)]
pub struct RateEstimator {
    total_allocated: i64,
    first_timestamp: Option<i64>,
    rate: DoubleMeasure,
}

impl RateEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `size` bytes allocated at `timestamp_millis`
    ///
    /// Samples at or before the baseline still count towards the total but
    /// produce no rate.
    pub fn sample(&mut self, size: i64, timestamp_millis: i64) {
        self.total_allocated += size;

        let Some(first) = self.first_timestamp else {
            self.first_timestamp = Some(timestamp_millis);
            return;
        };

        let elapsed = timestamp_millis - first;
        if elapsed > 0 {
            let rate = 1000.0 * self.total_allocated as f64 / elapsed as f64;
            self.rate.add(rate);
        } else {
            trace!("Skipping rate sample with elapsed time {}ms", elapsed);
        }
    }

    /// Bytes sampled so far, baseline included
    pub fn total_allocated(&self) -> i64 {
        self.total_allocated
    }

    /// All rate estimates produced so far
    pub fn rate(&self) -> &DoubleMeasure {
        &self.rate
    }

    /// Most recent estimate, 0 before the second sample
    pub fn current_rate(&self) -> f64 {
        self.rate.last()
    }
}
