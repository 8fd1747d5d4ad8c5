//! Aggregation of recording events into an overview.
//!
//! This module reduces an ordered event stream into:
//! - Running measures (CPU load, GC pauses, heap, threads, classes)
//! - Top-frame histograms (allocation and execution hot spots)
//! - An allocation rate estimate

pub mod histogram;
pub mod measure;
pub mod overview;
pub mod rate;

// Re-export main types
pub use histogram::{Histogram, HistogramRecord};
pub use measure::{DoubleMeasure, LongMeasure, Measure};
pub use overview::EventAggregator;
pub use rate::RateEstimator;
