//! JFR Overview
//!
//! Summarises Java Flight Recorder recordings into a compact JSON overview:
//! GC pauses, CPU load, heap sizes, allocation volume and rate, and the
//! hottest allocation and execution frames.
//!
//! ## Getting Started
//!
//! Convert the recording to JSON with the JDK's `jfr` tool, then run:
//!
//! ```bash
//! jfr print --json recording.jfr > recording.json
//! jfr-overview recording.json
//! ```
//!
//! The aggregation core can also be used directly:
//!
//! ```
//! use jfr_overview::aggregator::EventAggregator;
//! use jfr_overview::parser::{EventKind, FieldValue, RecordedEvent};
//!
//! let mut aggregator = EventAggregator::new();
//! aggregator.process(
//!     &RecordedEvent::new(EventKind::ObjectAllocationOutsideTlab)
//!         .with_field("allocationSize", FieldValue::Integer(64))
//!         .with_end_time(0),
//! );
//! assert_eq!(aggregator.snapshot().alloc.total, 64);
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
