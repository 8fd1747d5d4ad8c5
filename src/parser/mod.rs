//! Recording parsing and schema definitions.
//!
//! This module handles:
//! - The structured event model handed to the aggregator
//! - Reading `jfr print --json` output
//! - Decoding method descriptors into readable signatures
//! - Defining the output schema

pub mod descriptor;
pub mod event;
pub mod jfr_json;
pub mod schema;

// Re-export main types
pub use descriptor::{decode_descriptors, format_method};
pub use event::{EventKind, FieldValue, Frame, FrameType, Method, RecordedEvent, StackTrace};
pub use jfr_json::{parse_event, parse_recording, read_recording};
pub use schema::{FrameSummary, Overview};
