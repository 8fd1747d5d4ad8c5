//! Configuration and constants for the overview.

/// Maximum number of entries in every top-frames list
pub const TOP_FRAMES_LIMIT: usize = 10;

// Signatures with more parameters than this are rendered as "..."
pub const MAX_DISPLAYED_PARAMETERS: usize = 10;

/// Emitted for descriptor characters that don't name a known type
pub const UNKNOWN_DESCRIPTOR_TYPE: &str = "<unknown-descriptor-type>";

/// GC name reported when the recording carries no GC configuration
pub const UNKNOWN_GC_NAME: &str = "Unknown";

// Top-level layouts of a `jfr print --json` document
pub const RECORDING_FIELD: &str = "recording";
pub const EVENTS_FIELD: &str = "events";

// Event values the reader maps onto dedicated event properties
pub const START_TIME_FIELD: &str = "startTime";
pub const DURATION_FIELD: &str = "duration";
pub const STACK_TRACE_FIELD: &str = "stackTrace";
