//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod overview;

// Re-export main command functions
pub use overview::{execute_overview, validate_args, OverviewArgs};
