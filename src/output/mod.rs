//! Output writers for overview data.
//!
//! This module handles rendering the overview:
//! - JSON documents (pretty and compact, stdout or file)
//! - Text summaries

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{overview_to_string, read_overview, validate_output_path, write_overview};
pub use text::generate_text_summary;
