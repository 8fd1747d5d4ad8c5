//! JSON overview output writer.
//!
//! Serializes `Overview` structs to stdout-ready strings or JSON files.

use crate::parser::schema::Overview;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Serialize an overview to a JSON string
///
/// **Public** - used when printing to stdout
///
/// # Arguments
/// * `overview` - Overview to serialize
/// * `pretty` - Indent the document instead of writing a single line
pub fn overview_to_string(overview: &Overview, pretty: bool) -> Result<String, OutputError> {
    let json = if pretty {
        serde_json::to_string_pretty(overview)?
    } else {
        serde_json::to_string(overview)?
    };
    Ok(json)
}

/// Write an overview to a JSON file
///
/// **Public** - main entry point for file output
///
/// # Arguments
/// * `overview` - Overview data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_overview(
    overview: &Overview,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing overview to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, overview).map_err(OutputError::SerializationFailed)?;

    info!(
        "Overview written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Read an overview back from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_overview(input_path: impl AsRef<Path>) -> Result<Overview, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading overview from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let overview: Overview =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(overview)
}

/// Validate that output path is writable
///
/// **Public** - shared with argument validation
pub fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
