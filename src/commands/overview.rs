//! Overview command implementation.
//!
//! The overview command:
//! 1. Reads the recording
//! 2. Aggregates every event in recording order
//! 3. Writes the JSON overview (stdout or file)

use crate::aggregator::EventAggregator;
use crate::output::{
    generate_text_summary, overview_to_string, validate_output_path, write_overview,
};
use crate::parser::read_recording;
use crate::parser::schema::Overview;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the overview command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct OverviewArgs {
    /// Recording printed with `jfr print --json`
    pub recording: PathBuf,

    /// Write the JSON here instead of stdout
    pub output: Option<PathBuf>,

    /// Single-line JSON
    pub compact: bool,

    /// Print text summary to stderr
    pub print_summary: bool,
}

/// Execute the overview command
///
/// **Public** - main entry point called from main.rs
///
/// Nothing is written unless the whole recording was read; a read failure
/// aborts before any output.
///
/// # Returns
/// The overview that was written
pub fn execute_overview(args: &OverviewArgs) -> Result<Overview> {
    let start_time = Instant::now();

    info!("Step 1/3: Reading recording...");
    let events = read_recording(&args.recording).with_context(|| {
        format!("Failed to read recording {}", args.recording.display())
    })?;

    info!("Step 2/3: Aggregating {} events...", events.len());
    let mut aggregator = EventAggregator::new();
    aggregator.process_all(&events);

    debug!(
        "Processed {} events ({} ignored, {} skipped)",
        aggregator.events_processed(),
        aggregator.events_ignored(),
        aggregator.events_skipped()
    );

    let overview = aggregator.snapshot();

    info!("Step 3/3: Writing overview...");
    match &args.output {
        Some(path) => {
            write_overview(&overview, path).context("Failed to write overview JSON")?;
            info!("✓ Overview written to: {}", path.display());
        }
        None => {
            let json = overview_to_string(&overview, !args.compact)
                .context("Failed to serialize overview")?;
            println!("{}", json);
        }
    }

    if args.print_summary {
        eprintln!("\n{}", generate_text_summary(&overview));
    }

    info!(
        "Overview completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(overview)
}

/// Validate overview arguments
///
/// **Public** - can be called before execute_overview for early validation
pub fn validate_args(args: &OverviewArgs) -> Result<()> {
    if args.recording.as_os_str().is_empty() {
        anyhow::bail!("Recording path cannot be empty");
    }

    if !args.recording.is_file() {
        anyhow::bail!("Recording not found: {}", args.recording.display());
    }

    if let Some(output) = &args.output {
        validate_output_path(output)?;
    }

    Ok(())
}
