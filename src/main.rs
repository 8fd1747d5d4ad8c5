//! JFR Overview CLI
//!
//! Summarises a Java Flight Recorder recording (printed with
//! `jfr print --json`) into a JSON overview on stdout.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use jfr_overview::commands::{execute_overview, validate_args, OverviewArgs};

/// JFR Overview - summarise Java Flight Recorder recordings
#[derive(Parser, Debug)]
#[command(name = "jfr-overview")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the recording (output of `jfr print --json`)
    recording: PathBuf,

    /// Write the JSON overview to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print compact single-line JSON
    #[arg(long)]
    compact: bool,

    /// Print a text summary to stderr
    #[arg(long)]
    summary: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging; env_logger writes to stderr, keeping stdout for the JSON
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = OverviewArgs {
        recording: cli.recording,
        output: cli.output,
        compact: cli.compact,
        print_summary: cli.summary,
    };

    validate_args(&args)?;
    execute_overview(&args)?;

    Ok(())
}
