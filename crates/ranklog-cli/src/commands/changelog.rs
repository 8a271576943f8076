//! Changelog command
//!
//! Usage: ranklog changelog --original <FILE> --current <FILE> [--mode <MODE>] [--output <FILE>] [--json]

use clap::Args;
use ranklog_core::diff::ensure_diffable;
use ranklog_core::errors::ExError;
use ranklog_core::load::read_collection;
use ranklog_core::{generate_changelog, ChangelogMode, ChangelogOptions};
use std::path::PathBuf;

/// Printed when the snapshots are equivalent
pub const NO_CHANGES: &str = "No changes detected.";

#[derive(Debug, Args)]
pub struct ChangelogArgs {
    /// Previous snapshot (JSON array of records)
    #[arg(long)]
    pub original: PathBuf,

    /// Current snapshot (JSON array of records)
    #[arg(long)]
    pub current: PathBuf,

    /// Changelog mode: standard, timeline or dev
    #[arg(long, default_value = "standard")]
    pub mode: String,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the reconciled changes as JSON instead of Markdown
    #[arg(long)]
    pub json: bool,
}

/// Execute changelog command
pub fn execute(args: ChangelogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mode: ChangelogMode = args.mode.parse().map_err(ExError::from)?;

    let original = read_collection(&args.original).map_err(ExError::from)?;
    ensure_diffable(&original).map_err(|e| ExError::from(e).with_op("changelog"))?;
    let current = read_collection(&args.current).map_err(ExError::from)?;

    let output = generate_changelog(&original, &current, ChangelogOptions::with_mode(mode));

    let text = if args.json {
        serde_json::to_string_pretty(&output)?
    } else if output.is_empty() {
        NO_CHANGES.to_string()
    } else {
        output.formatted
    };

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, format!("{}\n", text))?;
        println!("✓ Changelog written to {}", output_path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}
