//! Ranklog CLI
//!
//! Command-line interface for list changelogs and tiers

use clap::{Parser, Subcommand};
use ranklog_core::errors::{ExError, ExErrorKind};
use ranklog_core::logging_facility::{init, Profile};
use ranklog_core_types::RequestContext;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "ranklog")]
#[command(about = "Ranklog - changelogs and tiers for ranked achievement lists", long_about = None)]
struct Cli {
    /// Logging profile: dev, prod or test (logs go to stderr)
    #[arg(long, global = true, default_value = "prod")]
    log_profile: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two list snapshots and print the changelog
    Changelog(commands::changelog::ChangelogArgs),
    /// Show tier boundaries for a list, or the tier of one rank
    Tiers(commands::tiers::TiersArgs),
}

fn main() {
    let cli = Cli::parse();
    init(cli.log_profile);

    let ctx = RequestContext::new();
    let span = tracing::info_span!("ranklog", request_id = %ctx.request_id);
    let _guard = span.enter();

    let result = match cli.command {
        Commands::Changelog(args) => commands::changelog::execute(args),
        Commands::Tiers(args) => commands::tiers::execute(args),
    };

    if let Err(e) = result {
        let err = match e.downcast::<ExError>() {
            Ok(ex) => *ex,
            Err(other) => ExError::new(ExErrorKind::Internal).with_message(other.to_string()),
        };
        eprintln!("Error: {}", err.with_request_id(ctx.request_id));
        std::process::exit(1);
    }
}
