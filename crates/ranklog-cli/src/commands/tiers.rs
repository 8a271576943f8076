//! Tiers command
//!
//! Usage: ranklog tiers --list <FILE> [--tiers <TABLE>] [--rank <N>] [--json]

use clap::Args;
use ranklog_core::errors::{ExError, ExErrorKind, RanklogError};
use ranklog_core::load::read_collection;
use ranklog_core::{CacheConfig, TierPartitioner, TierTable};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct TiersArgs {
    /// List document (JSON array of records, in rank order)
    #[arg(long)]
    pub list: PathBuf,

    /// Tier table file, TOML or `.json` (default: built-in six tiers)
    #[arg(long)]
    pub tiers: Option<PathBuf>,

    /// Only print the tier of this rank
    #[arg(long)]
    pub rank: Option<i64>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

fn load_table(path: &Path) -> Result<TierTable, ExError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ExError::from(RanklogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    })?;
    let parsed = if path.extension().is_some_and(|ext| ext == "json") {
        TierTable::from_json_str(&text)
    } else {
        TierTable::from_toml_str(&text)
    };
    parsed.map_err(|e| ExError::from(e).with_op("load_tiers"))
}

/// Execute tiers command
pub fn execute(args: TiersArgs) -> Result<(), Box<dyn std::error::Error>> {
    let table = match &args.tiers {
        Some(path) => load_table(path)?,
        None => TierTable::default(),
    };
    let list = Arc::new(read_collection(&args.list).map_err(ExError::from)?);
    let total = list.len();
    let mut partitioner = TierPartitioner::new(table, CacheConfig::default());

    if let Some(rank) = args.rank {
        let tier = partitioner
            .tier_by_rank(rank, total as i64, &list)
            .map(|t| t.name.clone());
        match (tier, args.json) {
            (Some(name), true) => println!("{}", json!({ "rank": rank, "tier": name })),
            (Some(name), false) => println!("#{} {}", rank, name),
            (None, _) => {
                return Err(ExError::new(ExErrorKind::NotFound)
                    .with_op("tier_by_rank")
                    .with_rank(rank)
                    .with_message(format!("rank {} is outside 1..={}", rank, total))
                    .into());
            }
        }
        return Ok(());
    }

    let boundaries = partitioner.boundaries(total, &list).to_vec();
    let named: Vec<(String, usize, usize)> = boundaries
        .iter()
        .filter_map(|b| {
            partitioner
                .table()
                .get(b.tier_index)
                .map(|t| (t.name.clone(), b.start, b.end))
        })
        .collect();

    if args.json {
        let rows: Vec<_> = named
            .iter()
            .map(|(name, start, end)| json!({ "tier": name, "start": start, "end": end }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if named.is_empty() {
        println!("List is empty.");
    } else {
        for (name, start, end) in named {
            println!("{}: #{}-#{}", name, start, end);
        }
    }

    Ok(())
}
