//! Ranklog Core - changelog and tier engine for ranked achievement lists
//!
//! This crate provides:
//! - The achievement record model and list document loading
//! - The changelog pipeline: raw diff, reconciliation, Markdown rendering
//! - Percentage tier partitioning with rated-and-verified boundary snapping
//! - The structured error facility and the logging facility
//!
//! Everything here is synchronous and never mutates its inputs.

pub mod cache;
pub mod config;
pub mod diff;
pub mod errors;
pub mod load;
pub mod logging_facility;
pub mod model;
pub mod tiers;

// Used by the logging macros
pub use ranklog_core_types;

// Re-export commonly used types
pub use config::{CacheConfig, ChangelogOptions, TierDef, TierTable};
pub use diff::{generate_changelog, Change, ChangeKind, ChangelogOutput};
pub use errors::{ExError, ExErrorKind, RanklogError, Result};
pub use model::{Achievement, ChangelogMode};
pub use tiers::{compute_tier_boundaries, tier_for_rank, TierBoundary, TierPartitioner};
