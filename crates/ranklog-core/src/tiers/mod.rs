//! Percentage tiers over a ranked list
//!
//! Tier sizes come from a [`TierTable`](crate::config::TierTable); each
//! boundary is then pulled back to the nearest record flagged both rated
//! and verified, so a tier does not end in the middle of a reviewed run.

pub mod partition;
pub mod partitioner;
pub mod qualify;

pub use partition::{compute_tier_boundaries, tier_for_rank, tier_index_for_rank, tier_sizes, TierBoundary};
pub use partitioner::TierPartitioner;
pub use qualify::has_rated_and_verified;
