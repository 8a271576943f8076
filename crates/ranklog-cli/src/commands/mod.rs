pub mod changelog;
pub mod tiers;
