#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;

use common::{demon_list, ranked};
use ranklog_core::tiers::{compute_tier_boundaries, has_rated_and_verified, tier_for_rank};
use ranklog_core::{CacheConfig, TierBoundary, TierDef, TierPartitioner, TierTable};

fn medals() -> TierTable {
    TierTable::new(vec![
        TierDef::new("Gold", 50.0),
        TierDef::new("Silver", 30.0),
        TierDef::new("Bronze", 20.0),
    ])
    .unwrap()
}

#[test]
fn test_review_flags_move_boundaries() {
    // rank 1 and 3 are flagged through tags, rank 6 through booleans
    let list = demon_list();
    let flagged: Vec<_> = list
        .iter()
        .filter(|a| has_rated_and_verified(a))
        .filter_map(|a| a.rank)
        .collect();
    assert_eq!(flagged, vec![1, 3, 6]);

    // nominal sizes for 6 records are 4/1/1; Gold's nominal end #4 snaps
    // back to #3 and Silver takes #4
    let boundaries = compute_tier_boundaries(6, &list, &medals().tiers);
    assert_eq!(
        boundaries,
        vec![
            TierBoundary { start: 1, end: 3, tier_index: 0 },
            TierBoundary { start: 4, end: 5, tier_index: 1 },
            TierBoundary { start: 6, end: 6, tier_index: 2 },
        ]
    );
}

#[test]
fn test_tier_lookup_follows_boundaries() {
    let list = demon_list();
    let tiers = medals().tiers;
    let name = |rank| tier_for_rank(rank, 6, &list, &tiers).map(|t| t.name.clone());
    assert_eq!(name(3).as_deref(), Some("Gold"));
    assert_eq!(name(4).as_deref(), Some("Silver"));
    assert_eq!(name(6).as_deref(), Some("Bronze"));
    assert_eq!(name(7), None);
}

#[test]
fn test_partitioner_reuses_snapshot() {
    let list = Arc::new(ranked(&["a", "b", "c", "d", "e", "f", "g", "h"]));
    let mut partitioner = TierPartitioner::new(TierTable::default(), CacheConfig::default());
    let first: Vec<_> = partitioner.boundaries(8, &list).to_vec();
    let second: Vec<_> = partitioner.boundaries(8, &list).to_vec();
    assert_eq!(first, second);
    assert_eq!(partitioner.cached_snapshots(), 1);
    assert_eq!(first.first().map(|b| b.start), Some(1));
    assert_eq!(first.last().map(|b| b.end), Some(8));
}

#[test]
fn test_partial_table_still_covers_list() {
    let table = TierTable::new(vec![TierDef::new("Top", 10.0), TierDef::new("Mid", 30.0)]).unwrap();
    let list = ranked(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
    let boundaries = compute_tier_boundaries(10, &list, &table.tiers);
    assert_eq!(boundaries.first().map(|b| b.start), Some(1));
    assert_eq!(boundaries.last().map(|b| b.end), Some(10));
}
