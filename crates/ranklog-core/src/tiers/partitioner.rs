use std::sync::Arc;
use tracing::debug;

use super::partition::{compute_tier_boundaries, tier_index_for_rank, TierBoundary};
use crate::cache::BoundedCache;
use crate::config::{CacheConfig, TierDef, TierTable};
use crate::model::Achievement;

/// Cached boundaries for one list snapshot.
///
/// Holding the `Arc` keeps the allocation alive, so its address cannot be
/// reused by another list while the entry exists.
struct CachedBoundaries {
    _list: Arc<Vec<Achievement>>,
    len: usize,
    total: usize,
    boundaries: Vec<TierBoundary>,
}

/// Tier lookups with boundaries memoized per list snapshot.
///
/// Snapshots are identified by `Arc` pointer; an entry whose stored total
/// or list length no longer matches the request is recomputed. The cache
/// is owned by the partitioner, so separate sessions never share entries.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ranklog_core::config::{CacheConfig, TierTable};
/// use ranklog_core::model::Achievement;
/// use ranklog_core::tiers::TierPartitioner;
///
/// let list = Arc::new(
///     (1..=20)
///         .map(|r| Achievement::new(format!("a{}", r), format!("Level {}", r), r))
///         .collect::<Vec<_>>(),
/// );
/// let mut partitioner = TierPartitioner::new(TierTable::default(), CacheConfig::default());
/// let tier = partitioner.tier_by_rank(1, 20, &list).map(|t| t.name.clone());
/// assert_eq!(tier.as_deref(), Some("Legendary"));
/// ```
pub struct TierPartitioner {
    table: TierTable,
    cache: BoundedCache<usize, CachedBoundaries>,
}

fn snapshot_key(list: &Arc<Vec<Achievement>>) -> usize {
    Arc::as_ptr(list) as usize
}

impl TierPartitioner {
    pub fn new(table: TierTable, cache: CacheConfig) -> Self {
        Self {
            table,
            cache: BoundedCache::new(cache),
        }
    }

    pub fn table(&self) -> &TierTable {
        &self.table
    }

    pub fn cached_snapshots(&self) -> usize {
        self.cache.len()
    }

    /// Forget every cached snapshot
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Boundaries for `total` records of `achievements`
    pub fn boundaries(&mut self, total: usize, achievements: &Arc<Vec<Achievement>>) -> &[TierBoundary] {
        let key = snapshot_key(achievements);
        let fresh = self
            .cache
            .get(&key)
            .is_some_and(|entry| entry.total == total && entry.len == achievements.len());

        if fresh {
            debug!(op = "tier_boundaries", total = total, "tier cache hit");
        } else {
            debug!(op = "tier_boundaries", total = total, "tier cache miss");
            let boundaries = compute_tier_boundaries(total, achievements, &self.table.tiers);
            self.cache.put(
                key,
                CachedBoundaries {
                    _list: Arc::clone(achievements),
                    len: achievements.len(),
                    total,
                    boundaries,
                },
            );
        }

        self.cache
            .get(&key)
            .map(|entry| entry.boundaries.as_slice())
            .unwrap_or_default()
    }

    /// Tier of `rank` in a list of `total` records.
    ///
    /// `None` for a non-positive `total`, an empty list, or a rank outside
    /// `1..=total`.
    pub fn tier_by_rank(
        &mut self,
        rank: i64,
        total: i64,
        achievements: &Arc<Vec<Achievement>>,
    ) -> Option<&TierDef> {
        let total = usize::try_from(total).ok().filter(|t| *t > 0)?;
        if achievements.is_empty() {
            return None;
        }
        let index = tier_index_for_rank(rank, self.boundaries(total, achievements))?;
        self.table.get(index)
    }
}
