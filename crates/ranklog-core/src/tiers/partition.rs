use serde::Serialize;
use std::time::Instant;

use super::qualify::has_rated_and_verified;
use crate::config::TierDef;
use crate::model::Achievement;
use crate::{log_op_end, log_op_start};

/// Inclusive 1-based rank range of one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierBoundary {
    pub start: usize,
    pub end: usize,
    /// Position of the tier in its table
    pub tier_index: usize,
}

impl TierBoundary {
    pub fn contains(&self, rank: usize) -> bool {
        (self.start..=self.end).contains(&rank)
    }

    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Nominal tier sizes for `total` records: `floor(total * percent / 100)`
/// each, with the remainder handed out one at a time from the first tier.
pub fn tier_sizes(total: usize, tiers: &[TierDef]) -> Vec<usize> {
    if tiers.is_empty() {
        return Vec::new();
    }
    let mut sizes: Vec<usize> = tiers
        .iter()
        .map(|t| ((total as f64) * t.percent / 100.0).floor().max(0.0) as usize)
        .collect();

    let assigned: usize = sizes.iter().sum();
    // Rounding can only overshoot through float error; trim from the end
    let mut excess = assigned.saturating_sub(total);
    for size in sizes.iter_mut().rev() {
        let cut = excess.min(*size);
        *size -= cut;
        excess -= cut;
    }

    let mut remainder = total.saturating_sub(assigned);
    let mut i = 0;
    while remainder > 0 {
        sizes[i % tiers.len()] += 1;
        remainder -= 1;
        i += 1;
    }
    sizes
}

fn qualifies_at(achievements: &[Achievement], rank: usize) -> bool {
    rank.checked_sub(1)
        .and_then(|i| achievements.get(i))
        .is_some_and(has_rated_and_verified)
}

/// Tier ranges covering ranks `1..=total`.
///
/// Tiers are processed last to first. Each tier's end is moved back to the
/// last rated-and-verified record inside its nominal range (or kept at the
/// nominal end when there is none); the slack goes to the tier after it.
/// The tier reaching `total` always ends at `total`. Zero-size tiers are
/// left out.
pub fn compute_tier_boundaries(
    total: usize,
    achievements: &[Achievement],
    tiers: &[TierDef],
) -> Vec<TierBoundary> {
    if total == 0 || tiers.is_empty() {
        return Vec::new();
    }
    let start = Instant::now();
    log_op_start!("compute_tier_boundaries", total = total, tiers = tiers.len());

    let sizes = tier_sizes(total, tiers);
    let mut nominal_end = 0;
    let ends: Vec<usize> = sizes
        .iter()
        .map(|size| {
            nominal_end += size;
            nominal_end
        })
        .collect();

    let mut boundaries: Vec<TierBoundary> = Vec::with_capacity(tiers.len());
    for tier_index in (0..tiers.len()).rev() {
        let size = sizes[tier_index];
        if size == 0 {
            continue;
        }
        let nominal_end = ends[tier_index];
        let nominal_start = nominal_end + 1 - size;
        let end = if nominal_end >= total {
            total
        } else {
            (nominal_start..=nominal_end)
                .rev()
                .find(|&rank| qualifies_at(achievements, rank))
                .unwrap_or(nominal_end)
        };
        if let Some(next) = boundaries.last_mut() {
            next.start = end + 1;
        }
        boundaries.push(TierBoundary {
            start: nominal_start,
            end,
            tier_index,
        });
    }
    boundaries.reverse();

    log_op_end!(
        "compute_tier_boundaries",
        duration_ms = start.elapsed().as_millis() as u64,
        total = total
    );
    boundaries
}

/// Index of the boundary containing `rank`
pub fn tier_index_for_rank(rank: i64, boundaries: &[TierBoundary]) -> Option<usize> {
    let rank = usize::try_from(rank).ok()?;
    boundaries
        .iter()
        .find(|b| b.contains(rank))
        .map(|b| b.tier_index)
}

/// Tier of `rank` in a list of `total` records, without caching.
///
/// `None` for a non-positive `total`, an empty list, or a rank outside
/// `1..=total`.
pub fn tier_for_rank<'t>(
    rank: i64,
    total: i64,
    achievements: &[Achievement],
    tiers: &'t [TierDef],
) -> Option<&'t TierDef> {
    let total = usize::try_from(total).ok().filter(|t| *t > 0)?;
    if achievements.is_empty() {
        return None;
    }
    let boundaries = compute_tier_boundaries(total, achievements, tiers);
    tier_index_for_rank(rank, &boundaries).and_then(|i| tiers.get(i))
}
