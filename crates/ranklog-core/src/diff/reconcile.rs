//! Reconciliation of raw changes into root-cause events.
//!
//! An insertion shifts every later record down one slot; a removal shifts
//! them up. Reported naively, one edit becomes a move per downstream record.
//! The passes here merge related additions and removals, drop moves that
//! are mechanical side effects, and fold mirrored moves into swaps.
//!
//! Every pass consumes the previous list and returns a new one.

use std::collections::{HashMap, HashSet};

use super::model::{Change, MoveRanks};
use super::relation::are_related;
use crate::model::{Achievement, ChangelogMode};

/// Run all reconciliation passes over raw detector output.
pub fn reconcile(raw: Vec<Change>, mode: ChangelogMode) -> Vec<Change> {
    let (changes, consumed) = merge_same_rank_renames(raw);
    let (changes, consumed) = merge_added_with_removals(changes, consumed);
    let changes = merge_removed_with_readds(changes, &consumed);
    let changes = drop_consumed(changes, &consumed);
    let suppressed = cascading_moves(&changes);
    collapse_moves(changes, &suppressed, mode)
}

fn removal_of(change: &Change) -> Option<(&Achievement, Option<i64>)> {
    match change {
        Change::Removed {
            achievement,
            old_rank,
            ..
        } => Some((achievement, *old_rank)),
        _ => None,
    }
}

/// Pass A: an addition and a related removal at the same rank are one
/// record renamed. Both ranks must be present to compare equal. First
/// matching removal wins.
fn merge_same_rank_renames(changes: Vec<Change>) -> (Vec<Change>, HashSet<usize>) {
    let mut consumed = HashSet::new();
    let mut renamed_from: HashMap<usize, Achievement> = HashMap::new();

    for (i, change) in changes.iter().enumerate() {
        let Change::Added { achievement, .. } = change else {
            continue;
        };
        let Some(rank) = achievement.rank else {
            continue;
        };
        let hit = changes.iter().enumerate().find_map(|(j, other)| {
            let (removed, old_rank) = removal_of(other)?;
            (!consumed.contains(&j) && old_rank == Some(rank) && are_related(achievement, removed))
                .then_some((j, removed))
        });
        if let Some((j, removed)) = hit {
            consumed.insert(j);
            renamed_from.insert(i, removed.clone());
        }
    }

    let changes = changes
        .into_iter()
        .enumerate()
        .map(|(i, change)| match (renamed_from.remove(&i), change) {
            (Some(old_achievement), Change::Added { achievement, .. }) => Change::Renamed {
                old_achievement,
                achievement,
            },
            (_, change) => change,
        })
        .collect();
    (changes, consumed)
}

/// Pass B: an addition that is related to removals at other ranks absorbs
/// them as redundant duplicates.
fn merge_added_with_removals(
    changes: Vec<Change>,
    mut consumed: HashSet<usize>,
) -> (Vec<Change>, HashSet<usize>) {
    let mut duplicates: HashMap<usize, Vec<Achievement>> = HashMap::new();

    for (i, change) in changes.iter().enumerate() {
        let Change::Added { achievement, .. } = change else {
            continue;
        };
        let matched: Vec<(usize, &Achievement)> = changes
            .iter()
            .enumerate()
            .filter_map(|(j, other)| {
                let (removed, old_rank) = removal_of(other)?;
                (!consumed.contains(&j)
                    && (old_rank.is_none() || old_rank != achievement.rank)
                    && are_related(achievement, removed))
                .then_some((j, removed))
            })
            .collect();
        if matched.is_empty() {
            continue;
        }
        consumed.extend(matched.iter().map(|(j, _)| *j));
        duplicates.insert(i, matched.into_iter().map(|(_, a)| a.clone()).collect());
    }

    let changes = changes
        .into_iter()
        .enumerate()
        .map(|(i, change)| match (duplicates.remove(&i), change) {
            (Some(removed_duplicates), Change::Added { achievement, .. }) => {
                Change::AddedWithRemovals {
                    rank: achievement.rank,
                    achievement,
                    removed_duplicates,
                }
            }
            (_, change) => change,
        })
        .collect();
    (changes, consumed)
}

/// Pass C: a removal whose related records reappear at other ranks. The
/// additions stay in the list as independent events.
fn merge_removed_with_readds(changes: Vec<Change>, consumed: &HashSet<usize>) -> Vec<Change> {
    let mut readds: HashMap<usize, Vec<Achievement>> = HashMap::new();

    for (j, change) in changes.iter().enumerate() {
        if consumed.contains(&j) {
            continue;
        }
        let Some((removed, old_rank)) = removal_of(change) else {
            continue;
        };
        let readded: Vec<Achievement> = changes
            .iter()
            .filter_map(|other| match other {
                Change::Added { achievement, .. }
                    if (achievement.rank.is_none() || achievement.rank != old_rank)
                        && are_related(achievement, removed) =>
                {
                    Some(achievement.clone())
                }
                _ => None,
            })
            .collect();
        if !readded.is_empty() {
            readds.insert(j, readded);
        }
    }

    changes
        .into_iter()
        .enumerate()
        .map(|(j, change)| match (readds.remove(&j), change) {
            (
                Some(readded_achievements),
                Change::Removed {
                    achievement,
                    old_rank,
                    old_index,
                    ..
                },
            ) => Change::RemovedWithReadds {
                achievement,
                old_rank,
                old_index,
                readded_achievements,
            },
            (_, change) => change,
        })
        .collect()
}

/// Pass D: drop removals claimed by an earlier pass.
fn drop_consumed(changes: Vec<Change>, consumed: &HashSet<usize>) -> Vec<Change> {
    changes
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !consumed.contains(i))
        .map(|(_, change)| change)
        .collect()
}

/// Ranks where records entered the list
fn added_positions(changes: &[Change]) -> Vec<i64> {
    let mut positions = Vec::new();
    for change in changes {
        match change {
            Change::Added { achievement, .. } => positions.extend(achievement.rank),
            Change::AddedWithRemovals { rank, .. } => positions.extend(*rank),
            Change::RemovedWithReadds {
                readded_achievements,
                ..
            } => positions.extend(readded_achievements.iter().filter_map(|a| a.rank)),
            _ => {}
        }
    }
    positions
}

/// Ranks where records left the list
fn removed_ranks(changes: &[Change]) -> Vec<i64> {
    let mut ranks = Vec::new();
    for change in changes {
        match change {
            Change::Removed { old_rank, .. } | Change::RemovedWithReadds { old_rank, .. } => {
                ranks.extend(*old_rank)
            }
            Change::AddedWithRemovals {
                removed_duplicates,
                ..
            } => ranks.extend(removed_duplicates.iter().filter_map(|a| a.rank)),
            _ => {}
        }
    }
    ranks
}

/// Pair up mirrored moves in order. Each move joins at most one pair.
/// Returns partner lookups over positions of `moves`.
fn pair_mirrored(moves: &[(usize, MoveRanks)]) -> HashMap<usize, usize> {
    let mut partner = HashMap::new();
    for a in 0..moves.len() {
        if partner.contains_key(&a) {
            continue;
        }
        let found = (a + 1..moves.len())
            .find(|&b| !partner.contains_key(&b) && moves[a].1.mirrors(&moves[b].1));
        if let Some(b) = found {
            partner.insert(a, b);
            partner.insert(b, a);
        }
    }
    partner
}

/// Pass E: indexes (into `changes`) of moves explained by other events.
fn cascading_moves(changes: &[Change]) -> HashSet<usize> {
    let moves: Vec<(usize, MoveRanks)> = changes
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.move_ranks().map(|m| (i, m)))
        .collect();
    let added = added_positions(changes);
    let removed = removed_ranks(changes);
    let partner = pair_mirrored(&moves);
    let mut suppressed: HashSet<usize> = HashSet::new();

    // One-slot shifts caused by an insertion or removal at or above them
    for (k, (_, m)) in moves.iter().enumerate() {
        if partner.contains_key(&k) {
            continue;
        }
        let shifted_by_insert =
            !m.up && m.distance() == 1 && added.iter().any(|&p| p <= m.new_rank);
        let shifted_by_removal =
            m.up && m.distance() == 1 && removed.iter().any(|&r| r <= m.old_rank);
        if shifted_by_insert || shifted_by_removal {
            suppressed.insert(k);
        }
    }

    // One-slot shifts inside the band another move passed through
    for (k, (_, mover)) in moves.iter().enumerate() {
        if mover.old_rank == mover.new_rank {
            continue;
        }
        let (low, high) = if mover.up {
            (mover.new_rank, mover.old_rank.saturating_sub(1))
        } else {
            (mover.old_rank.saturating_add(1), mover.new_rank)
        };
        for (n, (_, other)) in moves.iter().enumerate() {
            if n == k || partner.contains_key(&n) {
                continue;
            }
            let pushed = other.up != mover.up && other.distance() == 1;
            if pushed && (low..=high).contains(&other.old_rank) {
                suppressed.insert(n);
            }
        }
    }

    // Mirrored moves left unpaired: keep the first of each
    for a in 0..moves.len() {
        if suppressed.contains(&a) {
            continue;
        }
        for b in a + 1..moves.len() {
            if suppressed.contains(&b) || partner.get(&a) == Some(&b) {
                continue;
            }
            let (ma, mb) = (moves[a].1, moves[b].1);
            if ma.up != mb.up && ma.mirrors(&mb) {
                suppressed.insert(b);
            }
        }
    }

    suppressed.into_iter().map(|k| moves[k].0).collect()
}

fn swapped(first: Change, second: Change) -> Option<Change> {
    let a = first.move_ranks()?;
    let b = second.move_ranks()?;
    Some(Change::Swapped {
        achievement: first.achievement().clone(),
        other: second.achievement().clone(),
        old_rank: a.old_rank,
        new_rank: a.new_rank,
        other_old_rank: b.old_rank,
        other_new_rank: b.new_rank,
    })
}

/// Pass F: drop suppressed (or, in timeline mode, all) moves and fold
/// mirrored pairs into a single swap at the first move's position.
fn collapse_moves(
    changes: Vec<Change>,
    suppressed: &HashSet<usize>,
    mode: ChangelogMode,
) -> Vec<Change> {
    let kept: Vec<Change> = changes
        .into_iter()
        .enumerate()
        .filter(|(i, c)| !c.is_move() || (!mode.is_timeline() && !suppressed.contains(i)))
        .map(|(_, c)| c)
        .collect();

    let moves: Vec<(usize, MoveRanks)> = kept
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.move_ranks().map(|m| (i, m)))
        .collect();
    let partner = pair_mirrored(&moves);
    // position in `kept` of the first move of a pair -> position of the second
    let pairs: HashMap<usize, usize> = partner
        .iter()
        .filter(|(a, b)| a < b)
        .map(|(&a, &b)| (moves[a].0, moves[b].0))
        .collect();
    let seconds: HashSet<usize> = pairs.values().copied().collect();

    let mut slots: Vec<Option<Change>> = kept.into_iter().map(Some).collect();
    let mut collapsed = Vec::with_capacity(slots.len());
    for i in 0..slots.len() {
        if seconds.contains(&i) {
            continue;
        }
        let Some(change) = slots[i].take() else {
            continue;
        };
        let second = pairs.get(&i).and_then(|&j| slots[j].take());
        match second {
            Some(second) => match swapped(change.clone(), second) {
                Some(swap) => collapsed.push(swap),
                None => collapsed.push(change),
            },
            None => collapsed.push(change),
        }
    }

    drop_leftover_mirrors(collapsed)
}

/// Any mirrored up/down pair still present describes one physical swap
/// twice; keep the earlier entry.
fn drop_leftover_mirrors(changes: Vec<Change>) -> Vec<Change> {
    let mut seen: Vec<MoveRanks> = Vec::new();
    changes
        .into_iter()
        .filter(|change| match change.move_ranks() {
            Some(m) => {
                if seen.iter().any(|s| s.up != m.up && s.mirrors(&m)) {
                    false
                } else {
                    seen.push(m);
                    true
                }
            }
            None => true,
        })
        .collect()
}
