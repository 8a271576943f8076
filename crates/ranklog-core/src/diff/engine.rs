//! Raw change detection between two snapshots of a ranked list.
//!
//! Records are matched by id only. Records without an id take no part in
//! the diff.

use std::collections::HashMap;

use super::model::Change;
use crate::model::{Achievement, ChangelogMode};

/// Records of one collection keyed by id, in first-seen order.
///
/// When an id repeats, the key keeps its first position and the later
/// record replaces the value.
struct Keyed<'a> {
    order: Vec<&'a str>,
    by_id: HashMap<&'a str, (usize, &'a Achievement)>,
}

impl<'a> Keyed<'a> {
    fn build(list: &'a [Achievement]) -> Self {
        let mut order = Vec::with_capacity(list.len());
        let mut by_id = HashMap::with_capacity(list.len());
        for (index, achievement) in list.iter().enumerate() {
            let Some(id) = achievement.id() else {
                continue;
            };
            if by_id.insert(id, (index, achievement)).is_none() {
                order.push(id);
            }
        }
        Self { order, by_id }
    }

    fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    fn entries(&self) -> impl Iterator<Item = (usize, &'a Achievement)> + '_ {
        self.order.iter().filter_map(|id| self.by_id.get(id).copied())
    }

    fn get(&self, id: &str) -> Option<&'a Achievement> {
        self.by_id.get(id).map(|(_, a)| *a)
    }
}

/// Compute the primitive diff from `original` to `current`.
///
/// Output order: removals (original order), additions (current order),
/// then renames and moves for records present in both (current order).
/// Timeline mode reports additions and removals as timeline events and
/// never reports moves.
pub fn detect_changes(
    original: &[Achievement],
    current: &[Achievement],
    mode: ChangelogMode,
) -> Vec<Change> {
    let before = Keyed::build(original);
    let after = Keyed::build(current);
    let mut changes = Vec::new();

    for (index, achievement) in before.entries() {
        let Some(id) = achievement.id() else { continue };
        if after.contains(id) {
            continue;
        }
        let achievement = achievement.clone();
        changes.push(if mode.is_timeline() {
            Change::TimelineRemoved { achievement }
        } else {
            Change::Removed {
                old_rank: achievement.rank,
                old_index: Some(index),
                old_achievement: achievement.clone(),
                achievement,
            }
        });
    }

    for (_, achievement) in after.entries() {
        let Some(id) = achievement.id() else { continue };
        if before.contains(id) {
            continue;
        }
        let achievement = achievement.clone();
        changes.push(if mode.is_timeline() {
            Change::TimelineAdded { achievement }
        } else {
            Change::Added {
                new_index: achievement
                    .rank
                    .and_then(|r| r.checked_sub(1))
                    .and_then(|r| usize::try_from(r).ok()),
                achievement,
            }
        });
    }

    for (_, now) in after.entries() {
        let Some(then) = now.id().and_then(|id| before.get(id)) else {
            continue;
        };

        if then.name != now.name {
            changes.push(Change::Renamed {
                old_achievement: then.clone(),
                achievement: now.clone(),
            });
        }

        if mode.is_timeline() {
            continue;
        }
        if let (Some(old_rank), Some(new_rank)) = (then.rank, now.rank) {
            if new_rank < old_rank {
                changes.push(Change::MovedUp {
                    achievement: now.clone(),
                    old_rank,
                    new_rank,
                });
            } else if new_rank > old_rank {
                changes.push(Change::MovedDown {
                    achievement: now.clone(),
                    old_rank,
                    new_rank,
                });
            }
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::ChangeKind;

    fn kinds(changes: &[Change]) -> Vec<ChangeKind> {
        changes.iter().map(Change::kind).collect()
    }

    #[test]
    fn test_identical_lists_have_no_changes() {
        let list = vec![Achievement::new("a", "A", 1), Achievement::new("b", "B", 2)];
        assert!(detect_changes(&list, &list, ChangelogMode::Standard).is_empty());
    }

    #[test]
    fn test_pass_order() {
        let original = vec![Achievement::new("a", "A", 1), Achievement::new("b", "B", 2)];
        let current = vec![Achievement::new("b", "B2", 1), Achievement::new("c", "C", 2)];
        let changes = detect_changes(&original, &current, ChangelogMode::Standard);
        assert_eq!(
            kinds(&changes),
            vec![
                ChangeKind::Removed,
                ChangeKind::Added,
                ChangeKind::Renamed,
                ChangeKind::MovedUp
            ]
        );
        match &changes[0] {
            Change::Removed {
                old_rank,
                old_index,
                ..
            } => {
                assert_eq!(*old_rank, Some(1));
                assert_eq!(*old_index, Some(0));
            }
            other => panic!("unexpected {:?}", other),
        }
        match &changes[1] {
            Change::Added { new_index, .. } => assert_eq!(*new_index, Some(1)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_records_without_id_are_ignored() {
        let mut anonymous = Achievement::new("", "Nameless", 1);
        anonymous.id = None;
        let original = vec![anonymous.clone()];
        let current = vec![Achievement::new("", "Blank id", 1)];
        assert!(detect_changes(&original, &current, ChangelogMode::Standard).is_empty());
        assert!(detect_changes(&[], &original, ChangelogMode::Standard).is_empty());
    }

    #[test]
    fn test_timeline_mode() {
        let original = vec![Achievement::new("a", "A", 1), Achievement::new("b", "B", 2)];
        let current = vec![Achievement::new("b", "B", 1), Achievement::new("c", "C", 2)];
        let changes = detect_changes(&original, &current, ChangelogMode::Timeline);
        assert_eq!(
            kinds(&changes),
            vec![ChangeKind::TimelineRemoved, ChangeKind::TimelineAdded]
        );
    }

    #[test]
    fn test_missing_rank_means_no_move() {
        let mut unranked = Achievement::new("a", "A", 1);
        unranked.rank = None;
        let original = vec![Achievement::new("a", "A", 1)];
        let current = vec![unranked];
        assert!(detect_changes(&original, &current, ChangelogMode::Standard).is_empty());
    }
}
