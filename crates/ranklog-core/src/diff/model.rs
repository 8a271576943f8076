//! Changelog change types.
//!
//! A [`Change`] embeds the achievement records it talks about, so it can be
//! rendered without going back to the collections. Only neighbour context
//! is looked up at render time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Achievement;

/// One changelog event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Change {
    /// Present in `current` only
    Added {
        achievement: Achievement,
        /// `rank - 1` when the record has a rank
        new_index: Option<usize>,
    },
    /// Present in `original` only. Both records are the original one:
    /// `achievement` names the entry, `old_achievement` anchors its context.
    Removed {
        achievement: Achievement,
        old_achievement: Achievement,
        old_rank: Option<i64>,
        /// Position in `original`, used for neighbour context
        old_index: Option<usize>,
    },
    /// Same record under a new name, or an added record that replaced a
    /// related removed one at the same rank
    Renamed {
        old_achievement: Achievement,
        achievement: Achievement,
    },
    MovedUp {
        achievement: Achievement,
        old_rank: i64,
        new_rank: i64,
    },
    MovedDown {
        achievement: Achievement,
        old_rank: i64,
        new_rank: i64,
    },
    /// Two records that traded ranks
    Swapped {
        achievement: Achievement,
        #[serde(rename = "oldAchievement")]
        other: Achievement,
        old_rank: i64,
        new_rank: i64,
        #[serde(rename = "oldRankB")]
        other_old_rank: i64,
        #[serde(rename = "newRankB")]
        other_new_rank: i64,
    },
    /// An addition that made related records at other ranks redundant
    AddedWithRemovals {
        achievement: Achievement,
        rank: Option<i64>,
        removed_duplicates: Vec<Achievement>,
    },
    /// A removal whose related records were added back at other ranks
    RemovedWithReadds {
        achievement: Achievement,
        old_rank: Option<i64>,
        old_index: Option<usize>,
        readded_achievements: Vec<Achievement>,
    },
    TimelineAdded {
        achievement: Achievement,
    },
    TimelineRemoved {
        achievement: Achievement,
    },
}

/// Discriminant of [`Change`], without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Removed,
    Renamed,
    MovedUp,
    MovedDown,
    Swapped,
    AddedWithRemovals,
    RemovedWithReadds,
    TimelineAdded,
    TimelineRemoved,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 10] = [
        ChangeKind::Added,
        ChangeKind::Removed,
        ChangeKind::Renamed,
        ChangeKind::MovedUp,
        ChangeKind::MovedDown,
        ChangeKind::Swapped,
        ChangeKind::AddedWithRemovals,
        ChangeKind::RemovedWithReadds,
        ChangeKind::TimelineAdded,
        ChangeKind::TimelineRemoved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
            ChangeKind::Renamed => "renamed",
            ChangeKind::MovedUp => "movedUp",
            ChangeKind::MovedDown => "movedDown",
            ChangeKind::Swapped => "swapped",
            ChangeKind::AddedWithRemovals => "addedWithRemovals",
            ChangeKind::RemovedWithReadds => "removedWithReadds",
            ChangeKind::TimelineAdded => "timelineAdded",
            ChangeKind::TimelineRemoved => "timelineRemoved",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank delta of a move change, as (old_rank, new_rank, moved_up).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRanks {
    pub old_rank: i64,
    pub new_rank: i64,
    pub up: bool,
}

impl MoveRanks {
    /// `a` and `b` exchanged positions
    pub fn mirrors(&self, other: &MoveRanks) -> bool {
        self.old_rank == other.new_rank && self.new_rank == other.old_rank
    }

    pub fn distance(&self) -> u64 {
        self.new_rank.abs_diff(self.old_rank)
    }
}

impl Change {
    pub fn kind(&self) -> ChangeKind {
        match self {
            Change::Added { .. } => ChangeKind::Added,
            Change::Removed { .. } => ChangeKind::Removed,
            Change::Renamed { .. } => ChangeKind::Renamed,
            Change::MovedUp { .. } => ChangeKind::MovedUp,
            Change::MovedDown { .. } => ChangeKind::MovedDown,
            Change::Swapped { .. } => ChangeKind::Swapped,
            Change::AddedWithRemovals { .. } => ChangeKind::AddedWithRemovals,
            Change::RemovedWithReadds { .. } => ChangeKind::RemovedWithReadds,
            Change::TimelineAdded { .. } => ChangeKind::TimelineAdded,
            Change::TimelineRemoved { .. } => ChangeKind::TimelineRemoved,
        }
    }

    /// The record the change is about (the new side for renames)
    pub fn achievement(&self) -> &Achievement {
        match self {
            Change::Added { achievement, .. }
            | Change::Removed { achievement, .. }
            | Change::Renamed { achievement, .. }
            | Change::MovedUp { achievement, .. }
            | Change::MovedDown { achievement, .. }
            | Change::Swapped { achievement, .. }
            | Change::AddedWithRemovals { achievement, .. }
            | Change::RemovedWithReadds { achievement, .. }
            | Change::TimelineAdded { achievement }
            | Change::TimelineRemoved { achievement } => achievement,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Change::MovedUp { .. } | Change::MovedDown { .. })
    }

    /// Ranks of a `MovedUp`/`MovedDown` change, `None` for anything else
    pub fn move_ranks(&self) -> Option<MoveRanks> {
        match self {
            Change::MovedUp {
                old_rank, new_rank, ..
            } => Some(MoveRanks {
                old_rank: *old_rank,
                new_rank: *new_rank,
                up: true,
            }),
            Change::MovedDown {
                old_rank, new_rank, ..
            } => Some(MoveRanks {
                old_rank: *old_rank,
                new_rank: *new_rank,
                up: false,
            }),
            _ => None,
        }
    }
}
