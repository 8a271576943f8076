//! Markdown rendering of reconciled changes.
//!
//! Each entry is one header line, optionally followed by `> ` quote lines
//! with neighbour context or related records.

use tracing::warn;

use super::context::{Context, ContextResolver};
use super::model::{Change, ChangeKind};
use crate::errors::{ExError, RanklogError, Result};
use crate::model::{Achievement, ChangelogMode};

/// Fixed marker per change kind
pub fn marker(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Added => ":new:",
        ChangeKind::Removed => ":wastebasket:",
        ChangeKind::Renamed => ":pencil2:",
        ChangeKind::MovedUp => ":arrow_up:",
        ChangeKind::MovedDown => ":arrow_down:",
        ChangeKind::Swapped => ":arrows_counterclockwise:",
        ChangeKind::AddedWithRemovals => ":recycle:",
        ChangeKind::RemovedWithReadds => ":leftwards_arrow_with_hook:",
        ChangeKind::TimelineAdded => ":calendar:",
        ChangeKind::TimelineRemoved => ":calendar_spiral:",
    }
}

fn display_name(achievement: &Achievement) -> &str {
    if achievement.name.is_empty() {
        achievement.id().unwrap_or("Unnamed")
    } else {
        &achievement.name
    }
}

fn missing(achievement: &Achievement, field: &str) -> RanklogError {
    RanklogError::MissingField {
        achievement: achievement
            .id()
            .unwrap_or(achievement.name.as_str())
            .to_string(),
        field: field.to_string(),
    }
}

/// Renders changes against the two snapshots they were computed from.
pub struct ChangelogFormatter<'a> {
    mode: ChangelogMode,
    original: ContextResolver<'a>,
    current: ContextResolver<'a>,
}

impl<'a> ChangelogFormatter<'a> {
    pub fn new(original: &'a [Achievement], current: &'a [Achievement], mode: ChangelogMode) -> Self {
        Self {
            mode,
            original: ContextResolver::new(original),
            current: ContextResolver::new(current),
        }
    }

    pub fn current(&self) -> &ContextResolver<'a> {
        &self.current
    }

    /// Context lines: both neighbours, or only the nearest one in dev mode
    fn context_lines(&self, out: &mut Vec<String>, ctx: Context<'_>, was: bool) {
        let (below, above) = if was {
            ("Was below", "Was above")
        } else {
            ("Below", "Above")
        };
        let below_line = ctx.below.map(|name| format!("> {} **{}**", below, name));
        let above_line = ctx.above.map(|name| format!("> {} **{}**", above, name));
        if self.mode == ChangelogMode::Dev {
            out.extend(below_line.or(above_line));
        } else {
            out.extend(below_line);
            out.extend(above_line);
        }
    }

    fn added_lines(&self, achievement: &Achievement, rank: Option<i64>) -> Result<Vec<String>> {
        let rank = rank.ok_or_else(|| missing(achievement, "rank"))?;
        let mut lines = vec![format!(
            "{} **{}** added at #{}",
            marker(ChangeKind::Added),
            display_name(achievement),
            rank
        )];
        self.context_lines(&mut lines, self.current.context_of(achievement), false);
        Ok(lines)
    }

    fn removed_lines(
        &self,
        achievement: &Achievement,
        old_rank: Option<i64>,
        old_index: Option<usize>,
    ) -> Result<Vec<String>> {
        let rank = old_rank
            .or(achievement.rank)
            .ok_or_else(|| missing(achievement, "rank"))?;
        let mut lines = vec![format!(
            "{} **{}** removed from #{}",
            marker(ChangeKind::Removed),
            display_name(achievement),
            rank
        )];
        let ctx = self.original.context_at(old_index.unwrap_or(0));
        self.context_lines(&mut lines, ctx, true);
        Ok(lines)
    }

    fn moved_lines(&self, change: &Change, old_rank: i64, new_rank: i64) -> Vec<String> {
        let achievement = change.achievement();
        let direction = if change.kind() == ChangeKind::MovedUp {
            "up"
        } else {
            "down"
        };
        let mut lines = vec![format!(
            "{} **{}** moved {} from #{} to #{}",
            marker(change.kind()),
            display_name(achievement),
            direction,
            old_rank,
            new_rank
        )];
        self.context_lines(&mut lines, self.current.context_of(achievement), false);
        lines
    }

    fn timeline_line(&self, change: &Change, verb: &str) -> String {
        let achievement = change.achievement();
        format!(
            "{} **{}** {} the timeline ({})",
            marker(change.kind()),
            display_name(achievement),
            verb,
            achievement
                .date
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or("Unknown date")
        )
    }

    /// Render one change.
    ///
    /// # Errors
    ///
    /// `MissingField` when an added or removed record has no rank to show.
    pub fn format(&self, change: &Change) -> Result<String> {
        let lines = match change {
            Change::Added {
                achievement,
                new_index,
            } => {
                let rank = achievement
                    .rank
                    .or_else(|| new_index.and_then(|i| i64::try_from(i + 1).ok()));
                self.added_lines(achievement, rank)?
            }
            Change::Removed {
                achievement,
                old_rank,
                old_index,
                ..
            } => self.removed_lines(achievement, *old_rank, *old_index)?,
            Change::Renamed {
                old_achievement,
                achievement,
            } => vec![format!(
                "{} **{}** updated to **{}**",
                marker(ChangeKind::Renamed),
                display_name(old_achievement),
                display_name(achievement)
            )],
            Change::MovedUp {
                old_rank, new_rank, ..
            }
            | Change::MovedDown {
                old_rank, new_rank, ..
            } => self.moved_lines(change, *old_rank, *new_rank),
            Change::Swapped {
                achievement,
                other,
                new_rank,
                other_new_rank,
                ..
            } => vec![format!(
                "{} **{}** and **{}** swapped places: **{}** is now #{}, **{}** is now #{}",
                marker(ChangeKind::Swapped),
                display_name(achievement),
                display_name(other),
                display_name(achievement),
                new_rank,
                display_name(other),
                other_new_rank
            )],
            Change::AddedWithRemovals {
                achievement,
                rank,
                removed_duplicates,
            } => {
                let mut lines = self.added_lines(achievement, rank.or(achievement.rank))?;
                lines[0] = lines[0].replacen(
                    marker(ChangeKind::Added),
                    marker(ChangeKind::AddedWithRemovals),
                    1,
                );
                lines.extend(
                    removed_duplicates
                        .iter()
                        .map(|dup| format!("> **{}** removed for redundancy", display_name(dup))),
                );
                lines
            }
            Change::RemovedWithReadds {
                achievement,
                old_rank,
                old_index,
                readded_achievements,
            } => {
                let mut lines = self.removed_lines(achievement, *old_rank, *old_index)?;
                lines[0] = lines[0].replacen(
                    marker(ChangeKind::Removed),
                    marker(ChangeKind::RemovedWithReadds),
                    1,
                );
                lines.extend(readded_achievements.iter().map(|readded| {
                    format!(
                        "> **{}** re-added due to renewed relevance",
                        display_name(readded)
                    )
                }));
                lines
            }
            Change::TimelineAdded { .. } => vec![self.timeline_line(change, "added to")],
            Change::TimelineRemoved { .. } => vec![self.timeline_line(change, "removed from")],
        };
        Ok(lines.join("\n"))
    }

    /// Render every change, skipping entries that fail, joined by a blank
    /// line.
    pub fn format_all(&self, changes: &[Change]) -> String {
        changes
            .iter()
            .filter_map(|change| match self.format(change) {
                Ok(text) => Some(text),
                Err(err) => {
                    let ex: ExError = err.into();
                    warn!(
                        op = "format_change",
                        change = %change.kind(),
                        achievement_id = change.achievement().id().unwrap_or_default(),
                        err_code = ex.code(),
                        "skipping change that could not be formatted: {}",
                        ex
                    );
                    None
                }
            })
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
