//! Changelog entry point: detect, reconcile, render.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use super::engine::detect_changes;
use super::format::ChangelogFormatter;
use super::model::Change;
use super::reconcile::reconcile;
use crate::config::ChangelogOptions;
use crate::errors::{RanklogError, Result};
use crate::model::Achievement;
use crate::{log_op_end, log_op_start};

/// Result of one changelog run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogOutput {
    /// Rendered entries separated by blank lines; empty when nothing changed
    pub formatted: String,
    /// Reconciled changes in rendering order
    pub final_changes: Vec<Change>,
    /// Position of every id in `current`, ordered by id
    pub id_index_map: BTreeMap<String, usize>,
}

impl ChangelogOutput {
    pub fn is_empty(&self) -> bool {
        self.formatted.is_empty()
    }
}

/// Reject an original snapshot that cannot be diffed against.
///
/// # Errors
///
/// `EmptyOriginal` when `original` has no records.
pub fn ensure_diffable(original: &[Achievement]) -> Result<()> {
    if original.is_empty() {
        return Err(RanklogError::EmptyOriginal);
    }
    Ok(())
}

/// Compare two snapshots and render the changelog.
///
/// Neither input is modified. An empty `original` yields an all-added
/// changelog; callers that treat it as a precondition failure should check
/// with [`ensure_diffable`] first.
pub fn generate_changelog(
    original: &[Achievement],
    current: &[Achievement],
    options: ChangelogOptions,
) -> ChangelogOutput {
    let start = Instant::now();
    log_op_start!(
        "generate_changelog",
        mode = options.mode.as_str(),
        original_len = original.len(),
        current_len = current.len()
    );

    let raw = detect_changes(original, current, options.mode);
    let final_changes = reconcile(raw.clone(), options.mode);
    let formatter = ChangelogFormatter::new(original, current, options.mode);

    let mut formatted = formatter.format_all(&final_changes);
    if formatted.is_empty() {
        let fallback = fallback_moves(&raw);
        if !fallback.is_empty() {
            tracing::debug!(
                op = "generate_changelog",
                moves = fallback.len(),
                "rendering deduplicated raw moves"
            );
            formatted = formatter.format_all(&fallback);
        }
    }

    let output = ChangelogOutput {
        formatted,
        final_changes,
        id_index_map: formatter.current().id_index().clone().into_map(),
    };
    log_op_end!(
        "generate_changelog",
        duration_ms = start.elapsed().as_millis() as u64,
        raw_changes = raw.len(),
        final_changes = output.final_changes.len()
    );
    output
}

/// Secondary render path for output that came out empty while the raw
/// diff consisted only of moves.
///
/// Moves sharing an unordered {old, new} rank pair are reduced to one,
/// preferring the upward move. This is a heuristic kept for output that
/// would otherwise say nothing about rank churn.
pub(crate) fn fallback_moves(raw: &[Change]) -> Vec<Change> {
    if raw.is_empty() || !raw.iter().all(Change::is_move) {
        return Vec::new();
    }
    let mut slot_by_key: HashMap<(i64, i64), usize> = HashMap::new();
    let mut picked: Vec<Change> = Vec::new();
    for change in raw {
        let Some(m) = change.move_ranks() else {
            continue;
        };
        let key = (m.old_rank.min(m.new_rank), m.old_rank.max(m.new_rank));
        match slot_by_key.get(&key) {
            Some(&slot) => {
                if m.up && !picked[slot].move_ranks().is_some_and(|p| p.up) {
                    picked[slot] = change.clone();
                }
            }
            None => {
                slot_by_key.insert(key, picked.len());
                picked.push(change.clone());
            }
        }
    }
    picked
}
