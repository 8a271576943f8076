#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{demon_list, from_json, ranked, reranked};
use ranklog_core::diff::detect_changes;
use ranklog_core::{
    generate_changelog, Achievement, Change, ChangeKind, ChangelogMode, ChangelogOptions,
};
use serde_json::json;

fn kinds(changes: &[Change]) -> Vec<ChangeKind> {
    changes.iter().map(Change::kind).collect()
}

fn run(original: &[Achievement], current: &[Achievement]) -> ranklog_core::ChangelogOutput {
    generate_changelog(original, current, ChangelogOptions::default())
}

#[test]
fn test_self_diff_is_empty() {
    let list = demon_list();
    let output = run(&list, &list);
    assert_eq!(output.formatted, "");
    assert!(output.final_changes.is_empty());
}

#[test]
fn test_pure_addition() {
    let current = ranked(&["a"]);
    let output = run(&[], &current);
    assert_eq!(kinds(&output.final_changes), vec![ChangeKind::Added]);
    assert_eq!(output.final_changes[0].achievement().id(), Some("a"));
    assert!(output.formatted.contains("**A**"));
    assert!(output.formatted.contains("#1"));
}

#[test]
fn test_pure_removal() {
    let original = ranked(&["a"]);
    let output = run(&original, &[]);
    match output.final_changes.as_slice() {
        [Change::Removed { old_rank, .. }] => assert_eq!(*old_rank, Some(1)),
        other => panic!("expected one removal, got {:?}", other),
    }
    assert!(output.formatted.contains("removed from #1"));
}

#[test]
fn test_insert_at_top_reports_only_the_addition() {
    let original = ranked(&["a", "b", "c"]);
    let current = ranked(&["x", "a", "b", "c"]);
    let output = run(&original, &current);
    assert_eq!(kinds(&output.final_changes), vec![ChangeKind::Added]);
    assert_eq!(output.final_changes[0].achievement().id(), Some("x"));
    assert!(!output.formatted.contains("moved"));
}

#[test]
fn test_insert_in_middle_reports_only_the_addition() {
    let original = ranked(&["a", "b", "c", "d"]);
    let current = ranked(&["a", "b", "x", "c", "d"]);
    let output = run(&original, &current);
    assert_eq!(kinds(&output.final_changes), vec![ChangeKind::Added]);
    assert_eq!(
        output.formatted,
        ":new: **X** added at #3\n> Below **B**\n> Above **C**"
    );
}

#[test]
fn test_adjacent_swap_is_one_event() {
    let original = ranked(&["a", "b"]);
    let current = ranked(&["b", "a"]);
    let output = run(&original, &current);
    assert_eq!(output.final_changes.len(), 1);
    match &output.final_changes[0] {
        Change::Swapped {
            achievement, other, ..
        } => {
            let mut ids = vec![achievement.id().unwrap(), other.id().unwrap()];
            ids.sort();
            assert_eq!(ids, vec!["a", "b"]);
        }
        other => panic!("expected swap, got {:?}", other),
    }
    assert!(output.formatted.contains("**B** and **A** swapped"));
}

#[test]
fn test_same_rank_replacement_is_rename() {
    let mut original = ranked(&["a", "b", "c", "d"]);
    original.push(Achievement::new("old", "Level X 50%", 5).with_player("Zoink"));
    let mut current = ranked(&["a", "b", "c", "d"]);
    current.push(Achievement::new("new", "Level X 60%", 5).with_player("zoink"));

    let output = run(&original, &current);
    assert_eq!(kinds(&output.final_changes), vec![ChangeKind::Renamed]);
    assert_eq!(
        output.formatted,
        ":pencil2: **Level X 50%** updated to **Level X 60%**"
    );
}

#[test]
fn test_same_id_new_name_is_rename() {
    let original = ranked(&["a", "b"]);
    let mut current = original.clone();
    current[1].name = "Bravo".to_string();
    let output = run(&original, &current);
    assert_eq!(kinds(&output.final_changes), vec![ChangeKind::Renamed]);
    assert!(output.formatted.contains("**B** updated to **Bravo**"));
}

#[test]
fn test_related_record_at_new_rank_replaces_duplicate() {
    let original = reranked(vec![
        Achievement::new("a", "Acheron", 0),
        Achievement::new("old", "Sonic Wave", 0).with_player("Cyclic"),
        Achievement::new("c", "Cataclysm", 0),
    ]);
    let current = reranked(vec![
        Achievement::new("new", "Sonic Wave 100%", 0).with_player("Cyclic"),
        Achievement::new("a", "Acheron", 0),
        Achievement::new("c", "Cataclysm", 0),
    ]);
    let output = run(&original, &current);
    assert_eq!(kinds(&output.final_changes), vec![ChangeKind::AddedWithRemovals]);
    assert!(output.formatted.starts_with(":recycle: **Sonic Wave 100%** added at #1"));
    assert!(output
        .formatted
        .contains("> **Sonic Wave** removed for redundancy"));
}

#[test]
fn test_long_move_hides_passed_records() {
    let original = ranked(&["a", "b", "c", "d", "e"]);
    let current = ranked(&["a", "e", "b", "c", "d"]);
    let output = run(&original, &current);
    assert_eq!(kinds(&output.final_changes), vec![ChangeKind::MovedUp]);
    assert_eq!(
        output.formatted,
        ":arrow_up: **E** moved up from #5 to #2\n> Below **A**\n> Above **B**"
    );
}

#[test]
fn test_timeline_mode_reports_dates_and_no_moves() {
    let original = demon_list();
    let mut current = demon_list();
    current.remove(1);
    current.insert(
        0,
        Achievement::new("kocmoc", "Kocmoc", 0).with_date("2024-04-02"),
    );
    let current = reranked(current);

    let output = generate_changelog(
        &original,
        &current,
        ChangelogOptions::with_mode(ChangelogMode::Timeline),
    );
    assert_eq!(
        kinds(&output.final_changes),
        vec![ChangeKind::TimelineRemoved, ChangeKind::TimelineAdded]
    );
    assert!(output
        .formatted
        .contains(":calendar_spiral: **Acheron** removed from the timeline (2024-01-12)"));
    assert!(output
        .formatted
        .contains(":calendar: **Kocmoc** added to the timeline (2024-04-02)"));
}

#[test]
fn test_dev_mode_uses_one_context_line() {
    let original = ranked(&["a", "b", "c"]);
    let current = ranked(&["a", "x", "b", "c"]);
    let output = generate_changelog(
        &original,
        &current,
        ChangelogOptions::with_mode(ChangelogMode::Dev),
    );
    assert_eq!(output.formatted, ":new: **X** added at #2\n> Below **A**");
}

#[test]
fn test_records_without_id_are_invisible() {
    let original = ranked(&["a", "b"]);
    let mut current = ranked(&["a", "b"]);
    let mut ghost = Achievement::new("", "Ghost", 3);
    ghost.id = None;
    current.push(ghost);
    let output = run(&original, &current);
    assert!(output.formatted.is_empty());
}

#[test]
fn test_inputs_are_not_mutated() {
    let original = demon_list();
    let current = reranked(demon_list().into_iter().rev().collect());
    let (original_copy, current_copy) = (original.clone(), current.clone());
    let _ = run(&original, &current);
    assert_eq!(original, original_copy);
    assert_eq!(current, current_copy);
}

#[test]
fn test_entries_are_separated_by_blank_line() {
    let original = ranked(&["a", "b", "c"]);
    let current = ranked(&["x", "a", "b"]);
    let output = run(&original, &current);
    assert_eq!(
        kinds(&output.final_changes),
        vec![ChangeKind::Removed, ChangeKind::Added]
    );
    assert_eq!(output.formatted.split("\n\n").count(), 2);
}

#[test]
fn test_raw_detector_is_public() {
    let original = ranked(&["a", "b"]);
    let current = ranked(&["b", "a"]);
    let raw = detect_changes(&original, &current, ChangelogMode::Standard);
    assert_eq!(raw.len(), 2);
    assert!(raw.iter().all(Change::is_move));
}

#[test]
fn test_extreme_ranks_do_not_overflow() {
    let original = from_json(json!([
        {"id": "a", "name": "A", "rank": 1},
        {"id": "b", "name": "B", "rank": "9223372036854775807"}
    ]));
    let current = from_json(json!([
        {"id": "b", "name": "B", "rank": "-9223372036854775808"},
        {"id": "a", "name": "A", "rank": "9223372036854775807"},
        {"id": "c", "name": "C", "rank": "-9223372036854775808"}
    ]));
    let raw = detect_changes(&original, &current, ChangelogMode::Standard);
    match raw.iter().find(|c| c.kind() == ChangeKind::Added) {
        Some(Change::Added { new_index, .. }) => assert_eq!(*new_index, None),
        other => panic!("unexpected {:?}", other),
    }
    let output = run(&original, &current);
    assert!(output
        .formatted
        .contains("**C** added at #-9223372036854775808"));
}
