use ranklog_core::errors::{ExError, ExErrorKind, RanklogError};
use ranklog_core::ChangelogMode;

#[test]
fn test_not_found_carries_rank() {
    let ex_err = ExError::new(ExErrorKind::NotFound)
        .with_op("tier_by_rank")
        .with_rank(42)
        .with_message("rank 42 is outside 1..=10");

    assert_eq!(ex_err.code(), "ERR_NOT_FOUND");
    assert_eq!(ex_err.rank(), Some(42));
    assert!(ex_err.to_string().contains("(rank: 42)"));
}

#[test]
fn test_missing_field_carries_achievement() {
    let err = RanklogError::MissingField {
        achievement: "a7".to_string(),
        field: "rank".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::MissingField);
    assert_eq!(ex_err.entity_id(), Some("a7"));
    assert!(ex_err.message().contains("rank"));
}

#[test]
fn test_empty_original_distinct_from_invalid_input() {
    let ex_err: ExError = RanklogError::EmptyOriginal.into();

    assert_eq!(ex_err.kind(), ExErrorKind::EmptyOriginal);
    assert_ne!(ex_err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_unknown_mode_is_invalid_input() {
    let err = "verbose".parse::<ChangelogMode>().unwrap_err();

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert!(ex_err.message().contains("verbose"));
}

#[test]
fn test_error_kind_code_mapping() {
    // Each kind has a stable, unique code
    let kinds = vec![
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::InvalidCollection, "ERR_INVALID_COLLECTION"),
        (ExErrorKind::MissingField, "ERR_MISSING_FIELD"),
        (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
        (ExErrorKind::EmptyOriginal, "ERR_EMPTY_ORIGINAL"),
        (ExErrorKind::InvalidTierTable, "ERR_INVALID_TIER_TABLE"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        (ExErrorKind::Internal, "ERR_INTERNAL"),
    ];

    let mut seen = std::collections::HashSet::new();
    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
        assert!(seen.insert(expected_code));
    }
}

#[test]
fn test_builder_context_survives_display() {
    let ex_err = ExError::new(ExErrorKind::InvalidTierTable)
        .with_op("load_tiers")
        .with_rank(12)
        .with_message("percentages sum to 120");

    let rendered = ex_err.to_string();
    assert!(rendered.contains("ERR_INVALID_TIER_TABLE"));
    assert!(rendered.contains("load_tiers"));
    assert!(rendered.contains("rank: 12"));
    assert_eq!(ex_err.op(), Some("load_tiers"));
}
