//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical between the logging macros,
//! the test capture layer and the error facility.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers
pub const FIELD_ACHIEVEMENT_ID: &str = "achievement_id";
pub const FIELD_RANK: &str = "rank";
pub const FIELD_MODE: &str = "mode";

// Collection sizes
pub const FIELD_ORIGINAL_LEN: &str = "original_len";
pub const FIELD_CURRENT_LEN: &str = "current_len";
pub const FIELD_RAW_CHANGES: &str = "raw_changes";
pub const FIELD_FINAL_CHANGES: &str = "final_changes";
pub const FIELD_TOTAL: &str = "total";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_ACHIEVEMENT_ID.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_collection_size_keys_are_distinct() {
        let keys = [
            FIELD_ORIGINAL_LEN,
            FIELD_CURRENT_LEN,
            FIELD_RAW_CHANGES,
            FIELD_FINAL_CHANGES,
            FIELD_TOTAL,
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
