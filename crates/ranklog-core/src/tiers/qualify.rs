use serde_json::Value;

use crate::model::Achievement;

/// Top-level keys that may carry review tokens
const TOKEN_FIELDS: [&str; 5] = ["tag", "labels", "label", "status", "meta"];
/// Keys under a nested `achievement` object that may carry review tokens
const NESTED_TOKEN_FIELDS: [&str; 3] = ["tags", "label", "status"];

fn is_true(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(true)))
}

fn push_tokens(value: Option<&Value>, out: &mut Vec<String>) {
    match value {
        Some(Value::String(s)) => out.push(s.trim().to_lowercase()),
        Some(Value::Array(items)) => out.extend(items.iter().filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_lowercase()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })),
        _ => {}
    }
}

/// Whether a record is marked both rated and verified.
///
/// Checked in order: boolean `rated`/`verified` fields, then tokens in the
/// tag-like fields, then the serialized record as a last resort.
pub fn has_rated_and_verified(achievement: &Achievement) -> bool {
    if is_true(achievement.extra_field("rated")) && is_true(achievement.extra_field("verified")) {
        return true;
    }

    let mut tokens: Vec<String> = achievement
        .tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .collect();
    for key in TOKEN_FIELDS {
        push_tokens(achievement.extra_field(key), &mut tokens);
    }
    if let Some(nested) = achievement.extra_field("achievement") {
        for key in NESTED_TOKEN_FIELDS {
            push_tokens(nested.get(key), &mut tokens);
        }
    }
    if tokens.iter().any(|t| t == "rated") && tokens.iter().any(|t| t == "verified") {
        return true;
    }

    serde_json::to_string(achievement)
        .map(|json| {
            let json = json.to_lowercase();
            json.contains("rated") && json.contains("verified")
        })
        .unwrap_or(false)
}
