//! Heuristic for "same underlying achievement" between an added and a
//! removed record.
//!
//! Two records are related when their level stems are equal and they share
//! a player, or when one stem contains the other. This is intentionally
//! loose: "Level X 50%" and "Level X 60%" relate, but so do "Sonic" and
//! "Sonic Wave". False positives and negatives are accepted behaviour.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Achievement;

/// Trailing progress token: `60`, `60%`, `30+70%`.
///
/// Matched against the last whitespace-separated token, so a spaced run
/// such as `30 + 70%` only loses its final `70%`.
static PROGRESS_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\+\d+)?%?$").expect("valid progress suffix regex"));

/// Lowercased name with a trailing progress token removed.
///
/// Single-token names are kept whole even when numeric.
pub fn level_base(name: &str) -> String {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    let kept = match tokens.split_last() {
        Some((last, rest)) if !rest.is_empty() && PROGRESS_SUFFIX_RE.is_match(last) => rest,
        _ => &tokens[..],
    };
    kept.join(" ").to_lowercase()
}

fn normalized_player(achievement: &Achievement) -> Option<String> {
    achievement
        .player
        .as_deref()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
}

/// Whether `a` and `b` look like the same achievement. Symmetric.
pub fn are_related(a: &Achievement, b: &Achievement) -> bool {
    let base_a = level_base(&a.name);
    let base_b = level_base(&b.name);

    if base_a == base_b {
        if let (Some(pa), Some(pb)) = (normalized_player(a), normalized_player(b)) {
            if pa == pb {
                return true;
            }
        }
    }

    !base_a.is_empty()
        && !base_b.is_empty()
        && (base_a.contains(&base_b) || base_b.contains(&base_a))
}
