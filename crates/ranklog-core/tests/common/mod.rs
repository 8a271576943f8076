use ranklog_core::Achievement;
use serde_json::{json, Value};

/// Records with the given ids, ranked in slice order
///
/// Names are the upper-cased ids so headers are easy to assert on.
#[allow(dead_code)]
pub fn ranked(ids: &[&str]) -> Vec<Achievement> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| Achievement::new(*id, id.to_uppercase(), i as i64 + 1))
        .collect()
}

/// Parse a JSON array fixture into records
#[allow(dead_code)]
pub fn from_json(value: Value) -> Vec<Achievement> {
    serde_json::from_value(value).expect("fixture parses")
}

/// A realistic list document with players, dates and review tags
#[allow(dead_code)]
pub fn demon_list() -> Vec<Achievement> {
    from_json(json!([
        {"id": "tidal", "name": "Tidal Wave", "player": "Zoink", "rank": 1, "date": "2023-11-29", "tags": ["rated", "verified"]},
        {"id": "acheron", "name": "Acheron", "player": "Zoink", "rank": 2, "date": "2024-01-12"},
        {"id": "slaughter", "name": "Slaughterhouse", "player": "Doggie", "rank": 3, "date": "2021-02-03", "tags": ["Rated", "Verified"]},
        {"id": "abyss", "name": "Abyss of Darkness", "player": "Exen", "rank": 4, "date": "2023-06-19"},
        {"id": "kyouki", "name": "Kyouki", "player": "Nahuel", "rank": 5, "date": "2021-10-20"},
        {"id": "avernus", "name": "Avernus", "player": "Zoink", "rank": 6, "date": "2022-05-02", "rated": true, "verified": true}
    ]))
}

/// Reassign ranks to match slice order
#[allow(dead_code)]
pub fn reranked(mut list: Vec<Achievement>) -> Vec<Achievement> {
    ranklog_core::load::renumber(&mut list);
    list
}
