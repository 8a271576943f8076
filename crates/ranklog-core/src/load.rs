//! Reading list documents.
//!
//! A list document is a JSON array of record objects. Array order is rank
//! order.

use serde_json::Value;
use std::path::Path;
use std::time::Instant;

use crate::errors::{RanklogError, Result};
use crate::model::Achievement;
use crate::{log_op_end, log_op_error, log_op_start};

/// Parse a list document.
///
/// # Errors
///
/// `InvalidCollection` when the bytes are not UTF-8 JSON, the root is not
/// an array, or an element is not an object.
pub fn parse_collection(bytes: &[u8]) -> Result<Vec<Achievement>> {
    let text = std::str::from_utf8(bytes).map_err(|e| RanklogError::InvalidCollection {
        reason: format!("not UTF-8: {}", e),
    })?;
    let root: Value = serde_json::from_str(text).map_err(|e| RanklogError::InvalidCollection {
        reason: format!("not JSON: {}", e),
    })?;
    let Value::Array(items) = root else {
        return Err(RanklogError::InvalidCollection {
            reason: "expected a JSON array of records".to_string(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(RanklogError::InvalidCollection {
                    reason: format!("element {} is not an object", index),
                });
            }
            serde_json::from_value(item).map_err(|e| RanklogError::InvalidCollection {
                reason: format!("element {}: {}", index, e),
            })
        })
        .collect()
}

/// Read and parse a list document from disk.
///
/// # Errors
///
/// `Io` when the file cannot be read, otherwise as [`parse_collection`].
pub fn read_collection(path: &Path) -> Result<Vec<Achievement>> {
    let start = Instant::now();
    let path_text = path.display().to_string();
    log_op_start!("read_collection", path = path_text.as_str());

    let result = std::fs::read(path)
        .map_err(|e| RanklogError::Io {
            path: path_text.clone(),
            message: e.to_string(),
        })
        .and_then(|bytes| parse_collection(&bytes));

    match &result {
        Ok(list) => {
            log_op_end!(
                "read_collection",
                duration_ms = start.elapsed().as_millis() as u64,
                records = list.len()
            );
        }
        Err(err) => {
            log_op_error!(
                "read_collection",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                path = path_text.as_str()
            );
        }
    }
    result
}

/// Rewrite ranks as `1..=len` in list order.
pub fn renumber(list: &mut [Achievement]) {
    for (index, achievement) in list.iter_mut().enumerate() {
        achievement.rank = i64::try_from(index + 1).ok();
    }
}
