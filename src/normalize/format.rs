//! Structural canonicalization of parsed JSON values

use serde_json::{Map, Value};

use crate::models::ProcessingOptions;

/// Marker appended to truncated string values
const TRUNCATION_MARKER: &str = "...";

/// Canonicalize a value: object keys in lexicographic order, every value
/// recursively formatted, long string leaves optionally truncated.
///
/// Pure and total, and idempotent: `canonicalize(canonicalize(v)) ==
/// canonicalize(v)` for all `v`.
pub fn canonicalize(value: &Value, options: &ProcessingOptions) -> Value {
    match value {
        Value::String(s) => Value::String(truncate_string(s, options)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| canonicalize(item, options))
                .collect(),
        ),
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key], options));
            }
            Value::Object(sorted)
        }
        other => other.clone(),
    }
}

fn truncate_string(s: &str, options: &ProcessingOptions) -> String {
    if !options.trim_long_values {
        return s.to_string();
    }
    let limit = options.max_value_length;
    if s.chars().count() <= limit {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(limit).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}
