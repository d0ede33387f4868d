//! Leaf field path extraction

use std::collections::HashSet;

use serde_json::Value;

use crate::models::ProcessingOptions;

/// How many array elements are sampled when arrays are expanded
const ARRAY_SAMPLE_SIZE: usize = 3;

/// Extract the ordered set of leaf field paths from a parsed value.
///
/// Paths are dotted (`user.address.city`), discovered in object insertion
/// order, and de-duplicated. A root-level `null` yields an empty set. Once
/// the recursion depth exceeds `max_depth`, the current value counts as a
/// single leaf regardless of its type.
pub fn extract_fields(value: &Value, options: &ProcessingOptions) -> Vec<String> {
    let mut paths = Vec::new();
    let mut seen = HashSet::new();
    walk(value, "", 0, options, &mut paths, &mut seen);
    paths
}

fn walk(
    value: &Value,
    prefix: &str,
    depth: usize,
    options: &ProcessingOptions,
    paths: &mut Vec<String>,
    seen: &mut HashSet<String>,
) {
    if depth > options.max_depth {
        push_leaf(prefix, paths, seen);
        return;
    }

    match value {
        // a root-level null (empty prefix) contributes nothing
        Value::Null if prefix.is_empty() => {}
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            push_leaf(prefix, paths, seen);
        }
        Value::Array(items) => {
            if options.preserve_arrays || items.is_empty() {
                push_leaf(prefix, paths, seen);
                return;
            }
            for item in items.iter().take(ARRAY_SAMPLE_SIZE) {
                if item.is_object() {
                    walk(item, prefix, depth + 1, options, paths, seen);
                } else {
                    push_leaf(prefix, paths, seen);
                }
            }
        }
        Value::Object(map) => {
            for (key, child) in map {
                let child_prefix = format!("{prefix}{key}.");
                walk(child, &child_prefix, depth + 1, options, paths, seen);
            }
        }
    }
}

fn push_leaf(prefix: &str, paths: &mut Vec<String>, seen: &mut HashSet<String>) {
    let path = prefix.trim_end_matches('.');
    if path.is_empty() {
        return;
    }
    if seen.insert(path.to_string()) {
        paths.push(path.to_string());
    }
}
