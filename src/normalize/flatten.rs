//! Flattening of nested values into tabular records

use serde_json::Value;

use crate::models::{FlatRecord, ProcessingOptions};

/// Flatten a nested value into a flat key -> value record.
///
/// Nested objects become dotted paths, expanded arrays of objects become
/// indexed paths (`items.0.x`), and values beyond `max_depth` are stored as
/// their compact JSON serialization. Key uniqueness holds by construction:
/// object keys are unique within a map and array indices are distinct.
pub fn flatten(value: &Value, prefix: &str, options: &ProcessingOptions) -> FlatRecord {
    let mut record = FlatRecord::new();
    flatten_into(value, prefix, 0, options, &mut record);
    record
}

fn flatten_into(
    value: &Value,
    prefix: &str,
    depth: usize,
    options: &ProcessingOptions,
    record: &mut FlatRecord,
) {
    if depth > options.max_depth {
        record.insert(strip(prefix), Value::String(value.to_string()));
        return;
    }

    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            record.insert(strip(prefix), value.clone());
        }
        Value::Array(items) => {
            if options.preserve_arrays || items.is_empty() {
                record.insert(strip(prefix), value.clone());
            } else if items[0].is_object() {
                for (index, item) in items.iter().enumerate() {
                    let item_prefix = format!("{prefix}{index}.");
                    flatten_into(item, &item_prefix, depth + 1, options, record);
                }
            } else {
                record.insert(strip(prefix), value.clone());
            }
        }
        Value::Object(map) => {
            for (key, child) in map {
                if options.flatten_nested && (child.is_object() || child.is_array()) {
                    let child_prefix = format!("{prefix}{key}.");
                    flatten_into(child, &child_prefix, depth + 1, options, record);
                } else {
                    record.insert(format!("{prefix}{key}"), child.clone());
                }
            }
        }
    }
}

fn strip(prefix: &str) -> String {
    prefix.trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_object_unchanged() {
        let options = ProcessingOptions::default();
        let record = flatten(&json!({"a": 1, "b": "x", "c": null}), "", &options);
        assert_eq!(record.get("a"), Some(&json!(1)));
        assert_eq!(record.get("b"), Some(&json!("x")));
        assert_eq!(record.get("c"), Some(&json!(null)));
    }

    #[test]
    fn test_nested_object_dotted() {
        let options = ProcessingOptions::default();
        let record = flatten(&json!({"a": 1, "b": {"c": 2, "d": {"e": 3}}}), "", &options);
        assert_eq!(record.get("a"), Some(&json!(1)));
        assert_eq!(record.get("b.c"), Some(&json!(2)));
        assert_eq!(record.get("b.d.e"), Some(&json!(3)));
    }

    #[test]
    fn test_flatten_nested_disabled() {
        let options = ProcessingOptions::builder().flatten_nested(false).build();
        let record = flatten(&json!({"a": 1, "b": {"c": 2}}), "", &options);
        assert_eq!(record.get("a"), Some(&json!(1)));
        // nested object kept as a single field holding the sub-value
        assert_eq!(record.get("b"), Some(&json!({"c": 2})));
        assert!(record.get("b.c").is_none());
    }

    #[test]
    fn test_preserved_array_intact() {
        let options = ProcessingOptions::default();
        let record = flatten(&json!({"tags": ["a", "b"], "rows": [{"x": 1}]}), "", &options);
        assert_eq!(record.get("tags"), Some(&json!(["a", "b"])));
        assert_eq!(record.get("rows"), Some(&json!([{"x": 1}])));
    }

    #[test]
    fn test_expanded_array_of_objects_indexed() {
        let options = ProcessingOptions::builder().preserve_arrays(false).build();
        let record = flatten(&json!({"rows": [{"x": 1}, {"x": 2, "y": 3}]}), "", &options);
        assert_eq!(record.get("rows.0.x"), Some(&json!(1)));
        assert_eq!(record.get("rows.1.x"), Some(&json!(2)));
        assert_eq!(record.get("rows.1.y"), Some(&json!(3)));
    }

    #[test]
    fn test_expanded_scalar_array_kept_whole() {
        let options = ProcessingOptions::builder().preserve_arrays(false).build();
        let record = flatten(&json!({"nums": [1, 2, 3]}), "", &options);
        assert_eq!(record.get("nums"), Some(&json!([1, 2, 3])));
    }

    #[test]
    fn test_depth_overflow_stringified() {
        let options = ProcessingOptions::builder().max_depth(1).build();
        let record = flatten(&json!({"a": {"b": {"c": 1}}}), "", &options);
        assert_eq!(record.get("a.b"), Some(&json!(r#"{"c":1}"#)));
    }

    #[test]
    fn test_deterministic() {
        let options = ProcessingOptions::builder().preserve_arrays(false).build();
        let value = json!({"a": {"b": 1}, "rows": [{"x": 1}, {"x": 2}]});
        let first = flatten(&value, "", &options);
        let second = flatten(&value, "", &options);
        assert_eq!(first, second);
    }

    #[test]
    fn test_prefix_applied() {
        let options = ProcessingOptions::default();
        let record = flatten(&json!({"a": 1}), "outer.", &options);
        assert_eq!(record.get("outer.a"), Some(&json!(1)));
    }
}
