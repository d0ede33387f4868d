//! Field type tags for inferred schemas

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inferred type tag for one field path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Null values only
    Null,
    /// Boolean values
    Boolean,
    /// Numeric values
    Number,
    /// String values
    String,
    /// Array values (arrays kept intact during flattening)
    Array,
    /// Object values (flattening was skipped for this field)
    Object,
    /// Incompatible types observed across records
    Mixed,
    /// No samples observed
    Unknown,
}

impl FieldType {
    /// Tag for a single JSON value
    pub fn of_value(value: &Value) -> FieldType {
        match value {
            Value::Null => FieldType::Null,
            Value::Bool(_) => FieldType::Boolean,
            Value::Number(_) => FieldType::Number,
            Value::String(_) => FieldType::String,
            Value::Array(_) => FieldType::Array,
            Value::Object(_) => FieldType::Object,
        }
    }

    /// Resolve a set of observed tags to one declared tag.
    ///
    /// Zero observations resolve to `unknown` and a single observed type
    /// wins outright. Conflicts use a fixed precedence: `string` beats
    /// everything, `number` beats `null`, and any other combination is
    /// `mixed`.
    pub fn resolve(observed: &[FieldType]) -> FieldType {
        let mut distinct: Vec<FieldType> = Vec::new();
        for tag in observed {
            if !distinct.contains(tag) {
                distinct.push(*tag);
            }
        }

        match distinct.len() {
            0 => FieldType::Unknown,
            1 => distinct[0],
            _ if distinct.contains(&FieldType::String) => FieldType::String,
            _ if distinct
                .iter()
                .all(|tag| matches!(tag, FieldType::Number | FieldType::Null)) =>
            {
                FieldType::Number
            }
            _ => FieldType::Mixed,
        }
    }

    /// The tag's serialized name
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Null => "null",
            FieldType::Boolean => "boolean",
            FieldType::Number => "number",
            FieldType::String => "string",
            FieldType::Array => "array",
            FieldType::Object => "object",
            FieldType::Mixed => "mixed",
            FieldType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
