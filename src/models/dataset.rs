//! Merged tabular datasets

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::inference::FieldType;

/// Reserved metadata key carrying the source entry's name
pub const SOURCE_KEY: &str = "_source";

/// Reserved metadata key carrying the source entry's creation timestamp
pub const TIMESTAMP_KEY: &str = "_timestamp";

/// One tabular row: flat field path -> scalar, array, or stringified
/// sub-object. Insertion-ordered, so first-seen column order is stable.
pub type FlatRecord = serde_json::Map<String, Value>;

/// Check whether a field path is one of the injected reserved keys
pub fn is_reserved_key(key: &str) -> bool {
    key == SOURCE_KEY || key == TIMESTAMP_KEY
}

/// A named collection of flat records with a unified field set and
/// inferred schema. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedDataset {
    /// Unique identifier
    pub id: String,
    /// Display name (explicit label or derived from source count)
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Rows, in source-entry order then intra-entry array order
    pub records: Vec<FlatRecord>,
    /// Union of all field paths across records, in first-seen order
    pub fields: Vec<String>,
    /// Inferred type per field path; empty when schema detection was off
    pub schema: BTreeMap<String, FieldType>,
}

impl MergedDataset {
    /// Create a dataset from merge output
    pub fn new(
        name: impl Into<String>,
        records: Vec<FlatRecord>,
        fields: Vec<String>,
        schema: BTreeMap<String, FieldType>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: Utc::now(),
            records,
            fields,
            schema,
        }
    }

    /// Number of records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Verify the structural invariant: every record key appears in
    /// `fields`, and every field has a schema entry when a schema exists.
    pub fn check_invariants(&self) -> bool {
        let all_keys_known = self
            .records
            .iter()
            .all(|record| record.keys().all(|key| self.fields.iter().any(|f| f == key)));
        let schema_complete =
            self.schema.is_empty() || self.fields.iter().all(|f| self.schema.contains_key(f));
        all_keys_known && schema_complete
    }
}
