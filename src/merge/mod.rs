//! Dataset merging
//!
//! Builds one [`MergedDataset`] from a fixed snapshot of selected entries:
//! each entry's canonical value is flattened into one or more records, the
//! reserved `_source`/`_timestamp` metadata is injected, the field set is
//! unioned in first-seen order, and the schema inferencer runs when enabled.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::inference::infer_schema;
use crate::models::{Entry, FlatRecord, MergedDataset, ProcessingOptions, SOURCE_KEY, TIMESTAMP_KEY};
use crate::normalize::flatten;

/// Errors from a merge operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// No entries were selected
    #[error("No entries selected for merge")]
    EmptyInput,

    /// Every selected entry was unusable or yielded no records
    #[error("Merge produced no records")]
    EmptyResult,
}

/// Merge the selected entries into a single dataset.
///
/// Failed entries are excluded, and a single entry whose value cannot yield
/// records is skipped with a logged warning - per-entry failures never abort
/// the merge. The merge only fails when nothing was selected or when zero
/// records result.
pub fn merge_entries(
    entries: &[&Entry],
    options: &ProcessingOptions,
    label: Option<&str>,
) -> Result<MergedDataset, MergeError> {
    if entries.is_empty() {
        return Err(MergeError::EmptyInput);
    }

    let usable: Vec<&Entry> = entries
        .iter()
        .copied()
        .filter(|entry| {
            if entry.status.is_usable() {
                true
            } else {
                debug!(source = %entry.source_name, "excluding failed entry from merge");
                false
            }
        })
        .collect();

    let mut records: Vec<FlatRecord> = Vec::new();
    for entry in &usable {
        collect_records(entry, options, &mut records);
    }

    let name = match label {
        Some(label) => label.to_string(),
        None => format!("Merged dataset ({} sources)", usable.len()),
    };

    assemble_dataset(name, records, options)
}

/// Build a dataset from already-flattened records: union the field set in
/// first-seen order and run the schema inferencer when enabled.
pub fn assemble_dataset(
    name: impl Into<String>,
    records: Vec<FlatRecord>,
    options: &ProcessingOptions,
) -> Result<MergedDataset, MergeError> {
    if records.is_empty() {
        return Err(MergeError::EmptyResult);
    }

    let fields = collect_fields(&records);
    let schema = if options.detect_schemas {
        infer_schema(&records)
    } else {
        Default::default()
    };

    debug!(
        records = records.len(),
        fields = fields.len(),
        "dataset assembled"
    );

    Ok(MergedDataset::new(name, records, fields, schema))
}

/// Flatten one entry's canonical value into records.
///
/// A top-level object yields exactly one record; a top-level array yields
/// one record per object element, skipping non-object elements. Any other
/// root shape is skipped with a logged per-entry error.
fn collect_records(entry: &Entry, options: &ProcessingOptions, records: &mut Vec<FlatRecord>) {
    match &entry.canonical_value {
        Value::Object(_) => {
            records.push(build_record(&entry.canonical_value, entry, options));
        }
        Value::Array(items) => {
            let mut skipped = 0usize;
            for item in items {
                if item.is_object() {
                    records.push(build_record(item, entry, options));
                } else {
                    skipped += 1;
                }
            }
            if skipped > 0 {
                warn!(
                    source = %entry.source_name,
                    skipped,
                    "skipped non-object array elements during merge"
                );
            }
        }
        other => {
            warn!(
                source = %entry.source_name,
                kind = value_kind(other),
                "entry root is neither an object nor an array; skipped"
            );
        }
    }
}

fn build_record(value: &Value, entry: &Entry, options: &ProcessingOptions) -> FlatRecord {
    let mut record = flatten(value, "", options);
    // reserved keys overwrite same-named user fields (preserved behavior)
    record.insert(
        SOURCE_KEY.to_string(),
        Value::String(entry.source_name.clone()),
    );
    record.insert(
        TIMESTAMP_KEY.to_string(),
        Value::String(entry.created_at.to_rfc3339()),
    );
    record
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Union of record keys, in first-seen order
fn collect_fields(records: &[FlatRecord]) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !fields.iter().any(|f| f == key) {
                fields.push(key.clone());
            }
        }
    }
    fields
}
