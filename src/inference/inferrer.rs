//! Schema inference over flat records

use std::collections::BTreeMap;

use crate::models::FlatRecord;

use super::types::FieldType;

/// Accumulates observed field types across records and resolves them into
/// one declared type per field path.
#[derive(Debug, Default)]
pub struct SchemaInferencer {
    /// Observed tags per field path, in field discovery order
    observed: Vec<(String, Vec<FieldType>)>,
    record_count: usize,
}

impl SchemaInferencer {
    /// Create an empty inferencer
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the field types of one flat record
    pub fn add_record(&mut self, record: &FlatRecord) {
        self.record_count += 1;
        for (key, value) in record {
            let tag = FieldType::of_value(value);
            match self.observed.iter_mut().find(|(path, _)| path == key) {
                Some((_, tags)) => tags.push(tag),
                None => self.observed.push((key.clone(), vec![tag])),
            }
        }
    }

    /// Number of records observed so far
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Resolve every observed field to its declared type
    pub fn finalize(self) -> BTreeMap<String, FieldType> {
        self.observed
            .into_iter()
            .map(|(path, tags)| (path, FieldType::resolve(&tags)))
            .collect()
    }
}

/// One-shot schema inference over a set of records
pub fn infer_schema(records: &[FlatRecord]) -> BTreeMap<String, FieldType> {
    let mut inferencer = SchemaInferencer::new();
    for record in records {
        inferencer.add_record(record);
    }
    inferencer.finalize()
}
