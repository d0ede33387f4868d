//! Dataset-with-schema wrapper for Hugging Face style consumption

use serde_json::json;

use crate::models::MergedDataset;

use super::ExportError;

/// Wrap records, schema, and dataset metadata in one document
pub fn to_huggingface(dataset: &MergedDataset) -> Result<String, ExportError> {
    let payload = json!({
        "data": dataset.records,
        "schema": dataset.schema,
        "metadata": {
            "name": dataset.name,
            "timestamp": dataset.created_at.to_rfc3339(),
            "record_count": dataset.records.len(),
            "fields": dataset.fields,
        }
    });

    serde_json::to_string_pretty(&payload).map_err(|e| ExportError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::FieldType;
    use crate::models::FlatRecord;
    use serde_json::{Value, json};
    use std::collections::BTreeMap;

    #[test]
    fn test_wrapper_shape() {
        let mut record = FlatRecord::new();
        record.insert("a".to_string(), json!(1));

        let mut schema = BTreeMap::new();
        schema.insert("a".to_string(), FieldType::Number);

        let dataset = MergedDataset::new("export me", vec![record], vec!["a".to_string()], schema);
        let content = to_huggingface(&dataset).unwrap();
        let parsed: Value = serde_json::from_str(&content).unwrap();

        assert_eq!(parsed["data"], json!([{"a": 1}]));
        assert_eq!(parsed["schema"], json!({"a": "number"}));
        assert_eq!(parsed["metadata"]["name"], json!("export me"));
        assert_eq!(parsed["metadata"]["record_count"], json!(1));
        assert_eq!(parsed["metadata"]["fields"], json!(["a"]));
        assert!(parsed["metadata"]["timestamp"].is_string());
    }
}
