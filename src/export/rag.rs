//! Content/metadata-split document format for retrieval pipelines

use serde_json::{Map, Value, json};

use crate::models::{MergedDataset, is_reserved_key};

use super::ExportError;

/// String values longer than this (in characters) count as document content
const CONTENT_LENGTH_THRESHOLD: usize = 100;

/// Split every record into long-text content and metadata, producing one
/// document per record. `text` is the newline-pair-joined concatenation of
/// all content-field values in key order; everything else (short strings,
/// non-strings, and the reserved keys) lands in the document's metadata.
pub fn to_rag(dataset: &MergedDataset) -> Result<String, ExportError> {
    let documents: Vec<Value> = dataset
        .records
        .iter()
        .map(|record| {
            let mut content: Vec<&str> = Vec::new();
            let mut metadata = Map::new();

            for (key, value) in record {
                match value {
                    Value::String(s)
                        if !is_reserved_key(key)
                            && s.chars().count() > CONTENT_LENGTH_THRESHOLD =>
                    {
                        content.push(s);
                    }
                    _ => {
                        metadata.insert(key.clone(), value.clone());
                    }
                }
            }

            json!({
                "text": content.join("\n\n"),
                "metadata": metadata,
            })
        })
        .collect();

    let payload = json!({
        "name": dataset.name,
        "timestamp": dataset.created_at.to_rfc3339(),
        "documents": documents,
        "metadata": {
            "record_count": dataset.records.len(),
            "fields": dataset.fields,
            "schema": dataset.schema,
        }
    });

    serde_json::to_string_pretty(&payload).map_err(|e| ExportError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlatRecord;
    use std::collections::BTreeMap;

    fn long_text(seed: &str) -> String {
        seed.repeat(40)
    }

    #[test]
    fn test_content_metadata_split() {
        let mut record = FlatRecord::new();
        record.insert("body".to_string(), json!(long_text("abc ")));
        record.insert("title".to_string(), json!("short"));
        record.insert("count".to_string(), json!(7));
        record.insert("_source".to_string(), json!(long_text("x")));

        let dataset = MergedDataset::new(
            "rag",
            vec![record],
            vec![
                "body".to_string(),
                "title".to_string(),
                "count".to_string(),
                "_source".to_string(),
            ],
            BTreeMap::new(),
        );

        let parsed: Value = serde_json::from_str(&to_rag(&dataset).unwrap()).unwrap();
        let document = &parsed["documents"][0];

        assert_eq!(document["text"], json!(long_text("abc ")));
        // short strings, numbers, and reserved keys stay in metadata
        assert_eq!(document["metadata"]["title"], json!("short"));
        assert_eq!(document["metadata"]["count"], json!(7));
        assert_eq!(document["metadata"]["_source"], json!(long_text("x")));
        assert!(document["metadata"].get("body").is_none());
    }

    #[test]
    fn test_content_joined_in_key_order() {
        let mut record = FlatRecord::new();
        record.insert("first".to_string(), json!(long_text("a")));
        record.insert("second".to_string(), json!(long_text("b")));

        let dataset = MergedDataset::new(
            "rag",
            vec![record],
            vec!["first".to_string(), "second".to_string()],
            BTreeMap::new(),
        );

        let parsed: Value = serde_json::from_str(&to_rag(&dataset).unwrap()).unwrap();
        let expected = format!("{}\n\n{}", long_text("a"), long_text("b"));
        assert_eq!(parsed["documents"][0]["text"], json!(expected));
    }

    #[test]
    fn test_top_level_metadata() {
        let mut record = FlatRecord::new();
        record.insert("a".to_string(), json!(1));

        let dataset =
            MergedDataset::new("rag", vec![record], vec!["a".to_string()], BTreeMap::new());
        let parsed: Value = serde_json::from_str(&to_rag(&dataset).unwrap()).unwrap();

        assert_eq!(parsed["name"], json!("rag"));
        assert_eq!(parsed["metadata"]["record_count"], json!(1));
        assert_eq!(parsed["metadata"]["fields"], json!(["a"]));
    }
}
