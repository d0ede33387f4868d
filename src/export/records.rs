//! Plain and line-delimited record serialization

use crate::models::MergedDataset;

use super::ExportError;

/// Pretty-printed JSON array of all records
pub fn to_json(dataset: &MergedDataset) -> Result<String, ExportError> {
    serde_json::to_string_pretty(&dataset.records)
        .map_err(|e| ExportError::Serialization(e.to_string()))
}

/// One compact JSON object per line, newline-joined, no trailing newline
pub fn to_jsonl(dataset: &MergedDataset) -> Result<String, ExportError> {
    let mut lines = Vec::with_capacity(dataset.records.len());
    for record in &dataset.records {
        let line =
            serde_json::to_string(record).map_err(|e| ExportError::Serialization(e.to_string()))?;
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlatRecord;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn dataset() -> MergedDataset {
        let mut first = FlatRecord::new();
        first.insert("a".to_string(), json!(1));
        let mut second = FlatRecord::new();
        second.insert("a".to_string(), json!(2));
        MergedDataset::new(
            "test",
            vec![first, second],
            vec!["a".to_string()],
            BTreeMap::new(),
        )
    }

    #[test]
    fn test_json_is_array() {
        let content = to_json(&dataset()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, json!([{"a": 1}, {"a": 2}]));
    }

    #[test]
    fn test_jsonl_round_trips() {
        let content = to_jsonl(&dataset()).unwrap();
        assert!(!content.ends_with('\n'));

        let rows: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(rows, vec![json!({"a": 1}), json!({"a": 2})]);
    }
}
