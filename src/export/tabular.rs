//! CSV serialization of merged datasets

use serde_json::Value;

use crate::models::MergedDataset;

use super::ExportError;

/// Tabular serialization: header row from the dataset's field union
/// (first-seen order), one data row per record, missing keys as empty cells.
pub fn to_csv(dataset: &MergedDataset) -> Result<String, ExportError> {
    let mut lines = Vec::with_capacity(dataset.records.len() + 1);

    let header: Vec<String> = dataset.fields.iter().map(|f| escape_cell(f)).collect();
    lines.push(header.join(","));

    for record in &dataset.records {
        let row: Vec<String> = dataset
            .fields
            .iter()
            .map(|field| escape_cell(&render_cell(record.get(field))))
            .collect();
        lines.push(row.join(","));
    }

    Ok(lines.join("\n"))
}

/// Render one cell value: strings unquoted, scalars via display, compound
/// values as compact JSON, absent or null values empty.
fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(compound) => compound.to_string(),
    }
}

/// Quote a cell when it contains a delimiter, quote, or line break
fn escape_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlatRecord;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn record(pairs: &[(&str, Value)]) -> FlatRecord {
        let mut record = FlatRecord::new();
        for (key, value) in pairs {
            record.insert(key.to_string(), value.clone());
        }
        record
    }

    #[test]
    fn test_header_order_is_first_seen() {
        let dataset = MergedDataset::new(
            "test",
            vec![
                record(&[("a", json!(1)), ("b.c", json!(2))]),
                record(&[("a", json!(3)), ("d", json!(4))]),
            ],
            vec![
                "a".to_string(),
                "b.c".to_string(),
                "d".to_string(),
            ],
            BTreeMap::new(),
        );

        let content = to_csv(&dataset).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "a,b.c,d");
        assert_eq!(lines[1], "1,2,");
        assert_eq!(lines[2], "3,,4");
    }

    #[test]
    fn test_cell_escaping() {
        let dataset = MergedDataset::new(
            "test",
            vec![record(&[
                ("note", json!("hello, \"world\"")),
                ("multi", json!("line one\nline two")),
            ])],
            vec!["note".to_string(), "multi".to_string()],
            BTreeMap::new(),
        );

        let content = to_csv(&dataset).unwrap();
        let body = content.split_once('\n').unwrap().1;
        assert_eq!(body, "\"hello, \"\"world\"\"\",\"line one\nline two\"");
    }

    #[test]
    fn test_compound_values_serialized() {
        let dataset = MergedDataset::new(
            "test",
            vec![record(&[("tags", json!(["a", "b"])), ("flag", json!(true))])],
            vec!["tags".to_string(), "flag".to_string()],
            BTreeMap::new(),
        );

        let content = to_csv(&dataset).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "\"[\"\"a\"\",\"\"b\"\"]\",true");
    }

    #[test]
    fn test_null_renders_empty() {
        let dataset = MergedDataset::new(
            "test",
            vec![record(&[("a", json!(null)), ("b", json!(1))])],
            vec!["a".to_string(), "b".to_string()],
            BTreeMap::new(),
        );

        let content = to_csv(&dataset).unwrap();
        assert_eq!(content.lines().nth(1).unwrap(), ",1");
    }
}
