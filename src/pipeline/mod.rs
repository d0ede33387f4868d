//! Processing pipeline
//!
//! Raw text enters through [`PipelineDriver::submit`], queues FIFO, and is
//! pulled through repair -> canonicalize -> field extraction by
//! [`PipelineDriver::drain`] - at most one document in flight, per-item
//! failures isolated to the item. The driver is the single owner of the
//! queue and of the entry/dataset collections.

mod driver;
mod error;
mod queue;

pub use driver::{ASSIST_REPAIR_MAX_LENGTH, PipelineDriver, process_text};
pub use error::{PipelineError, PipelineResult};
pub use queue::{ProcessingQueue, QueueItem, QueueItemState};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockAssistant;
    use crate::models::{EntryStatus, ProcessingOptions};
    use serde_json::json;

    #[test]
    fn test_process_valid_text() {
        let options = ProcessingOptions::default();
        let entry = process_text(r#"{"b": 1, "a": 2}"#, "manual", &options, None);

        assert_eq!(entry.status, EntryStatus::Repaired);
        assert!(entry.repair_note.is_none());
        // auto_format sorts keys
        let keys: Vec<&String> = entry.canonical_value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(entry.field_paths, ["a", "b"]);
    }

    #[test]
    fn test_process_repairable_text() {
        let options = ProcessingOptions::default();
        let entry = process_text("{name: 'Bob', age: 30,}", "manual", &options, None);

        assert_eq!(entry.status, EntryStatus::Repaired);
        assert_eq!(entry.repaired_text, r#"{"name": "Bob", "age": 30}"#);
        assert_eq!(entry.raw_text, "{name: 'Bob', age: 30,}");
        assert!(entry.repair_note.unwrap().contains("targeted syntax fixes"));
    }

    #[test]
    fn test_process_aggressive_repair_warns() {
        let options = ProcessingOptions::default();
        let entry = process_text("{a: 'it\\'s', /* note */ b: 2,}", "manual", &options, None);

        assert_eq!(entry.status, EntryStatus::RepairedWithWarning);
        assert_eq!(entry.canonical_value, json!({"a": "it's", "b": 2}));
    }

    #[test]
    fn test_process_unrepairable_fails() {
        let options = ProcessingOptions::default();
        let entry = process_text("hello world", "manual", &options, None);

        assert_eq!(entry.status, EntryStatus::Failed);
        assert!(entry.repair_note.unwrap().contains("Unable to repair JSON"));
    }

    #[test]
    fn test_assistant_fallback_accepted() {
        let options = ProcessingOptions::default();
        let assistant = MockAssistant::repairing(r#"{"fixed": true}"#);
        let entry = process_text("hello world", "manual", &options, Some(&assistant));

        assert_eq!(entry.status, EntryStatus::RepairedWithWarning);
        assert_eq!(entry.canonical_value, json!({"fixed": true}));
        assert!(entry.repair_note.unwrap().contains("assistant"));
    }

    #[test]
    fn test_assistant_invalid_output_rejected() {
        let options = ProcessingOptions::default();
        // assistant returns text that still fails a direct parse
        let assistant = MockAssistant::repairing("still not json");
        let entry = process_text("hello world", "manual", &options, Some(&assistant));

        assert_eq!(entry.status, EntryStatus::Failed);
    }

    #[test]
    fn test_assistant_not_consulted_for_deterministic_success() {
        let options = ProcessingOptions::default();
        // a failing assistant must not matter when heuristics succeed
        let assistant = MockAssistant::failing();
        let entry = process_text("{a: 1}", "manual", &options, Some(&assistant));

        assert_eq!(entry.status, EntryStatus::Repaired);
    }

    #[test]
    fn test_drain_processes_fifo_and_isolates_failures() {
        let mut driver = PipelineDriver::new(ProcessingOptions::default());
        driver.submit(r#"{"a": 1}"#, "good.json");
        driver.submit("not even close", "bad.json");
        driver.submit(r#"{"b": 2}"#, "also-good.json");

        assert_eq!(driver.drain(), 3);

        let entries = driver.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].status, EntryStatus::Repaired);
        assert_eq!(entries[1].status, EntryStatus::Failed);
        assert_eq!(entries[2].status, EntryStatus::Repaired);

        let states: Vec<QueueItemState> =
            driver.queue().items().iter().map(|item| item.state).collect();
        assert_eq!(
            states,
            [
                QueueItemState::Completed,
                QueueItemState::Error,
                QueueItemState::Completed
            ]
        );
        assert!(driver.queue().items()[1].error.is_some());
    }

    #[test]
    fn test_clear_pending_discards_queued() {
        let mut driver = PipelineDriver::new(ProcessingOptions::default());
        driver.submit("{}", "a.json");
        driver.submit("{}", "b.json");

        assert_eq!(driver.clear_pending(), 2);
        assert_eq!(driver.drain(), 0);
        assert!(driver.entries().is_empty());
    }

    #[test]
    fn test_merge_selected_and_export() {
        let mut driver = PipelineDriver::new(ProcessingOptions::default());
        driver.submit(r#"{"a": 1, "b": {"c": 2}}"#, "one.json");
        driver.submit(r#"{"a": 3, "b": {"c": 4}}"#, "two.json");
        driver.drain();

        let ids: Vec<String> = driver.entries().iter().map(|e| e.id.clone()).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();

        let dataset_id = driver.merge_selected(&id_refs, None).unwrap().id.clone();
        let dataset = driver.dataset(&dataset_id).unwrap();
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.fields, ["a", "b.c", "_source", "_timestamp"]);

        let output = driver.export(&dataset_id, "csv").unwrap();
        assert!(output.content.starts_with("a,b.c,_source,_timestamp\n"));

        let err = driver.export(&dataset_id, "parquet").unwrap_err();
        assert!(err.to_string().contains("parquet"));
    }

    #[test]
    fn test_merge_with_assistant_uses_valid_output() {
        let merged = json!([{"a": 1, "note": "merged"}]);
        let mut driver = PipelineDriver::new(ProcessingOptions::default())
            .with_assistant(Box::new(MockAssistant::merging(merged)));
        driver.submit(r#"{"a": 1}"#, "one.json");
        driver.drain();

        let ids: Vec<String> = driver.entries().iter().map(|e| e.id.clone()).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();

        let dataset = driver.merge_with_assistant(&id_refs, "combine").unwrap();
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0]["note"], json!("merged"));
        assert!(dataset.name.starts_with("Assisted merge"));
    }

    #[test]
    fn test_merge_with_assistant_falls_back() {
        let mut driver = PipelineDriver::new(ProcessingOptions::default())
            .with_assistant(Box::new(MockAssistant::failing()));
        driver.submit(r#"{"a": 1}"#, "one.json");
        driver.drain();

        let ids: Vec<String> = driver.entries().iter().map(|e| e.id.clone()).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();

        // assistant fails, deterministic merge still produces the dataset
        let dataset = driver.merge_with_assistant(&id_refs, "combine").unwrap();
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0]["_source"], json!("one.json"));
    }

    #[test]
    fn test_analyze_entry_deterministic_fallback() {
        let mut driver = PipelineDriver::new(ProcessingOptions::default());
        driver.submit(r#"{"a": 1, "b": 2}"#, "one.json");
        driver.drain();

        let id = driver.entries()[0].id.clone();
        driver.analyze_entry(&id).unwrap();

        let analysis = driver.entry(&id).unwrap().analysis.as_ref().unwrap();
        assert_eq!(analysis["source"], json!("deterministic"));
        assert!(analysis["summary"].as_str().unwrap().contains("2 leaf fields"));
    }

    #[test]
    fn test_analyze_unknown_entry() {
        let mut driver = PipelineDriver::new(ProcessingOptions::default());
        assert!(matches!(
            driver.analyze_entry("missing"),
            Err(PipelineError::UnknownEntry(_))
        ));
    }

    #[test]
    fn test_remove_and_reset() {
        let mut driver = PipelineDriver::new(ProcessingOptions::default());
        driver.submit(r#"{"a": 1}"#, "one.json");
        driver.drain();

        let id = driver.entries()[0].id.clone();
        assert!(driver.remove_entry(&id));
        assert!(!driver.remove_entry(&id));

        driver.submit(r#"{"a": 1}"#, "two.json");
        driver.drain();
        driver.reset();
        assert!(driver.entries().is_empty());
        assert!(driver.datasets().is_empty());
        assert!(driver.queue().items().is_empty());
    }
}
