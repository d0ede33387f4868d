//! Pipeline driver
//!
//! Single owner of the processing queue and the entry/dataset collections.
//! All mutation goes through the driver: documents are submitted to the
//! queue, `drain()` pulls them through repair -> canonicalize -> extract one
//! at a time, and merges/exports operate on the stored collections.

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::ai::AiAssistant;
use crate::export::{ExportOutput, export_dataset_as};
use crate::merge::{assemble_dataset, merge_entries};
use crate::models::{Entry, EntryStatus, FlatRecord, MergedDataset, ProcessingOptions};
use crate::normalize::{canonicalize, extract_fields};
use crate::repair;
use crate::storage::{StorageBackend, StorageError};

use super::error::{PipelineError, PipelineResult};
use super::queue::ProcessingQueue;

/// Maximum number of input characters handed to the assistant for repair
pub const ASSIST_REPAIR_MAX_LENGTH: usize = 8_000;

/// Run one document through the full repair/normalize pipeline.
///
/// The deterministic repair stages always run first; the assistant is
/// consulted only after every deterministic stage has failed, and its
/// output is re-validated by a direct parse before being accepted.
pub fn process_text(
    text: &str,
    source_name: &str,
    options: &ProcessingOptions,
    assistant: Option<&dyn AiAssistant>,
) -> Entry {
    let outcome = repair::repair(text);

    match serde_json::from_str::<Value>(&outcome.text) {
        Ok(parsed) => {
            let status = if outcome.used_aggressive_repair {
                EntryStatus::RepairedWithWarning
            } else {
                EntryStatus::Repaired
            };
            build_entry(
                source_name,
                text,
                outcome.text,
                parsed,
                outcome.note,
                status,
                options,
            )
        }
        Err(_) => {
            if let Some(assistant) = assistant {
                match assistant.repair_text(text, ASSIST_REPAIR_MAX_LENGTH) {
                    Ok(candidate) => match serde_json::from_str::<Value>(&candidate) {
                        Ok(parsed) => {
                            info!(source = source_name, "assistant repair accepted");
                            return build_entry(
                                source_name,
                                text,
                                candidate,
                                parsed,
                                Some(
                                    "Recovered with assistant repair; verify the result manually"
                                        .to_string(),
                                ),
                                EntryStatus::RepairedWithWarning,
                                options,
                            );
                        }
                        Err(e) => {
                            warn!(source = source_name, error = %e, "assistant repair output rejected");
                        }
                    },
                    Err(e) => {
                        warn!(source = source_name, error = %e, "assistant repair failed");
                    }
                }
            }
            Entry::failed(source_name, text, outcome.note)
        }
    }
}

fn build_entry(
    source_name: &str,
    raw_text: &str,
    repaired_text: String,
    parsed: Value,
    note: Option<String>,
    status: EntryStatus,
    options: &ProcessingOptions,
) -> Entry {
    let canonical = if options.auto_format {
        canonicalize(&parsed, options)
    } else {
        parsed
    };
    let field_paths = extract_fields(&canonical, options);
    Entry::new(
        source_name,
        raw_text,
        repaired_text,
        canonical,
        field_paths,
        note,
        status,
    )
}

/// Coordinator owning the queue, entries, datasets, and assistant
pub struct PipelineDriver {
    options: ProcessingOptions,
    queue: ProcessingQueue,
    entries: Vec<Entry>,
    datasets: Vec<MergedDataset>,
    assistant: Option<Box<dyn AiAssistant>>,
}

impl PipelineDriver {
    /// Create a driver with the given options and no assistant
    pub fn new(options: ProcessingOptions) -> Self {
        Self {
            options,
            queue: ProcessingQueue::new(),
            entries: Vec::new(),
            datasets: Vec::new(),
            assistant: None,
        }
    }

    /// Attach an optional assistant
    pub fn with_assistant(mut self, assistant: Box<dyn AiAssistant>) -> Self {
        self.assistant = Some(assistant);
        self
    }

    /// The active processing options
    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    /// Submit raw text for processing; returns the queue item id
    pub fn submit(&mut self, text: impl Into<String>, source_name: impl Into<String>) -> String {
        self.queue.enqueue(text, source_name)
    }

    /// Drain the queue: process queued items one at a time until none
    /// remain. Per-item failures are recorded on the item and the failed
    /// entry; they never halt the loop. Returns the number processed.
    pub fn drain(&mut self) -> usize {
        let mut processed = 0;
        while let Some(index) = self.queue.begin_next() {
            let (text, source_name) = {
                let item = &self.queue.items()[index];
                (item.text.clone(), item.source_name.clone())
            };

            let entry = process_text(
                &text,
                &source_name,
                &self.options,
                self.assistant.as_deref(),
            );

            match entry.status {
                EntryStatus::Failed => {
                    let message = entry
                        .repair_note
                        .clone()
                        .unwrap_or_else(|| "unparseable input".to_string());
                    debug!(source = %source_name, "queue item failed");
                    self.queue.fail(index, message);
                }
                _ => self.queue.complete(index),
            }

            // failed entries are stored too, so their reason shows inline
            self.entries.push(entry);
            processed += 1;
        }
        processed
    }

    /// The queue, for status inspection
    pub fn queue(&self) -> &ProcessingQueue {
        &self.queue
    }

    /// Discard all queued items (an in-flight item still completes)
    pub fn clear_pending(&mut self) -> usize {
        self.queue.clear_pending()
    }

    /// All stored entries, in processing order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Look up an entry by id
    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Delete an entry; returns whether it existed
    pub fn remove_entry(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// All merged datasets
    pub fn datasets(&self) -> &[MergedDataset] {
        &self.datasets
    }

    /// Look up a dataset by id
    pub fn dataset(&self, id: &str) -> Option<&MergedDataset> {
        self.datasets.iter().find(|dataset| dataset.id == id)
    }

    /// Delete a dataset; returns whether it existed
    pub fn remove_dataset(&mut self, id: &str) -> bool {
        let before = self.datasets.len();
        self.datasets.retain(|dataset| dataset.id != id);
        self.datasets.len() != before
    }

    /// Full reset: queue, entries, and datasets
    pub fn reset(&mut self) {
        self.queue = ProcessingQueue::new();
        self.entries.clear();
        self.datasets.clear();
    }

    /// Merge the entries with the given ids into a new dataset. Unknown ids
    /// are skipped with a warning; the merge itself enforces the non-empty
    /// and no-failed-entries rules.
    pub fn merge_selected(
        &mut self,
        ids: &[&str],
        label: Option<&str>,
    ) -> PipelineResult<&MergedDataset> {
        let selected = self.select_entries(ids);
        let dataset = merge_entries(&selected, &self.options, label)?;
        self.datasets.push(dataset);
        Ok(self.datasets.last().unwrap())
    }

    /// Merge via the assistant, falling back to the deterministic merge on
    /// any failure or invalid output.
    pub fn merge_with_assistant(
        &mut self,
        ids: &[&str],
        instructions: &str,
    ) -> PipelineResult<&MergedDataset> {
        let selected = self.select_entries(ids);

        if let Some(assistant) = self.assistant.as_deref() {
            let documents: Vec<Value> = selected
                .iter()
                .filter(|entry| entry.status.is_usable())
                .map(|entry| entry.canonical_value.clone())
                .collect();

            if !documents.is_empty() {
                match assistant.merge_documents(&documents, instructions) {
                    Ok(value) => {
                        if let Some(records) = records_from_value(value) {
                            let name = format!("Assisted merge ({} sources)", documents.len());
                            let dataset = assemble_dataset(name, records, &self.options)?;
                            self.datasets.push(dataset);
                            return Ok(self.datasets.last().unwrap());
                        }
                        warn!("assistant merge output rejected; falling back");
                    }
                    Err(e) => {
                        warn!(error = %e, "assistant merge failed; falling back");
                    }
                }
            }
        }

        let dataset = merge_entries(&selected, &self.options, None)?;
        self.datasets.push(dataset);
        Ok(self.datasets.last().unwrap())
    }

    /// Attach a structural analysis to an entry. Uses the assistant when
    /// available, with a deterministic summary as the fallback. Additive:
    /// no other entry field changes.
    pub fn analyze_entry(&mut self, id: &str) -> PipelineResult<()> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| PipelineError::UnknownEntry(id.to_string()))?;

        let analysis = match self.assistant.as_deref() {
            Some(assistant) => {
                match assistant.analyze_structure(&self.entries[index].canonical_value) {
                    Ok(summary) => json!({"summary": summary, "source": "assistant"}),
                    Err(e) => {
                        warn!(error = %e, "assistant analysis failed; using deterministic summary");
                        deterministic_analysis(&self.entries[index])
                    }
                }
            }
            None => deterministic_analysis(&self.entries[index]),
        };

        self.entries[index].attach_analysis(analysis);
        Ok(())
    }

    /// Export a stored dataset by format name
    pub fn export(&self, dataset_id: &str, format_name: &str) -> PipelineResult<ExportOutput> {
        let dataset = self
            .dataset(dataset_id)
            .ok_or_else(|| PipelineError::UnknownDataset(dataset_id.to_string()))?;
        Ok(export_dataset_as(dataset, format_name)?)
    }

    /// Replace the collections from storage. Read failures are logged and
    /// treated as "start empty" - never fatal.
    pub async fn load_from(&mut self, storage: &dyn StorageBackend) {
        match storage.load_entries().await {
            Ok(entries) => self.entries = entries,
            Err(e) => {
                warn!(error = %e, "failed to load entries; starting empty");
                self.entries.clear();
            }
        }
        match storage.load_datasets().await {
            Ok(datasets) => self.datasets = datasets,
            Err(e) => {
                warn!(error = %e, "failed to load datasets; starting empty");
                self.datasets.clear();
            }
        }
    }

    /// Persist the collections to storage
    pub async fn persist_to(&self, storage: &dyn StorageBackend) -> Result<(), StorageError> {
        storage.save_entries(&self.entries).await?;
        storage.save_datasets(&self.datasets).await
    }

    fn select_entries(&self, ids: &[&str]) -> Vec<&Entry> {
        ids.iter()
            .filter_map(|id| {
                let found = self.entries.iter().find(|entry| entry.id == *id);
                if found.is_none() {
                    warn!(id = %id, "unknown entry id in selection; skipped");
                }
                found
            })
            .collect()
    }
}

fn deterministic_analysis(entry: &Entry) -> Value {
    json!({
        "summary": format!(
            "{} leaf fields; status {}",
            entry.field_paths.len(),
            entry.status.as_str()
        ),
        "source": "deterministic",
    })
}

/// Validate an assistant merge result: must be an array of objects
fn records_from_value(value: Value) -> Option<Vec<FlatRecord>> {
    let Value::Array(items) = value else {
        return None;
    };
    let mut records = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Object(map) => records.push(map),
            _ => return None,
        }
    }
    Some(records)
}
