//! Ingested document entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Outcome classification for a processed entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryStatus {
    /// Parsed directly or with targeted syntax fixes only
    Repaired,
    /// Aggressive (relaxed-parse) repair or assistant fallback was used;
    /// the result should be verified manually
    RepairedWithWarning,
    /// All repair stages exhausted, text remains unparseable
    Failed,
}

impl EntryStatus {
    /// Human-readable status label
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Repaired => "repaired",
            EntryStatus::RepairedWithWarning => "repaired-with-warning",
            EntryStatus::Failed => "failed",
        }
    }

    /// Whether this entry can contribute records to a merge
    pub fn is_usable(&self) -> bool {
        !matches!(self, EntryStatus::Failed)
    }
}

/// One repaired, parsed, field-extracted document.
///
/// Immutable once created, except for the optional `analysis` enrichment
/// which is additive and never mutates existing fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Unique identifier, stable for the entry's lifetime
    pub id: String,
    /// Human-readable origin label (filename or manual-entry marker)
    pub source_name: String,
    /// Original unmodified input text
    pub raw_text: String,
    /// Text after repair ran; equals `raw_text` if no repair was needed
    pub repaired_text: String,
    /// Parsed, canonicalized JSON value
    pub canonical_value: Value,
    /// Ordered set of leaf field paths derived from `canonical_value`
    pub field_paths: Vec<String>,
    /// Description of the repair strategy that succeeded, or the terminal
    /// error if all strategies failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_note: Option<String>,
    /// Outcome classification
    pub status: EntryStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Later-attached analysis result (additive enrichment)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Value>,
}

impl Entry {
    /// Create an entry for a successfully parsed document
    pub fn new(
        source_name: impl Into<String>,
        raw_text: impl Into<String>,
        repaired_text: impl Into<String>,
        canonical_value: Value,
        field_paths: Vec<String>,
        repair_note: Option<String>,
        status: EntryStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source_name: source_name.into(),
            raw_text: raw_text.into(),
            repaired_text: repaired_text.into(),
            canonical_value,
            field_paths,
            repair_note,
            status,
            created_at: Utc::now(),
            analysis: None,
        }
    }

    /// Create an entry for a document that could not be repaired
    pub fn failed(
        source_name: impl Into<String>,
        raw_text: impl Into<String>,
        repair_note: Option<String>,
    ) -> Self {
        let raw_text = raw_text.into();
        Self {
            id: Uuid::new_v4().to_string(),
            source_name: source_name.into(),
            repaired_text: raw_text.clone(),
            raw_text,
            canonical_value: Value::Null,
            field_paths: Vec::new(),
            repair_note,
            status: EntryStatus::Failed,
            created_at: Utc::now(),
            analysis: None,
        }
    }

    /// Attach an analysis result (additive, does not touch other fields)
    pub fn attach_analysis(&mut self, analysis: Value) {
        self.analysis = Some(analysis);
    }
}
