//! Export functionality
//!
//! Serializes a merged dataset into one of several target representations:
//! - `json` - pretty-printed array of records
//! - `jsonl` - line-delimited compact records
//! - `csv` - tabular text with a first-seen header row
//! - `huggingface` - dataset-with-schema wrapper
//! - `rag` - content/metadata-split document format
//!
//! The core performs no I/O: the returned triple is handed to the download
//! collaborator.

mod huggingface;
mod rag;
mod records;
mod tabular;

use std::str::FromStr;

use thiserror::Error;

use crate::models::MergedDataset;

/// Error during export
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The requested format name is not recognized
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Record serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON array
    Json,
    /// Line-delimited JSON
    Jsonl,
    /// Comma-separated values
    Csv,
    /// Dataset-with-schema wrapper
    HuggingFace,
    /// Content/metadata-split documents
    Rag,
}

impl ExportFormat {
    /// Canonical format name
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Jsonl => "jsonl",
            ExportFormat::Csv => "csv",
            ExportFormat::HuggingFace => "huggingface",
            ExportFormat::Rag => "rag",
        }
    }

    /// MIME type for the exported content
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json | ExportFormat::HuggingFace | ExportFormat::Rag => {
                "application/json"
            }
            ExportFormat::Jsonl => "application/x-ndjson",
            ExportFormat::Csv => "text/csv",
        }
    }

    fn suggested_filename(&self, dataset_name: &str) -> String {
        let slug = slugify(dataset_name);
        match self {
            ExportFormat::Json => format!("{slug}.json"),
            ExportFormat::Jsonl => format!("{slug}.jsonl"),
            ExportFormat::Csv => format!("{slug}.csv"),
            ExportFormat::HuggingFace => format!("{slug}-huggingface.json"),
            ExportFormat::Rag => format!("{slug}-rag.json"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "jsonl" => Ok(ExportFormat::Jsonl),
            "csv" => Ok(ExportFormat::Csv),
            "huggingface" => Ok(ExportFormat::HuggingFace),
            "rag" => Ok(ExportFormat::Rag),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Result of an export operation, ready for the download collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutput {
    /// Serialized dataset content
    pub content: String,
    /// Suggested download filename
    pub suggested_filename: String,
    /// MIME type of the content
    pub mime_type: String,
}

/// Export a dataset in the given format
pub fn export_dataset(
    dataset: &MergedDataset,
    format: ExportFormat,
) -> Result<ExportOutput, ExportError> {
    let content = match format {
        ExportFormat::Json => records::to_json(dataset)?,
        ExportFormat::Jsonl => records::to_jsonl(dataset)?,
        ExportFormat::Csv => tabular::to_csv(dataset)?,
        ExportFormat::HuggingFace => huggingface::to_huggingface(dataset)?,
        ExportFormat::Rag => rag::to_rag(dataset)?,
    };

    Ok(ExportOutput {
        content,
        suggested_filename: format.suggested_filename(&dataset.name),
        mime_type: format.mime_type().to_string(),
    })
}

/// Export a dataset by format name; unknown names fail with
/// [`ExportError::UnsupportedFormat`]
pub fn export_dataset_as(
    dataset: &MergedDataset,
    format_name: &str,
) -> Result<ExportOutput, ExportError> {
    let format = format_name.parse::<ExportFormat>()?;
    export_dataset(dataset, format)
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "dataset".to_string()
    } else {
        slug.to_string()
    }
}
