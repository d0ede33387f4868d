//! Error types for pipeline operations

use thiserror::Error;

use crate::ai::AiError;
use crate::export::ExportError;
use crate::merge::MergeError;

/// Errors surfaced by the pipeline driver
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Merge failed as a whole (per-entry failures are isolated instead)
    #[error("Merge error: {0}")]
    Merge(#[from] MergeError),

    /// Export failed
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Assistant call failed
    #[error("Assistant error: {0}")]
    Assistant(#[from] AiError),

    /// An assistant-backed operation was requested without an assistant
    #[error("No assistant configured")]
    AssistantUnavailable,

    /// No entry with the given id
    #[error("Unknown entry: {0}")]
    UnknownEntry(String),

    /// No dataset with the given id
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_error_wrapping() {
        let err: PipelineError = MergeError::EmptyInput.into();
        assert!(err.to_string().contains("No entries selected"));
    }

    #[test]
    fn test_export_error_wrapping() {
        let err: PipelineError = ExportError::UnsupportedFormat("xml".to_string()).into();
        assert!(err.to_string().contains("xml"));
    }
}
