//! JSON Dataset Core - repair, normalization, and dataset merge pipeline
//!
//! Provides a deterministic transformation chain over loosely-structured or
//! malformed JSON text:
//! - Staged syntax repair (targeted fixes, then relaxed parsing)
//! - Canonicalization and leaf field extraction
//! - Flattening of nested structures into tabular records
//! - Per-field schema inference across heterogeneous records
//! - Merging of many documents into one exportable dataset
//!
//! Presentation, file ingestion, persistence, and generative-AI calls are
//! collaborators at the boundary: the [`storage`] and [`ai`] modules define
//! their contracts, and the AI path is a strictly optional fallback on top
//! of the deterministic core.
//!
//! ## Example
//!
//! ```rust,ignore
//! use json_dataset_core::{PipelineDriver, ProcessingOptions};
//!
//! let mut driver = PipelineDriver::new(ProcessingOptions::default());
//! driver.submit("{name: 'Bob', age: 30,}", "manual entry");
//! driver.drain();
//!
//! let ids: Vec<&str> = driver.entries().iter().map(|e| e.id.as_str()).collect();
//! let dataset_id = driver.merge_selected(&ids, None)?.id.clone();
//! let output = driver.export(&dataset_id, "csv")?;
//! println!("{}", output.content);
//! ```

pub mod ai;
pub mod export;
pub mod inference;
pub mod merge;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod repair;
pub mod storage;

// Re-export commonly used types
pub use ai::{AiAssistant, AiError};
#[cfg(feature = "ai-online")]
pub use ai::OllamaAssistant;
pub use export::{ExportError, ExportFormat, ExportOutput, export_dataset, export_dataset_as};
pub use inference::{FieldType, SchemaInferencer, infer_schema};
pub use merge::{MergeError, assemble_dataset, merge_entries};
pub use models::{
    Entry, EntryStatus, FlatRecord, MergedDataset, ProcessingOptions, SOURCE_KEY, TIMESTAMP_KEY,
};
pub use normalize::{canonicalize, extract_fields, flatten};
pub use pipeline::{PipelineDriver, PipelineError, ProcessingQueue, process_text};
pub use repair::{RepairOutcome, repair};
#[cfg(feature = "native-fs")]
pub use storage::filesystem::FileSystemStorageBackend;
pub use storage::memory::MemoryStorageBackend;
pub use storage::{StorageBackend, StorageError};
