//! Core data model: entries, datasets, and processing options

mod dataset;
mod entry;
mod options;

pub use dataset::{FlatRecord, MergedDataset, SOURCE_KEY, TIMESTAMP_KEY, is_reserved_key};
pub use entry::{Entry, EntryStatus};
pub use options::{ProcessingOptions, ProcessingOptionsBuilder};
