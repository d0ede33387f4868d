//! Storage backend abstraction
//!
//! Defines the StorageBackend trait and implementations for different
//! storage systems:
//! - MemoryStorageBackend: in-process storage (tests, ephemeral sessions)
//! - FileSystemStorageBackend: native file system (feature `native-fs`)
//!
//! The persisted shape is exactly the serde form of the core models. Read
//! failures are non-fatal by contract: callers log them and start empty.

use async_trait::async_trait;

use crate::models::{Entry, MergedDataset};

pub mod memory;

#[cfg(feature = "native-fs")]
pub mod filesystem;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Trait for storage backends holding entries and merged datasets
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Load all stored entries
    async fn load_entries(&self) -> Result<Vec<Entry>, StorageError>;

    /// Persist the full entry collection
    async fn save_entries(&self, entries: &[Entry]) -> Result<(), StorageError>;

    /// Load all stored datasets
    async fn load_datasets(&self) -> Result<Vec<MergedDataset>, StorageError>;

    /// Persist the full dataset collection
    async fn save_datasets(&self, datasets: &[MergedDataset]) -> Result<(), StorageError>;
}
