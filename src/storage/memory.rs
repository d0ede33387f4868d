//! In-memory storage backend

use std::sync::Mutex;

use async_trait::async_trait;

use super::{StorageBackend, StorageError};
use crate::models::{Entry, MergedDataset};

/// Process-local storage backend, primarily for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStorageBackend {
    entries: Mutex<Vec<Entry>>,
    datasets: Mutex<Vec<MergedDataset>>,
}

impl MemoryStorageBackend {
    /// Create an empty in-memory backend
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorageBackend {
    async fn load_entries(&self) -> Result<Vec<Entry>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(entries.clone())
    }

    async fn save_entries(&self, entries: &[Entry]) -> Result<(), StorageError> {
        let mut stored = self
            .entries
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        *stored = entries.to_vec();
        Ok(())
    }

    async fn load_datasets(&self) -> Result<Vec<MergedDataset>, StorageError> {
        let datasets = self
            .datasets
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(datasets.clone())
    }

    async fn save_datasets(&self, datasets: &[MergedDataset]) -> Result<(), StorageError> {
        let mut stored = self
            .datasets
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        *stored = datasets.to_vec();
        Ok(())
    }
}
