//! File system storage backend
//!
//! Persists entries and datasets as JSON files under a base directory.
//! Missing files read as empty collections so a fresh directory works
//! without setup.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::debug;

use super::{StorageBackend, StorageError};
use crate::models::{Entry, MergedDataset};

const ENTRIES_FILE: &str = "entries.json";
const DATASETS_FILE: &str = "datasets.json";

/// File system storage backend
pub struct FileSystemStorageBackend {
    base_path: PathBuf,
}

impl FileSystemStorageBackend {
    /// Create a backend rooted at the given directory
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    async fn read_collection<T: DeserializeOwned>(
        &self,
        file_name: &str,
    ) -> Result<Vec<T>, StorageError> {
        let path = self.base_path.join(file_name);
        if !path.exists() {
            debug!(path = %path.display(), "storage file missing, starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| StorageError::Io(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn write_collection<T: Serialize>(
        &self,
        file_name: &str,
        items: &[T],
    ) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        let path = self.base_path.join(file_name);
        let content = serde_json::to_string_pretty(items)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&path, content)
            .await
            .map_err(|e| StorageError::Io(format!("{}: {}", path.display(), e)))
    }
}

#[async_trait]
impl StorageBackend for FileSystemStorageBackend {
    async fn load_entries(&self) -> Result<Vec<Entry>, StorageError> {
        self.read_collection(ENTRIES_FILE).await
    }

    async fn save_entries(&self, entries: &[Entry]) -> Result<(), StorageError> {
        self.write_collection(ENTRIES_FILE, entries).await
    }

    async fn load_datasets(&self) -> Result<Vec<MergedDataset>, StorageError> {
        self.read_collection(DATASETS_FILE).await
    }

    async fn save_datasets(&self, datasets: &[MergedDataset]) -> Result<(), StorageError> {
        self.write_collection(DATASETS_FILE, datasets).await
    }
}
