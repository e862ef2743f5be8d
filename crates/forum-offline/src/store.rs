//! FileStore trait abstraction for locally queued attachment files.
//!
//! Implementations:
//! - `InMemoryFileStore` - For testing
//! - Platform stores in the embedding application (device storage)
//!
//! Paths are folder paths produced by a `FolderLayout`; the store decides how
//! files are physically kept under them.

use crate::model::LocalFile;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Folder not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Store error: {0}")]
    Other(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage for files waiting to be uploaded.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait FileStore: Send + Sync {
    /// List the files stored in a folder.
    async fn list_stored_files(&self, path: &str) -> Result<Vec<LocalFile>>;

    /// Store files in a folder, replacing whatever it held before.
    /// Returns the number of files stored.
    async fn store_files_to_upload(&self, path: &str, files: &[LocalFile]) -> Result<usize>;

    /// Remove a folder and its contents.
    async fn remove_dir(&self, path: &str) -> Result<()>;
}

/// In-memory file store for testing
pub struct InMemoryFileStore {
    folders: RwLock<HashMap<String, Vec<LocalFile>>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self {
            folders: RwLock::new(HashMap::new()),
        }
    }

    /// Check if a folder exists
    pub fn contains(&self, path: &str) -> bool {
        let path = Self::normalize_path(path);
        self.folders.read().unwrap().contains_key(&path)
    }

    /// Number of folders currently held
    pub fn folder_count(&self) -> usize {
        self.folders.read().unwrap().len()
    }

    fn normalize_path(path: &str) -> String {
        path.trim_matches('/').to_string()
    }
}

impl Default for InMemoryFileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl FileStore for InMemoryFileStore {
    async fn list_stored_files(&self, path: &str) -> Result<Vec<LocalFile>> {
        let path = Self::normalize_path(path);
        let folders = self.folders.read().unwrap();
        folders
            .get(&path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path))
    }

    async fn store_files_to_upload(&self, path: &str, files: &[LocalFile]) -> Result<usize> {
        let path = Self::normalize_path(path);

        // Files are moved into the folder, so their path changes
        let stored: Vec<LocalFile> = files
            .iter()
            .map(|file| LocalFile {
                name: file.name.clone(),
                path: format!("{}/{}", path, file.name),
                size: file.size,
            })
            .collect();
        let count = stored.len();

        let mut folders = self.folders.write().unwrap();
        folders.insert(path, stored);
        Ok(count)
    }

    async fn remove_dir(&self, path: &str) -> Result<()> {
        let path = Self::normalize_path(path);
        let mut folders = self.folders.write().unwrap();
        match folders.remove(&path) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(path)),
        }
    }
}

// Implement FileStore for Arc<T> where T: FileStore
// This allows tests to keep a handle on the store they hand to a manager
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<T: FileStore> FileStore for std::sync::Arc<T> {
    async fn list_stored_files(&self, path: &str) -> Result<Vec<LocalFile>> {
        (**self).list_stored_files(path).await
    }

    async fn store_files_to_upload(&self, path: &str, files: &[LocalFile]) -> Result<usize> {
        (**self).store_files_to_upload(path, files).await
    }

    async fn remove_dir(&self, path: &str) -> Result<()> {
        (**self).remove_dir(path).await
    }
}
