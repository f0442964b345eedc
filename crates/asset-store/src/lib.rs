//! # Asset Store
//!
//! Interface for uploading generated binary assets (images) and deleting
//! them per-folder when a session goes away. Production deployments back
//! this with a CDN; the in-memory implementation serves tests and local
//! development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// Service for storing binary assets under folder/name paths.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Stores `bytes` as `folder/name` and returns a public URL.
    async fn store(&self, bytes: &[u8], name: &str, folder: &str) -> Result<String, anyhow::Error>;

    /// Deletes every asset in `folder`; returns the number removed.
    async fn delete_folder(&self, folder: &str) -> Result<u64, anyhow::Error>;
}

/// In-memory asset store for testing and development.
///
/// Returned URLs use the `mem://` scheme; they are stable keys, not
/// fetchable addresses.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssetStore {
    folders: Arc<RwLock<HashMap<String, HashMap<String, Vec<u8>>>>>,
}

impl InMemoryAssetStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            folders: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the stored bytes for `folder/name`, if present.
    pub async fn get(&self, folder: &str, name: &str) -> Option<Vec<u8>> {
        let folders = self.folders.read().await;
        folders.get(folder).and_then(|f| f.get(name)).cloned()
    }

    /// Returns the number of assets in `folder`.
    pub async fn folder_len(&self, folder: &str) -> usize {
        let folders = self.folders.read().await;
        folders.get(folder).map(|f| f.len()).unwrap_or(0)
    }
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn store(&self, bytes: &[u8], name: &str, folder: &str) -> Result<String, anyhow::Error> {
        let mut folders = self.folders.write().await;
        folders
            .entry(folder.to_string())
            .or_default()
            .insert(name.to_string(), bytes.to_vec());

        let url = format!("mem://{}/{}", folder, name);
        debug!(folder, name, size = bytes.len(), "Stored asset");
        Ok(url)
    }

    async fn delete_folder(&self, folder: &str) -> Result<u64, anyhow::Error> {
        let mut folders = self.folders.write().await;
        let removed = folders.remove(folder).map(|f| f.len()).unwrap_or(0);
        debug!(folder, removed, "Deleted asset folder");
        Ok(removed as u64)
    }
}

/// Filesystem asset store for local deployments.
///
/// Assets land under `root/folder/name`; returned URLs use the `file://`
/// scheme. Folder deletion removes the whole directory.
#[derive(Debug, Clone)]
pub struct LocalDirAssetStore {
    root: std::path::PathBuf,
}

impl LocalDirAssetStore {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AssetStore for LocalDirAssetStore {
    async fn store(&self, bytes: &[u8], name: &str, folder: &str) -> Result<String, anyhow::Error> {
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(name);
        tokio::fs::write(&path, bytes).await?;

        debug!(path = %path.display(), size = bytes.len(), "Stored asset");
        Ok(format!("file://{}", path.display()))
    }

    async fn delete_folder(&self, folder: &str) -> Result<u64, anyhow::Error> {
        let dir = self.root.join(folder);
        if !dir.exists() {
            return Ok(0);
        }
        let mut removed = 0u64;
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                removed += 1;
            }
        }
        tokio::fs::remove_dir_all(&dir).await?;
        debug!(folder, removed, "Deleted asset folder");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_returns_url_and_keeps_bytes() {
        let store = InMemoryAssetStore::new();
        let url = store.store(b"png-bytes", "img.png", "session-1").await.unwrap();
        assert_eq!(url, "mem://session-1/img.png");
        assert_eq!(
            store.get("session-1", "img.png").await.as_deref(),
            Some(b"png-bytes".as_slice())
        );
    }

    #[tokio::test]
    async fn test_delete_folder_removes_only_that_folder() {
        let store = InMemoryAssetStore::new();
        store.store(b"a", "a.png", "s1").await.unwrap();
        store.store(b"b", "b.png", "s1").await.unwrap();
        store.store(b"c", "c.png", "s2").await.unwrap();

        let removed = store.delete_folder("s1").await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.folder_len("s1").await, 0);
        assert_eq!(store.folder_len("s2").await, 1);
    }

    #[tokio::test]
    async fn test_delete_missing_folder_is_zero() {
        let store = InMemoryAssetStore::new();
        assert_eq!(store.delete_folder("nope").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_local_dir_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDirAssetStore::new(dir.path());

        let url = store.store(b"png-bytes", "img.png", "s1").await.unwrap();
        assert!(url.starts_with("file://"));
        let on_disk = tokio::fs::read(dir.path().join("s1").join("img.png"))
            .await
            .unwrap();
        assert_eq!(on_disk, b"png-bytes");

        let removed = store.delete_folder("s1").await.unwrap();
        assert_eq!(removed, 1);
        assert!(!dir.path().join("s1").exists());
        assert_eq!(store.delete_folder("s1").await.unwrap(), 0);
    }
}
