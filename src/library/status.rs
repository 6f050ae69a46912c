//! Persisted NFT-status repository.
//!
//! Mint outcomes must survive a full reload even though the in-memory
//! content list does not, so they are written through a small repository
//! interface keyed by content identity. Entries are created exactly when a
//! mint succeeds and are never deleted automatically.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use crate::domain::{ContentKey, MintRecord};

/// Mapping from identity key to persisted mint outcome
pub type NftStatusMap = HashMap<ContentKey, MintRecord>;

/// Repository for the persisted NFT-status map.
///
/// Injected into the manager so tests can run without a real persistence
/// layer. Read failures are degraded by the caller; write failures are
/// surfaced.
#[async_trait]
pub trait NftStatusStore: Send + Sync {
    /// Load the full status map. A store with nothing persisted yet must
    /// return an empty map, not an error.
    async fn load(&self) -> Result<NftStatusMap>;

    /// Replace the persisted status map.
    async fn save(&self, map: &NftStatusMap) -> Result<()>;
}

/// JSON-file-backed store at a well-known path
pub struct JsonStatusStore {
    path: PathBuf,
}

impl JsonStatusStore {
    /// Create a store backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create a store at the configured default location
    pub fn from_config() -> Result<Self> {
        Ok(Self::new(crate::config::status_path()?))
    }

    /// The file this store reads and writes
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl NftStatusStore for JsonStatusStore {
    async fn load(&self) -> Result<NftStatusMap> {
        if !self.path.exists() {
            return Ok(NftStatusMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read NFT status: {}", self.path.display()))?;

        serde_json::from_str(&content).context("Failed to parse NFT status JSON")
    }

    async fn save(&self, map: &NftStatusMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write NFT status: {}", self.path.display()))?;

        Ok(())
    }
}

/// In-memory store for tests and embedding without persistence
#[derive(Default)]
pub struct MemoryStatusStore {
    map: Mutex<NftStatusMap>,
}

impl MemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NftStatusStore for MemoryStatusStore {
    async fn load(&self) -> Result<NftStatusMap> {
        Ok(self.map.lock().unwrap().clone())
    }

    async fn save(&self, map: &NftStatusMap) -> Result<()> {
        *self.map.lock().unwrap() = map.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let store = JsonStatusStore::new(temp.path().join("nft-status.json"));

        let map = store.load().await.unwrap();
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = JsonStatusStore::new(temp.path().join("nft-status.json"));

        let mut map = NftStatusMap::new();
        map.insert(
            ContentKey::new("x"),
            MintRecord {
                minted: true,
                token_id: Some("99".to_string()),
                ..MintRecord::default()
            },
        );

        store.save(&map).await.unwrap();

        let loaded = store.load().await.unwrap();
        let entry = loaded.get(&ContentKey::new("x")).unwrap();
        assert!(entry.minted);
        assert_eq!(entry.token_id.as_deref(), Some("99"));
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nft-status.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonStatusStore::new(path);
        assert!(store.load().await.is_err());
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStatusStore::new();

        let mut map = NftStatusMap::new();
        map.insert(ContentKey::new("a"), MintRecord::default());
        store.save(&map).await.unwrap();

        assert_eq!(store.load().await.unwrap().len(), 1);
    }
}
