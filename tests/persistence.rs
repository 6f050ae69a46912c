//! Mint-result persistence tests
//!
//! Verifies that a recorded mint result survives a full reload (a fresh
//! manager over the same on-disk store), that malformed persisted data
//! degrades to an empty map, and that recording is idempotent.

use async_trait::async_trait;
use tempfile::TempDir;

use licenz::adapters::{BackendError, ContentApi, HealthStatus};
use licenz::{
    ContentKey, ContentManager, ContentRecord, JsonStatusStore, MintResult, NftStatusStore,
};

/// Minimal fake backend returning a fixed listing
struct FixedApi {
    records: Vec<ContentRecord>,
}

#[async_trait]
impl ContentApi for FixedApi {
    async fn list_content(&self) -> Result<Vec<ContentRecord>, BackendError> {
        Ok(self.records.clone())
    }

    async fn delete_content(&self, _id: &str) -> Result<(), BackendError> {
        Ok(())
    }

    async fn health(&self) -> Result<HealthStatus, BackendError> {
        Ok(HealthStatus {
            status: "ok".to_string(),
        })
    }
}

fn record(id: &str) -> ContentRecord {
    ContentRecord::with_id(id)
}

fn mint_result(token: &str, tx: &str) -> MintResult {
    MintResult {
        token_id: Some(token.to_string()),
        transaction_hash: Some(tx.to_string()),
        ..MintResult::default()
    }
}

#[tokio::test]
async fn mint_result_survives_reload() {
    let temp = TempDir::new().unwrap();
    let status_path = temp.path().join("nft-status.json");
    let key = ContentKey::new("x");

    // First session: record a mint result
    {
        let manager = ContentManager::new(
            FixedApi {
                records: vec![record("x")],
            },
            JsonStatusStore::new(status_path.clone()),
        );
        manager.refresh().await.unwrap();
        manager
            .record_mint_result(&key, &mint_result("99", "0xabc"))
            .await
            .unwrap();

        let held = manager.content();
        assert!(held[0].mint.minted);
    }

    // Simulated reload: fresh manager, same persisted store, bare backend
    // record with no mint fields of its own
    let manager = ContentManager::new(
        FixedApi {
            records: vec![record("x")],
        },
        JsonStatusStore::new(status_path),
    );
    manager.refresh().await.unwrap();

    let content = manager.content();
    assert_eq!(content.len(), 1);
    assert!(content[0].mint.minted);
    assert_eq!(content[0].mint.token_id.as_deref(), Some("99"));
    assert_eq!(content[0].mint.transaction_hash.as_deref(), Some("0xabc"));
}

#[tokio::test]
async fn persisted_entry_is_loadable_directly() {
    let temp = TempDir::new().unwrap();
    let status_path = temp.path().join("nft-status.json");
    let key = ContentKey::new("x");

    let manager = ContentManager::new(
        FixedApi {
            records: vec![record("x")],
        },
        JsonStatusStore::new(status_path.clone()),
    );
    manager.refresh().await.unwrap();
    manager
        .record_mint_result(&key, &mint_result("99", "0xabc"))
        .await
        .unwrap();

    let store = JsonStatusStore::new(status_path);
    let map = store.load().await.unwrap();
    let entry = map.get(&key).unwrap();
    assert!(entry.minted);
    assert_eq!(entry.token_id.as_deref(), Some("99"));
}

#[tokio::test]
async fn malformed_status_file_degrades_to_empty() {
    let temp = TempDir::new().unwrap();
    let status_path = temp.path().join("nft-status.json");
    std::fs::write(&status_path, "{ this is not json").unwrap();

    let manager = ContentManager::new(
        FixedApi {
            records: vec![record("a")],
        },
        JsonStatusStore::new(status_path),
    );

    // Refresh completes; the unreadable store contributes nothing
    assert!(manager.refresh().await.unwrap());

    let content = manager.content();
    assert_eq!(content.len(), 1);
    assert!(!content[0].mint.minted);
}

#[tokio::test]
async fn record_mint_result_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let status_path = temp.path().join("nft-status.json");
    let key = ContentKey::new("x");

    let manager = ContentManager::new(
        FixedApi {
            records: vec![record("x")],
        },
        JsonStatusStore::new(status_path),
    );
    manager.refresh().await.unwrap();

    let result = mint_result("99", "0xabc");
    manager.record_mint_result(&key, &result).await.unwrap();
    let first = manager.content();

    manager.record_mint_result(&key, &result).await.unwrap();
    let second = manager.content();

    assert_eq!(first.len(), second.len());
    assert_eq!(first[0].mint.minted, second[0].mint.minted);
    assert_eq!(first[0].mint.token_id, second[0].mint.token_id);
    assert_eq!(
        first[0].mint.transaction_hash,
        second[0].mint.transaction_hash
    );
}
