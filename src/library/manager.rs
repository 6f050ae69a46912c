//! Content manager: owns the merged list and coordinates the sources.
//!
//! Read paths (backend fetch, status load) degrade to empty on failure and
//! never propagate past this layer. Write paths (mint, delete, status save)
//! fail the single triggering operation and leave the held list unchanged.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::adapters::{ContentApi, MintOptions, MintProvider};
use crate::domain::{ContentKey, ContentRecord, FilterState, MintRecord, MintResult};

use super::filter::apply_filters;
use super::merge::{merge, resolve_mint};
use super::status::NftStatusStore;

/// Clears the refresh latch when dropped, so the latch cannot stick if the
/// fetch fails or the future is abandoned.
struct RefreshGuard<'a>(&'a AtomicBool);

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct ManagerState {
    /// List supplied by the embedding application (may be empty)
    parent: Vec<ContentRecord>,
    /// The merged, deduplicated list currently held
    content: Vec<ContentRecord>,
}

/// Reconciles content from the backend listing, a caller-supplied list, and
/// the persisted NFT-status store.
///
/// The state mutex is only locked between awaits; the at-most-one-in-flight
/// latch on `refresh` is the sole concurrency policy.
pub struct ContentManager<A: ContentApi, S: NftStatusStore> {
    api: A,
    store: S,
    wallet_address: Option<String>,
    state: Mutex<ManagerState>,
    refreshing: AtomicBool,
}

impl<A: ContentApi, S: NftStatusStore> ContentManager<A, S> {
    /// Create a manager over the given backend API and status store
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            wallet_address: None,
            state: Mutex::new(ManagerState::default()),
            refreshing: AtomicBool::new(false),
        }
    }

    /// Scope backend listings to this wallet. Records with no wallet field
    /// always pass (legacy data predates wallet attribution). Scoping only,
    /// not an access-control boundary.
    pub fn with_wallet_address(mut self, address: impl Into<String>) -> Self {
        self.wallet_address = Some(address.into());
        self
    }

    /// Replace the caller-supplied list. Takes effect on the next `refresh`.
    pub fn set_parent(&self, list: Vec<ContentRecord>) {
        self.state.lock().unwrap().parent = list;
    }

    /// Snapshot of the currently held merged list
    pub fn content(&self) -> Vec<ContentRecord> {
        self.state.lock().unwrap().content.clone()
    }

    /// Snapshot of the held list with filters applied
    pub fn filtered(&self, filters: &FilterState) -> Vec<ContentRecord> {
        apply_filters(&self.state.lock().unwrap().content, filters)
    }

    /// Fetch the backend listing, load the persisted status map, merge with
    /// the caller-supplied list, and replace the held list.
    ///
    /// At most one refresh runs at a time: a call while another is in
    /// flight returns `Ok(false)` without fetching (dropped, not queued).
    /// A failing fetch or status load degrades that source to empty.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<bool> {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Refresh already in flight, skipping");
            return Ok(false);
        }
        let _guard = RefreshGuard(&self.refreshing);

        let backend = match self.api.list_content().await {
            Ok(list) => self.scope_to_wallet(list),
            Err(e) => {
                warn!(error = %e, "Backend listing unavailable, continuing without it");
                Vec::new()
            }
        };

        let status = match self.store.load().await {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "NFT status store unreadable, continuing without it");
                Default::default()
            }
        };

        let mut state = self.state.lock().unwrap();
        let merged = merge(&backend, &state.parent, &status);
        state.content = merged;
        info!(count = state.content.len(), "Content list refreshed");

        Ok(true)
    }

    /// Mint a record via the given provider and record the outcome.
    #[instrument(skip(self, provider, options), fields(key = %key))]
    pub async fn mint(
        &self,
        key: &ContentKey,
        provider: &dyn MintProvider,
        options: &MintOptions,
    ) -> Result<MintResult> {
        let record = self
            .find(key)
            .with_context(|| format!("No content with key {}", key))?;

        let result = provider
            .mint(&record, options)
            .await
            .context("Mint request failed")?;

        self.record_mint_result(key, &result).await?;
        info!(token_id = ?result.token_id, "Mint completed");

        Ok(result)
    }

    /// Overlay a successful mint result onto the record at `key` and persist
    /// it so the outcome survives a reload. Idempotent beyond the timestamp.
    pub async fn record_mint_result(&self, key: &ContentKey, result: &MintResult) -> Result<()> {
        let entry = MintRecord::from_result(result, Utc::now());

        {
            let mut state = self.state.lock().unwrap();
            match state.content.iter_mut().find(|r| r.key().as_ref() == Some(key)) {
                Some(record) => {
                    // Result fields win; existing fields only fill gaps
                    record.mint = resolve_mint(&entry, &record.mint, None);
                }
                None => debug!(%key, "Mint result for a key not currently held"),
            }
        }

        // Read-merge-write; last writer wins, which is acceptable for this
        // best-effort store.
        let mut status = match self.store.load().await {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "NFT status store unreadable, rewriting from scratch");
                Default::default()
            }
        };
        status.insert(key.clone(), entry);

        self.store
            .save(&status)
            .await
            .context("Failed to persist NFT status")
    }

    /// Delete a record via the backend and drop it from the held list.
    /// Any backend failure is surfaced unchanged; nothing is removed
    /// optimistically and nothing is retried.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn delete(&self, key: &ContentKey) -> Result<()> {
        let record = self
            .find(key)
            .with_context(|| format!("No content with key {}", key))?;

        let id = record
            .id
            .as_deref()
            .with_context(|| format!("Content {} has no backend id to delete", key))?;

        self.api
            .delete_content(id)
            .await
            .context("Delete request failed")?;

        let mut state = self.state.lock().unwrap();
        state.content.retain(|r| r.key().as_ref() != Some(key));
        info!("Content deleted");

        Ok(())
    }

    fn find(&self, key: &ContentKey) -> Option<ContentRecord> {
        self.state
            .lock()
            .unwrap()
            .content
            .iter()
            .find(|r| r.key().as_ref() == Some(key))
            .cloned()
    }

    fn scope_to_wallet(&self, list: Vec<ContentRecord>) -> Vec<ContentRecord> {
        let Some(address) = self.wallet_address.as_deref() else {
            return list;
        };

        list.into_iter()
            .filter(|record| match record.wallet_address.as_deref() {
                Some(owner) => owner == address,
                None => true, // unattributed records are always visible
            })
            .collect()
    }
}
