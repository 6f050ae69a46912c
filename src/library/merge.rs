//! Multi-source content reconciliation.
//!
//! Records arrive from the backend listing, from a caller-supplied in-memory
//! list, and from the persisted NFT-status map. `merge` walks the first two
//! in order (backend first, so backend establishes first-seen precedence),
//! deduplicates by identity key, and backfills minting fields from the
//! status map. Output order is first appearance of each distinct key.
//!
//! Minting fields are sticky: once populated from any source they are never
//! overwritten by an absent/false value from a later source. Plain fields
//! follow the opposite rule, later-seen values override earlier ones.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::warn;

use crate::domain::{ContentKey, ContentRecord, MintRecord};

/// Per-field precedence for minting subrecord fields: existing value if
/// present, else the incoming record's, else the persisted entry's.
pub fn resolve_field<T: Clone>(
    existing: Option<&T>,
    incoming: Option<&T>,
    persisted: Option<&T>,
) -> Option<T> {
    existing.or(incoming).or(persisted).cloned()
}

/// Resolve a full minting subrecord with `resolve_field` applied uniformly.
/// The `minted` flag uses the boolean analogue (any truthy source wins).
pub fn resolve_mint(
    existing: &MintRecord,
    incoming: &MintRecord,
    persisted: Option<&MintRecord>,
) -> MintRecord {
    MintRecord {
        minted: existing.minted
            || incoming.minted
            || persisted.map(|p| p.minted).unwrap_or(false),
        token_id: resolve_field(
            existing.token_id.as_ref(),
            incoming.token_id.as_ref(),
            persisted.and_then(|p| p.token_id.as_ref()),
        ),
        contract_address: resolve_field(
            existing.contract_address.as_ref(),
            incoming.contract_address.as_ref(),
            persisted.and_then(|p| p.contract_address.as_ref()),
        ),
        transaction_hash: resolve_field(
            existing.transaction_hash.as_ref(),
            incoming.transaction_hash.as_ref(),
            persisted.and_then(|p| p.transaction_hash.as_ref()),
        ),
        chain: resolve_field(
            existing.chain.as_ref(),
            incoming.chain.as_ref(),
            persisted.and_then(|p| p.chain.as_ref()),
        ),
        method: resolve_field(
            existing.method.as_ref(),
            incoming.method.as_ref(),
            persisted.and_then(|p| p.method.as_ref()),
        ),
        minted_at: resolve_field(
            existing.minted_at.as_ref(),
            incoming.minted_at.as_ref(),
            persisted.and_then(|p| p.minted_at.as_ref()),
        ),
        provider_payload: resolve_field(
            existing.provider_payload.as_ref(),
            incoming.provider_payload.as_ref(),
            persisted.and_then(|p| p.provider_payload.as_ref()),
        ),
    }
}

/// Overlay plain (non-minting) fields: the later-seen record's value wins
/// where it is present, the earlier value is kept where it is absent.
fn overlay_plain(existing: &ContentRecord, incoming: &ContentRecord) -> ContentRecord {
    ContentRecord {
        id: incoming.id.clone().or_else(|| existing.id.clone()),
        content_hash: incoming
            .content_hash
            .clone()
            .or_else(|| existing.content_hash.clone()),
        prompt: incoming.prompt.clone().or_else(|| existing.prompt.clone()),
        style: incoming.style.clone().or_else(|| existing.style.clone()),
        model: incoming.model.clone().or_else(|| existing.model.clone()),
        image_data: incoming
            .image_data
            .clone()
            .or_else(|| existing.image_data.clone()),
        image_url: incoming
            .image_url
            .clone()
            .or_else(|| existing.image_url.clone()),
        created_at: incoming.created_at,
        wallet_address: incoming
            .wallet_address
            .clone()
            .or_else(|| existing.wallet_address.clone()),
        mint: MintRecord::default(), // resolved separately by the caller
    }
}

/// Merge content from the backend listing, a caller-supplied list, and the
/// persisted NFT-status map into one deduplicated, order-stable list.
///
/// Records lacking both `id` and `content_hash` cannot be addressed by any
/// later operation (mint, delete, status lookup), so they are dropped here
/// with a warning rather than given a synthetic key.
pub fn merge(
    backend: &[ContentRecord],
    parent: &[ContentRecord],
    status: &HashMap<ContentKey, MintRecord>,
) -> Vec<ContentRecord> {
    let mut order: Vec<ContentKey> = Vec::new();
    let mut winners: HashMap<ContentKey, ContentRecord> = HashMap::new();
    let mut dropped = 0usize;

    for record in backend.iter().chain(parent.iter()) {
        let Some(key) = record.key() else {
            dropped += 1;
            continue;
        };

        let persisted = status.get(&key);

        match winners.entry(key.clone()) {
            Entry::Vacant(slot) => {
                let mut winner = record.clone();
                winner.mint = resolve_mint(&MintRecord::default(), &record.mint, persisted);
                order.push(key);
                slot.insert(winner);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                let mint = resolve_mint(&existing.mint, &record.mint, persisted);
                let mut merged = overlay_plain(existing, record);
                merged.mint = mint;
                *existing = merged;
            }
        }
    }

    if dropped > 0 {
        warn!(dropped, "Dropped records with no usable identity key");
    }

    order
        .into_iter()
        .filter_map(|key| winners.remove(&key))
        .collect()
}
