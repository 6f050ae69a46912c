//! Minting subrecord and provider results.
//!
//! The subrecord is all-or-nothing in practice: it is populated exactly once,
//! when a mint operation succeeds, and from then on its fields must never be
//! clobbered by an absent/false value from another source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a successful mint, as carried on a content record and as
/// persisted in the NFT-status store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MintRecord {
    /// Whether the content has been minted
    #[serde(rename = "nft_minted", default)]
    pub minted: bool,

    /// Token id assigned by the contract
    #[serde(rename = "nft_token_id", default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,

    /// Contract the token lives on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,

    /// Mint transaction hash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,

    /// Chain name reported by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,

    /// How the mint was performed (provider identifier)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// When the mint completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minted_at: Option<DateTime<Utc>>,

    /// Raw provider response, kept for display/debugging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_payload: Option<serde_json::Value>,
}

impl MintRecord {
    /// Build the persisted entry for a successful mint result
    pub fn from_result(result: &MintResult, minted_at: DateTime<Utc>) -> Self {
        Self {
            minted: true,
            token_id: result.token_id.clone(),
            contract_address: result.contract_address.clone(),
            transaction_hash: result.transaction_hash.clone(),
            chain: result.chain.clone(),
            method: result.method.clone(),
            minted_at: Some(minted_at),
            provider_payload: result.provider_payload.clone(),
        }
    }

    /// True when no field carries information
    pub fn is_empty(&self) -> bool {
        !self.minted
            && self.token_id.is_none()
            && self.contract_address.is_none()
            && self.transaction_hash.is_none()
            && self.chain.is_none()
            && self.method.is_none()
            && self.minted_at.is_none()
            && self.provider_payload.is_none()
    }
}

/// What a mint provider returns on success
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MintResult {
    pub token_id: Option<String>,
    pub transaction_hash: Option<String>,
    pub contract_address: Option<String>,
    pub chain: Option<String>,
    pub method: Option<String>,
    pub provider_payload: Option<serde_json::Value>,
}
