//! Minting provider integration.
//!
//! The real provider is out of scope: minting stays stubbed.
//! `StubMintProvider` fabricates provider-shaped results (token id,
//! 0x-prefixed transaction hash) so the rest of the library can treat the
//! result as opaque.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{ContentRecord, MintResult};

/// Errors from a mint attempt
#[derive(Debug, Error)]
pub enum MintError {
    #[error("No image data available for minting")]
    NoImage,

    #[error("Mint provider error: {0}")]
    Provider(String),
}

/// Options for a mint request
#[derive(Debug, Clone, Default)]
pub struct MintOptions {
    /// Recipient wallet address
    pub recipient: Option<String>,
    /// Target chain name
    pub chain: Option<String>,
}

/// Asynchronous minting provider
#[async_trait]
pub trait MintProvider: Send + Sync {
    /// Mint the given record, returning the provider's result or failing
    /// with a provider-specific error.
    async fn mint(
        &self,
        record: &ContentRecord,
        options: &MintOptions,
    ) -> Result<MintResult, MintError>;
}

/// Stubbed provider producing fake but well-shaped results
pub struct StubMintProvider {
    contract_address: String,
    default_chain: String,
}

impl Default for StubMintProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StubMintProvider {
    pub fn new() -> Self {
        Self {
            contract_address: "0x0000000000000000000000000000000000000000".to_string(),
            default_chain: "sepolia".to_string(),
        }
    }

    /// Override the reported contract address
    pub fn with_contract_address(mut self, address: impl Into<String>) -> Self {
        self.contract_address = address.into();
        self
    }

    /// Override the default chain
    pub fn with_chain(mut self, chain: impl Into<String>) -> Self {
        self.default_chain = chain.into();
        self
    }

    /// Fabricate a transaction hash: 0x + 64 hex chars over a fresh nonce
    fn fake_transaction_hash(nonce: Uuid) -> String {
        let mut hasher = Sha256::new();
        hasher.update(nonce.as_bytes());
        format!("0x{}", hex::encode(hasher.finalize()))
    }
}

#[async_trait]
impl MintProvider for StubMintProvider {
    async fn mint(
        &self,
        record: &ContentRecord,
        options: &MintOptions,
    ) -> Result<MintResult, MintError> {
        if record.image_data.is_none() && record.image_url.is_none() {
            return Err(MintError::NoImage);
        }

        let nonce = Uuid::new_v4();
        let transaction_hash = Self::fake_transaction_hash(nonce);
        // Short numeric-looking token id from the tail of the hash
        let token_id = u16::from_be_bytes([nonce.as_bytes()[14], nonce.as_bytes()[15]]);

        let chain = options
            .chain
            .clone()
            .unwrap_or_else(|| self.default_chain.clone());

        Ok(MintResult {
            token_id: Some(token_id.to_string()),
            transaction_hash: Some(transaction_hash),
            contract_address: Some(self.contract_address.clone()),
            chain: Some(chain),
            method: Some("stub".to_string()),
            provider_payload: Some(serde_json::json!({
                "provider": "stub",
                "nonce": nonce.to_string(),
                "recipient": options.recipient,
            })),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_mint_result_shape() {
        let provider = StubMintProvider::new().with_chain("sepolia");

        let mut record = ContentRecord::with_id("a");
        record.image_url = Some("http://example.com/a.png".to_string());

        let result = provider.mint(&record, &MintOptions::default()).await.unwrap();

        let hash = result.transaction_hash.unwrap();
        assert!(hash.starts_with("0x"));
        assert_eq!(hash.len(), 66); // 0x + 64 hex chars
        assert!(result.token_id.is_some());
        assert_eq!(result.chain.as_deref(), Some("sepolia"));
        assert_eq!(result.method.as_deref(), Some("stub"));
    }

    #[tokio::test]
    async fn test_mint_requires_image() {
        let provider = StubMintProvider::new();
        let record = ContentRecord::with_id("a");

        let err = provider.mint(&record, &MintOptions::default()).await;
        assert!(matches!(err, Err(MintError::NoImage)));
    }
}
