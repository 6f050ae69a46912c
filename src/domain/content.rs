//! Content records and their identity keys.
//!
//! A record coming from the backend or from an embedding application may
//! carry an explicit `id`, a content hash, both, or neither. The identity
//! key used for deduplication is the id when present, else the hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::mint::MintRecord;

/// Identity key of a content record (`id`, or content hash as fallback)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentKey(String);

impl ContentKey {
    /// Wrap an existing identifier
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Derive a content hash key from raw image bytes (SHA256[0:16])
    pub fn from_image_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let result = hasher.finalize();
        Self(hex::encode(&result[..8]))
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One generated artifact as known to the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Primary identifier (backend-assigned)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Content-addressed fingerprint, secondary identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,

    /// Generation prompt (absent for uploaded content)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Generation style preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    /// Model that produced the image (absent for uploaded content)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Inline image payload (base64)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,

    /// Remote image location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// When the record was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Owning wallet, used for coarse scoping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,

    /// Minting outcome fields
    #[serde(flatten)]
    pub mint: MintRecord,
}

impl ContentRecord {
    /// Create a bare record with an explicit id
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::empty()
        }
    }

    /// Create a record keyed by content hash only
    pub fn with_content_hash(hash: impl Into<String>) -> Self {
        Self {
            content_hash: Some(hash.into()),
            ..Self::empty()
        }
    }

    fn empty() -> Self {
        Self {
            id: None,
            content_hash: None,
            prompt: None,
            style: None,
            model: None,
            image_data: None,
            image_url: None,
            created_at: Utc::now(),
            wallet_address: None,
            mint: MintRecord::default(),
        }
    }

    /// Identity key: id if present, else content hash, else none
    pub fn key(&self) -> Option<ContentKey> {
        self.id
            .as_deref()
            .or(self.content_hash.as_deref())
            .map(ContentKey::new)
    }

    /// Whether the record was produced by an AI generation (prompt + model)
    pub fn is_ai_generated(&self) -> bool {
        self.prompt.is_some() && self.model.is_some()
    }

    /// Whether the record was uploaded directly (no prompt, no model)
    pub fn is_uploaded(&self) -> bool {
        self.prompt.is_none() && self.model.is_none()
    }
}
