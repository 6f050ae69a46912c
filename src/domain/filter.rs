//! User-selected view filters.
//!
//! Filter state is ephemeral: it belongs to the caller (a view or a CLI
//! invocation), never to the library itself.

use serde::{Deserialize, Serialize};

/// Filter on mint status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NftStatusFilter {
    /// No filtering on this axis
    #[default]
    All,
    /// Keep only minted records
    Minted,
    /// Keep only records not yet minted
    NotMinted,
}

/// Filter on how the content came to exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentTypeFilter {
    /// No filtering on this axis
    #[default]
    All,
    /// Records with both a prompt and a model
    AiGenerated,
    /// Records with neither a prompt nor a model
    Uploaded,
}

/// Combined filter selection; axes compose by logical AND
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub nft_status: NftStatusFilter,
    #[serde(default)]
    pub content_type: ContentTypeFilter,
}

impl FilterState {
    /// The identity filter (both axes set to All)
    pub fn all() -> Self {
        Self::default()
    }
}

impl std::str::FromStr for NftStatusFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "minted" => Ok(Self::Minted),
            "not-minted" | "unminted" => Ok(Self::NotMinted),
            _ => anyhow::bail!("Unknown NFT status filter: {}", s),
        }
    }
}

impl std::str::FromStr for ContentTypeFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "ai-generated" | "generated" | "ai" => Ok(Self::AiGenerated),
            "uploaded" => Ok(Self::Uploaded),
            _ => anyhow::bail!("Unknown content type filter: {}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let filters = FilterState::default();
        assert_eq!(filters.nft_status, NftStatusFilter::All);
        assert_eq!(filters.content_type, ContentTypeFilter::All);
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!(
            "minted".parse::<NftStatusFilter>().unwrap(),
            NftStatusFilter::Minted
        );
        assert_eq!(
            "not-minted".parse::<NftStatusFilter>().unwrap(),
            NftStatusFilter::NotMinted
        );
        assert_eq!(
            "ai-generated".parse::<ContentTypeFilter>().unwrap(),
            ContentTypeFilter::AiGenerated
        );
        assert!("bogus".parse::<NftStatusFilter>().is_err());
    }
}
