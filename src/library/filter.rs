//! Filtering of merged content lists.
//!
//! Pure projection: no state, safe to re-invoke on every render of the
//! caller. The two axes are independent predicates composed by AND.

use crate::domain::{ContentRecord, ContentTypeFilter, FilterState, NftStatusFilter};

/// Apply the user's filter selection to a merged list.
pub fn apply_filters(list: &[ContentRecord], filters: &FilterState) -> Vec<ContentRecord> {
    list.iter()
        .filter(|record| matches_nft_status(record, filters.nft_status))
        .filter(|record| matches_content_type(record, filters.content_type))
        .cloned()
        .collect()
}

fn matches_nft_status(record: &ContentRecord, filter: NftStatusFilter) -> bool {
    match filter {
        NftStatusFilter::All => true,
        NftStatusFilter::Minted => record.mint.minted,
        NftStatusFilter::NotMinted => !record.mint.minted,
    }
}

fn matches_content_type(record: &ContentRecord, filter: ContentTypeFilter) -> bool {
    match filter {
        ContentTypeFilter::All => true,
        ContentTypeFilter::AiGenerated => record.is_ai_generated(),
        ContentTypeFilter::Uploaded => record.is_uploaded(),
    }
}
