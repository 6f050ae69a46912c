//! Data structures for the content library.
//!
//! - `content`: content records and their identity keys
//! - `mint`: the minting subrecord and provider results
//! - `filter`: user-selected view filters

pub mod content;
pub mod filter;
pub mod mint;

pub use content::{ContentKey, ContentRecord};
pub use filter::{ContentTypeFilter, FilterState, NftStatusFilter};
pub use mint::{MintRecord, MintResult};
