//! Content library reconciliation.
//!
//! Merges content records from three sources into one deduplicated,
//! order-stable list:
//!
//! - the backend content listing (fetched over HTTP)
//! - a caller-supplied in-memory list
//! - the persisted NFT-status map (mint outcomes keyed by identity)
//!
//! `merge` and `apply_filters` are pure; `ContentManager` wraps them with
//! the I/O bracketing, the at-most-one-in-flight refresh policy, and mint
//! result persistence.

pub mod filter;
pub mod manager;
pub mod merge;
pub mod status;

pub use filter::apply_filters;
pub use manager::ContentManager;
pub use merge::{merge, resolve_field, resolve_mint};
pub use status::{JsonStatusStore, MemoryStatusStore, NftStatusMap, NftStatusStore};
