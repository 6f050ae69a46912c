//! licenz - content library reconciler with NFT mint tracking
//!
//! Merges content records from a remote backend listing, a caller-supplied
//! in-memory list, and a locally persisted NFT-status map into one
//! deduplicated, order-stable list, then applies user-selected filters.
//!
//! # Architecture
//!
//! - Identity: a record is keyed by its id, falling back to its content
//!   hash; records with neither are dropped from reconciliation
//! - Minting fields are sticky: once populated from any source they are
//!   never overwritten by an absent value from a later source
//! - Read paths degrade (a failing source becomes empty); write paths fail
//!   the single triggering operation
//!
//! # Modules
//!
//! - `adapters`: External system integrations (backend API, mint provider)
//! - `library`: Reconciliation logic (merge, filters, manager, status store)
//! - `domain`: Data structures (ContentRecord, MintRecord, filters)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # List the library, minted records only
//! licenz list --nft-status minted
//!
//! # Mint a record (stubbed provider)
//! licenz mint <key>
//!
//! # Check backend health
//! licenz status
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use adapters::{BackendClient, ContentApi, MintOptions, MintProvider, StubMintProvider};
pub use domain::{
    ContentKey, ContentRecord, ContentTypeFilter, FilterState, MintRecord, MintResult,
    NftStatusFilter,
};
pub use library::{
    apply_filters, merge, ContentManager, JsonStatusStore, MemoryStatusStore, NftStatusMap,
    NftStatusStore,
};
