//! External system integrations.
//!
//! The backend REST API and the minting provider are consumed through
//! traits so the library can be exercised against counting fakes in tests.

pub mod backend;
pub mod mint;

pub use backend::{BackendClient, BackendError, ContentApi, HealthStatus};
pub use mint::{MintError, MintOptions, MintProvider, StubMintProvider};
