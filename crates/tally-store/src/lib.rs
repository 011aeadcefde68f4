//! Ledger storage for Tally.
//!
//! This crate defines the storage seam between the HTTP layer and whatever
//! engine holds the authoritative data: user accounts keyed by phone number
//! and owner-scoped expense rows. Handlers and the auth resolver only ever
//! talk to the [`LedgerStore`] trait, so they can be exercised against
//! synthetic stores in tests; [`MemoryStore`] is the bundled backend.

mod error;
mod memory;
mod traits;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use traits::{LedgerStore, UserLookup};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
