//! # Tally Authentication
//!
//! Authentication primitives and the unified login-or-register flow:
//!
//! - **Password Hashing**: salted, cost-parameterized one-way hashes with
//!   constant-time verification
//! - **Bearer Tokens**: compact MAC-signed claims carrying a user id and
//!   expiry, verified statelessly on every protected request
//! - **Auth Resolver**: the decision procedure that logs a known phone
//!   number in or transparently registers an unseen one
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tally_auth::{AuthOutcome, AuthResolver, PasswordHasher, TokenSigner};
//! use tally_store::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//! let hasher = PasswordHasher::with_cost(1).unwrap();
//! let signer = TokenSigner::new("server secret");
//! let resolver = AuthResolver::new(store, hasher, Some(signer));
//!
//! // First call registers, second call logs in.
//! let first = resolver.authenticate("+15551234", "hunter2").unwrap();
//! assert!(matches!(first, AuthOutcome::Registered { .. }));
//!
//! let second = resolver.authenticate("+15551234", "hunter2").unwrap();
//! let AuthOutcome::LoggedIn { token } = second else {
//!     panic!("expected login");
//! };
//! assert!(resolver.verify_token(&token).is_ok());
//! ```

mod error;
mod password;
mod resolver;
mod token;

pub use error::AuthError;
pub use password::{PasswordHasher, DEFAULT_HASH_COST};
pub use resolver::{AuthOutcome, AuthResolver};
pub use token::{TokenSigner, DEFAULT_TTL_SECS};

/// Result type for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;
