//! Authentication error types.

use thiserror::Error;

use tally_store::StoreError;

/// Errors that can occur during authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No bearer token was presented.
    #[error("no token provided")]
    MissingToken,

    /// The token is malformed, tampered with, or expired. Clients are not
    /// told which.
    #[error("invalid token")]
    InvalidToken,

    /// Unknown phone number / password combination. Deliberately generic so
    /// callers cannot probe which phone numbers are registered.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The token-signing secret was never configured. A deployment
    /// precondition, surfaced per-request rather than crashing the process.
    #[error("token signing secret is not configured")]
    MissingSecret,

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// Storage failure while resolving credentials.
    #[error(transparent)]
    Store(#[from] StoreError),
}
