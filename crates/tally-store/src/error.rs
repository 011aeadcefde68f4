//! Storage error types.

use thiserror::Error;

/// Errors that can occur during storage operations.
///
/// The variants separate the causes an operator needs to distinguish
/// (uniqueness violations, unreachable backend) from everything else; the
/// HTTP layer collapses them into generic client messages.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An insert would duplicate the unique phone-number key.
    #[error("phone number already registered")]
    PhoneNumberExists,

    /// The backend could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}
