//! API error types and status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use tally_auth::AuthError;
use tally_store::StoreError;

/// Errors that can occur in the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// Authentication or authorization failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Resource absent or not owned by the caller.
    #[error("{0}")]
    NotFound(String),

    /// Storage failure outside the auth flow.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

/// A specialized Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Auth(err) => auth_response(err),
            Self::Storage(err) => storage_response(&err),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

fn auth_response(err: AuthError) -> (StatusCode, String) {
    match err {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "No token provided".to_string()),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
        AuthError::InvalidCredentials => {
            (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
        }
        AuthError::MissingSecret => {
            tracing::error!("token signing secret is not configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error".to_string(),
            )
        }
        AuthError::Hash(detail) => {
            tracing::error!(detail = %detail, "password hashing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
        AuthError::Store(err) => storage_response(&err),
    }
}

/// Collapses storage failures into generic client messages. The underlying
/// cause goes to the operator log only.
fn storage_response(err: &StoreError) -> (StatusCode, String) {
    tracing::error!(error = %err, "storage failure");

    let message = match err {
        StoreError::Unavailable(_) => "Database connection failed",
        // A uniqueness violation escaping the resolver's retry path.
        StoreError::PhoneNumberExists => {
            return (
                StatusCode::CONFLICT,
                "Phone number already registered".to_string(),
            )
        }
        StoreError::Backend(_) => "Internal server error",
    };

    (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
}
