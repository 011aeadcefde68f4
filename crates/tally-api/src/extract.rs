//! Bearer-token authorization gate.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use tally_auth::AuthError;
use tally_types::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller identity.
///
/// Extracting this verifies the `Authorization: Bearer <token>` header and
/// resolves the user id the token asserts. Ledger handlers receive it as an
/// argument, so an operation without a verified identity cannot be routed.
/// The user id always comes from the token, never from the request body.
#[derive(Debug, Clone, Copy)]
pub struct Identity(pub UserId);

impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        // The header must be exactly `Bearer <token>`.
        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let user_id = state.resolver.verify_token(token)?;
        Ok(Identity(user_id))
    }
}
