//! Request and response types.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth`.
///
/// Fields are optional so presence can be validated explicitly with a 400
/// rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    /// Phone number used as the login key.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Plaintext password.
    #[serde(default)]
    pub password: Option<String>,
}

/// Body of a successful `POST /api/auth` response.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Bearer token for subsequent requests.
    pub token: String,
}

/// Body of `POST /api/expenses`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExpenseRequest {
    /// Amount spent. Required.
    #[serde(default)]
    pub amount: Option<f64>,
    /// Expense date: RFC 3339, or `YYYY-MM-DD` for midnight UTC. Required.
    #[serde(default)]
    pub date: Option<String>,
    /// Spending category. Required.
    #[serde(default)]
    pub category: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query parameters of `GET /api/expenses/history`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    /// Restrict the listing to one category.
    #[serde(default)]
    pub category: Option<String>,
}
