//! API request handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use tally_auth::AuthOutcome;
use tally_types::{Expense, ExpenseId, NewExpense};

use crate::error::{ApiError, Result};
use crate::extract::Identity;
use crate::state::AppState;
use crate::types::{AuthRequest, AuthResponse, CreateExpenseRequest, HistoryQuery};

// ==================== Auth ====================

/// Unified authentication: logs a known phone number in, registers an
/// unseen one. Either way the response carries a fresh bearer token.
pub async fn authenticate(
    State(state): State<AppState>,
    Json(req): Json<AuthRequest>,
) -> Result<impl IntoResponse> {
    let phone_number = req.phone_number.as_deref().unwrap_or("");
    let password = req.password.as_deref().unwrap_or("");

    if phone_number.is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "Phone number and password are required".to_string(),
        ));
    }

    match state.resolver.authenticate(phone_number, password)? {
        AuthOutcome::LoggedIn { token } => {
            tracing::info!("login succeeded");
            Ok((
                StatusCode::OK,
                Json(AuthResponse {
                    message: "Login successful".to_string(),
                    token,
                }),
            ))
        }
        AuthOutcome::Registered { token } => {
            tracing::info!("new user registered");
            Ok((
                StatusCode::CREATED,
                Json(AuthResponse {
                    message: "User registered and logged in successfully".to_string(),
                    token,
                }),
            ))
        }
    }
}

// ==================== Expenses ====================

/// Records an expense for the authenticated user.
pub async fn create_expense(
    State(state): State<AppState>,
    identity: Identity,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<impl IntoResponse> {
    let missing = || ApiError::Validation("Missing required fields".to_string());

    let amount = req.amount.ok_or_else(missing)?;
    let raw_date = req.date.as_deref().filter(|d| !d.is_empty()).ok_or_else(missing)?;
    let category = req
        .category
        .filter(|c| !c.is_empty())
        .ok_or_else(missing)?;

    let date = parse_expense_date(raw_date)?;

    let expense = state.store.insert_expense(NewExpense {
        user_id: identity.0,
        amount,
        date,
        category,
        notes: req.notes,
    })?;

    Ok((StatusCode::CREATED, Json(expense)))
}

/// Lists the authenticated user's expenses, newest date first.
pub async fn expense_history(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Expense>>> {
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let rows = state.store.list_expenses(identity.0, category)?;
    Ok(Json(rows))
}

/// Deletes one of the authenticated user's expenses.
pub async fn delete_expense(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id: ExpenseId = id
        .parse()
        .map_err(|_| ApiError::Validation("Invalid expense ID".to_string()))?;

    // Check-then-delete keeps "not yours" and "not there" on the same 404
    // path. A concurrent delete of the same row just loses the race and
    // observes the 404 itself.
    if state.store.get_expense(id, identity.0)?.is_none() {
        return Err(ApiError::NotFound("Expense not found".to_string()));
    }

    state.store.delete_expense(id, identity.0)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_expense_date(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(DateTime::from_naive_utc_and_offset(
            date.and_time(NaiveTime::MIN),
            Utc,
        ));
    }

    Err(ApiError::Validation("Invalid expense date".to_string()))
}

// ==================== Health ====================

/// Health check handler.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expense_date_formats() {
        let bare = parse_expense_date("2024-01-01").unwrap();
        assert_eq!(bare.to_rfc3339(), "2024-01-01T00:00:00+00:00");

        let full = parse_expense_date("2024-01-01T15:30:00+02:00").unwrap();
        assert_eq!(full.to_rfc3339(), "2024-01-01T13:30:00+00:00");

        assert!(parse_expense_date("January 1st").is_err());
        assert!(parse_expense_date("2024-13-40").is_err());
        assert!(parse_expense_date("").is_err());
    }
}
