//! API router configuration.

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Creates the API router.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/auth", post(handlers::authenticate))
        .route("/api/expenses", post(handlers::create_expense))
        .route("/api/expenses/history", get(handlers::expense_history))
        .route("/api/expenses/{id}", delete(handlers::delete_expense))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}
