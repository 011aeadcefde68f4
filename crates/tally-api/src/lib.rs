//! # Tally API
//!
//! HTTP API for the Tally personal-finance service.
//!
//! This crate wires the authentication resolver and the ledger store into
//! an axum router:
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/api/auth` | Unified login-or-register, returns a bearer token |
//! | POST | `/api/expenses` | Record an expense for the authenticated user |
//! | GET | `/api/expenses/history` | List the caller's expenses, newest first |
//! | DELETE | `/api/expenses/{id}` | Delete one of the caller's expenses |
//! | GET | `/api/health` | Health check |
//!
//! All `/api/expenses` routes require an `Authorization: Bearer <token>`
//! header; the [`Identity`] extractor verifies it and hands the resolved
//! user id to the handler as an argument.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod extract;
mod handlers;
mod middleware;
mod router;
mod state;
mod types;

pub use error::ApiError;
pub use extract::Identity;
pub use router::create_router;
pub use state::AppState;
pub use types::{AuthRequest, AuthResponse, CreateExpenseRequest, HistoryQuery};
