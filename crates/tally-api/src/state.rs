//! Application state shared across handlers.

use std::sync::Arc;

use tally_auth::AuthResolver;
use tally_store::LedgerStore;

/// State threaded through the router.
///
/// Holds the store seam and the auth resolver; both are read-only after
/// startup, so requests share them without further coordination.
#[derive(Clone)]
pub struct AppState {
    /// Ledger store.
    pub store: Arc<dyn LedgerStore>,
    /// Login-or-register resolver; also owns token verification.
    pub resolver: Arc<AuthResolver>,
}

impl AppState {
    /// Creates the application state.
    pub fn new(store: Arc<dyn LedgerStore>, resolver: Arc<AuthResolver>) -> Self {
        Self { store, resolver }
    }
}
