//! Node configuration types.

use std::fmt;
use std::net::SocketAddr;

use crate::logging::LogFormat;

/// Environment variable holding the token-signing secret.
pub const TOKEN_SECRET_ENV: &str = "TALLY_TOKEN_SECRET";

/// Configuration for the Tally node.
#[derive(Clone)]
pub struct Config {
    /// HTTP listen address.
    pub addr: SocketAddr,
    /// Log level.
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// Password hashing time-cost.
    pub hash_cost: u32,
    /// Token-signing secret; `None` when the deployment never supplied one.
    pub token_secret: Option<String>,
}

impl Config {
    /// Resolves the signing secret from an explicit value or the
    /// environment.
    pub fn resolve_secret(explicit: Option<String>) -> Option<String> {
        explicit
            .or_else(|| std::env::var(TOKEN_SECRET_ENV).ok())
            .filter(|s| !s.is_empty())
    }
}

// Hand-written so the secret cannot leak through debug logging.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("hash_cost", &self.hash_cost)
            .field(
                "token_secret",
                &self.token_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
