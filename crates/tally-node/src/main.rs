//! Tally Node - personal-finance API server.
//!
//! This is the main entry point for running a Tally server: it wires the
//! in-memory ledger store, the auth resolver, and the HTTP router together
//! and serves them on the configured address.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use tally_api::{create_router, AppState};
use tally_auth::{AuthResolver, PasswordHasher, TokenSigner, DEFAULT_HASH_COST};
use tally_store::{LedgerStore, MemoryStore};

mod config;
mod logging;

use config::Config;
use logging::LogFormat;

/// Tally Node - phone-authenticated expense ledger
#[derive(Parser, Debug)]
#[command(name = "tally-node")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// HTTP listen address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log format (pretty, json)
    #[arg(long, default_value = "pretty")]
    log_format: String,

    /// Password hashing time-cost
    #[arg(long, default_value_t = DEFAULT_HASH_COST)]
    hash_cost: u32,

    /// Token-signing secret; falls back to the TALLY_TOKEN_SECRET
    /// environment variable
    #[arg(long)]
    token_secret: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config {
        addr: args.addr,
        log_level: args.log_level,
        log_format: LogFormat::parse(&args.log_format),
        hash_cost: args.hash_cost,
        token_secret: Config::resolve_secret(args.token_secret),
    };

    logging::init_logging(&config.log_level, config.log_format);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Tally node");
    tracing::info!(
        addr = %config.addr,
        hash_cost = config.hash_cost,
        "Node configuration"
    );

    let store: Arc<dyn LedgerStore> = Arc::new(MemoryStore::new());
    store
        .ping()
        .context("ledger store connectivity check failed")?;
    tracing::info!("Ledger store connection successful");

    let signer = match &config.token_secret {
        Some(secret) => Some(TokenSigner::new(secret.as_bytes().to_vec())),
        None => {
            tracing::warn!(
                env = config::TOKEN_SECRET_ENV,
                "no token-signing secret configured; authentication requests \
                 will fail until one is supplied"
            );
            None
        }
    };

    let hasher =
        PasswordHasher::with_cost(config.hash_cost).context("invalid password hashing cost")?;
    let resolver = Arc::new(AuthResolver::new(store.clone(), hasher, signer));

    let app = create_router(AppState::new(store, resolver));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    tracing::info!(addr = %config.addr, "Tally node listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
