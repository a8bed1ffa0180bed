//! Tracing setup for the server binary.
//!
//! `RUST_LOG` controls the filter; without it the server logs at `info`.
//! Per-request lines come from the HTTP trace layer at `debug`, e.g.
//! `RUST_LOG=info,tower_http=debug`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,sqlx=warn";

pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
}
