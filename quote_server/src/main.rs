//! Quote Service — HTTP server answering `GET /quote` with the current USD-BRL bid.
//!
//! For every request the service fetches the quote from the upstream pricing API
//! (200 ms budget), tries to append it to the SQLite store (10 ms budget, logged
//! only) and replies with `{"bid": "..."}`. A failed fetch yields a server error.
//!
//! Usage example (CLI):
//! ```bash
//! quote_server --listen 0.0.0.0:8080 --database-url sqlite://quotes.db
//! ```
//!
//! The storage pool is opened once at start and closed after the server has
//! drained on Ctrl+C.
#![warn(missing_docs)]
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use quote_common::{QuoteError, Result};
use quote_server::args::Args;
use quote_server::{QuoteService, SqliteStore, UpstreamClient, create_router};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();

    let store = Arc::new(SqliteStore::initialize(&args.database_url).await?);
    info!("Database initialized: {}", args.database_url);

    let provider = UpstreamClient::new(&args.upstream_url)?;
    let config = args.service_config();
    info!(
        "Upstream: {} (fetch budget {:?}, persist budget {:?})",
        provider.url(),
        config.fetch_budget,
        config.persist_budget
    );
    let service = Arc::new(QuoteService::new(provider, store.clone(), config));

    let listener = TcpListener::bind(&args.listen).await?;
    info!("Quote service listening on: {}", listener.local_addr()?);

    let served = axum::serve(listener, create_router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().await;
    info!("Database closed");
    served?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C received. Shutting down server..."),
        Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
