//! Quote service orchestration.
//!
//! One inbound request walks a small state machine:
//!
//! - **Start** — derive the fetch deadline from the inbound context and call the
//!   upstream provider.
//! - **Failed** — the fetch failed (any kind); the error goes back to the route,
//!   which answers with a server error. Nothing is written to storage.
//! - **Fetched** — append the quote on a detached task under a fresh, short
//!   persist deadline that is not tied to the inbound request. The outcome only
//!   feeds a log line.
//! - **Responded** — the `{bid}` reply is returned regardless of how the
//!   persist step went.
//!
//! The service holds no per-request mutable state; the sink is shared behind an
//! `Arc` by every request task.
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use quote_common::deadline::{FETCH_BUDGET, PERSIST_BUDGET};
use quote_common::{Deadline, Quote, QuoteReply, Result};

use crate::provider::UpstreamClient;
use crate::storage::{PersistedQuoteRecord, QuoteSink};

/// Per-hop budgets used by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Budget of the upstream fetch, derived from the inbound request.
    pub fetch_budget: Duration,
    /// Budget of the storage insert, counted from a fresh top-level deadline.
    pub persist_budget: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            fetch_budget: FETCH_BUDGET,
            persist_budget: PERSIST_BUDGET,
        }
    }
}

/// Fetches, persists and replies with the current quote.
pub struct QuoteService {
    provider: UpstreamClient,
    sink: Arc<dyn QuoteSink>,
    config: ServiceConfig,
}

impl QuoteService {
    /// Wire a service from its collaborators.
    pub fn new(provider: UpstreamClient, sink: Arc<dyn QuoteSink>, config: ServiceConfig) -> Self {
        Self {
            provider,
            sink,
            config,
        }
    }

    /// Handle one inbound request whose own deadline is `inbound`.
    ///
    /// Returns the reply iff the upstream fetch succeeded within its budget.
    pub async fn handle(&self, inbound: &Deadline) -> Result<QuoteReply> {
        let fetch_deadline = inbound.derive(self.config.fetch_budget);
        let quote = self
            .provider
            .fetch_quote(&fetch_deadline)
            .await
            .inspect_err(|e| error!("Failed to fetch quote: {}", e))?;

        // Detached so that a dropped inbound request cannot cancel the insert;
        // only the persist deadline can.
        let persist = tokio::spawn(persist_quote(
            Arc::clone(&self.sink),
            quote.clone(),
            Deadline::after(self.config.persist_budget),
        ));
        if let Err(e) = persist.await {
            error!("Persist task failed: {}", e);
        }

        let reply = QuoteReply::from(&quote);
        info!("Quote served: bid = {}", reply.bid);
        Ok(reply)
    }
}

async fn persist_quote(sink: Arc<dyn QuoteSink>, quote: Quote, deadline: Deadline) {
    let outcome = deadline.run(sink.append(&quote, &deadline)).await;
    log_persist_outcome(&quote.bid, outcome);
}

fn log_persist_outcome(bid: &str, outcome: Result<PersistedQuoteRecord>) {
    match outcome {
        Ok(record) => info!("Quote persisted: id = {}, bid = {}", record.id, record.bid),
        Err(e) if e.is_timeout() => warn!("Timeout while persisting quote: bid = {}, {}", bid, e),
        Err(e) => error!("Failed to persist quote: bid = {}, {}", bid, e),
    }
}
