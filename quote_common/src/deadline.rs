//! Deadlines attached to every outbound call in the quote chain.
//!
//! A `Deadline` carries an absolute expiry instant together with the budget it
//! was derived from. Each hop derives its own child with a fixed budget counted
//! from "now"; a child never inherits what is left of its parent. This keeps a
//! nearly expired inbound request from starving the upstream fetch, and keeps a
//! slow storage write from being charged against the inbound request.
//!
//! - `Deadline::unbounded()` — context with no expiry (an inbound HTTP request).
//! - `Deadline::after(budget)` — fresh top-level deadline.
//! - `Deadline::derive(budget)` — child deadline, independent of the parent.
//! - `Deadline::run(future)` — drive a fallible future or fail with `Timeout`.
use std::future::Future;
use std::time::Duration;

use log::debug;
use tokio::time::Instant;

use crate::error::QuoteError;

/// Budget of the requester's call to the quote service.
pub const REQUEST_BUDGET: Duration = Duration::from_millis(300);
/// Budget of the quote service's call to the upstream provider.
pub const FETCH_BUDGET: Duration = Duration::from_millis(200);
/// Budget of the quote service's storage insert.
pub const PERSIST_BUDGET: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bound {
    expires_at: Instant,
    budget: Duration,
}

/// Absolute point in time beyond which a pending operation is aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    bound: Option<Bound>,
}

impl Deadline {
    /// Context without an expiry. `run` simply awaits the future.
    pub fn unbounded() -> Self {
        Self { bound: None }
    }

    /// Fresh top-level deadline expiring `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            bound: Some(Bound {
                expires_at: Instant::now() + budget,
                budget,
            }),
        }
    }

    /// Derive a child deadline of exactly `budget` from now.
    ///
    /// The parent's remaining time is not taken into account: an expired parent
    /// still yields a child with the full budget.
    pub fn derive(&self, budget: Duration) -> Self {
        if self.is_expired() {
            debug!("Parent deadline already expired; child gets a fresh {:?}", budget);
        }
        Self::after(budget)
    }

    /// Budget this deadline was created with, `None` when unbounded.
    pub fn budget(&self) -> Option<Duration> {
        self.bound.map(|b| b.budget)
    }

    /// Time left before expiry, `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.bound
            .map(|b| b.expires_at.saturating_duration_since(Instant::now()))
    }

    /// Returns `true` once the expiry instant has passed.
    pub fn is_expired(&self) -> bool {
        self.bound
            .map(|b| Instant::now() >= b.expires_at)
            .unwrap_or(false)
    }

    /// Run `future` until it completes or the deadline expires.
    ///
    /// Expiry drops the future and yields `QuoteError::Timeout`; errors produced
    /// by the future itself are passed through untouched. A deadline that has
    /// already expired fails without polling the future at all.
    pub async fn run<F, T>(&self, future: F) -> Result<T, QuoteError>
    where
        F: Future<Output = Result<T, QuoteError>>,
    {
        match self.bound {
            Some(bound) if Instant::now() >= bound.expires_at => Err(QuoteError::Timeout {
                budget: bound.budget,
            }),
            Some(bound) => tokio::time::timeout_at(bound.expires_at, future)
                .await
                .map_err(|_| QuoteError::Timeout {
                    budget: bound.budget,
                })?,
            None => future.await,
        }
    }
}
