//! Quote Service library.
//!
//! The binary wires these pieces together; they are exposed as a library so
//! that the requester's end-to-end tests can run a real service in-process.
//!
//! - `provider` — deadline-bounded client for the upstream pricing API.
//! - `storage` — `QuoteSink` trait and the SQLite-backed `SqliteStore`.
//! - `service` — per-request fetch/persist/respond orchestration.
//! - `routes` — `axum` router exposing `GET /quote`.
//! - `args` — command-line arguments.
#![warn(missing_docs)]
pub mod args;
pub mod provider;
pub mod routes;
pub mod service;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use provider::UpstreamClient;
pub use routes::create_router;
pub use service::{QuoteService, ServiceConfig};
pub use storage::{QuoteSink, SqliteStore};
