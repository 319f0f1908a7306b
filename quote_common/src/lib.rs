//!
//! Common types and utilities shared by the quote service and the requester.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` used across the workspace.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `deadline` — the `Deadline` value object and the per-hop budgets.
//! - `quote` — upstream, canonical and reply quote payloads.
//! - `net` — networking constants and small helpers.
#![warn(missing_docs)]
pub mod deadline;
pub mod error;
pub mod net;
pub mod quote;
pub mod result;

pub use deadline::Deadline;
pub use error::QuoteError;
pub use quote::{Quote, QuoteReply};
pub use result::Result;
