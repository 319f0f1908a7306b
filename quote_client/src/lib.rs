//! Quote Requester library: one deadline-bounded call to the quote service.
//!
//! - `requester` — the call itself and the text artifact it produces.
//! - `args` — command-line arguments.
#![warn(missing_docs)]
pub mod args;
pub mod requester;

pub use requester::{Requester, artifact_line, write_artifact};
