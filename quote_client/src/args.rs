//! Command-line arguments for the Quote Requester.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use quote_common::deadline::REQUEST_BUDGET;
use quote_common::net::{self, OUTPUT_FILE, SERVICE_PORT};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Full URL of the quote service endpoint.
    #[clap(long, default_value_t = net::quote_url("localhost", SERVICE_PORT))]
    pub server_url: String,

    /// File the quote is written to. Overwritten on every successful run.
    #[clap(long, default_value = OUTPUT_FILE)]
    pub output: String,

    /// Budget of the whole call to the quote service, in milliseconds.
    #[clap(long, default_value_t = REQUEST_BUDGET.as_millis() as u64)]
    pub budget_ms: u64,
}
