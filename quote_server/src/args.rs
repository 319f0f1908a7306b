//! Command-line arguments for the Quote Service.
//!
//! Every option has a default taken from `quote_common`, so the service can be
//! started without any flags.
use std::time::Duration;

use clap::Parser;
use quote_common::deadline::{FETCH_BUDGET, PERSIST_BUDGET};
use quote_common::net::{self, DATABASE_URL, SERVICE_PORT, UPSTREAM_URL};

use crate::service::ServiceConfig;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Address the HTTP server binds to.
    #[clap(long, default_value_t = net::addr("0.0.0.0", SERVICE_PORT))]
    pub listen: String,

    /// Upstream pricing endpoint returning `{"USDBRL": {...}}`.
    #[clap(long, default_value = UPSTREAM_URL)]
    pub upstream_url: String,

    /// SQLite database URL; the file is created if missing.
    #[clap(long, default_value = DATABASE_URL)]
    pub database_url: String,

    /// Budget of the upstream fetch in milliseconds.
    #[clap(long, default_value_t = FETCH_BUDGET.as_millis() as u64)]
    pub fetch_budget_ms: u64,

    /// Budget of the storage insert in milliseconds.
    #[clap(long, default_value_t = PERSIST_BUDGET.as_millis() as u64)]
    pub persist_budget_ms: u64,
}

impl Args {
    /// Budgets handed to the `QuoteService`.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            fetch_budget: Duration::from_millis(self.fetch_budget_ms),
            persist_budget: Duration::from_millis(self.persist_budget_ms),
        }
    }
}
