//! Quote Requester — asks the quote service for the current USD-BRL bid once and
//! saves it as `Dólar: <bid>` to a text file.
//!
//! Usage example (CLI):
//! ```bash
//! quote_client --server-url http://localhost:8080/quote --output ./cotacao.txt
//! ```
//!
//! The call is bounded by a 300 ms budget by default. Every failure is fatal:
//! the process logs the reason and exits with status 2 on a timeout and 1 on
//! anything else. The output file is left untouched unless the call succeeded.
#![warn(missing_docs)]
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::error;
use quote_client::Requester;
use quote_client::args::Args;
use quote_common::QuoteError;

#[tokio::main]
async fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();
    let output = normalize_path(&args.output);

    let result = match Requester::new(&args.server_url, Duration::from_millis(args.budget_ms)) {
        Ok(requester) => requester.run(&output).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e, &args);
            exit_code(&e)
        }
    }
}

fn report(err: &QuoteError, args: &Args) {
    match err {
        QuoteError::Timeout { budget } => {
            error!("Timeout: quote service did not answer within {:?}", budget)
        }
        QuoteError::UpstreamStatus { code, body } => {
            error!("Quote service returned status {}. Response: {}", code, body)
        }
        QuoteError::Decode(e) => error!("Failed to decode quote service response: {}", e),
        QuoteError::Io(e) => error!("Failed to save quote to '{}': {}", args.output, e),
        other => error!("Request to {} failed: {}", args.server_url, other),
    }
}

fn exit_code(err: &QuoteError) -> ExitCode {
    if err.is_timeout() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_matching_quotes() {
        assert_eq!(normalize_path(" \"C:\\quotes\\cotacao.txt\" "), PathBuf::from("C:\\quotes\\cotacao.txt"));
        assert_eq!(normalize_path("cotacao.txt"), PathBuf::from("cotacao.txt"));
    }

    #[test]
    fn timeout_has_its_own_exit_code() {
        let timeout = QuoteError::Timeout {
            budget: Duration::from_millis(300),
        };
        let status = QuoteError::UpstreamStatus {
            code: 504,
            body: String::new(),
        };
        assert_eq!(exit_code(&timeout), ExitCode::from(2));
        assert_eq!(exit_code(&status), ExitCode::FAILURE);
    }
}
