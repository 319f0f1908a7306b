//! Upstream pricing API client.
//!
//! `UpstreamClient::fetch_quote` issues a single GET against the configured
//! endpoint and decodes the body into a `Quote`. The whole exchange (request,
//! status line and body) runs under the caller's `Deadline`; there is no retry.
use log::{debug, warn};
use quote_common::{Deadline, Quote, QuoteError, Result};
use reqwest::Client;

/// Client for the upstream USD-BRL endpoint.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    url: String,
    client: Client,
}

impl UpstreamClient {
    /// Create a client for `url`. The URL is validated up front.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        reqwest::Url::parse(&url).map_err(|e| QuoteError::Address(format!("{}: {}", url, e)))?;
        Ok(Self {
            url,
            client: Client::new(),
        })
    }

    /// Upstream endpoint this client calls.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the current quote, bounded by `deadline`.
    ///
    /// Errors:
    /// - `Timeout` when the deadline expires first;
    /// - `UpstreamStatus` on a non-success status code;
    /// - `Decode` when the body does not match the envelope schema;
    /// - `Transport` on any other connection failure.
    pub async fn fetch_quote(&self, deadline: &Deadline) -> Result<Quote> {
        debug!("GET {} (budget {:?})", self.url, deadline.budget());
        let result = deadline.run(self.exchange()).await;
        if let Err(e) = &result {
            if e.is_timeout() {
                warn!("Timeout while fetching quote from {}", self.url);
            }
        }
        result
    }

    async fn exchange(&self) -> Result<Quote> {
        let response = self.client.get(&self.url).send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Upstream returned status {}", status.as_u16());
            return Err(QuoteError::UpstreamStatus {
                code: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(transport_error)?;
        Quote::from_upstream_json(&body).inspect_err(|e| warn!("Failed to decode upstream body: {}", e))
    }
}

// Deadline expiry never reaches here: `Deadline::run` drops the future first.
fn transport_error(err: reqwest::Error) -> QuoteError {
    if err.is_decode() {
        QuoteError::Decode(err.to_string())
    } else {
        QuoteError::Transport(err.to_string())
    }
}
