//! Quote payloads exchanged along the chain.
//!
//! - `UpstreamEnvelope` — body returned by the pricing API (`{"USDBRL": {...}}`).
//! - `Quote` — canonical quote record; only `bid` is required.
//! - `QuoteReply` — the `{"bid": ...}` body the quote service sends back.
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// USD-BRL observation as published by the upstream provider.
///
/// Metadata fields are carried through as text without validation and default
/// to empty strings when the provider omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Source currency code (e.g., `USD`).
    #[serde(default)]
    pub code: String,
    /// Target currency code (e.g., `BRL`).
    #[serde(default)]
    pub codein: String,
    /// Human-readable pair name.
    #[serde(default)]
    pub name: String,
    /// Daily high.
    #[serde(default)]
    pub high: String,
    /// Daily low.
    #[serde(default)]
    pub low: String,
    /// Absolute variation of the bid.
    #[serde(default, rename = "varBid")]
    pub var_bid: String,
    /// Percent variation of the bid.
    #[serde(default, rename = "pctChange")]
    pub pct_change: String,
    /// Bid price, decimal as text.
    pub bid: String,
    /// Ask price, decimal as text.
    #[serde(default)]
    pub ask: String,
    /// Provider timestamp (seconds since the UNIX epoch, as text).
    #[serde(default)]
    pub timestamp: String,
    /// Provider creation date string.
    #[serde(default)]
    pub create_date: String,
}

impl Quote {
    /// Decode a provider response body into a `Quote`.
    ///
    /// Fails with `QuoteError::Decode` when the body does not match the envelope
    /// schema or carries an empty `bid`.
    pub fn from_upstream_json(body: &[u8]) -> Result<Quote, QuoteError> {
        let envelope: UpstreamEnvelope = serde_json::from_slice(body)?;
        let quote = envelope.usdbrl;
        if quote.bid.trim().is_empty() {
            return Err(QuoteError::Decode("empty bid in upstream quote".into()));
        }
        Ok(quote)
    }
}

/// Top-level body returned by the pricing API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamEnvelope {
    /// The USD-BRL quote.
    #[serde(rename = "USDBRL")]
    pub usdbrl: Quote,
}

/// Response body of `GET /quote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteReply {
    /// Bid copied from the fetched `Quote`.
    pub bid: String,
}

impl From<&Quote> for QuoteReply {
    fn from(quote: &Quote) -> Self {
        QuoteReply {
            bid: quote.bid.clone(),
        }
    }
}

impl QuoteReply {
    /// Decode a quote service response body.
    pub fn from_json(body: &[u8]) -> Result<QuoteReply, QuoteError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Encode the reply to JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, QuoteError> {
        Ok(serde_json::to_vec(self)?)
    }
}
