//! One-shot request to the quote service.
//!
//! `Requester::run` performs a single call bounded by the requester's budget
//! and, only when the call fully succeeded, overwrites the output file with
//! `Dólar: <bid>`. Any failure is returned to `main`, which treats it as fatal.
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use log::{debug, info};
use quote_common::{Deadline, QuoteError, QuoteReply, Result};
use reqwest::Client;
use tempfile::NamedTempFile;

/// Client for the quote service's `GET /quote` endpoint.
#[derive(Debug, Clone)]
pub struct Requester {
    url: String,
    budget: Duration,
    client: Client,
}

impl Requester {
    /// Create a requester for `url` whose calls are bounded by `budget`.
    pub fn new(url: impl Into<String>, budget: Duration) -> Result<Self> {
        let url = url.into();
        reqwest::Url::parse(&url).map_err(|e| QuoteError::Address(format!("{}: {}", url, e)))?;
        Ok(Self {
            url,
            budget,
            client: Client::new(),
        })
    }

    /// Budget of a single call.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Call the quote service once under a fresh deadline.
    pub async fn fetch_reply(&self) -> Result<QuoteReply> {
        let deadline = Deadline::after(self.budget);
        debug!("GET {} (budget {:?})", self.url, self.budget);
        deadline.run(self.exchange()).await
    }

    /// Fetch the quote and write the artifact to `output`.
    ///
    /// Nothing is written unless the call succeeded.
    pub async fn run(&self, output: &Path) -> Result<QuoteReply> {
        let reply = self.fetch_reply().await?;
        write_artifact(output, &reply)?;
        info!("Quote saved to {}: {}", output.display(), artifact_line(&reply));
        Ok(reply)
    }

    async fn exchange(&self) -> Result<QuoteReply> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuoteError::UpstreamStatus {
                code: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| QuoteError::Transport(e.to_string()))?;
        QuoteReply::from_json(&body)
    }
}

/// Text stored in the output artifact.
pub fn artifact_line(reply: &QuoteReply) -> String {
    format!("Dólar: {}", reply.bid)
}

/// Replace `path` with the artifact line for `reply`.
///
/// The line goes to a temporary file in the same directory which is then
/// renamed over `path`, so readers see either the old artifact or the new one.
pub fn write_artifact(path: &Path, reply: &QuoteReply) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(artifact_line(reply).as_bytes())?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
