//! `versegate-client` — passage lookup against Bible Gateway.
//!
//! Composes the fetch adapter with the extraction pipeline. One call is one
//! fetch; independent calls share no mutable state and may run concurrently.

pub mod fetch;

pub use fetch::{passage_url, DEFAULT_ENDPOINT};

use tracing::info;
use versegate_core::{PassageResult, VerseGateError};

pub const DEFAULT_QUERY: &str = "John 3:16";
pub const DEFAULT_VERSION: &str = "ESV";

/// Client for the passage-lookup endpoint.
#[derive(Debug, Clone)]
pub struct PassageClient {
    http: reqwest::Client,
    endpoint: String,
}

impl Default for PassageClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PassageClient {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Point the client at a different lookup endpoint (mirrors, test
    /// servers).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Look up a passage and assemble its verses.
    ///
    /// The fetch is the single suspension point; everything after it is
    /// synchronous. Fails with [`VerseGateError::NotFound`] when the page has
    /// no display reference or yields zero verses.
    pub async fn search(
        &self,
        query: &str,
        version: &str,
    ) -> Result<PassageResult, VerseGateError> {
        let url = fetch::passage_url(&self.endpoint, query, version);
        let html = fetch::fetch_passage_html(&self.http, &url).await?;
        let result = versegate_extract::extract_passage(&html, query, version)?;
        info!(
            reference = %result.reference,
            verses = result.verses.len(),
            "passage assembled"
        );
        Ok(result)
    }

    /// Look up the default passage (`John 3:16`, ESV).
    pub async fn search_default(&self) -> Result<PassageResult, VerseGateError> {
        self.search(DEFAULT_QUERY, DEFAULT_VERSION).await
    }
}
