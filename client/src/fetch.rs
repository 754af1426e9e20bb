//! Passage page fetch
//!
//! Thin transport adapter: builds the lookup URL with percent-encoded query
//! parameters and returns the raw page body. Transport failures propagate
//! unmodified.

use reqwest::Client;
use tracing::debug;
use versegate_core::VerseGateError;

pub const DEFAULT_ENDPOINT: &str = "https://www.biblegateway.com/passage/";

const USER_AGENT: &str = concat!("versegate/", env!("CARGO_PKG_VERSION"));

/// Build the passage-lookup URL for a reference and translation.
pub fn passage_url(endpoint: &str, query: &str, version: &str) -> String {
    format!(
        "{}?search={}&version={}",
        endpoint,
        urlencoding::encode(query),
        urlencoding::encode(version)
    )
}

/// Fetch the passage page body.
pub async fn fetch_passage_html(client: &Client, url: &str) -> Result<String, VerseGateError> {
    debug!(%url, "fetching passage page");
    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await?
        .error_for_status()?;
    let body = response.text().await?;
    debug!(bytes = body.len(), "passage page fetched");
    Ok(body)
}
