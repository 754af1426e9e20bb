use thiserror::Error;

/// Top-level error type for the VerseGate pipeline.
#[derive(Debug, Error)]
pub enum VerseGateError {
    #[error("passage fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("no passage found for \"{query}\" ({version})")]
    NotFound { query: String, version: String },

    #[error("highlight markup not found in verse text: {needle:?}")]
    ParseAmbiguity { needle: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
