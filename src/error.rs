//! Failure taxonomy for the remote news path.
//!
//! Every variant collapses into "fetch failed" at the fetcher boundary: the
//! caller gets fallback data, never one of these.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("remote generation is disabled")]
    Disabled,

    #[error("missing API key for provider {0}")]
    MissingApiKey(&'static str),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("response had no candidate text")]
    EmptyCandidate,

    #[error("malformed response: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Disabled => "disabled",
            FetchError::MissingApiKey(_) => "missing_key",
            FetchError::Transport(_) => "transport",
            FetchError::Status { .. } => "status",
            FetchError::EmptyCandidate => "empty_candidate",
            FetchError::Shape(_) => "shape",
            FetchError::Other(_) => "other",
        }
    }
}
