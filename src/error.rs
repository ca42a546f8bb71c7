//! Error types for submission and the transaction feed.

use thiserror::Error;

/// Why a submission did not produce an accepted status.
///
/// The `Display` form is what the widget shows in its error line.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Connection refused, timeout, dropped connection
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success response carrying an error message (shown verbatim)
    #[error("{0}")]
    Rejected(String),

    /// Body could not be interpreted
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The background job never reported back
    #[error("Submission worker failed: {0}")]
    Worker(String),
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },

    #[error("Malformed feed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Feed stream error: {0}")]
    Stream(#[from] tokio_tungstenite::tungstenite::Error),
}
