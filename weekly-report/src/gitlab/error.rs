//! GitLab API error types.

use thiserror::Error;

/// Errors raised while talking to GitLab.
///
/// Any of these aborts the current run; no partial report is ever sent.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The configured base URL cannot be used to build endpoint URLs.
    #[error("Invalid GitLab URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The access token is not a valid header value.
    #[error("GitLab token contains characters not allowed in an HTTP header")]
    InvalidToken,

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response.
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// GitLab answered with a non-success status.
    #[error("GitLab returned {status} for {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}
