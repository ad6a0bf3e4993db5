//! Fetch error types.

/// Errors retrieving data from an upstream feed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport failure (connect, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered 404
    #[error("not found: {url}")]
    NotFound { url: String },

    /// Upstream answered with another non-success status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not the JSON we expected
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },
}
