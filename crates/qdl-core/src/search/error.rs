//! Search query error type for retry classification.

/// Error returned by a single search query. Kept structured so the retry
/// policy can classify it before it is logged as a skipped query.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// libcurl reported an error (timeout, connection, DNS...).
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),
    /// Endpoint answered with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Body was not the expected JSON document.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// Endpoint URL in the configuration is unusable.
    #[error("invalid search endpoint {endpoint:?}: {reason}")]
    Endpoint { endpoint: String, reason: String },
    /// Cancelled before or between attempts.
    #[error("query aborted")]
    Aborted,
}

