//! Error types for the pricer client.

use thiserror::Error;


/// Client error types.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A request field was missing or out of range.
    #[error("Validation failed for {field}: {message}")]
    Validation {
        /// Name of the offending request field.
        field: String,
        /// Error message from API.
        message: String,
    },

    /// Too many requests from this client.
    #[error("Rate limited, retry after {retry_after}s")]
    RateLimited {
        /// Seconds until a request will be accepted again.
        retry_after: u64,
    },

    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error code from API, if any.
        code: Option<String>,
        /// Error message from API.
        message: String,
    },
}

impl Error {
    /// Name of the request field that failed validation, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
