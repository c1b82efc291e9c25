//! Trips backend client error types.

use crate::domain::TripId;

/// Errors from the trips backend client.
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Backend returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Trip does not exist on the backend
    #[error("trip {0} not found")]
    TripNotFound(TripId),

    /// A wire record could not be converted to a domain value
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}
