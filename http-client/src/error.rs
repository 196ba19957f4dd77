//! Error types for the HTTP client

use thiserror::Error;

/// Errors that can occur while talking to a receiver over HTTP
#[derive(Debug, Error)]
pub enum HttpError {
    /// Connection refused, DNS failure, reset, or an unreadable body
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The device answered with a non-2xx status
    #[error("HTTP status {status} from {url}")]
    Status {
        /// HTTP status code returned by the device
        status: u16,
        /// Fully resolved URL that was requested
        url: String,
    },

    /// A relative request was given a full URL
    #[error("Not a path relative to the base address: {0}")]
    InvalidPath(String),

    /// The client could not be constructed
    #[error("Client build error: {0}")]
    Build(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return HttpError::Timeout(error.to_string());
        }
        if let Some(status) = error.status() {
            return HttpError::Status {
                status: status.as_u16(),
                url: error
                    .url()
                    .map(|u| u.to_string())
                    .unwrap_or_default(),
            };
        }
        HttpError::Network(error.to_string())
    }
}
