use denon_parser::ParseError;
use http_client::HttpError;
use thiserror::Error;

/// High-level API errors for receiver operations
///
/// Abstracts the HTTP and XML layers into the two failure families the
/// connection state machine cares about (transport and decode) plus
/// configuration errors raised while building endpoint sets.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network communication error
    ///
    /// Connection refused, DNS failure, timeout, or an unreadable body.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The receiver answered with a non-2xx status
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Response parsing error
    ///
    /// The receiver answered but the body could not be decoded into the
    /// expected document.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Zone selector outside the four recognized roles
    #[error("Invalid zone selector {0}: expected 0 (main), 1 (zone 2), 2 (zone 3) or 3 (sound mode)")]
    InvalidZone(u8),

    /// A command or status request named a full URL instead of a path
    #[error("Invalid request path: {0}")]
    InvalidPath(String),
}

impl ApiError {
    /// Whether this error came from the transport rather than the decoder
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::NetworkError(_) | ApiError::HttpStatus(_))
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Status { status, .. } => ApiError::HttpStatus(status),
            HttpError::InvalidPath(path) => ApiError::InvalidPath(path),
            HttpError::Network(msg) | HttpError::Timeout(msg) | HttpError::Build(msg) => {
                ApiError::NetworkError(msg)
            }
        }
    }
}

impl From<ParseError> for ApiError {
    fn from(error: ParseError) -> Self {
        ApiError::ParseError(error.to_string())
    }
}
