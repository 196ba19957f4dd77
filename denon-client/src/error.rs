//! Error types for the denon-client crate.

use denon_api::ApiError;

/// Errors surfaced by the client handle and its collaborators.
///
/// Failures inside the identify/poll loop never reach the caller; they are
/// reported as [`DeviceEvent::Error`](crate::DeviceEvent::Error) and turned
/// into state transitions. These variants cover construction, command
/// dispatch and persistence.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Invalid configuration provided
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport or decode failure
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Writing the device info document failed
    #[error("Persistence error: {0}")]
    Persistence(#[from] std::io::Error),

    /// Encoding the device info document failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The connection task is no longer running
    #[error("Client has shut down")]
    Shutdown,

    /// The connection task panicked or was aborted
    #[error("Connection task failed: {0}")]
    Task(String),
}

/// Convenience type alias for Results using ClientError.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        let error = ClientError::Configuration("host must not be empty".to_string());
        assert_eq!(error.to_string(), "Configuration error: host must not be empty");

        let error = ClientError::Shutdown;
        assert_eq!(error.to_string(), "Client has shut down");

        let error: ClientError = ApiError::NetworkError("timeout".to_string()).into();
        assert_eq!(error.to_string(), "Network error: timeout");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let error: ClientError = io.into();
        assert!(matches!(error, ClientError::Persistence(_)));
        assert!(error.to_string().contains("read-only"));
    }
}
