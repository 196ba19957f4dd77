//! Error types for XML parsing operations

use thiserror::Error;

/// Errors that can occur while decoding a receiver document
#[derive(Error, Debug)]
pub enum ParseError {
    /// XML deserialization failed
    #[error("XML deserialization failed: {0}")]
    XmlDeserializationFailed(String),

    /// The response body was empty or whitespace only
    #[error("Empty document")]
    EmptyDocument,

    /// Missing required element
    #[error("Missing required element: {0}")]
    MissingRequiredElement(String),
}

/// Result type alias for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
