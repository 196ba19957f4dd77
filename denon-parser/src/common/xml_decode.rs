//! XML decoding entry point.
//!
//! Receiver pages are small, un-namespaced documents, so decoding is a thin
//! layer over `quick_xml::de` that normalises the error type and rejects
//! empty bodies up front (some firmware answers `200 OK` with no content
//! while booting).

use crate::error::{ParseError, ParseResult};
use serde::de::DeserializeOwned;

/// Parse an XML body into a deserializable type.
///
/// Leading byte-order marks and surrounding whitespace are ignored.
pub fn parse<T: DeserializeOwned>(xml: &str) -> ParseResult<T> {
    quick_xml::de::from_str(prepare(xml)?)
        .map_err(|e| ParseError::XmlDeserializationFailed(e.to_string()))
}

/// Strip a byte-order mark and surrounding whitespace, refusing empty bodies.
pub(crate) fn prepare(xml: &str) -> ParseResult<&str> {
    let trimmed = xml.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyDocument);
    }
    Ok(trimmed)
}
