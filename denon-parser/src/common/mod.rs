//! Shared decoding helpers
//!
//! - [`xml_decode`]: entry point turning a raw body into a serde type
//! - [`values`]: the `<Field><value>..</value></Field>` pattern used by
//!   every `/goform` status page
//! - [`tree`]: a lossless element tree for documents that are kept whole

pub mod xml_decode;
pub mod values;
pub mod tree;

pub use tree::XmlElement;
pub use values::ValueList;
