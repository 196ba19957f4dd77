//! # denon-parser
//!
//! XML decoders for the documents a Denon/Marantz receiver serves over its
//! HTTP control surface.
//!
//! ## Usage
//!
//! ```rust
//! use denon_parser::ZoneStatus;
//!
//! let xml = "<item><Power><value>ON</value></Power></item>";
//! let status = ZoneStatus::from_xml(xml)?;
//! assert_eq!(status.power()?, "ON");
//! # Ok::<(), denon_parser::ParseError>(())
//! ```

pub mod error;
pub mod common;
pub mod documents;

pub use error::{ParseError, ParseResult};
pub use common::{ValueList, XmlElement};
pub use documents::{DeviceInfo, UpnpDescription, UpnpDevice, ZoneStatus};
