//! UPnP device description decoder.
//!
//! HEOS-era receivers publish a standard UPnP description at
//! `:60006/upnp/desc/aios_device/aios_device.xml`. Vendor-prefixed
//! extension elements are skipped.

use crate::common::xml_decode;
use crate::error::ParseResult;
use serde::{Deserialize, Serialize};

/// UPnP device description root element.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename = "root")]
pub struct UpnpDescription {
    pub device: UpnpDevice,
}

/// The `<device>` element of a UPnP description.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpnpDevice {
    pub device_type: String,
    pub friendly_name: String,
    pub manufacturer: String,
    pub model_name: String,
    #[serde(default)]
    pub model_number: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(rename = "UDN")]
    pub udn: String,
}

impl UpnpDescription {
    /// Parse a UPnP device description.
    pub fn from_xml(xml: &str) -> ParseResult<Self> {
        xml_decode::parse(xml)
    }
}
