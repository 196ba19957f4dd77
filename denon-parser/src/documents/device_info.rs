//! `/goform/Deviceinfo.xml` decoder.

use crate::common::XmlElement;
use crate::error::{ParseError, ParseResult};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Root element of the device information document.
pub const DEVICE_INFO_ROOT: &str = "Device_Info";

/// Decoded device information document (`<Device_Info>` root).
///
/// The whole tree is kept, capability sections included, and serializes
/// with the vendor element names. The accessors cover the identity fields;
/// every one is optional because older firmware omits several of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceInfo {
    document: XmlElement,
}

impl DeviceInfo {
    /// Parse a device information document.
    pub fn from_xml(xml: &str) -> ParseResult<Self> {
        let (root, document) = XmlElement::parse_document(xml)?;
        if root != DEVICE_INFO_ROOT {
            return Err(ParseError::MissingRequiredElement(DEVICE_INFO_ROOT.to_string()));
        }
        Ok(Self { document })
    }

    /// The full `<Device_Info>` tree.
    pub fn document(&self) -> &XmlElement {
        &self.document
    }

    /// Text of a top-level element, e.g. `"UpgradeVersion"`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.document.child_text(name)
    }

    pub fn device_info_vers(&self) -> Option<&str> {
        self.field("DeviceInfoVers")
    }

    pub fn comm_api_vers(&self) -> Option<&str> {
        self.field("CommApiVers")
    }

    pub fn brand_code(&self) -> Option<&str> {
        self.field("BrandCode")
    }

    pub fn category_name(&self) -> Option<&str> {
        self.field("CategoryName")
    }

    pub fn manual_model_name(&self) -> Option<&str> {
        self.field("ManualModelName")
    }

    pub fn model_name(&self) -> Option<&str> {
        self.field("ModelName")
    }

    pub fn mac_address(&self) -> Option<&str> {
        self.field("MacAddress")
    }

    pub fn upgrade_version(&self) -> Option<&str> {
        self.field("UpgradeVersion")
    }

    /// Number of zones the receiver reports, when present and numeric.
    pub fn zone_count(&self) -> Option<u8> {
        self.field("DeviceZones")?.trim().parse().ok()
    }
}

impl Serialize for DeviceInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        self.document.serialize_entries(&mut map)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AVR: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Device_Info>
  <DeviceInfoVers>0301</DeviceInfoVers>
  <CommApiVers>0301</CommApiVers>
  <Gen>1</Gen>
  <BrandCode>0</BrandCode>
  <ProductCategory>02</ProductCategory>
  <CategoryName>AV RECEIVER</CategoryName>
  <ManualModelName>AVR-X3700H</ManualModelName>
  <ModelName>*AVR-X3700H</ModelName>
  <MacAddress>0005CD123456</MacAddress>
  <UpgradeVersion>1234-5678</UpgradeVersion>
  <DeviceZones>3</DeviceZones>
  <DeviceCapabilities><Setup><PartyMode><Control>1</Control></PartyMode></Setup></DeviceCapabilities>
  <DeviceZoneCapabilities><Zone><No>0</No></Zone><Volume><MaxValue>98</MaxValue></Volume></DeviceZoneCapabilities>
  <DeviceZoneCapabilities><Zone><No>1</No></Zone><Volume><MaxValue>98</MaxValue></Volume></DeviceZoneCapabilities>
</Device_Info>"#;

    #[test]
    fn test_parse_device_info() {
        let info = DeviceInfo::from_xml(AVR).unwrap();
        assert_eq!(info.model_name(), Some("*AVR-X3700H"));
        assert_eq!(info.manual_model_name(), Some("AVR-X3700H"));
        assert_eq!(info.mac_address(), Some("0005CD123456"));
        assert_eq!(info.category_name(), Some("AV RECEIVER"));
        assert_eq!(info.upgrade_version(), Some("1234-5678"));
        assert_eq!(info.field("Gen"), Some("1"));
        assert_eq!(info.zone_count(), Some(3));
    }

    #[test]
    fn test_capabilities_kept_in_json() {
        let info = DeviceInfo::from_xml(AVR).unwrap();
        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(json["ModelName"], "*AVR-X3700H");
        assert_eq!(json["DeviceCapabilities"]["Setup"]["PartyMode"]["Control"], "1");
        assert_eq!(json["DeviceZoneCapabilities"][1]["Zone"]["No"], "1");
        assert_eq!(json["DeviceZoneCapabilities"][0]["Volume"]["MaxValue"], "98");
    }

    #[test]
    fn test_parse_sparse_device_info() {
        let info = DeviceInfo::from_xml("<Device_Info><ModelName>PM7000N</ModelName></Device_Info>")
            .unwrap();
        assert_eq!(info.model_name(), Some("PM7000N"));
        assert_eq!(info.mac_address(), None);
        assert_eq!(info.zone_count(), None);
    }

    #[test]
    fn test_parse_wrong_root() {
        let result = DeviceInfo::from_xml("<html><body>Service Unavailable</body></html>");
        assert!(matches!(result, Err(ParseError::MissingRequiredElement(_))));
    }

    #[test]
    fn test_parse_malformed() {
        let result = DeviceInfo::from_xml("<Device_Info><ModelName>PM7000N</Device_Info>");
        assert!(matches!(result, Err(ParseError::XmlDeserializationFailed(_))));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(DeviceInfo::from_xml(""), Err(ParseError::EmptyDocument)));
    }
}
