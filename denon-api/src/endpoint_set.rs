use crate::endpoints::ApiUrl;
use crate::error::Result;
use crate::zone::ZoneRole;

/// Immutable addressing for one receiver zone
///
/// The status endpoint is resolved from the zone role once, at
/// construction, and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEndpointSet {
    host: String,
    port: u16,
    zone: ZoneRole,
    status_endpoint: ApiUrl,
}

impl DeviceEndpointSet {
    /// Build an endpoint set from a numeric zone selector (0–3)
    pub fn new(host: impl Into<String>, port: u16, zone_index: u8) -> Result<Self> {
        let zone = ZoneRole::try_from(zone_index)?;
        Ok(Self::for_role(host, port, zone))
    }

    /// Build an endpoint set from an already validated role
    pub fn for_role(host: impl Into<String>, port: u16, zone: ZoneRole) -> Self {
        Self {
            host: host.into(),
            port,
            zone,
            status_endpoint: zone.status_endpoint(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn zone(&self) -> ZoneRole {
        self.zone
    }

    /// Base address for control requests
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// The status page polled for this zone
    pub fn status_path(&self) -> &'static str {
        self.status_endpoint.path()
    }

    /// The device information page
    pub fn device_info_path(&self) -> &'static str {
        ApiUrl::DeviceInfo.path()
    }

    /// Absolute URL of the UPnP description (bare host, fixed port)
    pub fn upnp_url(&self) -> String {
        ApiUrl::upnp_url(&self.host)
    }
}
