//! Receiver documents, one module per page
//!
//! - [`zone_status`]: `/goform/*XmlStatusLite.xml` zone status pages
//! - [`device_info`]: `/goform/Deviceinfo.xml`
//! - [`upnp`]: the UPnP device description served on port 60006

pub mod zone_status;
pub mod device_info;
pub mod upnp;

pub use device_info::DeviceInfo;
pub use upnp::{UpnpDescription, UpnpDevice};
pub use zone_status::ZoneStatus;
