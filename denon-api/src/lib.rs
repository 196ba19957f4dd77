//! Typed addressing for Denon/Marantz receivers
//!
//! This crate holds the vendor endpoint table ([`ApiUrl`]), the four zone
//! roles a polling client can follow ([`ZoneRole`]), the immutable
//! per-zone addressing ([`DeviceEndpointSet`]) and the [`Transport`] trait
//! the client issues requests through. The private `http-client` crate
//! provides the production transport.
//!
//! ```rust
//! use denon_api::{ApiUrl, DeviceEndpointSet, ZoneRole};
//!
//! let endpoints = DeviceEndpointSet::new("192.168.1.20", 80, 0)?;
//! assert_eq!(endpoints.zone(), ZoneRole::MainZone);
//! assert_eq!(endpoints.status_path(), ApiUrl::MainZoneStatusLite.path());
//! # Ok::<(), denon_api::ApiError>(())
//! ```

pub mod endpoint_set;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod zone;

pub use endpoint_set::DeviceEndpointSet;
pub use endpoints::{ApiUrl, UPNP_PORT};
pub use error::{ApiError, Result};
pub use http_client::HttpClient;
pub use transport::Transport;
pub use zone::ZoneRole;
