//! Live state mirror and command client for Denon/Marantz receivers
//!
//! A [`DenonClient`] follows one zone of a receiver over its HTTP+XML
//! control surface. After [`connect`](DenonClient::connect) the client
//! identifies the device, then polls the zone status page and reports
//! each meaningful change as a [`DeviceEvent::DeviceState`]. Transport and
//! decode failures never reach the caller: identify failures are retried
//! after a delay, and a failed poll resets the snapshot and reconnects.
//!
//! # Example
//!
//! ```rust,ignore
//! use denon_client::{ClientConfig, DenonClient, DeviceEvent};
//! use denon_api::ApiUrl;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("192.168.1.20").with_zone(0);
//!     let (client, mut events) = DenonClient::new(config)?;
//!     client.connect()?;
//!
//!     client.send(&ApiUrl::direct_command("MVUP")).await?;
//!
//!     while let Some(event) = events.recv().await {
//!         println!("{:?}", event);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
mod manager;
pub mod snapshot;
pub mod store;

pub use client::DenonClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use events::{DeviceEvent, EventSink};
pub use manager::ConnectionState;
pub use snapshot::{DeviceState, RawZoneState, StateSnapshot};
pub use store::{DeviceInfoStore, FileStore};

// Re-export the collaborator crates' public surface
pub use denon_api::{ApiError, ApiUrl, DeviceEndpointSet, Transport, ZoneRole};
pub use denon_parser::{DeviceInfo, UpnpDescription, ZoneStatus};
