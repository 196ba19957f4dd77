//! Configuration types for the denon-client crate
//!
//! [`ClientConfig`] carries the addressing inputs (host, port, zone
//! selector, device info path) together with the timing of the connection
//! state machine.

use std::path::PathBuf;
use std::time::Duration;

use denon_api::DeviceEndpointSet;

use crate::error::{ClientError, Result};

/// Configuration for a [`DenonClient`](crate::DenonClient)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Receiver host name or IP address
    pub host: String,

    /// Control port
    /// Default: 80
    pub port: u16,

    /// Zone selector: 0 main, 1 zone 2, 2 zone 3, 3 sound mode
    /// Default: 0
    pub zone: u8,

    /// Where the main zone client writes the device info document
    /// Default: `device_info.json`
    pub device_info_path: PathBuf,

    /// Interval between status polls while connected
    /// Default: 750 milliseconds
    pub poll_interval: Duration,

    /// Delay before retrying a failed identify step
    /// Default: 5 seconds
    pub identify_retry_delay: Duration,

    /// TCP connect timeout for each request
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Overall timeout for each request
    /// Default: 10 seconds
    pub request_timeout: Duration,

    /// Fetch the UPnP description during the identify step
    /// Default: true
    pub fetch_upnp_description: bool,

    /// Upper bound on the UPnP description fetch; polling starts once it
    /// elapses
    /// Default: 2 seconds
    pub upnp_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 80,
            zone: 0,
            device_info_path: PathBuf::from("device_info.json"),
            poll_interval: Duration::from_millis(750),
            identify_retry_delay: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            fetch_upnp_description: true,
            upnp_timeout: Duration::from_secs(2),
        }
    }
}

impl ClientConfig {
    /// Create a ClientConfig for `host` with default values
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    /// Create a ClientConfig with short timings, for tests and local rigs
    pub fn fast_polling(host: impl Into<String>) -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            identify_retry_delay: Duration::from_millis(500),
            connect_timeout: Duration::from_secs(1),
            request_timeout: Duration::from_secs(2),
            upnp_timeout: Duration::from_millis(500),
            ..Self::new(host)
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_zone(mut self, zone: u8) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_device_info_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.device_info_path = path.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_identify_retry_delay(mut self, delay: Duration) -> Self {
        self.identify_retry_delay = delay;
        self
    }

    pub fn with_upnp_description(mut self, enabled: bool) -> Self {
        self.fetch_upnp_description = enabled;
        self
    }

    pub fn with_upnp_timeout(mut self, timeout: Duration) -> Self {
        self.upnp_timeout = timeout;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ClientError::Configuration(
                "host must not be empty".to_string(),
            ));
        }

        if self.port == 0 {
            return Err(ClientError::Configuration(
                "port must be greater than 0".to_string(),
            ));
        }

        if self.poll_interval.is_zero() {
            return Err(ClientError::Configuration(
                "poll_interval must be greater than 0".to_string(),
            ));
        }

        if self.identify_retry_delay.is_zero() {
            return Err(ClientError::Configuration(
                "identify_retry_delay must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero()
            || self.connect_timeout.is_zero()
            || self.upnp_timeout.is_zero()
        {
            return Err(ClientError::Configuration(
                "request timeouts must be greater than 0".to_string(),
            ));
        }

        self.endpoints().map(|_| ())
    }

    /// Resolve the endpoint set for this configuration
    pub fn endpoints(&self) -> Result<DeviceEndpointSet> {
        Ok(DeviceEndpointSet::new(self.host.clone(), self.port, self.zone)?)
    }
}
