//! Connection state machine
//!
//! One task owns the [`StateSnapshot`] and drives the
//! `Disconnected → Identifying → Polling` lifecycle:
//!
//! - **Identifying** fetches `Deviceinfo.xml` once. Failure schedules a retry
//!   after `identify_retry_delay`; the retry sleep is the only timer armed.
//! - **Polling** runs one cycle immediately, then one per `poll_interval`.
//!   Cycles are awaited inline, so at most one is in flight. A failed cycle
//!   drops the interval, resets the snapshot to the disconnected sentinel and
//!   reconnects.
//!
//! Commands from [`DenonClient`](crate::DenonClient) are handled while the
//! task is waiting on a timer or idle in `Disconnected`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use denon_api::{ApiError, DeviceEndpointSet, Transport};
use denon_parser::{DeviceInfo, UpnpDescription, ZoneStatus};
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

use crate::config::ClientConfig;
use crate::events::{DeviceEvent, EventSink};
use crate::snapshot::{DeviceState, RawZoneState, StateSnapshot};
use crate::store::{save_device_info, DeviceInfoStore};

/// Lifecycle state of the connection task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Disconnected,
    Identifying,
    Polling,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "DISCONNECTED",
            ConnectionState::Identifying => "IDENTIFYING",
            ConnectionState::Polling => "POLLING",
        };
        f.write_str(name)
    }
}

/// Commands sent from the client handle to the connection task
#[derive(Debug)]
pub(crate) enum Command {
    /// Start identifying, unless already connected or identifying
    Connect,
    /// Stop the task
    Shutdown,
}

/// Whether the run loop should keep going
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Timing knobs taken from [`ClientConfig`]
#[derive(Debug, Clone)]
pub(crate) struct Timing {
    pub poll_interval: Duration,
    pub identify_retry_delay: Duration,
    pub upnp_timeout: Duration,
}

pub(crate) struct ConnectionManager {
    endpoints: DeviceEndpointSet,
    timing: Timing,
    device_info_path: std::path::PathBuf,
    fetch_upnp_description: bool,
    transport: Arc<dyn Transport>,
    store: Arc<dyn DeviceInfoStore>,
    sink: Arc<dyn EventSink>,
    commands: mpsc::UnboundedReceiver<Command>,
    snapshot: StateSnapshot,
    snapshot_tx: watch::Sender<StateSnapshot>,
    state: ConnectionState,
    state_tx: watch::Sender<ConnectionState>,
}

impl ConnectionManager {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        config: &ClientConfig,
        endpoints: DeviceEndpointSet,
        transport: Arc<dyn Transport>,
        store: Arc<dyn DeviceInfoStore>,
        sink: Arc<dyn EventSink>,
        commands: mpsc::UnboundedReceiver<Command>,
        snapshot_tx: watch::Sender<StateSnapshot>,
        state_tx: watch::Sender<ConnectionState>,
    ) -> Self {
        Self {
            endpoints,
            timing: Timing {
                poll_interval: config.poll_interval,
                identify_retry_delay: config.identify_retry_delay,
                upnp_timeout: config.upnp_timeout,
            },
            device_info_path: config.device_info_path.clone(),
            fetch_upnp_description: config.fetch_upnp_description,
            transport,
            store,
            sink,
            commands,
            snapshot: StateSnapshot::default(),
            snapshot_tx,
            state: ConnectionState::Disconnected,
            state_tx,
        }
    }

    /// Main loop; returns once shut down or every handle is dropped
    pub(crate) async fn run(mut self) {
        tracing::info!(
            "Connection task started for {} ({})",
            self.endpoints.base_url(),
            self.endpoints.zone()
        );

        loop {
            let flow = match self.state {
                ConnectionState::Disconnected => self.idle().await,
                ConnectionState::Identifying => self.identify_phase().await,
                ConnectionState::Polling => self.polling_phase().await,
            };

            if flow == Flow::Stop {
                break;
            }
        }

        tracing::info!("Connection task for {} shut down", self.endpoints.base_url());
    }

    fn emit(&self, event: DeviceEvent) {
        self.sink.emit(event);
    }

    fn transition(&mut self, next: ConnectionState) {
        tracing::debug!("{}: {} -> {}", self.endpoints.base_url(), self.state, next);
        self.state = next;
        self.state_tx.send_replace(next);
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot.clone());
    }

    /// The connect trigger: only acts from `Disconnected`
    fn connect(&mut self) {
        if self.state != ConnectionState::Disconnected || self.snapshot.is_connected {
            tracing::debug!("Connect ignored, already {}", self.state);
            return;
        }
        self.transition(ConnectionState::Identifying);
    }

    /// Apply one command; `Flow::Stop` on shutdown or closed channel
    fn handle_command(&mut self, command: Option<Command>) -> Flow {
        match command {
            Some(Command::Connect) => {
                self.connect();
                Flow::Continue
            }
            Some(Command::Shutdown) => {
                tracing::debug!("Shutdown requested in {}", self.state);
                Flow::Stop
            }
            None => {
                tracing::debug!("All client handles dropped");
                Flow::Stop
            }
        }
    }

    async fn idle(&mut self) -> Flow {
        let command = self.commands.recv().await;
        self.handle_command(command)
    }

    /// Sleep for `duration` while still serving commands
    async fn wait(&mut self, duration: Duration) -> Flow {
        let sleep = tokio::time::sleep(duration);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => return Flow::Continue,
                command = self.commands.recv() => {
                    if self.handle_command(command) == Flow::Stop {
                        return Flow::Stop;
                    }
                }
            }
        }
    }

    async fn identify_phase(&mut self) -> Flow {
        match self.identify().await {
            Ok(()) => {
                self.transition(ConnectionState::Polling);
                Flow::Continue
            }
            Err(e) => {
                tracing::warn!(
                    "Identify failed for {}, retrying in {:?}: {}",
                    self.endpoints.base_url(),
                    self.timing.identify_retry_delay,
                    e
                );
                self.emit(DeviceEvent::Error(format!("device info error: {}", e)));
                let delay = self.timing.identify_retry_delay;
                self.wait(delay).await
            }
        }
    }

    async fn identify(&mut self) -> Result<(), ApiError> {
        let body = self
            .transport
            .request(self.endpoints.device_info_path())
            .await?;
        let info = DeviceInfo::from_xml(&body)?;

        if self.endpoints.zone().persists_device_info() {
            self.persist_device_info(&info).await;
        }

        self.emit(DeviceEvent::Debug(format!("device info: {}", body)));
        self.emit(DeviceEvent::Connect("Connected.".to_string()));
        self.emit(DeviceEvent::DeviceInfo(info));

        self.snapshot.is_connected = true;
        self.publish();

        if self.fetch_upnp_description {
            self.fetch_upnp().await;
        }

        Ok(())
    }

    async fn persist_device_info(&self, info: &DeviceInfo) {
        match save_device_info(self.store.as_ref(), &self.device_info_path, info).await {
            Ok(()) => tracing::debug!("Device info written to {}", self.device_info_path.display()),
            Err(e) => {
                tracing::warn!(
                    "Failed to write device info to {}: {}",
                    self.device_info_path.display(),
                    e
                );
                self.emit(DeviceEvent::Error(format!("device info write error: {}", e)));
            }
        }
    }

    /// Best effort: many receivers do not serve the description at all, and
    /// some drop the port silently, so the fetch is bounded by `upnp_timeout`
    async fn fetch_upnp(&self) {
        let url = self.endpoints.upnp_url();
        let limit = self.timing.upnp_timeout;
        let result = match tokio::time::timeout(limit, self.transport.request_url(&url)).await {
            Ok(Ok(body)) => UpnpDescription::from_xml(&body).map_err(ApiError::from),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ApiError::NetworkError(format!("no answer within {:?}", limit))),
        };

        match result {
            Ok(description) => {
                tracing::debug!("UPnP description: {}", description.device.friendly_name);
                self.emit(DeviceEvent::DeviceInfoUpnp(description));
            }
            Err(e) => {
                tracing::debug!("UPnP description unavailable at {}: {}", url, e);
                self.emit(DeviceEvent::Error(format!("device info upnp error: {}", e)));
            }
        }
    }

    async fn polling_phase(&mut self) -> Flow {
        let mut interval = tokio::time::interval(self.timing.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut first_cycle = true;

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                command = self.commands.recv() => {
                    if self.handle_command(command) == Flow::Stop {
                        return Flow::Stop;
                    }
                    continue;
                }
            }

            match self.poll_cycle(first_cycle).await {
                Ok(_) => first_cycle = false,
                Err(e) => {
                    drop(interval);
                    self.handle_poll_failure(e);
                    self.connect();
                    return Flow::Continue;
                }
            }
        }
    }

    /// One fetch, decode, diff iteration; `Ok(true)` when a state was notified
    async fn poll_cycle(&mut self, force: bool) -> Result<bool, ApiError> {
        let zone = self.endpoints.zone();
        let body = self.transport.request(self.endpoints.status_path()).await?;
        let status = ZoneStatus::from_xml(&body)?;
        let raw = RawZoneState::from_status(&status, zone)?;

        match self.snapshot.apply(&raw, zone, force) {
            Some(state) => {
                tracing::debug!("State change: {:?}", state);
                self.emit(DeviceEvent::Debug(format!("device state data: {}", body)));
                self.emit(state.to_event());
                self.publish();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn handle_poll_failure(&mut self, error: ApiError) {
        tracing::warn!(
            "Polling {} failed, reconnecting: {}",
            self.endpoints.base_url(),
            error
        );
        self.emit(DeviceEvent::Error(format!("update device state error: {}", error)));

        self.snapshot = StateSnapshot::disconnected();
        self.publish();

        self.emit(DeviceState::disconnected().to_event());
        self.emit(DeviceEvent::Disconnect("Disconnected.".to_string()));
        self.transition(ConnectionState::Disconnected);
    }
}
