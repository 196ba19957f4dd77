//! Public handle over the connection task

use std::sync::Arc;

use denon_api::{ApiError, DeviceEndpointSet, HttpClient, Transport};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::events::{DeviceEvent, EventSink};
use crate::manager::{Command, ConnectionManager, ConnectionState};
use crate::snapshot::StateSnapshot;
use crate::store::{DeviceInfoStore, FileStore};

/// Client for a single receiver zone
///
/// Owns the connection task that mirrors the zone state. The mirror is
/// observable through [`snapshot`](Self::snapshot) and the event receiver
/// returned by [`new`](Self::new); commands go out through
/// [`send`](Self::send).
///
/// # Example
///
/// ```rust,ignore
/// use denon_client::{ClientConfig, DenonClient, DeviceEvent};
///
/// let (client, mut events) = DenonClient::new(ClientConfig::new("192.168.1.20"))?;
/// client.connect()?;
///
/// while let Some(event) = events.recv().await {
///     if let DeviceEvent::DeviceState { power, volume, .. } = event {
///         println!("power={} volume={}", power, volume);
///     }
/// }
/// ```
pub struct DenonClient {
    endpoints: DeviceEndpointSet,
    transport: Arc<dyn Transport>,
    sink: Arc<dyn EventSink>,
    commands: mpsc::UnboundedSender<Command>,
    snapshot_rx: watch::Receiver<StateSnapshot>,
    state_rx: watch::Receiver<ConnectionState>,
    task: Option<JoinHandle<()>>,
}

impl DenonClient {
    /// Create a client backed by HTTP and the filesystem.
    ///
    /// Events are delivered on the returned receiver. The connection task
    /// starts idle; call [`connect`](Self::connect) to begin.
    pub fn new(config: ClientConfig) -> Result<(Self, mpsc::UnboundedReceiver<DeviceEvent>)> {
        config.validate()?;

        let http = HttpClient::with_timeouts(
            &config.host,
            config.port,
            config.connect_timeout,
            config.request_timeout,
        )
        .map_err(ApiError::from)?;

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let client = Self::with_parts(config, Arc::new(http), Arc::new(FileStore), Arc::new(event_tx))?;

        Ok((client, event_rx))
    }

    /// Create a client from explicit collaborators
    ///
    /// Must be called within a tokio runtime.
    pub fn with_parts(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        store: Arc<dyn DeviceInfoStore>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self> {
        config.validate()?;
        let endpoints = config.endpoints()?;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(StateSnapshot::default());
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);

        let manager = ConnectionManager::new(
            &config,
            endpoints.clone(),
            Arc::clone(&transport),
            store,
            Arc::clone(&sink),
            command_rx,
            snapshot_tx,
            state_tx,
        );
        let task = tokio::spawn(manager.run());

        tracing::debug!("Created client for {} ({})", endpoints.base_url(), endpoints.zone());

        Ok(Self {
            endpoints,
            transport,
            sink,
            commands: command_tx,
            snapshot_rx,
            state_rx,
            task: Some(task),
        })
    }

    /// Ask the connection task to start identifying.
    ///
    /// A no-op while already identifying or polling.
    pub fn connect(&self) -> Result<()> {
        self.commands
            .send(Command::Connect)
            .map_err(|_| ClientError::Shutdown)
    }

    /// Issue one GET to `endpoint` against the receiver's base address.
    ///
    /// The response body is discarded. Independent of the connection state:
    /// a failure here never disconnects the client.
    pub async fn send(&self, endpoint: &str) -> std::result::Result<(), ApiError> {
        match self.transport.request(endpoint).await {
            Ok(_) => {
                self.sink
                    .emit(DeviceEvent::Message(format!("send command: {}", endpoint)));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Command {} failed: {}", endpoint, e);
                self.sink
                    .emit(DeviceEvent::Error(format!("send command error: {}", e)));
                Err(e)
            }
        }
    }

    /// Last committed snapshot
    pub fn snapshot(&self) -> StateSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver that observes every committed snapshot
    pub fn watch_snapshot(&self) -> watch::Receiver<StateSnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    pub fn endpoints(&self) -> &DeviceEndpointSet {
        &self.endpoints
    }

    /// Stop the connection task and wait for it to exit
    pub async fn shutdown(mut self) -> Result<()> {
        // The task may already be gone if every command was refused
        let _ = self.commands.send(Command::Shutdown);

        if let Some(task) = self.task.take() {
            task.await.map_err(|e| ClientError::Task(e.to_string()))?;
        }

        tracing::debug!("Client for {} shut down", self.endpoints.base_url());
        Ok(())
    }
}

impl Drop for DenonClient {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = self.commands.send(Command::Shutdown);
            drop(task);
        }
    }
}
