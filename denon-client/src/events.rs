//! Notifications emitted by the client
//!
//! Every lifecycle step and committed state change is reported as a
//! [`DeviceEvent`] through an [`EventSink`]. Delivery is fire-and-forget:
//! a sink that can no longer deliver simply drops the event.

use denon_parser::{DeviceInfo, UpnpDescription};
use tokio::sync::mpsc;

/// A notification from the connection state machine or command dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    /// Raw payloads, useful when diagnosing firmware differences
    Debug(String),
    /// Informational message, e.g. a command was sent
    Message(String),
    /// A request, decode or persistence step failed
    Error(String),
    /// The identify step succeeded
    Connect(String),
    /// Polling failed and the connection was dropped
    Disconnect(String),
    /// The UPnP device description was fetched
    DeviceInfoUpnp(UpnpDescription),
    /// The device info document was fetched
    DeviceInfo(DeviceInfo),
    /// A new zone state was committed
    DeviceState {
        power: bool,
        reference: String,
        volume: i32,
        mute: bool,
    },
}

impl DeviceEvent {
    /// Short name of the event kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            DeviceEvent::Debug(_) => "debug",
            DeviceEvent::Message(_) => "message",
            DeviceEvent::Error(_) => "error",
            DeviceEvent::Connect(_) => "connect",
            DeviceEvent::Disconnect(_) => "disconnect",
            DeviceEvent::DeviceInfoUpnp(_) => "deviceInfoUpnp",
            DeviceEvent::DeviceInfo(_) => "deviceInfo",
            DeviceEvent::DeviceState { .. } => "deviceState",
        }
    }
}

/// Receiver of client notifications
pub trait EventSink: Send + Sync + 'static {
    fn emit(&self, event: DeviceEvent);
}

impl EventSink for mpsc::UnboundedSender<DeviceEvent> {
    fn emit(&self, event: DeviceEvent) {
        if let Err(e) = self.send(event) {
            tracing::trace!("Event receiver dropped, discarding {} event", e.0.kind());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_sink_delivers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.emit(DeviceEvent::Connect("Connected.".to_string()));
        assert_eq!(
            rx.try_recv().unwrap(),
            DeviceEvent::Connect("Connected.".to_string())
        );
    }

    #[test]
    fn test_channel_sink_ignores_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        // Must not panic
        tx.emit(DeviceEvent::Debug("dropped".to_string()));
    }

    #[test]
    fn test_event_kind() {
        let event = DeviceEvent::DeviceState {
            power: true,
            reference: "CD".to_string(),
            volume: 40,
            mute: false,
        };
        assert_eq!(event.kind(), "deviceState");
        assert_eq!(DeviceEvent::Disconnect(String::new()).kind(), "disconnect");
    }
}
