//! Shared fakes for the client integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use denon_api::{ApiError, Transport};
use denon_client::{DeviceEvent, DeviceInfoStore};
use tokio::sync::mpsc;

pub const DEVICE_INFO_PATH: &str = "/goform/Deviceinfo.xml";
pub const MAIN_STATUS_PATH: &str = "/goform/formMainZone_MainZoneXmlStatusLite.xml";
pub const ZONE2_STATUS_PATH: &str = "/goform/formZone2_Zone2XmlStatusLite.xml";

pub const DEVICE_INFO_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Device_Info>
  <DeviceInfoVers>3.0</DeviceInfoVers>
  <CommApiVers>0301</CommApiVers>
  <Gen>4</Gen>
  <BrandCode>0</BrandCode>
  <ProductCategory>00</ProductCategory>
  <CategoryName>AV RECEIVER</CategoryName>
  <ManualModelName>AVR-X2700H</ManualModelName>
  <ModelName>*AVR-X2700H</ModelName>
  <MacAddress>0005CDAABBCC</MacAddress>
  <DeviceZones>2</DeviceZones>
</Device_Info>"#;

pub const UPNP_XML: &str = r#"<?xml version="1.0"?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
  <specVersion><major>1</major><minor>0</minor></specVersion>
  <device>
    <deviceType>urn:schemas-denon-com:device:AiosDevice:1</deviceType>
    <friendlyName>Living Room</friendlyName>
    <manufacturer>Denon</manufacturer>
    <modelName>AVR-X2700H</modelName>
    <modelNumber>X2700H</modelNumber>
    <serialNumber>ABC1234567</serialNumber>
    <UDN>uuid:5f9ec1b3-ed59-1900-4530-0005cdaabbcc</UDN>
  </device>
</root>"#;

/// Status page for the given raw readings
pub fn status_xml(power: &str, input: &str, volume: &str, mute: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <item>\
         <Power><value>{}</value></Power>\
         <InputFuncSelect><value>{}</value></InputFuncSelect>\
         <VolumeDisplay><value>Absolute</value></VolumeDisplay>\
         <MasterVolume><value>{}</value></MasterVolume>\
         <Mute><value>{}</value></Mute>\
         </item>",
        power, input, volume, mute
    )
}

#[derive(Debug, Clone)]
pub enum Reply {
    Body(String),
    Fail,
    /// Never answers, like a port that silently drops packets
    Hang,
}

impl Reply {
    pub fn body(text: impl Into<String>) -> Self {
        Reply::Body(text.into())
    }
}

/// In-memory transport answering from per-path reply queues
///
/// Replies are consumed in order; the last one in a queue repeats forever.
/// A path with no queue fails like an unreachable host.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue for `path` with a single repeating reply
    pub fn set_reply(&self, path: &str, reply: Reply) {
        self.set_replies(path, vec![reply]);
    }

    pub fn set_replies(&self, path: &str, replies: Vec<Reply>) {
        self.replies
            .lock()
            .unwrap()
            .insert(path.to_string(), replies.into_iter().collect());
    }

    /// Number of requests issued for `path` so far
    pub fn count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_str() == path)
            .count()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    async fn answer(&self, key: &str) -> Result<String, ApiError> {
        self.requests.lock().unwrap().push(key.to_string());

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            match replies.get_mut(key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Fail) => Err(ApiError::NetworkError("connection refused".to_string())),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(ApiError::NetworkError(format!("no route to {}", key))),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn request(&self, path: &str) -> Result<String, ApiError> {
        self.answer(path).await
    }

    async fn request_url(&self, url: &str) -> Result<String, ApiError> {
        self.answer(url).await
    }
}

/// Device info store that records writes in memory
#[derive(Default)]
pub struct MemoryStore {
    writes: Mutex<Vec<(PathBuf, String)>>,
    fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeviceInfoStore for MemoryStore {
    async fn write(&self, path: &Path, content: &str) -> std::io::Result<()> {
        if self.fail {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only filesystem",
            ));
        }
        self.writes
            .lock()
            .unwrap()
            .push((path.to_path_buf(), content.to_string()));
        Ok(())
    }
}

/// Drain every event delivered so far
pub fn drain(rx: &mut mpsc::UnboundedReceiver<DeviceEvent>) -> Vec<DeviceEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Event kinds, ignoring payloads
pub fn kinds(events: &[DeviceEvent]) -> Vec<&'static str> {
    events.iter().map(DeviceEvent::kind).collect()
}

/// Only the committed states, as (power, reference, volume, mute)
pub fn states(events: &[DeviceEvent]) -> Vec<(bool, String, i32, bool)> {
    events
        .iter()
        .filter_map(|event| match event {
            DeviceEvent::DeviceState {
                power,
                reference,
                volume,
                mute,
            } => Some((*power, reference.clone(), *volume, *mute)),
            _ => None,
        })
        .collect()
}

/// Let the connection task run until it blocks again
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
