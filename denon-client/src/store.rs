//! Persistence of the device info document

use std::path::Path;

use async_trait::async_trait;
use denon_parser::DeviceInfo;

use crate::error::Result;

/// Destination for the device info document written during identify
#[async_trait]
pub trait DeviceInfoStore: Send + Sync {
    async fn write(&self, path: &Path, content: &str) -> std::io::Result<()>;
}

/// Writes the document to the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

#[async_trait]
impl DeviceInfoStore for FileStore {
    async fn write(&self, path: &Path, content: &str) -> std::io::Result<()> {
        tokio::fs::write(path, content).await
    }
}

/// Encode device info the way it is persisted: pretty JSON, vendor keys
pub fn encode_device_info(info: &DeviceInfo) -> Result<String> {
    Ok(serde_json::to_string_pretty(info)?)
}

/// Encode `info` and hand it to `store` at `path`
pub async fn save_device_info(
    store: &dyn DeviceInfoStore,
    path: &Path,
    info: &DeviceInfo,
) -> Result<()> {
    let content = encode_device_info(info)?;
    store.write(path, &content).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    fn info() -> DeviceInfo {
        DeviceInfo::from_xml(
            r#"<Device_Info>
  <ModelName>*AVR-X2700H</ModelName>
  <MacAddress>0005CDAABBCC</MacAddress>
  <DeviceZones>2</DeviceZones>
  <DeviceCapabilities>
    <Setup><ZoneRename><Control>1</Control></ZoneRename></Setup>
    <Operation><Usb><Control>0</Control></Usb></Operation>
  </DeviceCapabilities>
  <DeviceZoneCapabilities><Zone><No>0</No></Zone><ShortcutControl><Control>1</Control></ShortcutControl></DeviceZoneCapabilities>
  <DeviceZoneCapabilities><Zone><No>1</No></Zone><ShortcutControl><Control>0</Control></ShortcutControl></DeviceZoneCapabilities>
</Device_Info>"#,
        )
        .unwrap()
    }

    #[test]
    fn test_encode_device_info() {
        let json = encode_device_info(&info()).unwrap();
        assert!(json.contains("\"ModelName\": \"*AVR-X2700H\""));
        assert!(json.contains("\"MacAddress\": \"0005CDAABBCC\""));
        assert!(!json.contains("UpgradeVersion"));
    }

    #[test]
    fn test_encode_keeps_capability_sections() {
        let json = encode_device_info(&info()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value["DeviceCapabilities"],
            serde_json::json!({
                "Setup": { "ZoneRename": { "Control": "1" } },
                "Operation": { "Usb": { "Control": "0" } }
            })
        );
        assert_eq!(value["DeviceZoneCapabilities"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["DeviceZoneCapabilities"][1]["ShortcutControl"]["Control"], "0");
    }

    #[tokio::test]
    async fn test_file_store_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device_info.json");
        let content = encode_device_info(&info()).unwrap();

        FileStore.write(&path, &content).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["DeviceZones"], "2");
    }

    #[tokio::test]
    async fn test_file_store_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("device_info.json");

        assert!(FileStore.write(&path, "{}").await.is_err());
    }

    struct ReadOnlyStore;

    #[async_trait]
    impl DeviceInfoStore for ReadOnlyStore {
        async fn write(&self, _path: &Path, _content: &str) -> std::io::Result<()> {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only filesystem",
            ))
        }
    }

    #[tokio::test]
    async fn test_save_device_info_reports_persistence_error() {
        let error = save_device_info(&ReadOnlyStore, Path::new("device_info.json"), &info())
            .await
            .unwrap_err();

        assert!(matches!(error, ClientError::Persistence(_)));
        assert_eq!(error.to_string(), "Persistence error: read-only filesystem");
    }

    #[tokio::test]
    async fn test_save_device_info_writes_encoded_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device_info.json");

        save_device_info(&FileStore, &path, &info()).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, encode_device_info(&info()).unwrap());
    }
}
