/// Port the UPnP device description is served on, independent of the
/// configured control port
pub const UPNP_PORT: u16 = 60006;

/// The fixed `/goform` endpoint table exposed by Denon/Marantz receivers
///
/// Only [`ApiUrl::DeviceInfo`], [`ApiUrl::Upnp`] and the `*StatusLite`
/// pages are used by the polling client; the rest are available to callers
/// of `send`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiUrl {
    /// UPnP device description (bare host, [`UPNP_PORT`])
    Upnp,
    /// Model, firmware and capability information
    DeviceInfo,
    MainZone,
    MainZoneStatus,
    MainZoneStatusLite,
    Zone2Status,
    Zone2StatusLite,
    Zone3Status,
    Zone3StatusLite,
    Zone4Status,
    Zone4StatusLite,
    /// Sound mode is reported on the main zone lite page
    SoundModeStatus,
    TunerStatus,
    /// Telnet-style command passthrough; append the command after `?`
    IPhoneDirect,
    AppCommand,
    AppCommand300,
    NetAudioStatus,
    HdTunerStatus,
    NetAudioCommandPost,
}

impl ApiUrl {
    /// Every entry of the table, in declaration order
    pub const ALL: [ApiUrl; 19] = [
        ApiUrl::Upnp,
        ApiUrl::DeviceInfo,
        ApiUrl::MainZone,
        ApiUrl::MainZoneStatus,
        ApiUrl::MainZoneStatusLite,
        ApiUrl::Zone2Status,
        ApiUrl::Zone2StatusLite,
        ApiUrl::Zone3Status,
        ApiUrl::Zone3StatusLite,
        ApiUrl::Zone4Status,
        ApiUrl::Zone4StatusLite,
        ApiUrl::SoundModeStatus,
        ApiUrl::TunerStatus,
        ApiUrl::IPhoneDirect,
        ApiUrl::AppCommand,
        ApiUrl::AppCommand300,
        ApiUrl::NetAudioStatus,
        ApiUrl::HdTunerStatus,
        ApiUrl::NetAudioCommandPost,
    ];

    /// Path relative to the host; [`ApiUrl::Upnp`] is served on [`UPNP_PORT`]
    pub fn path(&self) -> &'static str {
        match self {
            ApiUrl::Upnp => "/upnp/desc/aios_device/aios_device.xml",
            ApiUrl::DeviceInfo => "/goform/Deviceinfo.xml",
            ApiUrl::MainZone => "/goform/formMainZone_MainZoneXml.xml",
            ApiUrl::MainZoneStatus => "/goform/formMainZone_MainZoneXmlStatus.xml",
            ApiUrl::MainZoneStatusLite => "/goform/formMainZone_MainZoneXmlStatusLite.xml",
            ApiUrl::Zone2Status => "/goform/forZone2_Zone2XmlStatus.xml",
            ApiUrl::Zone2StatusLite => "/goform/formZone2_Zone2XmlStatusLite.xml",
            ApiUrl::Zone3Status => "/goform/forZone3_Zone3XmlStatus.xml",
            ApiUrl::Zone3StatusLite => "/goform/formZone3_Zone3XmlStatusLite.xml",
            ApiUrl::Zone4Status => "/goform/forZone4_Zone4XmlStatus.xml",
            ApiUrl::Zone4StatusLite => "/goform/formZone4_Zone4XmlStatusLite.xml",
            ApiUrl::SoundModeStatus => "/goform/formMainZone_MainZoneXmlStatusLite.xml",
            ApiUrl::TunerStatus => "/goform/formTuner_TunerXml.xml",
            ApiUrl::IPhoneDirect => "/goform/formiPhoneAppDirect.xml?",
            ApiUrl::AppCommand => "/goform/AppCommand.xml",
            ApiUrl::AppCommand300 => "/goform/AppCommand0300.xml",
            ApiUrl::NetAudioStatus => "/goform/formNetAudio_StatusXml.xml",
            ApiUrl::HdTunerStatus => "/goform/formTuner_HdXml.xml",
            ApiUrl::NetAudioCommandPost => "/NetAudio/index.put.asp",
        }
    }

    /// Absolute URL of the UPnP device description for `host`
    pub fn upnp_url(host: &str) -> String {
        format!("http://{}:{}{}", host, UPNP_PORT, ApiUrl::Upnp.path())
    }

    /// Path that passes `code` (e.g. `PWON`, `MVUP`, `SIDVD`) to the
    /// receiver's command interpreter
    pub fn direct_command(code: &str) -> String {
        format!("{}{}", ApiUrl::IPhoneDirect.path(), code)
    }
}
