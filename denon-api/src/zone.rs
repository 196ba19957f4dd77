use crate::endpoints::ApiUrl;
use crate::error::{ApiError, Result};
use std::fmt;

/// Which status page, and which derivation rules, a client follows
///
/// The numeric selector (0–3) is the configuration surface; anything else is
/// rejected by [`ZoneRole::try_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZoneRole {
    /// Main zone (selector 0)
    #[default]
    MainZone,
    /// Zone 2 (selector 1)
    Zone2,
    /// Zone 3 (selector 2)
    Zone3,
    /// Sound-mode reporting on the main zone (selector 3)
    SoundMode,
}

impl ZoneRole {
    /// Numeric selector for this role
    pub fn index(&self) -> u8 {
        match self {
            ZoneRole::MainZone => 0,
            ZoneRole::Zone2 => 1,
            ZoneRole::Zone3 => 2,
            ZoneRole::SoundMode => 3,
        }
    }

    /// The status page polled for this role
    pub fn status_endpoint(&self) -> ApiUrl {
        match self {
            ZoneRole::MainZone => ApiUrl::MainZoneStatusLite,
            ZoneRole::Zone2 => ApiUrl::Zone2StatusLite,
            ZoneRole::Zone3 => ApiUrl::Zone3StatusLite,
            ZoneRole::SoundMode => ApiUrl::SoundModeStatus,
        }
    }

    /// Whether polling updates the input reference for this role
    ///
    /// Sound-mode clients keep whatever reference they already hold.
    pub fn tracks_input(&self) -> bool {
        !matches!(self, ZoneRole::SoundMode)
    }

    /// Whether the identify step persists device info for this role
    pub fn persists_device_info(&self) -> bool {
        matches!(self, ZoneRole::MainZone)
    }
}

impl TryFrom<u8> for ZoneRole {
    type Error = ApiError;

    fn try_from(index: u8) -> Result<Self> {
        match index {
            0 => Ok(ZoneRole::MainZone),
            1 => Ok(ZoneRole::Zone2),
            2 => Ok(ZoneRole::Zone3),
            3 => Ok(ZoneRole::SoundMode),
            other => Err(ApiError::InvalidZone(other)),
        }
    }
}

impl fmt::Display for ZoneRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ZoneRole::MainZone => "Main Zone",
            ZoneRole::Zone2 => "Zone 2",
            ZoneRole::Zone3 => "Zone 3",
            ZoneRole::SoundMode => "Sound Mode",
        };
        f.write_str(name)
    }
}
