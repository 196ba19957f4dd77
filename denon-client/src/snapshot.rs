//! Last committed zone state and the rules that derive it from a status page
//!
//! A poll cycle decodes a [`ZoneStatus`], extracts a [`RawZoneState`],
//! derives the next [`DeviceState`] from it against the current
//! [`StateSnapshot`], and commits it only when something changed (or when
//! the caller forces the first notification after connecting).

use denon_api::ZoneRole;
use denon_parser::{ParseResult, ZoneStatus};
use serde::Serialize;

use crate::events::DeviceEvent;

/// Fixed offset between the receiver's relative dB scale and volume steps
pub const VOLUME_OFFSET: f64 = 80.0;

/// Raw readings below this are the "unknown / floor" sentinel
pub const VOLUME_FLOOR: f64 = -79.5;

/// The four raw status fields a poll cycle needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawZoneState {
    pub power: String,
    /// `None` for roles that never read the input
    pub input: Option<String>,
    pub master_volume: String,
    pub mute: String,
}

impl RawZoneState {
    /// Extract the raw fields for `zone` from a decoded status page.
    ///
    /// `InputFuncSelect` is only required for roles that track the input.
    pub fn from_status(status: &ZoneStatus, zone: ZoneRole) -> ParseResult<Self> {
        let input = if zone.tracks_input() {
            Some(status.input_func_select()?.to_string())
        } else {
            None
        };

        Ok(Self {
            power: status.power()?.to_string(),
            input,
            master_volume: status.master_volume()?.to_string(),
            mute: status.mute()?.to_string(),
        })
    }
}

/// The externally visible part of the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceState {
    pub power: bool,
    pub reference: String,
    pub volume: i32,
    pub mute: bool,
}

impl DeviceState {
    /// State reported while the receiver is unreachable
    pub fn disconnected() -> Self {
        Self {
            power: false,
            reference: String::new(),
            volume: 0,
            mute: true,
        }
    }

    pub fn to_event(&self) -> DeviceEvent {
        DeviceEvent::DeviceState {
            power: self.power,
            reference: self.reference.clone(),
            volume: self.volume,
            mute: self.mute,
        }
    }
}

/// Last committed device state, owned by the connection task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    pub power: bool,
    pub reference: String,
    pub volume: i32,
    pub mute: bool,
    pub is_connected: bool,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            power: false,
            reference: String::new(),
            volume: 0,
            mute: false,
            is_connected: false,
        }
    }
}

impl StateSnapshot {
    /// Sentinel committed after a failed poll
    pub fn disconnected() -> Self {
        let state = DeviceState::disconnected();
        Self {
            power: state.power,
            reference: state.reference,
            volume: state.volume,
            mute: state.mute,
            is_connected: false,
        }
    }

    pub fn device_state(&self) -> DeviceState {
        DeviceState {
            power: self.power,
            reference: self.reference.clone(),
            volume: self.volume,
            mute: self.mute,
        }
    }

    /// Derive the next state from raw readings without committing it
    pub fn derive(&self, raw: &RawZoneState, zone: ZoneRole) -> DeviceState {
        let power = raw.power == "ON";

        let reference = match (&raw.input, zone.tracks_input()) {
            (Some(input), true) => map_reference(input),
            _ => self.reference.clone(),
        };

        let volume = derive_volume(&raw.master_volume, self.volume);

        // A receiver in standby always reports as muted
        let mute = if power { raw.mute == "on" } else { true };

        DeviceState {
            power,
            reference,
            volume,
            mute,
        }
    }

    /// Whether any notified field differs from `next`
    pub fn differs_from(&self, next: &DeviceState) -> bool {
        self.power != next.power
            || self.reference != next.reference
            || self.volume != next.volume
            || self.mute != next.mute
    }

    pub fn commit(&mut self, next: DeviceState) {
        self.power = next.power;
        self.reference = next.reference;
        self.volume = next.volume;
        self.mute = next.mute;
    }

    /// Run the derivation and change detection of one poll cycle.
    ///
    /// Returns the committed state when a notification is due: always when
    /// `force` is set, otherwise only if a field changed. The snapshot is
    /// left untouched when `None` is returned.
    pub fn apply(&mut self, raw: &RawZoneState, zone: ZoneRole, force: bool) -> Option<DeviceState> {
        let next = self.derive(raw, zone);
        if !force && !self.differs_from(&next) {
            return None;
        }
        self.commit(next.clone());
        Some(next)
    }
}

/// Canonical tag for an `InputFuncSelect` value
pub fn map_reference(raw: &str) -> String {
    match raw {
        "Internet Radio" => "IRADIO".to_string(),
        "AirPlay" => "NET".to_string(),
        other => other.to_string(),
    }
}

/// Volume steps for a raw `MasterVolume` reading.
///
/// Readings that are not numbers, or fall below [`VOLUME_FLOOR`], keep
/// `previous`.
pub fn derive_volume(raw: &str, previous: i32) -> i32 {
    match raw.trim().parse::<f64>() {
        Ok(db) if db.is_finite() && db >= VOLUME_FLOOR => (db + VOLUME_OFFSET).trunc() as i32,
        _ => previous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn raw(power: &str, input: &str, volume: &str, mute: &str) -> RawZoneState {
        RawZoneState {
            power: power.to_string(),
            input: Some(input.to_string()),
            master_volume: volume.to_string(),
            mute: mute.to_string(),
        }
    }

    #[rstest]
    #[case("-80.0", 17, 17)]
    #[case("-79.5", 17, 0)]
    #[case("0.0", 17, 80)]
    #[case("-40.0", 0, 40)]
    #[case("-35.5", 0, 44)]
    #[case("18.0", 0, 98)]
    #[case("--", 25, 25)]
    #[case("", 25, 25)]
    #[case("NaN", 25, 25)]
    #[case(" -20.0 ", 0, 60)]
    fn test_derive_volume(#[case] raw: &str, #[case] previous: i32, #[case] expected: i32) {
        assert_eq!(derive_volume(raw, previous), expected);
    }

    #[rstest]
    #[case("Internet Radio", "IRADIO")]
    #[case("AirPlay", "NET")]
    #[case("CD", "CD")]
    #[case("SAT/CBL", "SAT/CBL")]
    #[case("", "")]
    #[case("internet radio", "internet radio")]
    fn test_map_reference(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(map_reference(raw), expected);
    }

    #[test]
    fn test_initial_snapshot() {
        let snapshot = StateSnapshot::default();
        assert!(!snapshot.power);
        assert_eq!(snapshot.reference, "");
        assert_eq!(snapshot.volume, 0);
        assert!(!snapshot.mute);
        assert!(!snapshot.is_connected);
    }

    #[test]
    fn test_disconnected_sentinel() {
        let snapshot = StateSnapshot::disconnected();
        assert_eq!(snapshot.device_state(), DeviceState::disconnected());
        assert!(snapshot.mute);
        assert!(!snapshot.is_connected);
    }

    #[test]
    fn test_mute_forced_when_off() {
        let snapshot = StateSnapshot::default();
        let next = snapshot.derive(&raw("STANDBY", "CD", "-40.0", "off"), ZoneRole::MainZone);
        assert!(!next.power);
        assert!(next.mute);
    }

    #[test]
    fn test_mute_follows_raw_when_on() {
        let snapshot = StateSnapshot::default();
        let on = snapshot.derive(&raw("ON", "CD", "-40.0", "on"), ZoneRole::MainZone);
        let off = snapshot.derive(&raw("ON", "CD", "-40.0", "off"), ZoneRole::MainZone);
        assert!(on.mute);
        assert!(!off.mute);
    }

    #[test]
    fn test_sound_mode_keeps_reference() {
        let mut snapshot = StateSnapshot::default();
        snapshot.reference = "MOVIE".to_string();

        let next = snapshot.derive(
            &raw("ON", "Internet Radio", "-40.0", "off"),
            ZoneRole::SoundMode,
        );
        assert_eq!(next.reference, "MOVIE");
    }

    #[test]
    fn test_apply_forced_commits_equal_state() {
        let mut snapshot = StateSnapshot::disconnected();
        let readings = RawZoneState {
            power: "STANDBY".to_string(),
            input: None,
            master_volume: "--".to_string(),
            mute: "off".to_string(),
        };

        assert!(!snapshot.differs_from(&snapshot.derive(&readings, ZoneRole::SoundMode)));
        assert_eq!(snapshot.apply(&readings, ZoneRole::SoundMode, false), None);
        assert_eq!(
            snapshot.apply(&readings, ZoneRole::SoundMode, true),
            Some(DeviceState::disconnected())
        );
    }

    #[test]
    fn test_apply_detects_single_field_change() {
        let mut snapshot = StateSnapshot::default();
        let first = raw("ON", "CD", "-40.0", "off");
        assert!(snapshot.apply(&first, ZoneRole::MainZone, true).is_some());
        assert_eq!(snapshot.apply(&first, ZoneRole::MainZone, false), None);

        let louder = raw("ON", "CD", "-39.0", "off");
        let committed = snapshot.apply(&louder, ZoneRole::MainZone, false).unwrap();
        assert_eq!(committed.volume, 41);
        assert_eq!(snapshot.volume, 41);
        assert_eq!(snapshot.reference, "CD");
    }

    #[test]
    fn test_apply_leaves_is_connected_alone() {
        let mut snapshot = StateSnapshot::default();
        snapshot.is_connected = true;
        snapshot.apply(&raw("ON", "TV", "-30.0", "off"), ZoneRole::Zone2, true);
        assert!(snapshot.is_connected);
    }

    #[test]
    fn test_raw_state_from_status() {
        let status = ZoneStatus::from_xml(
            "<item><Power><value>ON</value></Power>\
             <InputFuncSelect><value>AirPlay</value></InputFuncSelect>\
             <MasterVolume><value>-50.0</value></MasterVolume>\
             <Mute><value>off</value></Mute></item>",
        )
        .unwrap();

        let main = RawZoneState::from_status(&status, ZoneRole::MainZone).unwrap();
        assert_eq!(main.input.as_deref(), Some("AirPlay"));

        let sound = RawZoneState::from_status(&status, ZoneRole::SoundMode).unwrap();
        assert_eq!(sound.input, None);
    }

    #[test]
    fn test_raw_state_requires_input_for_zones() {
        let status = ZoneStatus::from_xml(
            "<item><Power><value>ON</value></Power>\
             <MasterVolume><value>-50.0</value></MasterVolume>\
             <Mute><value>off</value></Mute></item>",
        )
        .unwrap();

        assert!(RawZoneState::from_status(&status, ZoneRole::Zone3).is_err());
        assert!(RawZoneState::from_status(&status, ZoneRole::SoundMode).is_ok());
    }
}
