//! Zone status page decoder.
//!
//! ```xml
//! <item>
//!   <Power><value>ON</value></Power>
//!   <InputFuncSelect><value>CD</value></InputFuncSelect>
//!   <VolumeDisplay><value>Absolute</value></VolumeDisplay>
//!   <MasterVolume><value>-40.0</value></MasterVolume>
//!   <Mute><value>off</value></Mute>
//! </item>
//! ```
//!
//! Fields are kept verbatim; interpreting them (power flag, volume offset,
//! input renaming) belongs to the client.

use crate::common::values::{first_value, ValueList};
use crate::common::xml_decode;
use crate::error::ParseResult;
use serde::{Deserialize, Serialize};

/// Decoded zone status document (`<item>` root).
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename = "item")]
pub struct ZoneStatus {
    /// `ON` or `STANDBY`/`OFF`
    #[serde(rename = "Power", default)]
    pub power: Vec<ValueList>,

    /// Selected input, e.g. `CD`, `TUNER`, `Internet Radio`
    #[serde(rename = "InputFuncSelect", default)]
    pub input_func_select: Vec<ValueList>,

    /// Relative dB value, `-80.0` is the floor; `--` while unknown
    #[serde(rename = "MasterVolume", default)]
    pub master_volume: Vec<ValueList>,

    /// `on` or `off`
    #[serde(rename = "Mute", default)]
    pub mute: Vec<ValueList>,

    /// `Absolute` or `Relative`
    #[serde(rename = "VolumeDisplay", default)]
    pub volume_display: Vec<ValueList>,
}

impl ZoneStatus {
    /// Parse a zone status page.
    pub fn from_xml(xml: &str) -> ParseResult<Self> {
        xml_decode::parse(xml)
    }

    /// Raw `Power` value.
    pub fn power(&self) -> ParseResult<&str> {
        first_value(&self.power, "Power")
    }

    /// Raw `InputFuncSelect` value.
    pub fn input_func_select(&self) -> ParseResult<&str> {
        first_value(&self.input_func_select, "InputFuncSelect")
    }

    /// Raw `MasterVolume` value.
    pub fn master_volume(&self) -> ParseResult<&str> {
        first_value(&self.master_volume, "MasterVolume")
    }

    /// Raw `Mute` value.
    pub fn mute(&self) -> ParseResult<&str> {
        first_value(&self.mute, "Mute")
    }

    /// Raw `VolumeDisplay` value, absent on some models.
    pub fn volume_display(&self) -> Option<&str> {
        self.volume_display.first().and_then(ValueList::first)
    }
}
