// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating modes, presets and setpoint fields.
//!
//! Watts Vision thermostats report their operating mode as a numeric
//! `gv_mode` code. [`GvMode`] is the closed set of known codes and carries
//! the whole mode table: each code maps to exactly one [`Preset`] and to at
//! most one [`SetpointField`].
//!
//! | code | preset          | setpoint field     |
//! |------|-----------------|--------------------|
//! | 0    | `Comfort`       | `consigne_confort` |
//! | 1    | `Off`           | (none)             |
//! | 2    | `FrostProtect`  | `consigne_hg`      |
//! | 3    | `Eco`           | `consigne_eco`     |
//! | 4    | `Boost`         | `consigne_boost`   |
//! | 11   | `Program`       | `consigne_manuel`  |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// A known Watts Vision operating mode.
///
/// # Examples
///
/// ```
/// use watts_vision::types::{GvMode, Preset};
///
/// let mode: GvMode = "4".parse().unwrap();
/// assert_eq!(mode, GvMode::Boost);
/// assert_eq!(mode.preset(), Preset::Boost);
/// assert_eq!(mode.code(), "4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GvMode {
    /// Comfort temperature (code 0).
    #[default]
    Comfort,
    /// Heating off (code 1).
    Off,
    /// Frost protection (code 2).
    FrostProtect,
    /// Economy temperature (code 3).
    Eco,
    /// Temporary boost (code 4).
    Boost,
    /// Manual / program temperature (code 11).
    Program,
}

impl GvMode {
    /// Every known mode, in table order.
    pub const ALL: [Self; 6] = [
        Self::Comfort,
        Self::Off,
        Self::FrostProtect,
        Self::Eco,
        Self::Boost,
        Self::Program,
    ];

    /// Returns the wire code of this mode.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Comfort => "0",
            Self::Off => "1",
            Self::FrostProtect => "2",
            Self::Eco => "3",
            Self::Boost => "4",
            Self::Program => "11",
        }
    }

    /// Returns the preset this mode is presented as.
    #[must_use]
    pub const fn preset(self) -> Preset {
        match self {
            Self::Comfort => Preset::Comfort,
            Self::Off => Preset::Off,
            Self::FrostProtect => Preset::FrostProtect,
            Self::Eco => Preset::Eco,
            Self::Boost => Preset::Boost,
            Self::Program => Preset::Program,
        }
    }

    /// Returns the mode a preset selects.
    #[must_use]
    pub const fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Comfort => Self::Comfort,
            Preset::Off => Self::Off,
            Preset::FrostProtect => Self::FrostProtect,
            Preset::Eco => Self::Eco,
            Preset::Boost => Self::Boost,
            Preset::Program => Self::Program,
        }
    }

    /// Returns the setpoint field holding this mode's target temperature.
    ///
    /// `None` for [`GvMode::Off`].
    #[must_use]
    pub const fn setpoint_field(self) -> Option<SetpointField> {
        match self {
            Self::Comfort => Some(SetpointField::Comfort),
            Self::Off => None,
            Self::FrostProtect => Some(SetpointField::FrostProtect),
            Self::Eco => Some(SetpointField::Eco),
            Self::Boost => Some(SetpointField::Boost),
            Self::Program => Some(SetpointField::Manual),
        }
    }

    /// Returns `true` for [`GvMode::Off`].
    #[must_use]
    pub const fn is_off(self) -> bool {
        matches!(self, Self::Off)
    }

    /// Returns the HVAC mode this operating mode belongs to.
    #[must_use]
    pub const fn hvac_mode(self) -> HvacMode {
        if self.is_off() {
            HvacMode::Off
        } else {
            HvacMode::Heat
        }
    }
}

impl fmt::Display for GvMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for GvMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Self::Comfort),
            "1" => Ok(Self::Off),
            "2" => Ok(Self::FrostProtect),
            "3" => Ok(Self::Eco),
            "4" => Ok(Self::Boost),
            "11" => Ok(Self::Program),
            _ => Err(Error::UnknownModeCode(s.to_string())),
        }
    }
}

impl Serialize for GvMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for GvMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ModeCode::deserialize(deserializer)?
            .resolve()
            .map_err(serde::de::Error::custom)
    }
}

/// A raw `gv_mode` value as received from the vendor API.
///
/// The code is kept verbatim so that an unexpected value survives until it is
/// resolved, at which point it surfaces as [`Error::UnknownModeCode`].
///
/// # Examples
///
/// ```
/// use watts_vision::types::{GvMode, ModeCode};
///
/// assert_eq!(ModeCode::from(GvMode::Eco).resolve().unwrap(), GvMode::Eco);
/// assert!(ModeCode::new("9").resolve().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModeCode(String);

impl ModeCode {
    /// Wraps a raw code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the raw code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves the code against the mode table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownModeCode`] if the code is not in the table.
    pub fn resolve(&self) -> Result<GvMode, Error> {
        self.0.parse()
    }
}

impl Default for ModeCode {
    fn default() -> Self {
        GvMode::default().into()
    }
}

impl From<GvMode> for ModeCode {
    fn from(mode: GvMode) -> Self {
        Self(mode.code().to_string())
    }
}

impl fmt::Display for ModeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ModeCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ModeCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Number(n) => Self(n.to_string()),
        })
    }
}

/// Preset presented to the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Comfort temperature.
    Comfort,
    /// Heating off.
    Off,
    /// Frost protection.
    FrostProtect,
    /// Economy temperature.
    Eco,
    /// Temporary boost.
    Boost,
    /// Manual / program temperature.
    Program,
}

impl Preset {
    /// Every preset, in mode table order.
    pub const ALL: [Self; 6] = [
        Self::Comfort,
        Self::Off,
        Self::FrostProtect,
        Self::Eco,
        Self::Boost,
        Self::Program,
    ];

    /// Returns the preset name used by the host platform.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comfort => "comfort",
            Self::Off => "off",
            Self::FrostProtect => "frost_protect",
            Self::Eco => "eco",
            Self::Boost => "boost",
            Self::Program => "program",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HVAC mode presented to the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    /// The thermostat regulates towards a setpoint.
    Heat,
    /// The thermostat is off.
    Off,
}

impl HvacMode {
    /// Modes a Watts Vision thermostat supports.
    pub const SUPPORTED: [Self; 2] = [Self::Heat, Self::Off];

    /// Returns the mode name used by the host platform.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Heat => "heat",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the heating element is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacAction {
    /// The heating element is active.
    Heating,
    /// Regulating, but not heating at the moment.
    Idle,
    /// The thermostat is off and not heating.
    Off,
}

impl HvacAction {
    /// Derives the action from the heating flag and the operating mode.
    #[must_use]
    pub const fn from_heating(heating_up: bool, mode: GvMode) -> Self {
        if heating_up {
            Self::Heating
        } else if mode.is_off() {
            Self::Off
        } else {
            Self::Idle
        }
    }
}

/// One of the five per-mode setpoint fields of a device record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetpointField {
    /// `consigne_confort`
    Comfort,
    /// `consigne_hg`
    FrostProtect,
    /// `consigne_eco`
    Eco,
    /// `consigne_boost`
    Boost,
    /// `consigne_manuel`
    Manual,
}

impl SetpointField {
    /// Every setpoint field.
    pub const ALL: [Self; 5] = [
        Self::Comfort,
        Self::FrostProtect,
        Self::Eco,
        Self::Boost,
        Self::Manual,
    ];

    /// Returns the vendor field name.
    #[must_use]
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::Comfort => "consigne_confort",
            Self::FrostProtect => "consigne_hg",
            Self::Eco => "consigne_eco",
            Self::Boost => "consigne_boost",
            Self::Manual => "consigne_manuel",
        }
    }
}

impl fmt::Display for SetpointField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn code_table_is_exact() {
        let table = [
            ("0", Preset::Comfort, Some("consigne_confort")),
            ("1", Preset::Off, None),
            ("2", Preset::FrostProtect, Some("consigne_hg")),
            ("3", Preset::Eco, Some("consigne_eco")),
            ("4", Preset::Boost, Some("consigne_boost")),
            ("11", Preset::Program, Some("consigne_manuel")),
        ];

        for (code, preset, field) in table {
            let mode: GvMode = code.parse().unwrap();
            assert_eq!(mode.code(), code);
            assert_eq!(mode.preset(), preset);
            assert_eq!(mode.setpoint_field().map(|f| f.wire_name()), field);
        }
    }

    #[test]
    fn preset_mapping_is_bijective() {
        let presets: HashSet<Preset> = GvMode::ALL.iter().map(|m| m.preset()).collect();
        assert_eq!(presets.len(), GvMode::ALL.len());

        for preset in Preset::ALL {
            assert_eq!(GvMode::from_preset(preset).preset(), preset);
        }
        for mode in GvMode::ALL {
            assert_eq!(GvMode::from_preset(mode.preset()), mode);
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        for code in ["5", "10", "", "comfort", "-1"] {
            let err = code.parse::<GvMode>().unwrap_err();
            assert!(matches!(err, Error::UnknownModeCode(ref c) if c == code));
        }
    }

    #[test]
    fn only_off_is_off() {
        for mode in GvMode::ALL {
            let expected = if mode == GvMode::Off {
                HvacMode::Off
            } else {
                HvacMode::Heat
            };
            assert_eq!(mode.hvac_mode(), expected);
        }
    }

    #[test]
    fn hvac_action_derivation() {
        assert_eq!(
            HvacAction::from_heating(true, GvMode::Comfort),
            HvacAction::Heating
        );
        assert_eq!(HvacAction::from_heating(true, GvMode::Off), HvacAction::Heating);
        assert_eq!(HvacAction::from_heating(false, GvMode::Eco), HvacAction::Idle);
        assert_eq!(HvacAction::from_heating(false, GvMode::Off), HvacAction::Off);
    }

    #[test]
    fn mode_code_accepts_numbers() {
        let code: ModeCode = serde_json::from_str("11").unwrap();
        assert_eq!(code.resolve().unwrap(), GvMode::Program);

        let code: ModeCode = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(code.resolve().unwrap(), GvMode::FrostProtect);
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"2\"");
    }

    #[test]
    fn default_mode_is_comfort() {
        assert_eq!(GvMode::default(), GvMode::Comfort);
        assert_eq!(ModeCode::default().as_str(), "0");
    }
}
