// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw device state as exchanged with the vendor API.

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::types::{GvMode, ModeCode, SetpointField, Tenths, flag};

use super::StatePatch;

/// Raw state of a Watts Vision thermostat.
///
/// Field names follow the vendor API. Temperatures are integer tenths of a
/// degree, encoded as strings on the wire; both strings and JSON numbers are
/// accepted when decoding. Vendor fields not listed here are ignored.
///
/// # Examples
///
/// ```
/// use watts_vision::state::RawDeviceState;
/// use watts_vision::types::GvMode;
///
/// let raw = RawDeviceState::from_json(r#"{
///     "gv_mode": "0",
///     "consigne_confort": "210",
///     "consigne_hg": "70",
///     "consigne_eco": "175",
///     "consigne_boost": "230",
///     "consigne_manuel": "210",
///     "temperature_air": "195",
///     "min_set_point": "50",
///     "max_set_point": "300",
///     "heating_up": "1"
/// }"#).unwrap();
///
/// assert_eq!(raw.mode().unwrap(), GvMode::Comfort);
/// assert!(raw.heating_up);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDeviceState {
    /// Operating mode code.
    pub gv_mode: ModeCode,
    /// Comfort setpoint.
    pub consigne_confort: Tenths,
    /// Frost-protection setpoint.
    pub consigne_hg: Tenths,
    /// Eco setpoint.
    pub consigne_eco: Tenths,
    /// Boost setpoint.
    pub consigne_boost: Tenths,
    /// Manual / program setpoint, also the setpoint last sent to the device.
    pub consigne_manuel: Tenths,
    /// Measured air temperature.
    pub temperature_air: Tenths,
    /// Lowest accepted setpoint.
    pub min_set_point: Tenths,
    /// Highest accepted setpoint.
    pub max_set_point: Tenths,
    /// Whether the heating element is currently active.
    #[serde(with = "flag")]
    pub heating_up: bool,
}

impl RawDeviceState {
    /// Decodes a record from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if the document is malformed or a field
    /// is missing or not a valid number.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ParseError::Json(e).into())
    }

    /// Decodes a record from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if the value does not describe a record.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ParseError::Json(e).into())
    }

    /// Resolves the operating mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownModeCode`](crate::Error::UnknownModeCode) if
    /// `gv_mode` is not a known code.
    pub fn mode(&self) -> Result<GvMode> {
        self.gv_mode.resolve()
    }

    /// Returns the value of a setpoint field.
    #[must_use]
    pub fn setpoint(&self, field: SetpointField) -> Tenths {
        match field {
            SetpointField::Comfort => self.consigne_confort,
            SetpointField::FrostProtect => self.consigne_hg,
            SetpointField::Eco => self.consigne_eco,
            SetpointField::Boost => self.consigne_boost,
            SetpointField::Manual => self.consigne_manuel,
        }
    }

    /// Sets the value of a setpoint field.
    pub fn set_setpoint(&mut self, field: SetpointField, value: Tenths) {
        let slot = match field {
            SetpointField::Comfort => &mut self.consigne_confort,
            SetpointField::FrostProtect => &mut self.consigne_hg,
            SetpointField::Eco => &mut self.consigne_eco,
            SetpointField::Boost => &mut self.consigne_boost,
            SetpointField::Manual => &mut self.consigne_manuel,
        };
        *slot = value;
    }

    /// Applies a patch and returns whether the record actually changed.
    pub fn apply(&mut self, patch: &StatePatch) -> bool {
        match patch {
            StatePatch::Mode(mode) => {
                let code = ModeCode::from(*mode);
                if self.gv_mode == code {
                    false
                } else {
                    self.gv_mode = code;
                    true
                }
            }
            StatePatch::Setpoint { field, value } => {
                if self.setpoint(*field) == *value {
                    false
                } else {
                    self.set_setpoint(*field, *value);
                    true
                }
            }
            StatePatch::Batch(patches) => {
                let mut any_changed = false;
                for p in patches {
                    if self.apply(p) {
                        any_changed = true;
                    }
                }
                any_changed
            }
        }
    }
}
