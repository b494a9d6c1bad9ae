// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The normalized climate view of a thermostat.

use serde::Serialize;

use crate::error::Result;
use crate::state::RawDeviceState;
use crate::types::{GvMode, HvacAction, HvacMode, Preset, SetpointField, Tenths};

/// The five per-mode setpoints, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Setpoints {
    /// Comfort setpoint.
    pub comfort: f64,
    /// Frost-protection setpoint.
    pub frost_protect: f64,
    /// Eco setpoint.
    pub eco: f64,
    /// Boost setpoint.
    pub boost: f64,
    /// Manual / program setpoint.
    pub manual: f64,
}

impl Setpoints {
    fn from_raw(raw: &RawDeviceState) -> Self {
        Self {
            comfort: raw.consigne_confort.degrees(),
            frost_protect: raw.consigne_hg.degrees(),
            eco: raw.consigne_eco.degrees(),
            boost: raw.consigne_boost.degrees(),
            manual: raw.consigne_manuel.degrees(),
        }
    }

    /// Returns the setpoint stored in `field`.
    #[must_use]
    pub fn get(&self, field: SetpointField) -> f64 {
        match field {
            SetpointField::Comfort => self.comfort,
            SetpointField::FrostProtect => self.frost_protect,
            SetpointField::Eco => self.eco,
            SetpointField::Boost => self.boost,
            SetpointField::Manual => self.manual,
        }
    }
}

/// Climate state derived from a [`RawDeviceState`].
///
/// Never stored: always recomputed from the cached raw record and the
/// device's restore point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateState {
    /// Heat, or off.
    pub hvac_mode: HvacMode,
    /// The active preset.
    pub preset: Preset,
    /// What the heating element is doing.
    pub action: HvacAction,
    /// The resolved operating mode.
    pub gv_mode: GvMode,
    /// Mode restored when the thermostat is switched back to heat.
    pub previous_mode: GvMode,
    /// Measured air temperature, in degrees.
    pub current_temperature: f64,
    /// Setpoint of the active mode, `None` when off.
    pub target_temperature: Option<f64>,
    /// Lowest accepted target temperature.
    pub min_temperature: f64,
    /// Highest accepted target temperature.
    pub max_temperature: f64,
    /// All five setpoints.
    pub setpoints: Setpoints,
}

impl ClimateState {
    /// Returns `true` when the thermostat is off.
    #[must_use]
    pub fn is_off(&self) -> bool {
        self.hvac_mode == HvacMode::Off
    }
}

/// Derives the climate view of a raw record.
///
/// Frost protection reports fixed bounds of 44.6° in both directions since
/// its setpoint is not user adjustable.
///
/// # Errors
///
/// Returns [`Error::UnknownModeCode`](crate::Error::UnknownModeCode) if the
/// record holds an unknown `gv_mode`.
///
/// # Examples
///
/// ```
/// use watts_vision::climate::derive_state;
/// use watts_vision::state::RawDeviceState;
/// use watts_vision::types::{GvMode, HvacAction, Preset, Tenths};
///
/// let raw = RawDeviceState {
///     gv_mode: GvMode::Comfort.into(),
///     consigne_confort: Tenths::new(210),
///     temperature_air: Tenths::new(195),
///     heating_up: true,
///     ..RawDeviceState::default()
/// };
///
/// let state = derive_state(&raw, GvMode::Comfort).unwrap();
/// assert_eq!(state.preset, Preset::Comfort);
/// assert_eq!(state.target_temperature, Some(21.0));
/// assert_eq!(state.current_temperature, 19.5);
/// assert_eq!(state.action, HvacAction::Heating);
/// ```
pub fn derive_state(raw: &RawDeviceState, previous_mode: GvMode) -> Result<ClimateState> {
    let mode = raw.mode()?;

    let (min, max) = if mode == GvMode::FrostProtect {
        (Tenths::FROST_PROTECT_BOUND, Tenths::FROST_PROTECT_BOUND)
    } else {
        (raw.min_set_point, raw.max_set_point)
    };

    Ok(ClimateState {
        hvac_mode: mode.hvac_mode(),
        preset: mode.preset(),
        action: HvacAction::from_heating(raw.heating_up, mode),
        gv_mode: mode,
        previous_mode: super::restore_point(previous_mode),
        current_temperature: raw.temperature_air.degrees(),
        target_temperature: mode.setpoint_field().map(|f| raw.setpoint(f).degrees()),
        min_temperature: min.degrees(),
        max_temperature: max.degrees(),
        setpoints: Setpoints::from_raw(raw),
    })
}
