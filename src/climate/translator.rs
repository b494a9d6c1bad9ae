// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command synthesis.
//!
//! Each host command turns into a [`CommandPlan`]: the fields to patch in the
//! cached record, the payload to send to the vendor API, and, when the
//! command turns the thermostat off, the restore point to remember.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::state::{RawDeviceState, StatePatch};
use crate::types::{GvMode, HvacMode, Preset, SetpointField, Tenths};

use super::RestorePoint;

/// Payload dispatched to the vendor API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetpointCommand {
    /// Setpoint to apply, in tenths of a degree.
    pub setpoint: Tenths,
    /// Operating mode to select.
    pub gv_mode: GvMode,
}

/// Everything needed to carry out one host command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    /// Fields to patch in the cached record ahead of confirmation.
    pub patch: StatePatch,
    /// Payload to dispatch.
    pub command: SetpointCommand,
    /// New restore point, when the command changes it.
    pub remember: Option<RestorePoint>,
}

impl CommandPlan {
    /// Selects `mode` and copies its setpoint into the manual field.
    ///
    /// Leaving off for a mode that reads the manual field takes the value
    /// saved in `restore`, since turning off zeroed it on the device.
    fn select(
        raw: &RawDeviceState,
        current: GvMode,
        mode: GvMode,
        restore: RestorePoint,
    ) -> Self {
        let setpoint = match mode.setpoint_field() {
            Some(SetpointField::Manual) if current.is_off() => {
                restore.manual().unwrap_or(raw.consigne_manuel)
            }
            Some(field) => raw.setpoint(field),
            None => Tenths::ZERO,
        };

        Self {
            patch: StatePatch::Batch(vec![
                StatePatch::mode(mode),
                StatePatch::setpoint(SetpointField::Manual, setpoint),
            ]),
            command: SetpointCommand {
                setpoint,
                gv_mode: mode,
            },
            remember: None,
        }
    }

    /// Turns the thermostat off, remembering the mode it leaves and its
    /// manual setpoint.
    ///
    /// Turning off an already-off thermostat keeps the existing restore point.
    fn turn_off(raw: &RawDeviceState, current: GvMode) -> Self {
        Self {
            patch: StatePatch::Batch(vec![
                StatePatch::mode(GvMode::Off),
                StatePatch::setpoint(SetpointField::Manual, Tenths::ZERO),
            ]),
            command: SetpointCommand {
                setpoint: Tenths::ZERO,
                gv_mode: GvMode::Off,
            },
            remember: RestorePoint::new(current)
                .map(|point| point.with_manual(raw.consigne_manuel)),
        }
    }
}

/// Plans an HVAC mode change.
///
/// Switching to [`HvacMode::Heat`] selects the mode held in `restore` and
/// its setpoint, whether the thermostat is off or already heating.
/// Switching to [`HvacMode::Off`] behaves like selecting the off preset.
///
/// # Errors
///
/// Returns [`Error::UnknownModeCode`] if the record holds an unknown mode.
///
/// # Examples
///
/// ```
/// use watts_vision::climate::{RestorePoint, compute_set_hvac_mode};
/// use watts_vision::state::RawDeviceState;
/// use watts_vision::types::{GvMode, HvacMode, Tenths};
///
/// let raw = RawDeviceState {
///     gv_mode: GvMode::Off.into(),
///     consigne_boost: Tenths::new(215),
///     ..RawDeviceState::default()
/// };
///
/// let restore = RestorePoint::new(GvMode::Boost).unwrap();
/// let plan = compute_set_hvac_mode(&raw, HvacMode::Heat, restore).unwrap();
/// assert_eq!(plan.command.gv_mode, GvMode::Boost);
/// assert_eq!(plan.command.setpoint, Tenths::new(215));
/// ```
pub fn compute_set_hvac_mode(
    raw: &RawDeviceState,
    hvac_mode: HvacMode,
    restore: RestorePoint,
) -> Result<CommandPlan> {
    let current = raw.mode()?;

    Ok(match hvac_mode {
        HvacMode::Off => CommandPlan::turn_off(raw, current),
        HvacMode::Heat => CommandPlan::select(raw, current, restore.mode(), restore),
    })
}

/// Plans a preset change.
///
/// Any preset other than [`Preset::Off`] selects its mode and copies its
/// setpoint into the manual field. [`Preset::Off`] turns the thermostat off
/// exactly like [`compute_set_hvac_mode`] does.
///
/// # Errors
///
/// Returns [`Error::UnknownModeCode`] if the record holds an unknown mode.
pub fn compute_set_preset(
    raw: &RawDeviceState,
    preset: Preset,
    restore: RestorePoint,
) -> Result<CommandPlan> {
    let current = raw.mode()?;

    Ok(match GvMode::from_preset(preset) {
        GvMode::Off => CommandPlan::turn_off(raw, current),
        mode => CommandPlan::select(raw, current, mode, restore),
    })
}

/// Plans a target temperature change for the active preset.
///
/// The value is written to the manual setpoint and to the preset's own
/// setpoint field, so the cached record reads back the new target before
/// the vendor API confirms it.
///
/// # Errors
///
/// Returns [`Error::PresetHasNoSetpoint`] for [`Preset::Off`] and
/// [`Error::Value`] if `degrees` cannot be encoded.
///
/// # Examples
///
/// ```
/// use watts_vision::climate::compute_set_temperature;
/// use watts_vision::types::{GvMode, Preset, Tenths};
///
/// let plan = compute_set_temperature(22.0, Preset::Comfort).unwrap();
/// assert_eq!(plan.command.setpoint, Tenths::new(220));
/// assert_eq!(plan.command.gv_mode, GvMode::Comfort);
///
/// assert!(compute_set_temperature(22.0, Preset::Off).is_err());
/// ```
pub fn compute_set_temperature(degrees: f64, current_preset: Preset) -> Result<CommandPlan> {
    let mode = GvMode::from_preset(current_preset);
    let field = mode
        .setpoint_field()
        .ok_or(Error::PresetHasNoSetpoint(current_preset))?;
    let value = Tenths::from_degrees(degrees)?;

    let mut patches = vec![StatePatch::setpoint(SetpointField::Manual, value)];
    if field != SetpointField::Manual {
        patches.push(StatePatch::setpoint(field, value));
    }

    Ok(CommandPlan {
        patch: StatePatch::Batch(patches),
        command: SetpointCommand {
            setpoint: value,
            gv_mode: mode,
        },
        remember: None,
    })
}
