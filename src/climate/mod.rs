// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Translation between raw device records and the climate model.
//!
//! Everything in this module is pure: it reads a [`RawDeviceState`] snapshot
//! (plus the device's restore point) and either derives a [`ClimateState`]
//! or plans a command as a [`CommandPlan`]. Applying the plan and talking to
//! the vendor API is left to the caller.
//!
//! [`RawDeviceState`]: crate::state::RawDeviceState
//!
//! # Examples
//!
//! ```
//! use watts_vision::climate::{RestorePoint, compute_set_preset, derive_state};
//! use watts_vision::state::RawDeviceState;
//! use watts_vision::types::{GvMode, Preset, Tenths};
//!
//! let mut raw = RawDeviceState {
//!     consigne_eco: Tenths::new(170),
//!     ..RawDeviceState::default()
//! };
//!
//! let plan = compute_set_preset(&raw, Preset::Eco, RestorePoint::default()).unwrap();
//! raw.apply(&plan.patch);
//!
//! let state = derive_state(&raw, GvMode::Comfort).unwrap();
//! assert_eq!(state.preset, Preset::Eco);
//! assert_eq!(state.target_temperature, Some(17.0));
//! ```

mod climate_state;
mod restore_point;
mod translator;

pub use climate_state::{ClimateState, Setpoints, derive_state};
pub use restore_point::RestorePoint;
pub use translator::{
    CommandPlan, SetpointCommand, compute_set_hvac_mode, compute_set_preset,
    compute_set_temperature,
};

use crate::types::GvMode;

/// Normalizes a restore point: off is never a valid mode to restore.
pub(crate) fn restore_point(mode: GvMode) -> GvMode {
    if mode.is_off() {
        GvMode::default()
    } else {
        mode
    }
}
