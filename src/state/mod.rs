// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw device state and partial updates.
//!
//! [`RawDeviceState`] mirrors the record the vendor API returns for a
//! thermostat, while [`StatePatch`] represents the subset of fields a command
//! changes.
//!
//! # Examples
//!
//! ```
//! use watts_vision::state::{RawDeviceState, StatePatch};
//! use watts_vision::types::GvMode;
//!
//! let mut state = RawDeviceState::default();
//!
//! // Apply returns true if the record actually changed
//! assert!(state.apply(&StatePatch::mode(GvMode::Eco)));
//! assert!(!state.apply(&StatePatch::mode(GvMode::Eco)));
//! ```

mod device_state;
mod state_patch;

pub use device_state::RawDeviceState;
pub use state_patch::StatePatch;
