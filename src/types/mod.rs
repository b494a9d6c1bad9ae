// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Watts Vision thermostats.
//!
//! # Types
//!
//! - [`GvMode`] - The closed set of vendor operating modes and the mode table
//! - [`ModeCode`] - A raw, not yet validated `gv_mode` value
//! - [`Preset`], [`HvacMode`], [`HvacAction`] - The normalized climate model
//! - [`SetpointField`] - One of the five per-mode setpoints
//! - [`Tenths`] - Temperatures as integer tenths of a degree
//! - [`HouseholdId`], [`DeviceId`], [`HardwareId`], [`DeviceKey`] - Identifiers

mod ids;
mod mode;
mod temperature;

pub use ids::{DeviceId, DeviceKey, HardwareId, HouseholdId};
pub use mode::{GvMode, HvacAction, HvacMode, ModeCode, Preset, SetpointField};
pub use temperature::Tenths;

pub(crate) use temperature::flag;
