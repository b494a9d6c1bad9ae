// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Contract with the Watts Vision cloud API client.
//!
//! Session handling, HTTP calls and polling belong to the API client, which
//! this crate only consumes through the [`WattsApi`] trait. The listing types
//! mirror the JSON the vendor returns for a user's households.

mod household;

pub use household::{DeviceRecord, Household};

use crate::climate::SetpointCommand;
use crate::error::ApiError;
use crate::state::RawDeviceState;
use crate::types::{DeviceId, HardwareId, HouseholdId};

/// Operations the adapter needs from the vendor API client.
///
/// `get_device` and `set_device` work on the client's own copy of the last
/// device listing and are expected to be fast. `push_setpoint` sends a
/// command to the cloud and may be slow; the caller bounds it with a
/// timeout.
#[allow(async_fn_in_trait)]
pub trait WattsApi {
    /// Lists every household and its devices.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the listing cannot be obtained.
    fn list_households(&self) -> Result<Vec<Household>, ApiError>;

    /// Returns the latest known record of a device.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the device is unknown or its record unavailable.
    fn get_device(
        &self,
        household_id: &HouseholdId,
        device_id: &DeviceId,
    ) -> Result<RawDeviceState, ApiError>;

    /// Overwrites the client's copy of a device record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the device is unknown.
    fn set_device(
        &self,
        household_id: &HouseholdId,
        device_id: &DeviceId,
        state: RawDeviceState,
    ) -> Result<(), ApiError>;

    /// Sends a setpoint and operating mode to a device.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the command fails to reach the device.
    async fn push_setpoint(
        &self,
        household_id: &HouseholdId,
        hardware_id: &HardwareId,
        command: SetpointCommand,
    ) -> Result<(), ApiError>;
}
