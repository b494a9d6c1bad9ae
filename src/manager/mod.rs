// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-facing management of Watts Vision thermostats.
//!
//! The [`ThermostatManager`] is the surface a home automation host talks
//! to. It provides:
//!
//! - **Discovery**: every thermostat of every household, with static
//!   metadata ([`Thermostat`], [`DeviceInfo`])
//! - **Read model**: [`ClimateState`](crate::climate::ClimateState) derived
//!   from the cached record
//! - **Commands**: HVAC mode, preset and target temperature, each dispatched
//!   as a single setpoint call bounded by a timeout
//! - **Availability**: devices are marked unavailable on failed updates or
//!   dispatches, with events on every transition
//!
//! # Examples
//!
//! ```no_run
//! use watts_vision::api::WattsApi;
//! use watts_vision::manager::{ManagerConfig, ThermostatManager};
//! use watts_vision::types::HvacMode;
//!
//! async fn turn_everything_off(api: impl WattsApi) -> watts_vision::Result<()> {
//!     let manager = ThermostatManager::with_config(api, ManagerConfig::default());
//!     manager.discover()?;
//!
//!     for thermostat in manager.thermostats() {
//!         manager.set_hvac_mode(&thermostat.key, HvacMode::Off).await?;
//!     }
//!     Ok(())
//! }
//! ```

mod manager_config;
mod thermostat;
mod thermostat_manager;

pub use manager_config::ManagerConfig;
pub use thermostat::{DOMAIN, DeviceInfo, MANUFACTURER, MODEL, TemperatureUnit, Thermostat};
pub use thermostat_manager::ThermostatManager;
