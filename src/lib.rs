// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Watts Vision - A Rust adapter exposing Watts Vision thermostats to home
//! automation hosts.
//!
//! The vendor API describes a thermostat with a single operating mode code
//! (`gv_mode`) and five setpoints stored as tenths of a degree. Hosts think in
//! terms of an HVAC mode (heat or off), a preset and a target temperature.
//! This library translates between the two and keeps an optimistic cache of
//! every device so that commands are visible before the cloud confirms them.
//!
//! # Supported Features
//!
//! - **Climate model**: HVAC mode, preset, target and current temperature,
//!   heating action and bounds derived from the raw record
//! - **Commands**: heat/off with mode restore, preset selection, target
//!   temperature, each dispatched as a single setpoint call
//! - **Optimistic cache**: patched records are readable immediately and
//!   replaced by the next refresh
//! - **Events**: device registration, state changes, dispatches and
//!   availability transitions over a broadcast channel
//!
//! # Operating Modes
//!
//! | Code | Preset         | HVAC | Setpoint           |
//! |------|----------------|------|--------------------|
//! | `0`  | comfort        | heat | `consigne_confort` |
//! | `1`  | off            | off  | none               |
//! | `2`  | frost protect  | heat | `consigne_hg`      |
//! | `3`  | eco            | heat | `consigne_eco`     |
//! | `4`  | boost          | heat | `consigne_boost`   |
//! | `11` | program        | heat | `consigne_manuel`  |
//!
//! # Quick Start
//!
//! ```no_run
//! use watts_vision::api::WattsApi;
//! use watts_vision::manager::ThermostatManager;
//! use watts_vision::types::{HvacMode, Preset};
//!
//! async fn run(api: impl WattsApi) -> watts_vision::Result<()> {
//!     let manager = ThermostatManager::new(api);
//!     let thermostats = manager.discover()?;
//!
//!     let key = &thermostats[0].key;
//!     manager.set_preset_mode(key, Preset::Boost).await?;
//!     manager.set_hvac_mode(key, HvacMode::Off).await?;
//!
//!     // Heat restores boost.
//!     let state = manager.set_hvac_mode(key, HvacMode::Heat).await?;
//!     assert_eq!(state.preset, Preset::Boost);
//!     Ok(())
//! }
//! ```
//!
//! # Pure Translation
//!
//! The translation layer can be used without a manager or a vendor client:
//!
//! ```
//! use watts_vision::climate::derive_state;
//! use watts_vision::state::RawDeviceState;
//! use watts_vision::types::{GvMode, HvacMode, Preset};
//!
//! let raw = RawDeviceState::from_json(r#"{
//!     "gv_mode": "0",
//!     "consigne_confort": "210",
//!     "consigne_hg": "70",
//!     "consigne_eco": "175",
//!     "consigne_boost": "230",
//!     "consigne_manuel": "210",
//!     "temperature_air": "195",
//!     "min_set_point": "50",
//!     "max_set_point": "300",
//!     "heating_up": "1"
//! }"#).unwrap();
//!
//! let state = derive_state(&raw, GvMode::Comfort).unwrap();
//! assert_eq!(state.hvac_mode, HvacMode::Heat);
//! assert_eq!(state.preset, Preset::Comfort);
//! assert_eq!(state.target_temperature, Some(21.0));
//! ```

pub mod api;
pub mod cache;
pub mod climate;
pub mod error;
pub mod event;
pub mod manager;
pub mod state;
pub mod types;

pub use api::{DeviceRecord, Household, WattsApi};
pub use cache::{CachedDevice, DeviceStateCache};
pub use climate::{ClimateState, CommandPlan, RestorePoint, SetpointCommand};
pub use error::{ApiError, Error, ParseError, Result, ValueError};
pub use event::{ClimateEvent, EventBus, UpdateSource};
pub use manager::{ManagerConfig, Thermostat, ThermostatManager};
pub use state::{RawDeviceState, StatePatch};
pub use types::{
    DeviceId, DeviceKey, GvMode, HardwareId, HouseholdId, HvacAction, HvacMode, Preset, Tenths,
};
