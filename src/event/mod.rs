// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for thermostat state changes.
//!
//! The device cache publishes a [`ClimateEvent`] whenever a record is added,
//! refreshed or patched; the manager adds dispatch and availability events.
//! The [`EventBus`] uses tokio's broadcast channel so any number of host
//! components can listen.
//!
//! # Examples
//!
//! ```
//! use watts_vision::event::{ClimateEvent, EventBus};
//! use watts_vision::types::DeviceKey;
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(ClimateEvent::device_added(DeviceKey::new("home", "dev")));
//! ```

mod climate_event;
mod event_bus;

pub use climate_event::{ClimateEvent, UpdateSource};
pub use event_bus::{DeviceEvents, EventBus};
