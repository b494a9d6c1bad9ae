// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-facing thermostat manager.

use std::collections::HashMap;

use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;

use crate::api::WattsApi;
use crate::cache::DeviceStateCache;
use crate::climate::{
    ClimateState, CommandPlan, compute_set_hvac_mode, compute_set_preset, compute_set_temperature,
    derive_state,
};
use crate::error::{ApiError, Error, Result};
use crate::event::{ClimateEvent, DeviceEvents, EventBus};
use crate::types::{DeviceKey, HvacMode, Preset};

use super::{ManagerConfig, Thermostat};

/// Manager exposing Watts Vision thermostats to a home automation host.
///
/// The manager keeps a [`DeviceStateCache`] in sync with the vendor API
/// client and turns host commands into exactly one setpoint dispatch each.
/// Commands are optimistic: the cached record is patched before the
/// dispatch and is not rolled back if the dispatch fails. A failed dispatch
/// marks the device unavailable until the next successful
/// [`update`](Self::update).
///
/// # Examples
///
/// ```no_run
/// use watts_vision::api::WattsApi;
/// use watts_vision::manager::ThermostatManager;
/// use watts_vision::types::Preset;
///
/// async fn run(api: impl WattsApi) -> watts_vision::Result<()> {
///     let manager = ThermostatManager::new(api);
///
///     for thermostat in manager.discover()? {
///         manager.set_preset_mode(&thermostat.key, Preset::Eco).await?;
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ThermostatManager<A> {
    /// Vendor API client.
    api: A,
    /// Cached device records.
    cache: DeviceStateCache,
    /// Manager configuration.
    config: ManagerConfig,
    /// Event bus shared with the cache.
    event_bus: EventBus,
    /// Known thermostats, in discovery order.
    thermostats: RwLock<Vec<Thermostat>>,
    /// Availability of each known thermostat.
    availability: Mutex<HashMap<DeviceKey, bool>>,
}

impl<A: WattsApi> ThermostatManager<A> {
    /// Creates a manager with the default configuration.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self::with_config(api, ManagerConfig::default())
    }

    /// Creates a manager with a custom configuration.
    #[must_use]
    pub fn with_config(api: A, config: ManagerConfig) -> Self {
        let event_bus = EventBus::with_capacity(config.event_capacity());
        Self {
            api,
            cache: DeviceStateCache::with_event_bus(event_bus.clone()),
            config,
            event_bus,
            thermostats: RwLock::new(Vec::new()),
            availability: Mutex::new(HashMap::new()),
        }
    }

    /// Subscribes to thermostat events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ClimateEvent> {
        self.event_bus.subscribe()
    }

    /// Subscribes to the events of one thermostat.
    #[must_use]
    pub fn subscribe_device(&self, key: DeviceKey) -> DeviceEvents {
        self.event_bus.subscribe_device(key)
    }

    /// Returns the device state cache.
    #[must_use]
    pub fn cache(&self) -> &DeviceStateCache {
        &self.cache
    }

    /// Returns the vendor API client.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns the manager configuration.
    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    // =========================================================================
    // Discovery
    // =========================================================================

    /// Registers every thermostat of every household.
    ///
    /// Devices already known have their record refreshed, unless the new
    /// record holds an unknown mode: the cached record is then kept and the
    /// device marked unavailable.
    ///
    /// # Returns
    ///
    /// The thermostats that were not known before, in listing order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dispatch`] if the households cannot be listed.
    pub fn discover(&self) -> Result<Vec<Thermostat>> {
        let households = self.api.list_households().inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to list households");
        })?;

        let mut added = Vec::new();
        let mut total = 0;
        for household in households {
            for record in household.devices {
                total += 1;
                let key = record.key(&household.id);
                let known = self.cache.restore_point(&key).ok();
                let state = derive_state(&record.state, known.unwrap_or_default().mode());
                if known.is_some() && state.is_err() {
                    tracing::warn!(%key, "Keeping cached record over unreadable listing");
                    self.observe(&key, state.as_ref().map(|_| ()));
                    continue;
                }

                let is_new = self
                    .cache
                    .insert(key.clone(), record.hardware_id.clone(), record.state);

                if is_new {
                    let thermostat = Thermostat {
                        key: key.clone(),
                        hardware_id: record.hardware_id,
                        name: record
                            .name
                            .unwrap_or_else(|| self.config.device_name().to_string()),
                    };
                    self.thermostats.write().push(thermostat.clone());
                    self.availability.lock().insert(key.clone(), true);
                    added.push(thermostat);
                }
                self.observe(&key, state.as_ref().map(|_| ()));
            }
        }

        tracing::info!(total, added = added.len(), "Discovered thermostats");
        Ok(added)
    }

    /// Returns every known thermostat, in discovery order.
    #[must_use]
    pub fn thermostats(&self) -> Vec<Thermostat> {
        self.thermostats.read().clone()
    }

    /// Returns a known thermostat.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the device is unknown.
    pub fn thermostat(&self, key: &DeviceKey) -> Result<Thermostat> {
        self.thermostats
            .read()
            .iter()
            .find(|t| &t.key == key)
            .cloned()
            .ok_or_else(|| Error::DeviceNotFound(key.clone()))
    }

    /// Returns `true` if the device is known and its last update succeeded.
    #[must_use]
    pub fn is_available(&self, key: &DeviceKey) -> bool {
        self.availability.lock().get(key).copied().unwrap_or(false)
    }

    // =========================================================================
    // Read model
    // =========================================================================

    /// Fetches the latest record of a device and stores it in the cache.
    ///
    /// A failed update leaves the cache untouched and marks the device
    /// unavailable. A successful one marks it available again.
    ///
    /// # Errors
    ///
    /// - [`Error::DeviceNotFound`] if the device was never discovered.
    /// - [`Error::Dispatch`] if the vendor API client fails.
    /// - [`Error::UnknownModeCode`] if the record holds an unknown mode.
    pub fn update(&self, key: &DeviceKey) -> Result<ClimateState> {
        let previous_mode = self.cache.previous_mode(key)?;

        let result = self
            .api
            .get_device(&key.household_id, &key.device_id)
            .map_err(Error::from)
            .and_then(|raw| {
                let state = derive_state(&raw, previous_mode)?;
                self.cache.refresh(key, raw)?;
                Ok(state)
            });

        self.observe(key, result.as_ref().map(|_| ()));
        result
    }

    /// Updates every known device.
    ///
    /// A failure on one device does not stop the others.
    pub fn update_all(&self) -> Vec<(DeviceKey, Result<ClimateState>)> {
        self.cache
            .keys()
            .into_iter()
            .map(|key| {
                let result = self.update(&key);
                (key, result)
            })
            .collect()
    }

    /// Derives the current climate state of a device from the cache.
    ///
    /// # Errors
    ///
    /// - [`Error::DeviceNotFound`] if the device is unknown.
    /// - [`Error::UnknownModeCode`] if the cached record holds an unknown
    ///   mode; the device is then marked unavailable.
    pub fn climate_state(&self, key: &DeviceKey) -> Result<ClimateState> {
        let state = self.cache.snapshot(key)?.climate_state();
        if state.is_err() {
            self.observe(key, state.as_ref().map(|_| ()));
        }
        state
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Switches a thermostat between heat and off.
    ///
    /// Switching to heat selects the restore point: the mode held before the
    /// thermostat was last turned off, with its manual setpoint.
    ///
    /// # Errors
    ///
    /// - [`Error::DeviceNotFound`] if the device is unknown.
    /// - [`Error::UnknownModeCode`] if the cached record holds an unknown
    ///   mode.
    /// - [`Error::Dispatch`] if the command could not be delivered.
    pub async fn set_hvac_mode(
        &self,
        key: &DeviceKey,
        hvac_mode: HvacMode,
    ) -> Result<ClimateState> {
        let device = self.cache.snapshot(key)?;
        let plan = compute_set_hvac_mode(&device.raw, hvac_mode, device.restore_point)
            .inspect_err(|e| self.observe(key, Err(e)))?;

        tracing::debug!(%key, ?hvac_mode, "Setting HVAC mode");
        self.execute(key, plan).await
    }

    /// Selects a preset.
    ///
    /// # Errors
    ///
    /// - [`Error::DeviceNotFound`] if the device is unknown.
    /// - [`Error::UnknownModeCode`] if the cached record holds an unknown
    ///   mode.
    /// - [`Error::Dispatch`] if the command could not be delivered.
    pub async fn set_preset_mode(&self, key: &DeviceKey, preset: Preset) -> Result<ClimateState> {
        let device = self.cache.snapshot(key)?;
        let plan = compute_set_preset(&device.raw, preset, device.restore_point)
            .inspect_err(|e| self.observe(key, Err(e)))?;

        tracing::debug!(%key, %preset, "Setting preset");
        self.execute(key, plan).await
    }

    /// Sets the target temperature of the active preset, in degrees.
    ///
    /// # Errors
    ///
    /// - [`Error::DeviceNotFound`] if the device is unknown.
    /// - [`Error::PresetHasNoSetpoint`] if the thermostat is off.
    /// - [`Error::Value`] if `degrees` is not a usable temperature.
    /// - [`Error::Dispatch`] if the command could not be delivered.
    pub async fn set_temperature(&self, key: &DeviceKey, degrees: f64) -> Result<ClimateState> {
        let state = self.climate_state(key)?;
        let plan = compute_set_temperature(degrees, state.preset)?;

        tracing::debug!(%key, degrees, preset = %state.preset, "Setting temperature");
        self.execute(key, plan).await
    }

    /// Applies a plan to the cache, mirrors the patched record into the
    /// vendor client and dispatches the command.
    async fn execute(&self, key: &DeviceKey, plan: CommandPlan) -> Result<ClimateState> {
        let hardware_id = self.cache.hardware_id(key)?;

        self.cache.apply_patch(key, &plan.patch)?;
        if let Some(point) = plan.remember {
            self.cache.remember_restore_point(key, point)?;
        }

        let raw = self.cache.get(key)?;
        self.api
            .set_device(&key.household_id, &key.device_id, raw)
            .inspect_err(|e| self.dispatch_failed(key, e))?;

        let command = plan.command;
        tracing::debug!(
            %key,
            %hardware_id,
            setpoint = %command.setpoint,
            gv_mode = %command.gv_mode,
            "Dispatching setpoint"
        );

        let timeout = self.config.dispatch_timeout();
        let pushed = tokio::time::timeout(
            timeout,
            self.api.push_setpoint(&key.household_id, &hardware_id, command),
        )
        .await
        .unwrap_or_else(|_| {
            Err(ApiError::Timeout(
                u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ))
        });
        pushed.inspect_err(|e| self.dispatch_failed(key, e))?;

        self.event_bus
            .publish(ClimateEvent::command_dispatched(key.clone(), command));
        self.cache.snapshot(key)?.climate_state()
    }

    fn dispatch_failed(&self, key: &DeviceKey, error: &ApiError) {
        tracing::warn!(%key, error = %error, "Dispatch failed, keeping optimistic state");
        self.set_available(key, Some(error.to_string()));
    }

    /// Records the outcome of reading a device.
    fn observe(&self, key: &DeviceKey, outcome: std::result::Result<(), &Error>) {
        match outcome {
            Ok(()) => self.set_available(key, None),
            Err(Error::DeviceNotFound(_)) => {}
            Err(error) => {
                tracing::warn!(%key, error = %error, "Device unavailable");
                self.set_available(key, Some(error.to_string()));
            }
        }
    }

    /// Updates availability, publishing an event on transitions only.
    fn set_available(&self, key: &DeviceKey, error: Option<String>) {
        let available = error.is_none();
        let previous = self.availability.lock().insert(key.clone(), available);
        if previous == Some(available) {
            return;
        }

        let event = match error {
            None => ClimateEvent::available(key.clone()),
            Some(error) => ClimateEvent::unavailable(key.clone(), error),
        };
        self.event_bus.publish(event);
    }
}
