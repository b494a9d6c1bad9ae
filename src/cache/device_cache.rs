// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory mirror of every known device's raw state.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;

use crate::climate::RestorePoint;
use crate::error::{Error, Result};
use crate::event::{ClimateEvent, EventBus, UpdateSource};
use crate::state::{RawDeviceState, StatePatch};
use crate::types::{DeviceId, DeviceKey, GvMode, HardwareId, HouseholdId};

use super::CachedDevice;

type Entry = Arc<Mutex<CachedDevice>>;

#[derive(Debug, Default)]
struct Registry {
    devices: HashMap<DeviceKey, Entry>,
    /// Device ids per household, in discovery order.
    households: HashMap<HouseholdId, Vec<DeviceId>>,
    /// Every key, in discovery order.
    order: Vec<DeviceKey>,
}

/// Cache of raw device records keyed by `(household, device)`.
///
/// The registry lock is only held to look up or register an entry; each
/// device is then mutated under its own lock, so operations on unrelated
/// devices never wait for each other. No lock is ever held across an
/// `.await`.
///
/// Cloning the cache is cheap and yields a handle to the same storage.
///
/// # Examples
///
/// ```
/// use watts_vision::cache::DeviceStateCache;
/// use watts_vision::state::{RawDeviceState, StatePatch};
/// use watts_vision::types::{DeviceKey, GvMode, HardwareId};
///
/// let cache = DeviceStateCache::new();
/// let key = DeviceKey::new("home", "dev-1");
/// cache.insert(key.clone(), HardwareId::new("C001-000"), RawDeviceState::default());
///
/// cache.apply_patch(&key, &StatePatch::mode(GvMode::Eco)).unwrap();
/// assert_eq!(cache.get(&key).unwrap().mode().unwrap(), GvMode::Eco);
/// ```
#[derive(Debug, Clone)]
pub struct DeviceStateCache {
    registry: Arc<RwLock<Registry>>,
    event_bus: EventBus,
}

impl DeviceStateCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_event_bus(EventBus::new())
    }

    /// Creates an empty cache publishing on the given bus.
    #[must_use]
    pub fn with_event_bus(event_bus: EventBus) -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry::default())),
            event_bus,
        }
    }

    /// Subscribes to cache events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ClimateEvent> {
        self.event_bus.subscribe()
    }

    /// Registers a discovered device.
    ///
    /// If the device is already known its record is refreshed instead and
    /// its restore point is kept.
    ///
    /// # Returns
    ///
    /// Returns `true` if the device was not known before.
    pub fn insert(&self, key: DeviceKey, hardware_id: HardwareId, raw: RawDeviceState) -> bool {
        let existing = self.registry.read().devices.get(&key).cloned();
        if let Some(entry) = existing {
            let changed = entry.lock().replace(raw.clone());
            if changed {
                self.event_bus.publish(ClimateEvent::state_changed(
                    key,
                    UpdateSource::Refresh,
                    raw,
                ));
            }
            return false;
        }

        {
            let mut registry = self.registry.write();
            // Lost a race with another insert of the same key.
            if registry.devices.contains_key(&key) {
                return false;
            }
            registry
                .households
                .entry(key.household_id.clone())
                .or_default()
                .push(key.device_id.clone());
            registry.order.push(key.clone());
            registry.devices.insert(
                key.clone(),
                Arc::new(Mutex::new(CachedDevice::new(hardware_id, raw))),
            );
        }

        tracing::debug!(%key, "Registered device");
        self.event_bus.publish(ClimateEvent::device_added(key));
        true
    }

    /// Returns the cached record of a device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the device is unknown.
    pub fn get(&self, key: &DeviceKey) -> Result<RawDeviceState> {
        Ok(self.entry(key)?.lock().raw.clone())
    }

    /// Returns a copy of the whole cache entry of a device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the device is unknown.
    pub fn snapshot(&self, key: &DeviceKey) -> Result<CachedDevice> {
        Ok(self.entry(key)?.lock().clone())
    }

    /// Merges a patch into the cached record without contacting the vendor
    /// API.
    ///
    /// The patched record is what every subsequent [`get`](Self::get)
    /// returns until the next [`refresh`](Self::refresh).
    ///
    /// # Returns
    ///
    /// Returns `true` if the record changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the device is unknown.
    pub fn apply_patch(&self, key: &DeviceKey, patch: &StatePatch) -> Result<bool> {
        let entry = self.entry(key)?;
        let (changed, new_state) = {
            let mut device = entry.lock();
            let changed = device.patch(patch);
            (changed, device.raw.clone())
        };

        tracing::debug!(%key, changed, ?patch, "Applied optimistic patch");
        if changed {
            self.event_bus.publish(ClimateEvent::state_changed(
                key.clone(),
                UpdateSource::Optimistic,
                new_state,
            ));
        }
        Ok(changed)
    }

    /// Replaces the cached record with an authoritative snapshot.
    ///
    /// This may overwrite a patch the vendor API has not caught up with yet.
    ///
    /// # Returns
    ///
    /// Returns `true` if the record changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the device is unknown.
    pub fn refresh(&self, key: &DeviceKey, raw: RawDeviceState) -> Result<bool> {
        let entry = self.entry(key)?;
        let changed = entry.lock().replace(raw.clone());

        tracing::debug!(%key, changed, "Refreshed device state");
        if changed {
            self.event_bus.publish(ClimateEvent::state_changed(
                key.clone(),
                UpdateSource::Refresh,
                raw,
            ));
        }
        Ok(changed)
    }

    /// Lists the devices of a household, in discovery order.
    ///
    /// Returns an empty list for an unknown household.
    #[must_use]
    pub fn list(&self, household_id: &HouseholdId) -> Vec<DeviceId> {
        self.registry
            .read()
            .households
            .get(household_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Lists every known household, in discovery order.
    #[must_use]
    pub fn households(&self) -> Vec<HouseholdId> {
        let registry = self.registry.read();
        let mut households: Vec<HouseholdId> = Vec::with_capacity(registry.households.len());
        for key in &registry.order {
            if !households.contains(&key.household_id) {
                households.push(key.household_id.clone());
            }
        }
        households
    }

    /// Returns the keys of every known device, in discovery order.
    #[must_use]
    pub fn keys(&self) -> Vec<DeviceKey> {
        self.registry.read().order.clone()
    }

    /// Returns `true` if the device is known.
    #[must_use]
    pub fn contains(&self, key: &DeviceKey) -> bool {
        self.registry.read().devices.contains_key(key)
    }

    /// Returns the number of known devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.read().devices.len()
    }

    /// Returns `true` if no device is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.read().devices.is_empty()
    }

    /// Returns the mode a device goes back to when switched to heat.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the device is unknown.
    pub fn previous_mode(&self, key: &DeviceKey) -> Result<GvMode> {
        Ok(self.restore_point(key)?.mode())
    }

    /// Returns the restore point of a device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the device is unknown.
    pub fn restore_point(&self, key: &DeviceKey) -> Result<RestorePoint> {
        Ok(self.entry(key)?.lock().restore_point)
    }

    /// Records the state to restore when the device is switched back to heat.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the device is unknown.
    pub fn remember_restore_point(&self, key: &DeviceKey, point: RestorePoint) -> Result<()> {
        self.entry(key)?.lock().restore_point = point;
        tracing::debug!(
            %key,
            previous_mode = %point.mode(),
            manual = ?point.manual(),
            "Recorded restore point"
        );
        Ok(())
    }

    /// Returns the hardware id used to dispatch commands to a device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the device is unknown.
    pub fn hardware_id(&self, key: &DeviceKey) -> Result<HardwareId> {
        Ok(self.entry(key)?.lock().hardware_id.clone())
    }

    fn entry(&self, key: &DeviceKey) -> Result<Entry> {
        self.registry
            .read()
            .devices
            .get(key)
            .cloned()
            .ok_or_else(|| Error::DeviceNotFound(key.clone()))
    }
}

impl Default for DeviceStateCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ModeCode, SetpointField, Tenths};

    fn raw(mode: GvMode) -> RawDeviceState {
        RawDeviceState {
            gv_mode: mode.into(),
            consigne_confort: Tenths::new(210),
            consigne_manuel: Tenths::new(210),
            temperature_air: Tenths::new(195),
            ..RawDeviceState::default()
        }
    }

    fn cache_with(key: &DeviceKey) -> DeviceStateCache {
        let cache = DeviceStateCache::new();
        cache.insert(key.clone(), HardwareId::new("hw-1"), raw(GvMode::Comfort));
        cache
    }

    #[test]
    fn get_unknown_device_fails() {
        let cache = DeviceStateCache::new();
        let key = DeviceKey::new("h", "missing");
        assert!(matches!(cache.get(&key), Err(Error::DeviceNotFound(k)) if k == key));
    }

    #[test]
    fn patch_unknown_device_fails() {
        let cache = DeviceStateCache::new();
        let key = DeviceKey::new("h", "missing");
        let result = cache.apply_patch(&key, &StatePatch::mode(GvMode::Eco));
        assert!(matches!(result, Err(Error::DeviceNotFound(_))));
    }

    #[test]
    fn patch_is_visible_until_refresh() {
        let key = DeviceKey::new("h", "d");
        let cache = cache_with(&key);

        let patch = StatePatch::Batch(vec![
            StatePatch::mode(GvMode::Eco),
            StatePatch::setpoint(SetpointField::Manual, Tenths::new(170)),
        ]);
        assert!(cache.apply_patch(&key, &patch).unwrap());

        let patched = cache.get(&key).unwrap();
        assert_eq!(patched.mode().unwrap(), GvMode::Eco);
        assert_eq!(patched.consigne_manuel, Tenths::new(170));
        assert!(cache.snapshot(&key).unwrap().has_pending_patch());

        // A stale snapshot from the vendor API overwrites the patch.
        assert!(cache.refresh(&key, raw(GvMode::Comfort)).unwrap());
        assert_eq!(cache.get(&key).unwrap().mode().unwrap(), GvMode::Comfort);
        assert!(!cache.snapshot(&key).unwrap().has_pending_patch());
    }

    #[test]
    fn refresh_keeps_restore_point() {
        let key = DeviceKey::new("h", "d");
        let cache = cache_with(&key);
        let point = RestorePoint::new(GvMode::Boost)
            .unwrap()
            .with_manual(Tenths::new(190));
        cache.remember_restore_point(&key, point).unwrap();

        cache.refresh(&key, raw(GvMode::Off)).unwrap();
        assert_eq!(cache.previous_mode(&key).unwrap(), GvMode::Boost);
        assert_eq!(cache.restore_point(&key).unwrap(), point);
    }

    #[test]
    fn restore_point_defaults_to_comfort() {
        let key = DeviceKey::new("h", "d");
        let cache = cache_with(&key);
        assert_eq!(cache.restore_point(&key).unwrap(), RestorePoint::default());
        assert!(matches!(
            cache.restore_point(&DeviceKey::new("h", "missing")),
            Err(Error::DeviceNotFound(_))
        ));
    }

    #[test]
    fn refresh_accepts_unknown_modes() {
        let key = DeviceKey::new("h", "d");
        let cache = cache_with(&key);
        let mut record = raw(GvMode::Comfort);
        record.gv_mode = ModeCode::new("9");

        cache.refresh(&key, record).unwrap();
        assert!(cache.snapshot(&key).unwrap().climate_state().is_err());
    }

    #[test]
    fn list_preserves_discovery_order_per_household() {
        let cache = DeviceStateCache::new();
        for (home, dev) in [("a", "3"), ("b", "1"), ("a", "1"), ("a", "2")] {
            cache.insert(
                DeviceKey::new(home, dev),
                HardwareId::new(dev),
                RawDeviceState::default(),
            );
        }

        let ids: Vec<String> = cache
            .list(&HouseholdId::new("a"))
            .iter()
            .map(|d| d.as_str().to_string())
            .collect();
        assert_eq!(ids, ["3", "1", "2"]);
        assert_eq!(cache.list(&HouseholdId::new("b")).len(), 1);
        assert!(cache.list(&HouseholdId::new("c")).is_empty());
        assert_eq!(cache.len(), 4);
        assert_eq!(
            cache.households(),
            [HouseholdId::new("a"), HouseholdId::new("b")]
        );
        assert_eq!(cache.keys()[1], DeviceKey::new("b", "1"));
    }

    #[test]
    fn insert_twice_refreshes_without_duplicating() {
        let key = DeviceKey::new("h", "d");
        let cache = cache_with(&key);
        let point = RestorePoint::new(GvMode::Eco).unwrap();
        cache.remember_restore_point(&key, point).unwrap();

        assert!(!cache.insert(key.clone(), HardwareId::new("hw-1"), raw(GvMode::Boost)));
        assert_eq!(cache.list(&HouseholdId::new("h")).len(), 1);
        assert_eq!(cache.get(&key).unwrap().mode().unwrap(), GvMode::Boost);
        assert_eq!(cache.previous_mode(&key).unwrap(), GvMode::Eco);
    }

    #[test]
    fn unrelated_devices_are_independent() {
        let a = DeviceKey::new("h", "a");
        let b = DeviceKey::new("h", "b");
        let cache = cache_with(&a);
        cache.insert(b.clone(), HardwareId::new("hw-b"), raw(GvMode::Comfort));

        // Holding one device's lock does not block the other.
        let held = cache.entry(&a).unwrap();
        let _guard = held.lock();
        cache.apply_patch(&b, &StatePatch::mode(GvMode::Eco)).unwrap();
        assert_eq!(cache.get(&b).unwrap().mode().unwrap(), GvMode::Eco);
    }

    #[test]
    fn clones_share_storage() {
        let key = DeviceKey::new("h", "d");
        let cache = cache_with(&key);
        let other = cache.clone();

        other.apply_patch(&key, &StatePatch::mode(GvMode::Boost)).unwrap();
        assert_eq!(cache.get(&key).unwrap().mode().unwrap(), GvMode::Boost);
    }

    #[tokio::test]
    async fn events_are_published() {
        let cache = DeviceStateCache::new();
        let mut rx = cache.subscribe();
        let key = DeviceKey::new("h", "d");

        cache.insert(key.clone(), HardwareId::new("hw"), raw(GvMode::Comfort));
        cache.apply_patch(&key, &StatePatch::mode(GvMode::Eco)).unwrap();
        // Unchanged patch publishes nothing.
        cache.apply_patch(&key, &StatePatch::mode(GvMode::Eco)).unwrap();
        cache.refresh(&key, raw(GvMode::Comfort)).unwrap();

        assert!(matches!(rx.recv().await.unwrap(), ClimateEvent::DeviceAdded { .. }));
        assert!(matches!(
            rx.recv().await.unwrap(),
            ClimateEvent::StateChanged {
                source: UpdateSource::Optimistic,
                ..
            }
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            ClimateEvent::StateChanged {
                source: UpdateSource::Refresh,
                ..
            }
        ));
    }
}
