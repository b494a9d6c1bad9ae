// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat event types.

use crate::climate::SetpointCommand;
use crate::state::RawDeviceState;
use crate::types::DeviceKey;

/// Where a cached record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateSource {
    /// Authoritative snapshot from the vendor API.
    Refresh,
    /// Local patch applied ahead of confirmation.
    Optimistic,
}

/// Events emitted by the device cache and the thermostat manager.
///
/// # Examples
///
/// ```
/// use watts_vision::event::ClimateEvent;
/// use watts_vision::types::DeviceKey;
///
/// let key = DeviceKey::new("home-1", "dev-1");
/// let event = ClimateEvent::device_added(key.clone());
/// assert_eq!(event.key(), &key);
/// assert!(event.is_lifecycle());
/// ```
#[derive(Debug, Clone)]
pub enum ClimateEvent {
    /// A device was registered in the cache.
    DeviceAdded {
        /// The registered device.
        key: DeviceKey,
    },

    /// A cached record changed.
    StateChanged {
        /// The device.
        key: DeviceKey,
        /// Whether the change came from a refresh or a local patch.
        source: UpdateSource,
        /// The complete new record.
        new_state: RawDeviceState,
    },

    /// A command was handed to the vendor API.
    CommandDispatched {
        /// The device.
        key: DeviceKey,
        /// The payload that was sent.
        command: SetpointCommand,
    },

    /// The device became available or unavailable.
    AvailabilityChanged {
        /// The device.
        key: DeviceKey,
        /// Whether the device is now available.
        available: bool,
        /// The failure that made it unavailable.
        error: Option<String>,
    },
}

impl ClimateEvent {
    /// Returns the device this event concerns.
    #[must_use]
    pub fn key(&self) -> &DeviceKey {
        match self {
            Self::DeviceAdded { key }
            | Self::StateChanged { key, .. }
            | Self::CommandDispatched { key, .. }
            | Self::AvailabilityChanged { key, .. } => key,
        }
    }

    /// Returns `true` if this is a device lifecycle event.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::DeviceAdded { .. })
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Creates a device added event.
    #[must_use]
    pub fn device_added(key: DeviceKey) -> Self {
        Self::DeviceAdded { key }
    }

    /// Creates a state changed event.
    #[must_use]
    pub fn state_changed(key: DeviceKey, source: UpdateSource, new_state: RawDeviceState) -> Self {
        Self::StateChanged {
            key,
            source,
            new_state,
        }
    }

    /// Creates a command dispatched event.
    #[must_use]
    pub fn command_dispatched(key: DeviceKey, command: SetpointCommand) -> Self {
        Self::CommandDispatched { key, command }
    }

    /// Creates an event marking the device available.
    #[must_use]
    pub fn available(key: DeviceKey) -> Self {
        Self::AvailabilityChanged {
            key,
            available: true,
            error: None,
        }
    }

    /// Creates an event marking the device unavailable.
    #[must_use]
    pub fn unavailable(key: DeviceKey, error: impl Into<String>) -> Self {
        Self::AvailabilityChanged {
            key,
            available: false,
            error: Some(error.into()),
        }
    }
}
