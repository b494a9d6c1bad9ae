// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration of the thermostat manager.

use std::time::Duration;

/// Configuration for a [`ThermostatManager`](super::ThermostatManager).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use watts_vision::manager::ManagerConfig;
///
/// let config = ManagerConfig::default()
///     .with_dispatch_timeout(Duration::from_secs(5))
///     .with_device_name("Radiator");
///
/// assert_eq!(config.dispatch_timeout(), Duration::from_secs(5));
/// assert_eq!(config.device_name(), "Radiator");
/// ```
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    dispatch_timeout: Duration,
    event_capacity: usize,
    device_name: String,
}

impl ManagerConfig {
    /// Default time allowed for a command to reach the vendor API.
    pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default event channel capacity.
    pub const DEFAULT_EVENT_CAPACITY: usize = 256;
    /// Default display name of a thermostat.
    pub const DEFAULT_DEVICE_NAME: &'static str = "Thermostat";

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dispatch_timeout: Self::DEFAULT_DISPATCH_TIMEOUT,
            event_capacity: Self::DEFAULT_EVENT_CAPACITY,
            device_name: Self::DEFAULT_DEVICE_NAME.to_string(),
        }
    }

    /// Sets how long a command may take before it counts as failed.
    #[must_use]
    pub fn with_dispatch_timeout(mut self, timeout: Duration) -> Self {
        self.dispatch_timeout = timeout;
        self
    }

    /// Sets the event channel capacity.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    /// Sets the display name used for thermostats without a vendor name.
    #[must_use]
    pub fn with_device_name(mut self, name: impl Into<String>) -> Self {
        self.device_name = name.into();
        self
    }

    /// Returns the dispatch timeout.
    #[must_use]
    pub fn dispatch_timeout(&self) -> Duration {
        self.dispatch_timeout
    }

    /// Returns the event channel capacity.
    #[must_use]
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    /// Returns the default display name.
    #[must_use]
    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ManagerConfig::default();
        assert_eq!(config.dispatch_timeout(), Duration::from_secs(10));
        assert_eq!(config.event_capacity(), 256);
        assert_eq!(config.device_name(), "Thermostat");
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let config = ManagerConfig::new().with_event_capacity(0);
        assert_eq!(config.event_capacity(), 1);
    }
}
