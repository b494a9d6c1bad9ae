// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static description of a thermostat for the host platform.

use serde::Serialize;

use crate::types::{DeviceKey, HardwareId, HvacMode, Preset};

/// Integration domain used in device identifiers.
pub const DOMAIN: &str = "watts_vision";

/// Manufacturer reported for every thermostat.
pub const MANUFACTURER: &str = "Watts";

/// Model reported for every thermostat.
pub const MODEL: &str = "BT-D03-RF";

/// Unit the vendor API reports temperatures in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

/// Device registry information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// `(domain, device id)` pairs identifying the device.
    pub identifiers: Vec<(String, String)>,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Display name.
    pub name: String,
    /// Model name.
    pub model: String,
}

/// A thermostat known to the manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thermostat {
    /// Cache key.
    pub key: DeviceKey,
    /// Identifier used to dispatch commands.
    pub hardware_id: HardwareId,
    /// Display name.
    pub name: String,
}

impl Thermostat {
    /// Unique id of the climate entity.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("watts_thermostat_{}", self.key.device_id)
    }

    /// Device registry information.
    #[must_use]
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            identifiers: vec![(DOMAIN.to_string(), self.key.device_id.to_string())],
            manufacturer: MANUFACTURER.to_string(),
            name: self.name.clone(),
            model: MODEL.to_string(),
        }
    }

    /// HVAC modes the thermostat accepts.
    #[must_use]
    pub fn hvac_modes(&self) -> &'static [HvacMode] {
        &HvacMode::SUPPORTED
    }

    /// Presets the thermostat accepts, in mode table order.
    #[must_use]
    pub fn preset_modes(&self) -> &'static [Preset] {
        &Preset::ALL
    }

    /// Unit of every temperature reported for this thermostat.
    #[must_use]
    pub fn temperature_unit(&self) -> TemperatureUnit {
        TemperatureUnit::Fahrenheit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thermostat() -> Thermostat {
        Thermostat {
            key: DeviceKey::new("B0-1", "B0-1#C001-000"),
            hardware_id: HardwareId::new("C001-000"),
            name: "Thermostat".to_string(),
        }
    }

    #[test]
    fn unique_id_uses_device_id() {
        assert_eq!(thermostat().unique_id(), "watts_thermostat_B0-1#C001-000");
    }

    #[test]
    fn device_info() {
        let info = thermostat().device_info();
        assert_eq!(info.manufacturer, "Watts");
        assert_eq!(info.model, "BT-D03-RF");
        assert_eq!(
            info.identifiers,
            [("watts_vision".to_string(), "B0-1#C001-000".to_string())]
        );
    }

    #[test]
    fn supported_modes() {
        let t = thermostat();
        assert_eq!(t.hvac_modes(), [HvacMode::Heat, HvacMode::Off]);
        assert_eq!(t.preset_modes().len(), 6);
        assert_eq!(t.preset_modes()[0], Preset::Comfort);
        assert_eq!(t.temperature_unit(), TemperatureUnit::Fahrenheit);
    }
}
