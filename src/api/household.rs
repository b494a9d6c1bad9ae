// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Household listing types.

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::state::RawDeviceState;
use crate::types::{DeviceId, DeviceKey, HardwareId, HouseholdId};

/// A household ("smart home") and the thermostats installed in it.
///
/// # Examples
///
/// ```
/// use watts_vision::api::Household;
///
/// let homes = Household::list_from_json(r#"[{
///     "smarthome_id": "B0-1",
///     "devices": [{
///         "id": "B0-1#C001-000",
///         "id_device": "C001-000",
///         "nom_appareil": "Salon",
///         "gv_mode": "0",
///         "consigne_confort": "210",
///         "consigne_hg": "70",
///         "consigne_eco": "175",
///         "consigne_boost": "230",
///         "consigne_manuel": "210",
///         "temperature_air": "195",
///         "min_set_point": "50",
///         "max_set_point": "300",
///         "heating_up": "1"
///     }]
/// }]"#).unwrap();
///
/// assert_eq!(homes[0].devices[0].hardware_id.as_str(), "C001-000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    /// Household identifier.
    #[serde(rename = "smarthome_id")]
    pub id: HouseholdId,
    /// Devices in the household.
    #[serde(default)]
    pub devices: Vec<DeviceRecord>,
}

impl Household {
    /// Decodes a household listing.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if the listing is malformed.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| ParseError::Json(e).into())
    }
}

/// One device of a household listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Identifier used to address the device's cached state.
    pub id: DeviceId,
    /// Identifier used to dispatch commands.
    #[serde(rename = "id_device")]
    pub hardware_id: HardwareId,
    /// Name given to the device in the vendor app.
    #[serde(rename = "nom_appareil", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Current device record.
    #[serde(flatten)]
    pub state: RawDeviceState,
}

impl DeviceRecord {
    /// Returns the cache key of this device within `household_id`.
    #[must_use]
    pub fn key(&self, household_id: &HouseholdId) -> DeviceKey {
        DeviceKey {
            household_id: household_id.clone(),
            device_id: self.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GvMode, Tenths};

    #[test]
    fn decodes_listing_with_numeric_fields() {
        let json = r#"[
            {"smarthome_id": "H1", "devices": [
                {"id": "H1#A", "id_device": "A", "gv_mode": 3,
                 "consigne_confort": 210, "consigne_hg": 70, "consigne_eco": 175,
                 "consigne_boost": 230, "consigne_manuel": 175, "temperature_air": 190,
                 "min_set_point": 50, "max_set_point": 300, "heating_up": 0}
            ]},
            {"smarthome_id": "H2"}
        ]"#;

        let homes = Household::list_from_json(json).unwrap();
        assert_eq!(homes.len(), 2);
        assert!(homes[1].devices.is_empty());

        let device = &homes[0].devices[0];
        assert_eq!(device.name, None);
        assert_eq!(device.state.mode().unwrap(), GvMode::Eco);
        assert_eq!(device.state.consigne_eco, Tenths::new(175));
        assert_eq!(device.key(&homes[0].id), DeviceKey::new("H1", "H1#A"));
    }

    #[test]
    fn rejects_device_without_state() {
        let json = r#"[{"smarthome_id": "H1", "devices": [{"id": "x", "id_device": "y"}]}]"#;
        assert!(Household::list_from_json(json).is_err());
    }
}
