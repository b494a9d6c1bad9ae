// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Household and device identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a vendor identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a household ("smart home") in the vendor API.
    HouseholdId
);

string_id!(
    /// Identifier of a device within the vendor's device listing.
    ///
    /// This is the `id` field, used to address cached state.
    DeviceId
);

string_id!(
    /// Hardware identifier of a device (`id_device`).
    ///
    /// Commands are dispatched using this identifier.
    HardwareId
);

/// Cache key of a device: the household it belongs to and its id.
///
/// # Examples
///
/// ```
/// use watts_vision::types::DeviceKey;
///
/// let key = DeviceKey::new("home-1", "dev-2");
/// assert_eq!(key.to_string(), "home-1/dev-2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceKey {
    /// The household the device belongs to.
    pub household_id: HouseholdId,
    /// The device id.
    pub device_id: DeviceId,
}

impl DeviceKey {
    /// Creates a key from anything convertible to the two ids.
    #[must_use]
    pub fn new(household_id: impl Into<HouseholdId>, device_id: impl Into<DeviceId>) -> Self {
        Self {
            household_id: household_id.into(),
            device_id: device_id.into(),
        }
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.household_id, self.device_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_transparently() {
        let id = DeviceId::new("42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
        let back: HouseholdId = serde_json::from_str("\"home\"").unwrap();
        assert_eq!(back.as_str(), "home");
    }

    #[test]
    fn keys_compare_by_both_parts() {
        assert_eq!(DeviceKey::new("a", "1"), DeviceKey::new("a", "1"));
        assert_ne!(DeviceKey::new("a", "1"), DeviceKey::new("b", "1"));
        assert_ne!(DeviceKey::new("a", "1"), DeviceKey::new("a", "2"));
    }
}
