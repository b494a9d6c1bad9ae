// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperatures in tenths of a degree.
//!
//! The vendor API encodes every temperature as a string holding an integer
//! number of tenths of a degree (`"215"` is 21.5°). [`Tenths`] keeps that
//! integer exactly and converts to and from degrees at the edges.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValueError;

/// A temperature stored as an integer number of tenths of a degree.
///
/// # Examples
///
/// ```
/// use watts_vision::types::Tenths;
///
/// let t = Tenths::from_degrees(21.5).unwrap();
/// assert_eq!(t.value(), 215);
/// assert_eq!(t.degrees(), 21.5);
/// assert_eq!(t.to_string(), "215");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tenths(i32);

impl Tenths {
    /// Zero, used to clear the manual setpoint when turning off.
    pub const ZERO: Self = Self(0);

    /// Fixed bound reported for frost protection (44.6°).
    pub const FROST_PROTECT_BOUND: Self = Self(446);

    /// Creates a value from a raw tenths count.
    #[must_use]
    pub const fn new(tenths: i32) -> Self {
        Self(tenths)
    }

    /// Converts degrees to tenths, rounding to the nearest tenth.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::NotFinite`] for NaN or infinite input and
    /// [`ValueError::OutOfRange`] if the value does not fit the encoding.
    pub fn from_degrees(degrees: f64) -> Result<Self, ValueError> {
        if !degrees.is_finite() {
            return Err(ValueError::NotFinite(degrees));
        }
        let scaled = (degrees * 10.0).round();
        if scaled < f64::from(i32::MIN) || scaled > f64::from(i32::MAX) {
            return Err(ValueError::OutOfRange(degrees));
        }
        // Range checked above.
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(scaled as i32))
    }

    /// Returns the raw tenths count.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Returns the temperature in degrees.
    #[must_use]
    pub fn degrees(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Tenths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tenths {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i32),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s
                .trim()
                .parse::<i32>()
                .map(Self)
                .map_err(|e| serde::de::Error::custom(format!("invalid tenths {s:?}: {e}"))),
        }
    }
}

/// Serde adapter for the vendor's `"0"`/`"1"` boolean flags.
pub(crate) mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "1" } else { "0" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bool(b) => Ok(b),
            Raw::Number(0) => Ok(false),
            Raw::Number(1) => Ok(true),
            Raw::Number(n) => Err(serde::de::Error::custom(format!("invalid flag {n}"))),
            Raw::Text(s) => match s.trim() {
                "0" => Ok(false),
                "1" => Ok(true),
                other => Err(serde::de::Error::custom(format!("invalid flag {other:?}"))),
            },
        }
    }
}
