// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Watts Vision adapter.
//!
//! The top-level [`Error`] distinguishes the failures a host platform has to
//! react to differently: a device reporting a mode code we do not know, a
//! setpoint change requested while the device is off, a cache miss, and a
//! failed command dispatch. Lower-level value and parsing failures convert
//! into it via `?`.

use thiserror::Error;

use crate::types::{DeviceKey, Preset};

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The device reported a `gv_mode` outside `{0, 1, 2, 3, 4, 11}`.
    ///
    /// The device is treated as unavailable rather than guessing a mode.
    #[error("unknown gv_mode code: {0:?}")]
    UnknownModeCode(String),

    /// A target temperature was requested for a preset with no setpoint.
    #[error("preset {0} has no adjustable setpoint")]
    PresetHasNoSetpoint(Preset),

    /// The device is not registered in the cache.
    #[error("device not found: {0}")]
    DeviceNotFound(DeviceKey),

    /// The remote collaborator failed to carry out a call.
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] ApiError),

    /// A value could not be converted.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A wire record could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors related to value validation and conversion.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A temperature is NaN or infinite.
    #[error("temperature {0} is not a finite number")]
    NotFinite(f64),

    /// A temperature does not fit the wire encoding.
    #[error("temperature {0} is out of the representable range")]
    OutOfRange(f64),
}

/// Errors related to decoding vendor records.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors reported by the remote API collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The remote service could not be reached.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The call did not complete in time.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The remote service rejected the call.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The remote service does not know the device.
    #[error("unknown device: {0}")]
    UnknownDevice(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_mode_display() {
        let err = Error::UnknownModeCode("7".to_string());
        assert_eq!(err.to_string(), "unknown gv_mode code: \"7\"");
    }

    #[test]
    fn preset_without_setpoint_display() {
        let err = Error::PresetHasNoSetpoint(Preset::Off);
        assert_eq!(err.to_string(), "preset off has no adjustable setpoint");
    }

    #[test]
    fn device_not_found_display() {
        let err = Error::DeviceNotFound(DeviceKey::new("home-1", "dev-9"));
        assert_eq!(err.to_string(), "device not found: home-1/dev-9");
    }

    #[test]
    fn error_from_api_error() {
        let err: Error = ApiError::Timeout(500).into();
        assert!(matches!(err, Error::Dispatch(ApiError::Timeout(500))));
        assert_eq!(err.to_string(), "dispatch failed: request timed out after 500 ms");
    }

    #[test]
    fn parse_error_converts() {
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = ParseError::from(json).into();
        assert!(matches!(err, Error::Parse(ParseError::Json(_))));
        assert!(err.to_string().starts_with("parse error: JSON parse error:"));
    }
}
