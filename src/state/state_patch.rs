// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Partial updates of a device record.
//!
//! A [`StatePatch`] describes the fields a command is about to change on the
//! device. It is applied to the cached record right away so that reads issued
//! before the remote system catches up already reflect the command.

use serde::{Deserialize, Serialize};

use crate::types::{GvMode, SetpointField, Tenths};

/// A change to apply to a [`RawDeviceState`](super::RawDeviceState).
///
/// # Examples
///
/// ```
/// use watts_vision::state::{RawDeviceState, StatePatch};
/// use watts_vision::types::{GvMode, SetpointField, Tenths};
///
/// let mut raw = RawDeviceState::default();
/// let patch = StatePatch::Batch(vec![
///     StatePatch::mode(GvMode::Boost),
///     StatePatch::setpoint(SetpointField::Manual, Tenths::new(230)),
/// ]);
///
/// assert!(raw.apply(&patch));
/// assert_eq!(raw.mode().unwrap(), GvMode::Boost);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatePatch {
    /// Operating mode changed.
    Mode(GvMode),

    /// One setpoint changed.
    Setpoint {
        /// The setpoint field.
        field: SetpointField,
        /// Its new value.
        value: Tenths,
    },

    /// Multiple changes at once.
    Batch(Vec<StatePatch>),
}

impl StatePatch {
    /// Creates a mode change.
    #[must_use]
    pub fn mode(mode: GvMode) -> Self {
        Self::Mode(mode)
    }

    /// Creates a setpoint change.
    #[must_use]
    pub fn setpoint(field: SetpointField, value: Tenths) -> Self {
        Self::Setpoint { field, value }
    }

    /// Returns the mode this patch sets, if any.
    ///
    /// For batches, the last mode change wins.
    #[must_use]
    pub fn target_mode(&self) -> Option<GvMode> {
        match self {
            Self::Mode(mode) => Some(*mode),
            Self::Setpoint { .. } => None,
            Self::Batch(patches) => patches.iter().rev().find_map(Self::target_mode),
        }
    }

    /// Returns the value this patch writes to `field`, if any.
    ///
    /// For batches, the last write wins.
    #[must_use]
    pub fn setpoint_value(&self, field: SetpointField) -> Option<Tenths> {
        match self {
            Self::Mode(_) => None,
            Self::Setpoint { field: f, value } => (*f == field).then_some(*value),
            Self::Batch(patches) => patches
                .iter()
                .rev()
                .find_map(|p| p.setpoint_value(field)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_mode_of_batch_takes_last() {
        let patch = StatePatch::Batch(vec![
            StatePatch::mode(GvMode::Eco),
            StatePatch::setpoint(SetpointField::Eco, Tenths::new(170)),
            StatePatch::mode(GvMode::Boost),
        ]);
        assert_eq!(patch.target_mode(), Some(GvMode::Boost));
    }

    #[test]
    fn setpoint_value_lookup() {
        let patch = StatePatch::Batch(vec![
            StatePatch::setpoint(SetpointField::Manual, Tenths::new(200)),
            StatePatch::setpoint(SetpointField::Comfort, Tenths::new(210)),
        ]);
        assert_eq!(
            patch.setpoint_value(SetpointField::Manual),
            Some(Tenths::new(200))
        );
        assert_eq!(patch.setpoint_value(SetpointField::Eco), None);
        assert_eq!(StatePatch::mode(GvMode::Off).target_mode(), Some(GvMode::Off));
    }
}
