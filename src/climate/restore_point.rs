// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State restored when a thermostat is switched back to heat.

use serde::Serialize;

use crate::types::{GvMode, Tenths};

/// Mode held before the thermostat was turned off, with the manual setpoint
/// it had at that moment.
///
/// Turning off clears `consigne_manuel` on the device, and the program mode
/// reads its target from that field, so the value is kept here to bring it
/// back. A restore point is never [`GvMode::Off`].
///
/// # Examples
///
/// ```
/// use watts_vision::climate::RestorePoint;
/// use watts_vision::types::{GvMode, Tenths};
///
/// let point = RestorePoint::new(GvMode::Program).unwrap().with_manual(Tenths::new(190));
/// assert_eq!(point.mode(), GvMode::Program);
/// assert_eq!(point.manual(), Some(Tenths::new(190)));
///
/// assert!(RestorePoint::new(GvMode::Off).is_none());
/// assert_eq!(RestorePoint::default().mode(), GvMode::Comfort);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RestorePoint {
    mode: GvMode,
    manual: Option<Tenths>,
}

impl RestorePoint {
    /// Creates a restore point for `mode`, or `None` for [`GvMode::Off`].
    #[must_use]
    pub fn new(mode: GvMode) -> Option<Self> {
        (!mode.is_off()).then_some(Self { mode, manual: None })
    }

    /// Records the manual setpoint held before turning off.
    #[must_use]
    pub fn with_manual(mut self, manual: Tenths) -> Self {
        self.manual = Some(manual);
        self
    }

    /// Mode to restore.
    #[must_use]
    pub fn mode(self) -> GvMode {
        self.mode
    }

    /// Manual setpoint held before turning off, if recorded.
    #[must_use]
    pub fn manual(self) -> Option<Tenths> {
        self.manual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_is_not_a_restore_point() {
        assert_eq!(RestorePoint::new(GvMode::Off), None);
        for mode in GvMode::ALL.into_iter().filter(|m| !m.is_off()) {
            assert_eq!(RestorePoint::new(mode).map(RestorePoint::mode), Some(mode));
        }
    }

    #[test]
    fn default_is_comfort_without_manual() {
        let point = RestorePoint::default();
        assert_eq!(point.mode(), GvMode::Comfort);
        assert_eq!(point.manual(), None);
    }
}
