// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single cache entry.

use chrono::{DateTime, Utc};

use crate::climate::{ClimateState, RestorePoint, derive_state};
use crate::error::Result;
use crate::state::{RawDeviceState, StatePatch};
use crate::types::HardwareId;

/// Everything the cache knows about one device.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedDevice {
    /// Last known raw record, possibly patched ahead of confirmation.
    pub raw: RawDeviceState,
    /// State to restore when switching back to heat.
    pub restore_point: RestorePoint,
    /// Identifier used when dispatching commands.
    pub hardware_id: HardwareId,
    /// When the record was last replaced by an authoritative snapshot.
    pub refreshed_at: Option<DateTime<Utc>>,
    /// When the record was last patched locally.
    pub patched_at: Option<DateTime<Utc>>,
    pending_patch: bool,
}

impl CachedDevice {
    pub(crate) fn new(hardware_id: HardwareId, raw: RawDeviceState) -> Self {
        Self {
            raw,
            restore_point: RestorePoint::default(),
            hardware_id,
            refreshed_at: Some(Utc::now()),
            patched_at: None,
            pending_patch: false,
        }
    }

    pub(crate) fn patch(&mut self, patch: &StatePatch) -> bool {
        self.patched_at = Some(Utc::now());
        self.pending_patch = true;
        self.raw.apply(patch)
    }

    pub(crate) fn replace(&mut self, raw: RawDeviceState) -> bool {
        let changed = self.raw != raw;
        self.raw = raw;
        self.refreshed_at = Some(Utc::now());
        self.pending_patch = false;
        changed
    }

    /// Derives the climate view of this entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownModeCode`](crate::Error::UnknownModeCode) if
    /// the record holds an unknown mode.
    pub fn climate_state(&self) -> Result<ClimateState> {
        derive_state(&self.raw, self.restore_point.mode())
    }

    /// Returns `true` if the record was patched after the last refresh.
    ///
    /// Such a record reflects a command the vendor API has not echoed back
    /// yet.
    #[must_use]
    pub fn has_pending_patch(&self) -> bool {
        self.pending_patch
    }
}
