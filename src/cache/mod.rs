// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory device state cache.
//!
//! The vendor API is slow to reflect commands, so the cache is patched
//! optimistically as soon as a command is planned: reads issued before the
//! next refresh see the intended state rather than the old one. A refresh
//! replaces the record with whatever the vendor API returned, which can
//! briefly undo a patch the remote side has not applied yet.

mod cached_device;
mod device_cache;

pub use cached_device::CachedDevice;
pub use device_cache::DeviceStateCache;
