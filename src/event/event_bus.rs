// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast channel carrying [`ClimateEvent`]s.

use tokio::sync::broadcast::{self, error::RecvError};

use crate::types::DeviceKey;

use super::ClimateEvent;

/// Buffered events per subscriber before the slowest one starts lagging.
const DEFAULT_CAPACITY: usize = 256;

/// Fan-out of thermostat events to any number of listeners.
///
/// Clones share the same channel. A subscriber that falls more than the
/// channel capacity behind gets [`RecvError::Lagged`] and skips ahead.
///
/// # Examples
///
/// ```
/// use watts_vision::event::{ClimateEvent, EventBus};
/// use watts_vision::types::DeviceKey;
///
/// let bus = EventBus::new();
/// let salon = DeviceKey::new("B0-1", "B0-1#C001-000");
/// let mut all = bus.subscribe();
/// let mut only_salon = bus.subscribe_device(salon.clone());
///
/// bus.publish(ClimateEvent::device_added(salon.clone()));
/// assert_eq!(all.try_recv().unwrap().key(), &salon);
/// assert_eq!(only_salon.try_recv().unwrap().unwrap().key(), &salon);
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ClimateEvent>,
}

impl EventBus {
    /// Creates a bus buffering 256 events per subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a bus buffering `capacity` events per subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Receives every event published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ClimateEvent> {
        self.sender.subscribe()
    }

    /// Receives the events of a single thermostat published from now on.
    #[must_use]
    pub fn subscribe_device(&self, key: DeviceKey) -> DeviceEvents {
        DeviceEvents {
            key,
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live receivers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Sends an event to every subscriber.
    ///
    /// Returns how many receivers got it; zero when nobody listens.
    pub fn publish(&self, event: ClimateEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Events of one thermostat, filtered out of an [`EventBus`].
#[derive(Debug)]
pub struct DeviceEvents {
    key: DeviceKey,
    receiver: broadcast::Receiver<ClimateEvent>,
}

impl DeviceEvents {
    /// The thermostat this subscription follows.
    #[must_use]
    pub fn key(&self) -> &DeviceKey {
        &self.key
    }

    /// Waits for the next event of the thermostat.
    ///
    /// # Errors
    ///
    /// Returns [`RecvError::Closed`] once every bus is dropped and
    /// [`RecvError::Lagged`] if events were lost.
    pub async fn recv(&mut self) -> Result<ClimateEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if event.key() == &self.key {
                return Ok(event);
            }
        }
    }

    /// Returns the next buffered event of the thermostat, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RecvError::Closed`] once every bus is dropped and
    /// [`RecvError::Lagged`] if events were lost.
    pub fn try_recv(&mut self) -> Result<Option<ClimateEvent>, RecvError> {
        use broadcast::error::TryRecvError;

        loop {
            match self.receiver.try_recv() {
                Ok(event) if event.key() == &self.key => return Ok(Some(event)),
                Ok(_) => {}
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Closed) => return Err(RecvError::Closed),
                Err(TryRecvError::Lagged(n)) => return Err(RecvError::Lagged(n)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salon() -> DeviceKey {
        DeviceKey::new("B0-1", "salon")
    }

    fn bedroom() -> DeviceKey {
        DeviceKey::new("B0-1", "bedroom")
    }

    #[test]
    fn publish_without_listeners_is_dropped() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(ClimateEvent::available(salon())), 0);
    }

    #[test]
    fn clones_share_listeners() {
        let bus = EventBus::new();
        let other = bus.clone();
        let _rx = bus.subscribe();
        let _dev = other.subscribe_device(salon());

        assert_eq!(bus.subscriber_count(), 2);
        assert_eq!(other.publish(ClimateEvent::device_added(salon())), 2);
    }

    #[tokio::test]
    async fn device_subscription_skips_other_thermostats() {
        let bus = EventBus::new();
        let mut events = bus.subscribe_device(salon());

        bus.publish(ClimateEvent::device_added(bedroom()));
        bus.publish(ClimateEvent::unavailable(bedroom(), "timeout"));
        bus.publish(ClimateEvent::unavailable(salon(), "rejected"));

        let event = events.recv().await.unwrap();
        assert!(matches!(
            event,
            ClimateEvent::AvailabilityChanged { key, available: false, error: Some(e) }
                if key == salon() && e == "rejected"
        ));
        assert_eq!(events.try_recv().unwrap().map(|e| e.key().clone()), None);
    }

    #[test]
    fn device_subscription_reports_lag() {
        let bus = EventBus::with_capacity(2);
        let mut events = bus.subscribe_device(salon());

        for _ in 0..4 {
            bus.publish(ClimateEvent::available(salon()));
        }

        assert!(matches!(events.try_recv(), Err(RecvError::Lagged(2))));
        assert!(events.try_recv().unwrap().is_some());
    }

    #[test]
    fn device_subscription_closes_with_bus() {
        let bus = EventBus::new();
        let mut events = bus.subscribe_device(salon());
        drop(bus);

        assert!(matches!(events.try_recv(), Err(RecvError::Closed)));
        assert_eq!(events.key(), &salon());
    }
}
