/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! Per-dashboard event bus.
//!
//! A MPMC broadcast channel for [`HmiEvent`]s. Each [`Dashboard`](crate::Dashboard)
//! owns one, so several dashboards (or tests) never see each other's events.
//!
//! # Example
//!
//! ```ignore
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//! bus.emit(HmiEvent::Connected);
//! assert_eq!(rx.try_recv().unwrap(), HmiEvent::Connected);
//! ```

use crate::events::HmiEvent;
use async_broadcast::{broadcast, InactiveReceiver, Receiver, Sender};
use std::fmt;

/// Capacity of the event bus channel
pub const EVENT_BUS_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct EventBus {
    sender: Sender<HmiEvent>,
    // Keeps the channel open while nobody is listening.
    _keepalive: InactiveReceiver<HmiEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (mut sender, receiver) = broadcast(EVENT_BUS_CAPACITY);
        sender.set_overflow(true);
        sender.set_await_active(false);
        Self {
            sender,
            _keepalive: receiver.deactivate(),
        }
    }

    /// Subscribe to events emitted from now on.
    pub fn subscribe(&self) -> Receiver<HmiEvent> {
        self.sender.new_receiver()
    }

    /// Emit an event to all subscribers.
    ///
    /// Never blocks. When the channel is full the oldest event is dropped.
    pub fn emit(&self, event: HmiEvent) {
        let _ = self.sender.try_broadcast(event);
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("receivers", &self.sender.receiver_count())
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_broadcast::TryRecvError;
    use hmi_types::Tag;

    #[test]
    fn emit_without_subscribers_does_not_panic() {
        let bus = EventBus::new();
        bus.emit(HmiEvent::Connected);
        bus.emit(HmiEvent::ConnectionLost("closed".to_string()));
    }

    #[test]
    fn subscribers_receive_events_in_order() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        bus.emit(HmiEvent::Connected);
        bus.emit(HmiEvent::WriteAcknowledged {
            tag: Tag::from("tic1.sp"),
            value: 225.0,
        });
        assert_eq!(rx.try_recv().unwrap(), HmiEvent::Connected);
        assert!(matches!(
            rx.try_recv().unwrap(),
            HmiEvent::WriteAcknowledged { .. }
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn late_subscribers_miss_past_events() {
        let bus = EventBus::new();
        bus.emit(HmiEvent::Connected);
        let mut rx = bus.subscribe();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn buses_are_isolated() {
        let a = EventBus::new();
        let b = EventBus::new();
        let mut rx_b = b.subscribe();
        a.emit(HmiEvent::Connected);
        assert!(rx_b.try_recv().is_err());
    }

    #[test]
    fn overflow_drops_oldest() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        for i in 0..(EVENT_BUS_CAPACITY + 10) {
            bus.emit(HmiEvent::BatchDiscarded(i.to_string()));
        }
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Overflowed(10))));
        assert_eq!(rx.try_recv().unwrap(), HmiEvent::BatchDiscarded("10".to_string()));
    }
}
