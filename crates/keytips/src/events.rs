//! Lifecycle events and multi-subscriber fan-out.
//!
//! Each subscriber owns a `crossbeam_channel` receiver. Events are sent
//! synchronously during a controller transition and read by the subscriber
//! afterwards, so a subscriber always observes the controller in its
//! post-transition state and may call back into it freely.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crossbeam_channel::{Receiver, Sender, TryIter, TrySendError, bounded};
use tracing::trace;

use crate::{CommandId, Letter};

/// Default per-subscriber queue capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// Smallest queue a subscriber is given.
const MIN_EVENT_CAPACITY: usize = 8;

/// Events emitted by the [`crate::Controller`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeytipEvent {
    /// Collection started.
    Activated,
    /// The typed sequence changed (including being cleared).
    SequenceChanged(Vec<Letter>),
    /// An exact chord matched; the command should be executed.
    MatchedCommand(CommandId),
    /// The typed sequence cannot extend to any chord.
    Invalid(Vec<Letter>),
    /// Collection was aborted by the user.
    Cancelled,
}

/// Identifier returned by [`EventBus::subscribe`].
pub type ListenerId = u64;

/// Receiving side of one subscription.
#[derive(Debug)]
pub struct Subscription {
    /// Identifier used to unsubscribe.
    id: ListenerId,
    /// Channel carrying events for this subscriber.
    rx: Receiver<KeytipEvent>,
    /// Events dropped because the queue was full.
    lost: Arc<AtomicU64>,
}

impl Subscription {
    /// Identifier for [`EventBus::unsubscribe`].
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// The underlying receiver, for blocking or `select!`-style consumption.
    pub fn receiver(&self) -> &Receiver<KeytipEvent> {
        &self.rx
    }

    /// Iterate over events that are already queued.
    pub fn try_iter(&self) -> TryIter<'_, KeytipEvent> {
        self.rx.try_iter()
    }

    /// Take every queued event.
    pub fn drain(&self) -> Vec<KeytipEvent> {
        self.rx.try_iter().collect()
    }

    /// Number of events dropped so far because this subscriber fell behind.
    pub fn lost_count(&self) -> u64 {
        self.lost.load(Ordering::Relaxed)
    }
}

/// Sending side of one subscription.
#[derive(Debug)]
struct Listener {
    /// Identifier shared with the [`Subscription`].
    id: ListenerId,
    /// Bounded queue into the subscriber.
    tx: Sender<KeytipEvent>,
    /// Drop counter shared with the [`Subscription`].
    lost: Arc<AtomicU64>,
}

/// Ordered list of subscribers, each with a bounded queue.
///
/// A subscriber that stops draining loses the newest events once its queue
/// is full; the loss is counted in [`Subscription::lost_count`]. Only a
/// dropped receiver removes a subscriber.
#[derive(Debug)]
pub struct EventBus {
    /// Next identifier to hand out.
    next_id: ListenerId,
    /// Queue capacity for new subscribers.
    capacity: usize,
    /// Live subscribers in registration order.
    listeners: Vec<Listener>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventBus {
    /// Create a bus with no subscribers and the default queue capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bus whose subscribers each queue at most `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            next_id: 0,
            capacity: capacity.max(MIN_EVENT_CAPACITY),
            listeners: Vec::new(),
        }
    }

    /// Per-subscriber queue capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Register a new subscriber.
    pub fn subscribe(&mut self) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        let (tx, rx) = bounded(self.capacity);
        let lost = Arc::new(AtomicU64::new(0));
        self.listeners.push(Listener {
            id,
            tx,
            lost: Arc::clone(&lost),
        });
        Subscription { id, rx, lost }
    }

    /// Remove a subscriber. Returns false when `id` is not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Number of registered subscribers.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver `event` to every subscriber.
    ///
    /// A full queue drops the event for that subscriber; a disconnected one is
    /// removed.
    pub fn emit(&mut self, event: &KeytipEvent) {
        self.listeners
            .retain(|l| match l.tx.try_send(event.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    let lost = l.lost.fetch_add(1, Ordering::Relaxed) + 1;
                    trace!(listener = l.id, lost, "keytips listener queue full");
                    true
                }
                Err(TrySendError::Disconnected(_)) => {
                    trace!(listener = l.id, "pruning disconnected keytips listener");
                    false
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_out_preserves_order() {
        let mut bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();
        bus.emit(&KeytipEvent::Activated);
        bus.emit(&KeytipEvent::Cancelled);
        let want = vec![KeytipEvent::Activated, KeytipEvent::Cancelled];
        assert_eq!(a.drain(), want);
        assert_eq!(b.drain(), want);
        assert!(a.drain().is_empty());
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();
        assert_ne!(a.id(), b.id());
        assert!(bus.unsubscribe(a.id()));
        assert!(!bus.unsubscribe(a.id()));
        bus.emit(&KeytipEvent::Activated);
        assert!(a.drain().is_empty());
        assert_eq!(b.drain(), vec![KeytipEvent::Activated]);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut bus = EventBus::new();
        let a = bus.subscribe();
        {
            let _b = bus.subscribe();
        }
        assert_eq!(bus.listener_count(), 2);
        bus.emit(&KeytipEvent::Activated);
        assert_eq!(bus.listener_count(), 1);
        assert_eq!(a.try_iter().count(), 1);
    }

    #[test]
    fn full_queue_drops_and_counts_without_unsubscribing() {
        let mut bus = EventBus::with_capacity(8);
        let slow = bus.subscribe();
        let fast = bus.subscribe();
        for _ in 0..20 {
            bus.emit(&KeytipEvent::Activated);
            assert_eq!(fast.drain().len(), 1);
        }
        assert_eq!(slow.receiver().len(), 8);
        assert_eq!(slow.lost_count(), 12);
        assert_eq!(fast.lost_count(), 0);
        assert_eq!(bus.listener_count(), 2);

        assert_eq!(slow.drain().len(), 8);
        bus.emit(&KeytipEvent::Cancelled);
        assert_eq!(slow.drain(), vec![KeytipEvent::Cancelled]);
        assert_eq!(slow.lost_count(), 12);
    }

    #[test]
    fn capacity_has_a_floor() {
        assert_eq!(EventBus::with_capacity(0).capacity(), MIN_EVENT_CAPACITY);
        assert_eq!(EventBus::new().capacity(), DEFAULT_EVENT_CAPACITY);
    }
}
