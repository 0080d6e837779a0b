//! Listener fan-out.
//!
//! Each observer gets its own unbounded channel. Broadcasting writes to
//! every channel in registration order before returning, and never
//! blocks: a slow or abandoned observer only grows its own queue.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use super::Event;

/// The receiving end handed to an observer.
///
/// Async adapters call `recv().await`; synchronous consumers can use
/// `blocking_recv()` or `try_recv()`.
pub type EventStream = UnboundedReceiver<Event>;

/// Destination for events produced while mutating game state.
pub trait EventSink {
    fn emit(&mut self, event: Event);
}

/// Collects events in order. Handy for resolving outside a controller.
impl EventSink for Vec<Event> {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

/// The set of registered observers.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: Vec<UnboundedSender<Event>>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enrol a new observer and return its stream.
    pub fn register(&mut self) -> EventStream {
        let (tx, rx) = unbounded_channel();
        self.listeners.push(tx);
        rx
    }

    /// Number of registered observers, including disconnected ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Send `event` to every observer.
    pub fn broadcast(&self, event: Event) {
        debug!(?event, "broadcasting event");
        for listener in &self.listeners {
            // A dropped receiver is the adapter's business.
            let _ = listener.send(event.clone());
        }
    }
}

impl EventSink for ListenerRegistry {
    fn emit(&mut self, event: Event) {
        self.broadcast(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_every_listener_sees_every_event_in_order() {
        let mut registry = ListenerRegistry::new();
        let mut a = registry.register();
        let mut b = registry.register();

        registry.broadcast(Event::state_update());
        registry.broadcast(Event::card_drawn(PlayerId::new(1)));

        for stream in [&mut a, &mut b] {
            assert_eq!(stream.try_recv().unwrap(), Event::state_update());
            assert_eq!(stream.try_recv().unwrap(), Event::card_drawn(PlayerId::new(1)));
            assert!(stream.try_recv().is_err());
        }
    }

    #[test]
    fn test_late_listener_misses_earlier_events() {
        let mut registry = ListenerRegistry::new();
        registry.broadcast(Event::state_update());

        let mut late = registry.register();
        assert!(late.try_recv().is_err());
    }

    #[test]
    fn test_dropped_listener_does_not_block_others() {
        let mut registry = ListenerRegistry::new();
        let gone = registry.register();
        let mut alive = registry.register();
        drop(gone);

        registry.broadcast(Event::draw());
        assert_eq!(alive.try_recv().unwrap(), Event::draw());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<Event> = Vec::new();
        sink.emit(Event::state_update());
        assert_eq!(sink, vec![Event::state_update()]);
    }
}
