//! Event sink port
//!
//! The game engine writes every [`GameEvent`] to an [`EventSink`] in the
//! order the state changes happen. Sinks are synchronous and infallible so
//! that a slow or broken observer cannot stall or abort a game.

use imposter_domain::GameEvent;
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;

/// Receiver of the ordered game event stream
///
/// Implementations live in the presentation and infrastructure layers
/// (console printer, progress bar, JSONL log, push channel).
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &GameEvent);
}

/// No-op sink for when nobody is listening
pub struct NoEvents;

impl EventSink for NoEvents {
    fn emit(&self, _event: &GameEvent) {}
}

/// Sink that keeps every event in memory
#[derive(Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<GameEvent>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for MemoryEventSink {
    fn emit(&self, event: &GameEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// Sink that forwards events to an async consumer
///
/// A dropped receiver is ignored; the game keeps running.
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelEventSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: &GameEvent) {
        let _ = self.tx.send(event.clone());
    }
}

/// A sink that delegates to multiple inner sinks, in order.
///
/// Uses borrowed references so both owned and borrowed sinks can be
/// composed without wrapper types.
///
/// ```text
/// RunGameUseCase.execute_with_events(input, &composite)
///                                           |
///            +------------------------------+------------------------------+
///            |                              |                              |
///   ConsoleEventPrinter             ProgressReporter                 JsonlEventLog
/// ```
pub struct CompositeEventSink<'a> {
    delegates: Vec<&'a dyn EventSink>,
}

impl<'a> CompositeEventSink<'a> {
    pub fn new(delegates: Vec<&'a dyn EventSink>) -> Self {
        Self { delegates }
    }

    pub fn push(&mut self, sink: &'a dyn EventSink) {
        self.delegates.push(sink);
    }
}

impl EventSink for CompositeEventSink<'_> {
    fn emit(&self, event: &GameEvent) {
        for d in &self.delegates {
            d.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_fans_out_in_order() {
        let a = MemoryEventSink::new();
        let b = MemoryEventSink::new();
        let composite = CompositeEventSink::new(vec![&a, &b]);

        composite.emit(&GameEvent::RoundEnd { round: 1 });
        composite.emit(&GameEvent::error("boom"));

        assert_eq!(a.events(), b.events());
        assert_eq!(a.len(), 2);
        assert_eq!(a.events()[1].event_type(), "error");
    }

    #[tokio::test]
    async fn test_channel_sink_delivers() {
        let (sink, mut rx) = ChannelEventSink::new();
        sink.emit(&GameEvent::RoundEnd { round: 2 });
        assert_eq!(rx.recv().await, Some(GameEvent::RoundEnd { round: 2 }));

        drop(rx);
        // Receiver gone: emitting must not panic
        sink.emit(&GameEvent::RoundEnd { round: 3 });
    }
}
