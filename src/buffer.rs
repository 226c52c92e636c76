//! Ordered buffer for pre-readiness notification events

use crate::event::SdkEvent;

/// Append-only FIFO of events awaiting SDK readiness.
///
/// Plain data structure: callers serialize access (see `SdkGate`), which is
/// what keeps enqueue/drain sequences atomic with the readiness check.
/// Events are never reordered, dropped, or duplicated between enqueue and
/// drain.
#[derive(Debug, Default)]
pub struct EventBuffer {
    events: Vec<SdkEvent>,
}

impl EventBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `event` at the tail
    pub fn enqueue(&mut self, event: SdkEvent) {
        self.events.push(event);
    }

    /// Empty the buffer, returning its contents in arrival order.
    ///
    /// The buffer is immediately reusable afterwards.
    pub fn drain_all(&mut self) -> Vec<SdkEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of buffered events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the buffer holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
