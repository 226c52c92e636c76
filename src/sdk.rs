//! SDK dispatch seam and readiness gate
//!
//! The first-party SDK installs a fire-and-forget event handler when its own
//! startup completes. Until then the gate buffers every push-related event;
//! `set_ready` drains the backlog in arrival order and installs the handler
//! inside one critical section, so an event arriving after readiness can
//! never overtake an older buffered one.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::buffer::EventBuffer;
use crate::event::SdkEvent;

/// Entry point the first-party SDK exposes for notification events
pub trait SdkHandler: Send + Sync {
    /// Deliver one event, fire-and-forget
    fn handle(&self, event: SdkEvent);
}

/// Channel-backed handler: events are forwarded to a consumer task
impl SdkHandler for mpsc::UnboundedSender<SdkEvent> {
    fn handle(&self, event: SdkEvent) {
        // A closed receiver just means nobody is listening anymore
        let _ = self.send(event);
    }
}

#[derive(Default)]
struct GateState {
    handler: Option<Arc<dyn SdkHandler>>,
    buffer: EventBuffer,
}

/// Readiness flag and pre-readiness buffer behind one lock.
///
/// Readiness is the presence of the installed handler. Folding the two
/// fields together keeps "check readiness" atomic with "enqueue" and with
/// "flip readiness then drain", closing the race where an event could be
/// both enqueued and missed by a drain, or dispatched twice.
#[derive(Default)]
pub struct SdkGate {
    state: Mutex<GateState>,
}

impl SdkGate {
    /// Create a gate that is not yet ready
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the SDK has signalled readiness
    pub fn is_ready(&self) -> bool {
        self.state.lock().handler.is_some()
    }

    /// Number of events awaiting readiness
    pub fn pending(&self) -> usize {
        self.state.lock().buffer.len()
    }

    /// Deliver `event` now when ready, buffer it otherwise.
    ///
    /// Dispatch happens inside the critical section: handlers are expected
    /// to be cheap (a channel send), and holding the lock is what keeps a
    /// post-readiness event ordered after a concurrent drain.
    pub fn dispatch_or_enqueue(&self, event: SdkEvent) {
        let mut state = self.state.lock();
        match &state.handler {
            Some(handler) => {
                debug!(kind = event.kind(), "dispatching event to SDK");
                handler.handle(event);
            }
            None => {
                debug!(kind = event.kind(), "SDK not ready, buffering event");
                state.buffer.enqueue(event);
            }
        }
    }

    /// Install the SDK handler and replay the backlog in arrival order.
    ///
    /// Readiness is monotonic: once set it never reverts, and a repeated
    /// signal is ignored.
    pub fn set_ready(&self, handler: Arc<dyn SdkHandler>) {
        let mut state = self.state.lock();
        if state.handler.is_some() {
            warn!("SDK signalled readiness more than once, ignoring");
            return;
        }

        let backlog = state.buffer.drain_all();
        info!(drained = backlog.len(), "SDK ready, draining buffered events");
        for event in backlog {
            handler.handle(event);
        }
        state.handler = Some(handler);
    }
}
