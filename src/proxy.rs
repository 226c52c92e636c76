//! The single OS-level notification delegate
//!
//! Composes the delegate chain, the foreground policy, and the SDK gate into
//! the one object registered with the OS. Every callback reaches a terminal
//! completion: the chain synthesizes missing forwards and the gate absorbs
//! SDK startup latency without ever blocking the OS.

use std::sync::Arc;

use tracing::debug;

use crate::chain::DelegateChain;
use crate::delegate::{NotificationDelegate, PresentationResponder, ResponseCompletion};
use crate::event::{Notification, NotificationResponse, OpaqueEvent, SdkEvent};
use crate::policy::ForegroundPolicy;
use crate::sdk::{SdkGate, SdkHandler};

/// Proxy registered with the OS in place of the host's own delegate.
///
/// Forwards every callback to the previously installed delegate, buffers
/// push-related events until the first-party SDK signals readiness, and
/// answers foreground presentation requests from the host's opt-in flag.
#[derive(Default)]
pub struct NotificationDelegateProxy {
    chain: DelegateChain,
    policy: ForegroundPolicy,
    gate: SdkGate,
}

impl NotificationDelegateProxy {
    /// Create a proxy with no previous delegate, foreground display off,
    /// and the SDK not yet ready
    pub fn new() -> Self {
        Self::default()
    }

    /// Previous-delegate chain; the registrar captures into it
    pub fn chain(&self) -> &DelegateChain {
        &self.chain
    }

    /// Whether foreground arrivals are displayed (default: no)
    pub fn show_foreground_notifications(&self) -> bool {
        self.policy.should_present_in_foreground()
    }

    /// Host-facing opt-in for displaying notifications while the app is
    /// foregrounded
    pub fn set_show_foreground_notifications(&self, show: bool) {
        self.policy.set_show_foreground(show);
    }

    /// Whether the first-party SDK has signalled readiness
    pub fn is_ready(&self) -> bool {
        self.gate.is_ready()
    }

    /// Number of events buffered while waiting for readiness
    pub fn pending_events(&self) -> usize {
        self.gate.pending()
    }

    /// Readiness signal from the first-party SDK: installs its event handler
    /// and drains every buffered event into it, in arrival order.
    ///
    /// One-shot per process; repeated signals are ignored.
    pub fn set_ready(&self, handler: Arc<dyn SdkHandler>) {
        self.gate.set_ready(handler);
    }
}

impl NotificationDelegate for NotificationDelegateProxy {
    fn handles_foreground_presentation(&self) -> bool {
        true
    }

    fn will_present(&self, notification: &Notification, responder: PresentationResponder) {
        let decision = self.policy.decision();
        debug!(
            identifier = %notification.identifier,
            ?decision,
            "foreground notification received"
        );

        // SDK delivery is orthogonal to the OS answer: buffer or dispatch
        // first, then answer from policy no matter what the gate did.
        self.gate
            .dispatch_or_enqueue(SdkEvent::ForegroundDelivery(notification.clone()));

        // The previous delegate's preferred presentation is deliberately
        // discarded; only its completion gates ours.
        self.chain.forward_will_present(
            notification,
            PresentationResponder::new(move |_| responder.resolve(decision)),
        );
    }

    fn handles_response(&self) -> bool {
        true
    }

    fn did_receive_response(&self, response: &NotificationResponse, completion: ResponseCompletion) {
        debug!(
            identifier = %response.notification.identifier,
            action = %response.action_identifier,
            "notification response received"
        );

        self.gate
            .dispatch_or_enqueue(SdkEvent::Response(response.clone()));

        // The OS signal is chained to the previous delegate's completion and
        // never waits on SDK readiness.
        self.chain.forward_response(response, completion);
    }

    fn handles_opaque_events(&self) -> bool {
        true
    }

    fn on_opaque_event(&self, event: &OpaqueEvent) {
        // Not push-related: chain pass-through only, no buffering
        self.chain.forward_opaque(event);
    }
}
