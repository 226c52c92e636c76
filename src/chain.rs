//! Forwarding to a previously installed delegate
//!
//! The proxy replaces whatever delegate the host had installed; the chain
//! keeps a weak reference to it and forwards every callback so its semantics
//! survive the replacement. A missing delegate or a missing capability is a
//! normal branch, not an error: the chain synthesizes the completion itself
//! so the OS pipeline is never left waiting.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::debug;

use crate::delegate::{NotificationDelegate, PresentationResponder, ResponseCompletion};
use crate::event::{ForegroundPresentation, Notification, NotificationResponse, OpaqueEvent};

/// Weak handle to the delegate that was installed before the proxy
#[derive(Default)]
pub struct DelegateChain {
    previous: Mutex<Option<Weak<dyn NotificationDelegate>>>,
}

impl DelegateChain {
    /// Create a chain with no previous delegate
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a weak reference to `delegate`, overwriting any prior value.
    ///
    /// The chain never extends the delegate's lifetime: forwards degrade to
    /// synthesized completions once the host drops it.
    pub fn set_previous(&self, delegate: &Arc<dyn NotificationDelegate>) {
        *self.previous.lock() = Some(Arc::downgrade(delegate));
    }

    /// Live previous delegate, if one is set and still alive
    pub fn previous(&self) -> Option<Arc<dyn NotificationDelegate>> {
        self.previous.lock().as_ref().and_then(Weak::upgrade)
    }

    /// Forward a foreground presentation request.
    ///
    /// `ack` resolves once the previous delegate finishes, or immediately
    /// when there is nothing to forward to. The value it resolves with is an
    /// ordering signal only; the proxy answers the OS from its own policy.
    /// Returns whether the previous delegate was actually invoked.
    pub fn forward_will_present(
        &self,
        notification: &Notification,
        ack: PresentationResponder,
    ) -> bool {
        match self.previous() {
            Some(prev) if prev.handles_foreground_presentation() => {
                debug!(
                    identifier = %notification.identifier,
                    "forwarding will_present to previous delegate"
                );
                prev.will_present(notification, ack);
                true
            }
            _ => {
                debug!("no previous delegate for will_present, synthesizing completion");
                ack.resolve(ForegroundPresentation::default());
                false
            }
        }
    }

    /// Forward a user interaction response.
    ///
    /// `completion` resolves when the previous delegate signals done, or
    /// immediately when nothing is forwarded. Returns whether the previous
    /// delegate was actually invoked.
    pub fn forward_response(
        &self,
        response: &NotificationResponse,
        completion: ResponseCompletion,
    ) -> bool {
        match self.previous() {
            Some(prev) if prev.handles_response() => {
                debug!(
                    action = %response.action_identifier,
                    "forwarding response to previous delegate"
                );
                prev.did_receive_response(response, completion);
                true
            }
            _ => {
                debug!("no previous delegate for response, synthesizing completion");
                completion.resolve(());
                false
            }
        }
    }

    /// Forward any other delegate callback, fire-and-forget.
    ///
    /// Returns whether the previous delegate was actually invoked.
    pub fn forward_opaque(&self, event: &OpaqueEvent) -> bool {
        match self.previous() {
            Some(prev) if prev.handles_opaque_events() => {
                debug!(name = %event.name, "forwarding opaque event to previous delegate");
                prev.on_opaque_event(event);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;

    #[derive(Default)]
    struct CountingDelegate {
        presentations: AtomicUsize,
        responses: AtomicUsize,
        opaque: AtomicUsize,
    }

    impl NotificationDelegate for CountingDelegate {
        fn handles_foreground_presentation(&self) -> bool {
            true
        }

        fn will_present(&self, _notification: &Notification, responder: PresentationResponder) {
            self.presentations.fetch_add(1, Ordering::SeqCst);
            responder.resolve(ForegroundPresentation::Show);
        }

        fn handles_response(&self) -> bool {
            true
        }

        fn did_receive_response(
            &self,
            _response: &NotificationResponse,
            completion: ResponseCompletion,
        ) {
            self.responses.fetch_add(1, Ordering::SeqCst);
            completion.resolve(());
        }

        fn handles_opaque_events(&self) -> bool {
            true
        }

        fn on_opaque_event(&self, _event: &OpaqueEvent) {
            self.opaque.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Supports user interaction responses only
    #[derive(Default)]
    struct ResponseOnlyDelegate {
        presentations: AtomicUsize,
    }

    impl NotificationDelegate for ResponseOnlyDelegate {
        fn will_present(&self, _notification: &Notification, responder: PresentationResponder) {
            // Must never run: the capability check reports absence
            self.presentations.fetch_add(1, Ordering::SeqCst);
            responder.resolve(ForegroundPresentation::Show);
        }

        fn handles_response(&self) -> bool {
            true
        }

        fn did_receive_response(
            &self,
            _response: &NotificationResponse,
            completion: ResponseCompletion,
        ) {
            completion.resolve(());
        }
    }

    fn ack_channel() -> (PresentationResponder, mpsc::Receiver<ForegroundPresentation>) {
        let (tx, rx) = mpsc::channel();
        (
            PresentationResponder::new(move |decision| tx.send(decision).unwrap()),
            rx,
        )
    }

    #[test]
    fn test_no_previous_delegate_synthesizes_completion() {
        let chain = DelegateChain::new();
        let (ack, rx) = ack_channel();

        let forwarded = chain.forward_will_present(&Notification::new("n1"), ack);

        assert!(!forwarded);
        assert_eq!(rx.try_recv().unwrap(), ForegroundPresentation::Suppress);
    }

    #[test]
    fn test_forward_invokes_previous_delegate() {
        let chain = DelegateChain::new();
        let counting = Arc::new(CountingDelegate::default());
        let previous: Arc<dyn NotificationDelegate> = counting.clone();
        chain.set_previous(&previous);

        let (ack, rx) = ack_channel();
        let forwarded = chain.forward_will_present(&Notification::new("n1"), ack);

        assert!(forwarded);
        assert_eq!(counting.presentations.load(Ordering::SeqCst), 1);
        // The delegate's own choice flows through the ack unchanged
        assert_eq!(rx.try_recv().unwrap(), ForegroundPresentation::Show);
    }

    #[test]
    fn test_missing_capability_skips_previous_delegate() {
        let chain = DelegateChain::new();
        let response_only = Arc::new(ResponseOnlyDelegate::default());
        let previous: Arc<dyn NotificationDelegate> = response_only.clone();
        chain.set_previous(&previous);

        let (ack, rx) = ack_channel();
        let forwarded = chain.forward_will_present(&Notification::new("n1"), ack);

        assert!(!forwarded);
        assert_eq!(response_only.presentations.load(Ordering::SeqCst), 0);
        assert_eq!(rx.try_recv().unwrap(), ForegroundPresentation::Suppress);
    }

    #[test]
    fn test_dropped_delegate_degrades_to_synthesis() {
        let chain = DelegateChain::new();
        {
            let previous: Arc<dyn NotificationDelegate> = Arc::new(CountingDelegate::default());
            chain.set_previous(&previous);
            // Weak semantics: the chain must not keep this alive
        }

        assert!(chain.previous().is_none());

        let (tx, rx) = mpsc::channel();
        let forwarded = chain.forward_response(
            &NotificationResponse::tapped(Notification::new("n1")),
            ResponseCompletion::new(move |()| tx.send(()).unwrap()),
        );

        assert!(!forwarded);
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_set_previous_overwrites() {
        let chain = DelegateChain::new();
        let first = Arc::new(CountingDelegate::default());
        let second = Arc::new(CountingDelegate::default());
        let first_dyn: Arc<dyn NotificationDelegate> = first.clone();
        let second_dyn: Arc<dyn NotificationDelegate> = second.clone();

        chain.set_previous(&first_dyn);
        chain.set_previous(&second_dyn);

        chain.forward_opaque(&OpaqueEvent {
            name: "settings_opened".to_string(),
            payload: serde_json::Value::Null,
        });

        assert_eq!(first.opaque.load(Ordering::SeqCst), 0);
        assert_eq!(second.opaque.load(Ordering::SeqCst), 1);
    }
}
