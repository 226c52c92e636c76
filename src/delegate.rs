//! Delegate and notification-center seams
//!
//! `NotificationDelegate` is the capability surface the OS invokes. A
//! previously installed delegate may implement any subset of it, and each
//! capability carries an explicit presence check so the proxy never has to
//! guess whether a callback is actually handled.

use std::sync::Arc;

use crate::completion::Completion;
use crate::event::{ForegroundPresentation, Notification, NotificationResponse, OpaqueEvent};

/// Continuation for a foreground presentation decision
pub type PresentationResponder = Completion<ForegroundPresentation>;

/// Continuation acknowledging a handled response callback
pub type ResponseCompletion = Completion<()>;

/// Receiver of OS notification lifecycle callbacks.
///
/// Every capability defaults to "not implemented": the presence check
/// returns false and the callback resolves its continuation immediately.
/// Implementors override both halves of each capability they support and
/// must resolve the continuation exactly once (dropping it resolves with
/// the default, so the pipeline cannot stall either way).
pub trait NotificationDelegate: Send + Sync {
    /// Whether `will_present` is implemented
    fn handles_foreground_presentation(&self) -> bool {
        false
    }

    /// A notification arrived while the application was foregrounded
    fn will_present(&self, _notification: &Notification, responder: PresentationResponder) {
        responder.resolve(ForegroundPresentation::default());
    }

    /// Whether `did_receive_response` is implemented
    fn handles_response(&self) -> bool {
        false
    }

    /// The user acted on a notification
    fn did_receive_response(
        &self,
        _response: &NotificationResponse,
        completion: ResponseCompletion,
    ) {
        completion.resolve(());
    }

    /// Whether `on_opaque_event` is implemented
    fn handles_opaque_events(&self) -> bool {
        false
    }

    /// Any other delegate callback, forwarded verbatim with no completion
    fn on_opaque_event(&self, _event: &OpaqueEvent) {}
}

/// Registration surface of the OS notification center.
///
/// The real center lives outside this crate; hosts and tests provide an
/// implementation that tracks which single delegate is installed.
pub trait NotificationCenter: Send + Sync {
    /// Currently installed delegate, if any
    fn delegate(&self) -> Option<Arc<dyn NotificationDelegate>>;

    /// Install `delegate`, replacing any previous one
    fn set_delegate(&self, delegate: Arc<dyn NotificationDelegate>);
}
