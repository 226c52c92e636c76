//! Process-wide proxy registration
//!
//! Exactly one proxy per process: created lazily on first access and
//! installed as the notification center's delegate, capturing whatever
//! delegate was there before so its callbacks keep flowing.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::delegate::NotificationCenter;
use crate::proxy::NotificationDelegateProxy;

static SHARED: OnceCell<Arc<NotificationDelegateProxy>> = OnceCell::new();

/// The process-wide proxy, created on first access.
///
/// Registering through this module keeps the single-instance rule; hosts
/// that inject their own proxy construct `NotificationDelegateProxy::new`
/// directly and skip this accessor.
pub fn shared_proxy() -> Arc<NotificationDelegateProxy> {
    SHARED
        .get_or_init(|| Arc::new(NotificationDelegateProxy::new()))
        .clone()
}

/// Capture the center's current delegate into the proxy's chain, then
/// install the shared proxy as the center's delegate.
///
/// Safe to call more than once: when the installed delegate is already the
/// proxy the capture is skipped, so re-registration cannot chain the proxy
/// to itself.
pub fn register_as_delegate(center: &dyn NotificationCenter) {
    let proxy = shared_proxy();

    if let Some(previous) = center.delegate() {
        let is_self = Arc::as_ptr(&previous) as *const () == Arc::as_ptr(&proxy) as *const ();
        if is_self {
            warn!("proxy is already the center's delegate, skipping self-capture");
        } else {
            info!("capturing previously installed delegate");
            proxy.chain().set_previous(&previous);
        }
    }

    center.set_delegate(proxy);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegate::{NotificationDelegate, ResponseCompletion};
    use crate::event::{Notification, NotificationResponse};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingCenter {
        delegate: Mutex<Option<Arc<dyn NotificationDelegate>>>,
        installs: AtomicUsize,
    }

    impl NotificationCenter for RecordingCenter {
        fn delegate(&self) -> Option<Arc<dyn NotificationDelegate>> {
            self.delegate.lock().clone()
        }

        fn set_delegate(&self, delegate: Arc<dyn NotificationDelegate>) {
            self.installs.fetch_add(1, Ordering::SeqCst);
            *self.delegate.lock() = Some(delegate);
        }
    }

    struct HostDelegate;

    impl NotificationDelegate for HostDelegate {
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

    #[test]
    fn test_shared_proxy_is_a_singleton() {
        let a = shared_proxy();
        let b = shared_proxy();
        assert!(Arc::ptr_eq(&a, &b));
    }

    // Single test for the registration sequence: the shared proxy is
    // process-wide state, so ordering across multiple tests would be flaky.
    #[test]
    fn test_registration_captures_previous_then_tolerates_repeats() {
        let center = RecordingCenter::default();
        let host: Arc<dyn NotificationDelegate> = Arc::new(HostDelegate);
        center.set_delegate(host.clone());

        register_as_delegate(&center);

        let proxy = shared_proxy();
        let installed = center.delegate().expect("proxy must be installed");
        assert!(
            Arc::as_ptr(&installed) as *const () == Arc::as_ptr(&proxy) as *const (),
            "the shared proxy must be the center's delegate"
        );
        let captured = proxy.chain().previous().expect("host delegate captured");
        assert!(
            Arc::as_ptr(&captured) as *const () == Arc::as_ptr(&host) as *const (),
            "the chain must point at the host delegate"
        );

        // Second registration re-captures the installed delegate, which is
        // now the proxy itself; the self-capture must be skipped.
        register_as_delegate(&center);

        let captured = proxy.chain().previous().expect("capture must survive");
        assert!(
            Arc::as_ptr(&captured) as *const () == Arc::as_ptr(&host) as *const (),
            "re-registration must not chain the proxy to itself"
        );
        assert_eq!(center.installs.load(Ordering::SeqCst), 3);

        // The captured delegate still receives forwarded callbacks
        let (tx, rx) = std::sync::mpsc::channel();
        proxy.did_receive_response(
            &NotificationResponse::tapped(Notification::new("n1")),
            ResponseCompletion::new(move |()| tx.send(()).unwrap()),
        );
        assert!(rx.try_recv().is_ok());
    }
}
