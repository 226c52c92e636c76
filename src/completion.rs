//! Single-fulfillment completion continuations
//!
//! The OS notification pipeline hands out completion callbacks that must be
//! invoked exactly once per delegate callback. `Completion` enforces
//! at-most-once by move semantics and at-least-once by synthesizing the
//! default value on drop, so a misbehaving delegate can never stall the OS.

use tracing::debug;

/// A continuation that is resolved exactly once.
///
/// `resolve` consumes the completion, so a second signal is a compile error
/// rather than a runtime hazard. Dropping an unresolved completion resolves
/// it with `T::default()`.
pub struct Completion<T: Default + Send + 'static> {
    notify: Option<Box<dyn FnOnce(T) + Send>>,
}

impl<T: Default + Send + 'static> Completion<T> {
    /// Create a completion backed by the given continuation
    pub fn new(notify: impl FnOnce(T) + Send + 'static) -> Self {
        Self {
            notify: Some(Box::new(notify)),
        }
    }

    /// Resolve with `value`, consuming the completion
    pub fn resolve(mut self, value: T) {
        if let Some(notify) = self.notify.take() {
            notify(value);
        }
    }
}

impl<T: Default + Send + 'static> Drop for Completion<T> {
    fn drop(&mut self) {
        if let Some(notify) = self.notify.take() {
            debug!("completion dropped unresolved, synthesizing default");
            notify(T::default());
        }
    }
}
