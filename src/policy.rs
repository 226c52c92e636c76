//! Foreground presentation policy

use std::sync::atomic::{AtomicBool, Ordering};

use crate::event::ForegroundPresentation;

/// Whether notifications arriving while the application is active should be
/// displayed.
///
/// Defaults to off: do not interrupt the user while the app is open unless
/// the host explicitly opts in. The flag has no cross-field invariant, so a
/// relaxed atomic is enough.
#[derive(Debug, Default)]
pub struct ForegroundPolicy {
    show: AtomicBool,
}

impl ForegroundPolicy {
    /// Create a policy with foreground display disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Current opt-in state
    pub fn should_present_in_foreground(&self) -> bool {
        self.show.load(Ordering::Relaxed)
    }

    /// Opt in to or out of foreground display
    pub fn set_show_foreground(&self, show: bool) {
        self.show.store(show, Ordering::Relaxed);
    }

    /// Presentation decision for a notification arriving in the foreground
    pub fn decision(&self) -> ForegroundPresentation {
        if self.should_present_in_foreground() {
            ForegroundPresentation::Show
        } else {
            ForegroundPresentation::Suppress
        }
    }
}
