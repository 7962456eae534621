//! Page lifecycle for the terminal session.

use std::sync::atomic::{AtomicBool, Ordering};

use patchbell_core::PageLifecycle;
use tracing::info;

/// Records that a reload was requested.
///
/// The watch loop polls [`ReloadSignal::take`] after an update and rebuilds
/// the notifier when it is set.
#[derive(Debug, Default)]
pub struct ReloadSignal {
    requested: AtomicBool,
}

impl ReloadSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a pending reload request.
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::SeqCst)
    }
}

impl PageLifecycle for ReloadSignal {
    fn reload(&self) {
        info!("Reloading notifier session");
        self.requested.store(true, Ordering::SeqCst);
    }
}
