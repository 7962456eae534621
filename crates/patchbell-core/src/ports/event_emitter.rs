//! Event emitter trait for notifier events.
//!
//! Implementations handle transport details (logging, channels, UI bridges).

use crate::events::NotifierEvent;

/// Trait for emitting notifier events.
///
/// # Implementations
///
/// - `NoopEmitter` - For tests and contexts that don't need events
/// - Adapter-specific implementations (log sinks, channels)
pub trait NotifierEventEmitter: Send + Sync {
    /// Emit a notifier event. Must not block.
    fn emit(&self, event: NotifierEvent);
}

/// A no-op event emitter for tests and headless contexts.
#[derive(Debug, Clone, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    /// Create a new no-op emitter.
    pub const fn new() -> Self {
        Self
    }
}

impl NotifierEventEmitter for NoopEmitter {
    fn emit(&self, _event: NotifierEvent) {
        // Intentionally do nothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_noop_emitter() {
        let emitter = NoopEmitter::new();
        emitter.emit(NotifierEvent::UpdateStarted);
    }

    #[test]
    fn test_arc_emitter() {
        let emitter: Arc<dyn NotifierEventEmitter> = Arc::new(NoopEmitter::new());
        emitter.emit(NotifierEvent::notification_shown("1.2.0"));
    }
}
