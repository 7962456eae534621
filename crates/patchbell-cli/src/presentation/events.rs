//! Event emitter that writes notifier events to the log.

use patchbell_core::{NotifierEvent, NotifierEventEmitter};
use tracing::info;

/// Logs every notifier event at info level with its JSON payload.
#[derive(Debug, Clone, Default)]
pub struct LogEmitter;

impl NotifierEventEmitter for LogEmitter {
    fn emit(&self, event: NotifierEvent) {
        let payload = serde_json::to_string(&event).unwrap_or_default();
        info!(event = event.name(), payload = %payload, "Notifier event");
    }
}
