//! Poll scheduler.
//!
//! Runs one check at startup, then one per interval, plus one whenever the
//! page becomes visible again. Checks are spawned as independent tasks so a
//! slow backend never delays the timer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::notifier::UpdateNotifier;

/// Foreground state of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Publisher side of the page visibility signal.
#[derive(Debug)]
pub struct VisibilitySignal {
    tx: watch::Sender<Visibility>,
}

impl VisibilitySignal {
    pub fn new(initial: Visibility) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Publish a visibility state. Repeating the current state is a no-op.
    pub fn set(&self, visibility: Visibility) {
        self.tx.send_if_modified(|current| {
            if *current == visibility {
                false
            } else {
                *current = visibility;
                true
            }
        });
    }

    pub fn current(&self) -> Visibility {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Visibility> {
        self.tx.subscribe()
    }
}

impl Default for VisibilitySignal {
    fn default() -> Self {
        Self::new(Visibility::Visible)
    }
}

/// Handle to a running scheduler.
#[derive(Debug)]
pub struct SchedulerHandle {
    cancel_token: CancellationToken,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop scheduling further checks and wait for the loop to exit.
    ///
    /// Checks already in flight run to completion.
    pub async fn stop(self) {
        self.cancel_token.cancel();
        let _ = self.task.await;
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

/// Drives [`UpdateNotifier::check_for_updates`] on a timer.
pub struct PollScheduler;

impl PollScheduler {
    /// Start the scheduler on the current runtime.
    ///
    /// The first interval tick completes immediately, which provides the
    /// startup check.
    pub fn spawn(
        notifier: Arc<UpdateNotifier>,
        mut visibility: watch::Receiver<Visibility>,
    ) -> SchedulerHandle {
        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();
        let period = notifier.config().poll_interval;

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut watching = true;

            debug!(interval = ?period, "Starting update poll scheduler");

            loop {
                tokio::select! {
                    () = token.cancelled() => {
                        debug!("Update poll scheduler cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        spawn_check(&notifier, "interval");
                    }
                    changed = visibility.changed(), if watching => {
                        if changed.is_err() {
                            // Publisher dropped; keep polling on the timer.
                            watching = false;
                            continue;
                        }
                        if *visibility.borrow_and_update() == Visibility::Visible {
                            spawn_check(&notifier, "visibility");
                        }
                    }
                }
            }
        });

        SchedulerHandle { cancel_token, task }
    }
}

fn spawn_check(notifier: &Arc<UpdateNotifier>, trigger: &'static str) {
    debug!(trigger, "Scheduling update check");
    let notifier = Arc::clone(notifier);
    tokio::spawn(async move {
        notifier.check_for_updates().await;
    });
}
