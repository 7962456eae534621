//! Update notifier - orchestrates checks, rendering, dismissal and updates.
//!
//! The notifier is constructed explicitly from its ports and owns all the
//! in-memory state a page session needs. Scheduling lives in
//! [`super::scheduler`]; this type only performs single operations.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::NotifierConfig;
use crate::dismissal::DismissalStore;
use crate::domain::{
    NOTIFICATION_ELEMENT_ID, NotificationPhase, NotificationView, STYLESHEET_MARKER_ID,
    UpdateControl, UpdateInfo, compare_versions,
};
use crate::error::CoreError;
use crate::events::NotifierEvent;
use crate::ports::{
    KeyValueStore, NotificationSurface, NotifierEventEmitter, PageLifecycle, StorageError,
    UpdateApiPort, UserPrompt,
};
use crate::render::NOTIFICATION_STYLESHEET;

const CONFIRM_MESSAGE: &str = "The application will be updated and reloaded. Continue?";
const SUCCESS_MESSAGE: &str = "Update installed successfully. The application will now reload.";
const TRANSPORT_FAILURE_MESSAGE: &str = "Update failed: could not reach the update service.";

/// Ports the notifier is wired to.
#[derive(Clone)]
pub struct NotifierDeps {
    pub api: Arc<dyn UpdateApiPort>,
    pub storage: Arc<dyn KeyValueStore>,
    pub surface: Arc<dyn NotificationSurface>,
    pub prompt: Arc<dyn UserPrompt>,
    pub page: Arc<dyn PageLifecycle>,
    pub events: Arc<dyn NotifierEventEmitter>,
}

/// Result of a single update check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The backend could not be reached or answered garbage.
    Failed,
    /// Nothing to announce.
    NoUpdate,
    /// An update exists but the user dismissed it earlier.
    AlreadyDismissed { version: String },
    /// A notification for this version was rendered.
    Shown { version: String },
}

/// Result of an "update now" request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The privilege flag is not set.
    NotPermitted,
    /// The user declined the confirmation.
    Declined,
    /// The backend applied the update and the page was reloaded.
    Applied,
    /// The apply call failed; the control was re-enabled.
    Failed { reason: String },
}

/// Point-in-time view of the notifier's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifierStatus {
    pub last_checked_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub candidate_version: Option<String>,
    pub phase: NotificationPhase,
    pub view_present: bool,
}

#[derive(Debug)]
struct NotifierState {
    candidate: Option<UpdateInfo>,
    phase: NotificationPhase,
    /// Bumped on every render so stale delayed actions can tell they lost.
    generation: u64,
    last_checked_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

/// The update notifier controller.
pub struct UpdateNotifier {
    api: Arc<dyn UpdateApiPort>,
    dismissals: DismissalStore,
    surface: Arc<dyn NotificationSurface>,
    prompt: Arc<dyn UserPrompt>,
    page: Arc<dyn PageLifecycle>,
    events: Arc<dyn NotifierEventEmitter>,
    config: NotifierConfig,
    state: Mutex<NotifierState>,
}

impl UpdateNotifier {
    /// Build a notifier, loading the dismissed-version set from storage.
    pub fn new(deps: NotifierDeps, config: NotifierConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let dismissals = DismissalStore::load(deps.storage, config.storage_key.clone());

        Ok(Self {
            api: deps.api,
            dismissals,
            surface: deps.surface,
            prompt: deps.prompt,
            page: deps.page,
            events: deps.events,
            config,
            state: Mutex::new(NotifierState {
                candidate: None,
                phase: NotificationPhase::Unseen,
                generation: 0,
                last_checked_at: None,
                last_error: None,
            }),
        })
    }

    pub const fn config(&self) -> &NotifierConfig {
        &self.config
    }

    pub const fn dismissals(&self) -> &DismissalStore {
        &self.dismissals
    }

    /// Ask the backend for an update and render it if eligible.
    ///
    /// Failures are logged and reported as [`CheckOutcome::Failed`]; they
    /// never disturb a notification that is already on screen.
    pub async fn check_for_updates(&self) -> CheckOutcome {
        let response = match self.api.check_update().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Update check failed");
                self.lock().last_error = Some(e.to_string());
                self.events.emit(NotifierEvent::CheckFailed {
                    error: e.to_string(),
                });
                return CheckOutcome::Failed;
            }
        };

        {
            let mut state = self.lock();
            state.last_checked_at = Some(Utc::now());
            state.last_error = None;
        }

        if !response.success {
            debug!(error = ?response.error, "Backend reported an unsuccessful check");
        }
        let Some(info) = response.into_update_info() else {
            debug!("No update available");
            return CheckOutcome::NoUpdate;
        };

        if self.dismissals.is_dismissed(&info.latest_version) {
            debug!(version = %info.latest_version, "Update was dismissed by the user");
            return CheckOutcome::AlreadyDismissed {
                version: info.latest_version,
            };
        }

        if compare_versions(&info.current_version, &info.latest_version) != Ordering::Less {
            warn!(
                current = %info.current_version,
                latest = %info.latest_version,
                "Backend announced an update that is not newer than the current version"
            );
        }

        let version = info.latest_version.clone();
        self.show_notification(&info).await;
        CheckOutcome::Shown { version }
    }

    /// Render the notification for `info`, replacing any existing one.
    ///
    /// The view is inserted hidden and made visible after `show_delay`,
    /// unless another render or a dismissal happened in between.
    pub async fn show_notification(&self, info: &UpdateInfo) {
        let view = NotificationView::build(info, self.config.is_admin);
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.candidate = Some(info.clone());
            state.phase = NotificationPhase::Shown;
            state.generation
        };

        self.surface.remove(NOTIFICATION_ELEMENT_ID);
        self.surface.insert_at_top(&view);
        self.ensure_stylesheet();
        info!(version = %info.latest_version, "Showing update notification");
        self.events
            .emit(NotifierEvent::notification_shown(&info.latest_version));

        tokio::time::sleep(self.config.show_delay).await;

        let still_current = {
            let state = self.lock();
            state.generation == generation && state.phase == NotificationPhase::Shown
        };
        if still_current {
            self.surface.set_visible(NOTIFICATION_ELEMENT_ID, true);
        }
    }

    fn ensure_stylesheet(&self) {
        if !self.surface.has_stylesheet(STYLESHEET_MARKER_ID) {
            self.surface
                .inject_stylesheet(STYLESHEET_MARKER_ID, NOTIFICATION_STYLESHEET);
        }
    }

    /// Dismiss `version`: remember it and take the notification down.
    ///
    /// The view is hidden at once and removed after `hide_delay`. A storage
    /// failure is returned after the view has been handled; the version stays
    /// dismissed for this session either way.
    pub async fn dismiss(&self, version: &str) -> Result<(), StorageError> {
        let persisted = self.dismissals.dismiss(version);
        if let Err(e) = &persisted {
            warn!(version = %version, error = %e, "Failed to persist dismissed version");
        }

        let generation = {
            let mut state = self.lock();
            if state
                .candidate
                .as_ref()
                .is_some_and(|c| c.latest_version == version)
            {
                state.phase = NotificationPhase::Dismissed;
            }
            state.generation
        };

        info!(version = %version, "Update notification dismissed");
        self.events
            .emit(NotifierEvent::notification_dismissed(version));
        self.surface.set_visible(NOTIFICATION_ELEMENT_ID, false);

        tokio::time::sleep(self.config.hide_delay).await;

        if self.lock().generation == generation {
            self.surface.remove(NOTIFICATION_ELEMENT_ID);
        }
        persisted.map(|_| ())
    }

    /// Dismiss whatever version is currently shown.
    ///
    /// Returns the dismissed version, or `None` if nothing is shown.
    pub async fn dismiss_current(&self) -> Result<Option<String>, StorageError> {
        let version = {
            let state = self.lock();
            match state.phase {
                NotificationPhase::Shown => state.candidate.as_ref().map(|c| c.latest_version.clone()),
                _ => None,
            }
        };
        match version {
            Some(version) => {
                self.dismiss(&version).await?;
                Ok(Some(version))
            }
            None => Ok(None),
        }
    }

    /// Apply the update after asking the user.
    ///
    /// A single attempt is made. On success the page reloads after
    /// `reload_delay`; on failure the control is re-enabled and the user is
    /// told why.
    pub async fn update_now(&self) -> UpdateOutcome {
        if !self.config.is_admin {
            warn!("Update requested without update privileges");
            return UpdateOutcome::NotPermitted;
        }
        if !self.prompt.confirm(CONFIRM_MESSAGE).await {
            debug!("Update cancelled by the user");
            return UpdateOutcome::Declined;
        }

        self.surface
            .set_update_control(NOTIFICATION_ELEMENT_ID, UpdateControl::busy());
        self.events.emit(NotifierEvent::UpdateStarted);

        let reason = match self.api.apply_update().await {
            Ok(response) if response.success => {
                self.lock().phase = NotificationPhase::UpdateTriggered;
                info!(message = ?response.message, "Update applied, reloading");
                self.events.emit(NotifierEvent::UpdateApplied {
                    message: response.message.clone(),
                });
                self.prompt.alert(SUCCESS_MESSAGE).await;
                tokio::time::sleep(self.config.reload_delay).await;
                self.page.reload();
                return UpdateOutcome::Applied;
            }
            Ok(response) => {
                let reason = response.failure_reason();
                warn!(reason = %reason, "Backend refused to apply the update");
                self.prompt
                    .alert(&format!("Update failed: {reason}"))
                    .await;
                reason
            }
            Err(e) => {
                error!(error = %e, "Update request failed");
                self.prompt.alert(TRANSPORT_FAILURE_MESSAGE).await;
                e.to_string()
            }
        };

        self.surface.set_update_control(
            NOTIFICATION_ELEMENT_ID,
            UpdateControl::idle(self.config.is_admin),
        );
        self.events.emit(NotifierEvent::UpdateFailed {
            reason: reason.clone(),
        });
        UpdateOutcome::Failed { reason }
    }

    pub fn status(&self) -> NotifierStatus {
        let state = self.lock();
        NotifierStatus {
            last_checked_at: state.last_checked_at,
            last_error: state.last_error.clone(),
            candidate_version: state.candidate.as_ref().map(|c| c.latest_version.clone()),
            phase: state.phase,
            view_present: self.surface.contains(NOTIFICATION_ELEMENT_ID),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NotifierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
