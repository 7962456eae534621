//! Contract tests for the HTTP update client against a live axum backend.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use patchbell_core::testing::{CountingPage, MemoryStore, StaticPrompt};
use patchbell_core::{
    ApiError, CheckOutcome, NOTIFICATION_ELEMENT_ID, NoopEmitter, NotificationSurface,
    NotifierConfig, NotifierDeps, PageDocument, UpdateApiPort, UpdateNotifier, UpdateOutcome,
};
use patchbell_http::{DefaultUpdateClient, UpdateClientConfig};
use serde_json::json;

use common::{Reply, dead_base_url, spawn_backend};

fn client(base_url: &str) -> DefaultUpdateClient {
    DefaultUpdateClient::new(&UpdateClientConfig::new().with_base_url(base_url)).unwrap()
}

fn update_available() -> Reply {
    Reply::json(
        StatusCode::OK,
        &json!({
            "success": true,
            "update_available": true,
            "current_version": "1.4.0",
            "github_version": "1.5.0",
            "changelog": "## 1.5.0\n- **Faster** startup\n- Fixed *rare* crash"
        }),
    )
}

fn apply_ok() -> Reply {
    Reply::json(
        StatusCode::OK,
        &json!({"success": true, "message": "Updated to 1.5.0"}),
    )
}

#[tokio::test]
async fn check_update_decodes_response() {
    let (base_url, backend) = spawn_backend(update_available(), apply_ok()).await;

    let response = client(&base_url).check_update().await.unwrap();

    assert!(response.success);
    assert!(response.update_available);
    assert_eq!(response.current_version, "1.4.0");
    assert_eq!(response.latest_version.as_deref(), Some("1.5.0"));
    assert_eq!(backend.check_hits(), 1);
}

#[tokio::test]
async fn apply_error_status_with_json_body_is_a_response() {
    let (base_url, backend) = spawn_backend(
        update_available(),
        Reply::json(
            StatusCode::INTERNAL_SERVER_ERROR,
            &json!({"success": false, "error": "git pull failed"}),
        ),
    )
    .await;

    let response = client(&base_url).apply_update().await.unwrap();

    assert!(!response.success);
    assert_eq!(response.failure_reason(), "git pull failed");
    assert_eq!(backend.apply_hits(), 1);
}

#[tokio::test]
async fn error_status_without_json_is_a_status_error() {
    let (base_url, _backend) = spawn_backend(
        Reply::text(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>"),
        apply_ok(),
    )
    .await;

    let err = client(&base_url).check_update().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 502, .. }));
}

#[tokio::test]
async fn malformed_success_body_is_invalid_response() {
    let (base_url, _backend) =
        spawn_backend(Reply::text(StatusCode::OK, "not json"), apply_ok()).await;

    let err = client(&base_url).check_update().await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse { .. }));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let base_url = dead_base_url().await;

    let err = client(&base_url).check_update().await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }));
}

#[tokio::test]
async fn notifier_shows_and_applies_update_end_to_end() {
    let (base_url, backend) = spawn_backend(update_available(), apply_ok()).await;

    let document = Arc::new(PageDocument::new("Dashboard"));
    let page = Arc::new(CountingPage::new());
    let prompt = Arc::new(StaticPrompt::answering(true));
    let deps = NotifierDeps {
        api: Arc::new(client(&base_url)),
        storage: Arc::new(MemoryStore::new()),
        surface: document.clone(),
        prompt: prompt.clone(),
        page: page.clone(),
        events: Arc::new(NoopEmitter::new()),
    };
    let config = NotifierConfig::new()
        .with_admin(true)
        .with_delays(Duration::ZERO, Duration::ZERO, Duration::ZERO);
    let notifier = UpdateNotifier::new(deps, config).unwrap();

    assert_eq!(
        notifier.check_for_updates().await,
        CheckOutcome::Shown {
            version: "1.5.0".to_string()
        }
    );
    let element = document.element(NOTIFICATION_ELEMENT_ID).unwrap();
    assert!(element.visible);
    assert!(element.html.contains("<li><strong>Faster</strong> startup</li>"));
    assert!(element.html.contains("<em>rare</em>"));

    assert_eq!(notifier.update_now().await, UpdateOutcome::Applied);
    assert_eq!(backend.apply_hits(), 1);
    assert_eq!(page.reloads(), 1);
    assert_eq!(prompt.confirms().len(), 1);
}

#[tokio::test]
async fn dismissed_update_is_not_shown_again() {
    let (base_url, backend) = spawn_backend(update_available(), apply_ok()).await;
    let storage = Arc::new(MemoryStore::new());

    let build = |document: Arc<PageDocument>| {
        let deps = NotifierDeps {
            api: Arc::new(client(&base_url)),
            storage: storage.clone(),
            surface: document,
            prompt: Arc::new(StaticPrompt::answering(false)),
            page: Arc::new(CountingPage::new()),
            events: Arc::new(NoopEmitter::new()),
        };
        let config =
            NotifierConfig::new().with_delays(Duration::ZERO, Duration::ZERO, Duration::ZERO);
        UpdateNotifier::new(deps, config).unwrap()
    };

    let first_page = Arc::new(PageDocument::new("Dashboard"));
    let notifier = build(first_page.clone());
    notifier.check_for_updates().await;
    notifier.dismiss("1.5.0").await.unwrap();
    assert!(!first_page.contains(NOTIFICATION_ELEMENT_ID));

    let second_page = Arc::new(PageDocument::new("Dashboard"));
    let reloaded = build(second_page.clone());
    assert!(matches!(
        reloaded.check_for_updates().await,
        CheckOutcome::AlreadyDismissed { .. }
    ));
    assert_eq!(second_page.count(NOTIFICATION_ELEMENT_ID), 0);
    assert_eq!(backend.check_hits(), 2);
}

#[tokio::test]
async fn backend_change_between_checks_replaces_view() {
    let (base_url, backend) = spawn_backend(update_available(), apply_ok()).await;
    let document = Arc::new(PageDocument::new("Dashboard"));
    let deps = NotifierDeps {
        api: Arc::new(client(&base_url)),
        storage: Arc::new(MemoryStore::new()),
        surface: document.clone(),
        prompt: Arc::new(StaticPrompt::answering(false)),
        page: Arc::new(CountingPage::new()),
        events: Arc::new(NoopEmitter::new()),
    };
    let notifier = UpdateNotifier::new(
        deps,
        NotifierConfig::new().with_delays(Duration::ZERO, Duration::ZERO, Duration::ZERO),
    )
    .unwrap();

    notifier.check_for_updates().await;
    backend.set_check(Reply::json(
        StatusCode::OK,
        &json!({
            "success": true,
            "update_available": true,
            "current_version": "1.4.0",
            "github_version": "1.6.0"
        }),
    ));
    notifier.check_for_updates().await;

    assert_eq!(document.count(NOTIFICATION_ELEMENT_ID), 1);
    let html = document.element(NOTIFICATION_ELEMENT_ID).unwrap().html;
    assert!(html.contains("Update 1.6.0 available"));
    assert!(!html.contains("update-changelog"));
}
