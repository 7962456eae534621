//! Test backend serving the update endpoints on an ephemeral port.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use tokio::net::TcpListener;

/// A canned reply: status code and raw body.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    pub fn json(status: StatusCode, value: &serde_json::Value) -> Self {
        Self {
            status,
            body: value.to_string(),
        }
    }

    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct BackendState {
    check: Mutex<Reply>,
    apply: Mutex<Reply>,
    pub check_hits: AtomicUsize,
    pub apply_hits: AtomicUsize,
}

impl BackendState {
    pub fn set_check(&self, reply: Reply) {
        *self.check.lock().unwrap() = reply;
    }

    pub fn check_hits(&self) -> usize {
        self.check_hits.load(Ordering::SeqCst)
    }

    pub fn apply_hits(&self) -> usize {
        self.apply_hits.load(Ordering::SeqCst)
    }
}

fn respond(reply: Reply) -> impl IntoResponse {
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
}

async fn check_update(State(state): State<Arc<BackendState>>) -> impl IntoResponse {
    state.check_hits.fetch_add(1, Ordering::SeqCst);
    let reply = state.check.lock().unwrap().clone();
    respond(reply)
}

async fn apply_update(State(state): State<Arc<BackendState>>) -> impl IntoResponse {
    state.apply_hits.fetch_add(1, Ordering::SeqCst);
    let reply = state.apply.lock().unwrap().clone();
    respond(reply)
}

/// Start a backend and return its base URL.
pub async fn spawn_backend(check: Reply, apply: Reply) -> (String, Arc<BackendState>) {
    let state = Arc::new(BackendState {
        check: Mutex::new(check),
        apply: Mutex::new(apply),
        check_hits: AtomicUsize::new(0),
        apply_hits: AtomicUsize::new(0),
    });

    let app = Router::new()
        .route("/api/check-update", get(check_update))
        .route("/api/update-application", post(apply_update))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), state)
}

/// A base URL nothing is listening on.
pub async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
