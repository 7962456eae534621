//! In-memory port fakes for tests.
//!
//! Compiled for this crate's unit tests and, through the `test-utils`
//! feature, for downstream integration tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::{ApplyResponse, CheckResponse};
use crate::events::NotifierEvent;
use crate::ports::{
    ApiError, KeyValueStore, NotifierEventEmitter, PageLifecycle, StorageError, UpdateApiPort,
    UserPrompt,
};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Key-value store held in memory, with write counting and fault injection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every subsequent `set` fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(lock(&self.values).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                message: "storage quota exceeded".to_string(),
            });
        }
        lock(&self.values).insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Update API that replays queued results.
///
/// When a queue runs dry the last result is repeated; an empty queue yields
/// a network error.
#[derive(Debug, Default)]
pub struct ScriptedApi {
    checks: Mutex<VecDeque<Result<CheckResponse, ApiError>>>,
    last_check: Mutex<Option<Result<CheckResponse, ApiError>>>,
    applies: Mutex<VecDeque<Result<ApplyResponse, ApiError>>>,
    check_calls: AtomicUsize,
    apply_calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_check(self, result: Result<CheckResponse, ApiError>) -> Self {
        lock(&self.checks).push_back(result);
        self
    }

    #[must_use]
    pub fn with_apply(self, result: Result<ApplyResponse, ApiError>) -> Self {
        lock(&self.applies).push_back(result);
        self
    }

    /// Replace the check script at runtime.
    pub fn set_check(&self, result: Result<CheckResponse, ApiError>) {
        let mut checks = lock(&self.checks);
        checks.clear();
        checks.push_back(result);
    }

    pub fn check_calls(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }

    pub fn apply_calls(&self) -> usize {
        self.apply_calls.load(Ordering::SeqCst)
    }

    fn offline() -> ApiError {
        ApiError::Network {
            message: "connection refused".to_string(),
        }
    }
}

#[async_trait]
impl UpdateApiPort for ScriptedApi {
    async fn check_update(&self) -> Result<CheckResponse, ApiError> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        let next = lock(&self.checks).pop_front();
        let mut last = lock(&self.last_check);
        if let Some(result) = next {
            *last = Some(result);
        }
        last.clone().unwrap_or_else(|| Err(Self::offline()))
    }

    async fn apply_update(&self) -> Result<ApplyResponse, ApiError> {
        self.apply_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.applies)
            .pop_front()
            .unwrap_or_else(|| Err(Self::offline()))
    }
}

/// Prompt with a fixed answer that records everything it was asked.
#[derive(Debug)]
pub struct StaticPrompt {
    answer: bool,
    confirms: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl StaticPrompt {
    pub const fn answering(answer: bool) -> Self {
        Self {
            answer,
            confirms: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn confirms(&self) -> Vec<String> {
        lock(&self.confirms).clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        lock(&self.alerts).clone()
    }
}

#[async_trait]
impl UserPrompt for StaticPrompt {
    async fn confirm(&self, message: &str) -> bool {
        lock(&self.confirms).push(message.to_string());
        self.answer
    }

    async fn alert(&self, message: &str) {
        lock(&self.alerts).push(message.to_string());
    }
}

/// Page that counts reloads.
#[derive(Debug, Default)]
pub struct CountingPage {
    reloads: AtomicUsize,
}

impl CountingPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl PageLifecycle for CountingPage {
    fn reload(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }
}

/// Emitter that keeps every event.
#[derive(Debug, Default)]
pub struct RecordingEmitter {
    events: Mutex<Vec<NotifierEvent>>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NotifierEvent> {
        lock(&self.events).clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        lock(&self.events).iter().map(NotifierEvent::name).collect()
    }
}

impl NotifierEventEmitter for RecordingEmitter {
    fn emit(&self, event: NotifierEvent) {
        lock(&self.events).push(event);
    }
}

/// A successful check response announcing `latest`.
pub fn update_available(current: &str, latest: &str) -> CheckResponse {
    CheckResponse {
        success: true,
        update_available: true,
        current_version: current.to_string(),
        latest_version: Some(latest.to_string()),
        changelog: None,
        error: None,
    }
}

/// A successful check response with nothing new.
pub fn up_to_date(version: &str) -> CheckResponse {
    CheckResponse {
        success: true,
        update_available: false,
        current_version: version.to_string(),
        latest_version: Some(version.to_string()),
        changelog: None,
        error: None,
    }
}
