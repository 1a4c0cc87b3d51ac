//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use notes_api::model::{NewNote, NoteChanges, NoteFilter};
use notes_api::store::Result;
use notes_api::{AccessGuard, AppState, MemoryStore, Note, NoteService, NoteStore, StoreError};
use serde_json::Value;
use tower::ServiceExt;

pub const HEADER: &str = "x-api-header";
pub const SECRET: &str = "test-secret";

/// Memory store that counts every call made to it.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl NoteStore for CountingStore {
    async fn create(&self, note: NewNote) -> Result<Note> {
        self.hit();
        self.inner.create(note).await
    }

    async fn find_all(&self) -> Result<Vec<Note>> {
        self.hit();
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Note>> {
        self.hit();
        self.inner.find_by_id(id).await
    }

    async fn update_by_id(&self, id: &str, changes: NoteChanges) -> Result<Option<Note>> {
        self.hit();
        self.inner.update_by_id(id, changes).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Note>> {
        self.hit();
        self.inner.delete_by_id(id).await
    }

    async fn find_by_filter(&self, filter: &NoteFilter) -> Result<Vec<Note>> {
        self.hit();
        self.inner.find_by_filter(filter).await
    }
}

/// Store that fails every call, simulating a lost database connection.
pub struct FailingStore;

fn outage() -> StoreError {
    StoreError::Unavailable("database connection lost".to_string())
}

#[async_trait]
impl NoteStore for FailingStore {
    async fn create(&self, _: NewNote) -> Result<Note> {
        Err(outage())
    }

    async fn find_all(&self) -> Result<Vec<Note>> {
        Err(outage())
    }

    async fn find_by_id(&self, _: &str) -> Result<Option<Note>> {
        Err(outage())
    }

    async fn update_by_id(&self, _: &str, _: NoteChanges) -> Result<Option<Note>> {
        Err(outage())
    }

    async fn delete_by_id(&self, _: &str) -> Result<Option<Note>> {
        Err(outage())
    }

    async fn find_by_filter(&self, _: &NoteFilter) -> Result<Vec<Note>> {
        Err(outage())
    }
}

/// Router backed by the given store, guarded by [`HEADER`]/[`SECRET`].
pub fn app(store: Arc<dyn NoteStore>) -> Router {
    let state = Arc::new(AppState {
        guard: AccessGuard::new(HEADER, SECRET).unwrap(),
        notes: NoteService::new(store),
    });
    notes_api::router(state)
}

/// Build a request, optionally with an API key and JSON body.
pub fn request(method: Method, uri: &str, key: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        builder = builder.header(HEADER, key);
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Request carrying the correct API key.
pub fn authed(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    request(method, uri, Some(SECRET), body)
}

/// Send one request and decode the JSON response body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}
