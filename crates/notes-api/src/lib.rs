//! notes-api library: note CRUD over a pluggable document store.
//!
//! The binary in `main.rs` wires configuration, logging and the server;
//! everything reachable from a request lives here so integration tests can
//! drive the router directly.

pub mod config;
pub mod error;
pub mod guard;
pub mod model;
pub mod routes;
pub mod service;
pub mod store;

pub use config::{Config, StoreConfig};
pub use error::ApiError;
pub use guard::{AccessGuard, Authorized};
pub use model::{CreateNote, Note, NoteUpdate, TagInput, TagQuery};
pub use routes::router;
pub use service::{NoteService, Operation, ServiceError};
pub use store::{JsonFileStore, MemoryStore, NoteStore, StoreError};

/// Shared application state
pub struct AppState {
    pub guard: AccessGuard,
    pub notes: NoteService,
}
