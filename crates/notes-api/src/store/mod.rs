//! Document store abstraction for notes.
//!
//! Implementations:
//! - `MemoryStore` - process-local collection, used in tests and ephemeral runs
//! - `JsonFileStore` - collection persisted as a JSON document on disk

mod collection;
mod file;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{NewNote, Note, NoteChanges, NoteFilter};

pub use collection::NoteCollection;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid note id: {0}")]
    InvalidId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Repository-style access to the note collection.
///
/// Lookups by id return `Ok(None)` when no note matches; only malformed ids
/// and backend failures are errors.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert a note, assigning its id and timestamps
    async fn create(&self, note: NewNote) -> Result<Note>;

    /// All notes in insertion order
    async fn find_all(&self) -> Result<Vec<Note>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Note>>;

    /// Apply a partial update and return the note as stored afterwards
    async fn update_by_id(&self, id: &str, changes: NoteChanges) -> Result<Option<Note>>;

    /// Remove a note and return what was removed
    async fn delete_by_id(&self, id: &str) -> Result<Option<Note>>;

    async fn find_by_filter(&self, filter: &NoteFilter) -> Result<Vec<Note>>;
}
