//! In-memory note store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::{NoteCollection, NoteStore, Result, StoreError};
use crate::model::{NewNote, Note, NoteChanges, NoteFilter};

/// Notes held in process memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: RwLock<NoteCollection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, NoteCollection>> {
        self.notes
            .read()
            .map_err(|_| StoreError::Unavailable("note collection lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, NoteCollection>> {
        self.notes
            .write()
            .map_err(|_| StoreError::Unavailable("note collection lock poisoned".to_string()))
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create(&self, note: NewNote) -> Result<Note> {
        Ok(self.write()?.insert(note))
    }

    async fn find_all(&self) -> Result<Vec<Note>> {
        Ok(self.read()?.all())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Note>> {
        self.read()?.get(id)
    }

    async fn update_by_id(&self, id: &str, changes: NoteChanges) -> Result<Option<Note>> {
        self.write()?.update(id, &changes)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Note>> {
        self.write()?.remove(id)
    }

    async fn find_by_filter(&self, filter: &NoteFilter) -> Result<Vec<Note>> {
        Ok(self.read()?.filter(filter))
    }
}
