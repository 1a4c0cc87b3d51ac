//! Lock-free note collection shared by the store backends.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Result, StoreError};
use crate::model::{NewNote, Note, NoteChanges, NoteFilter};

/// Ordered set of notes. Callers provide synchronization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteCollection {
    notes: Vec<Note>,
}

impl NoteCollection {
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn insert(&mut self, new: NewNote) -> Note {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            content: new.content,
            tags: new.tags,
            created_at: now,
            updated_at: now,
        };
        self.notes.push(note.clone());
        note
    }

    pub fn all(&self) -> Vec<Note> {
        self.notes.clone()
    }

    pub fn get(&self, id: &str) -> Result<Option<Note>> {
        let id = parse_id(id)?;
        Ok(self.notes.iter().find(|note| note.id == id).cloned())
    }

    pub fn update(&mut self, id: &str, changes: &NoteChanges) -> Result<Option<Note>> {
        let id = parse_id(id)?;
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            return Ok(None);
        };
        changes.apply(note, Utc::now());
        Ok(Some(note.clone()))
    }

    pub fn remove(&mut self, id: &str) -> Result<Option<Note>> {
        let id = parse_id(id)?;
        Ok(self
            .notes
            .iter()
            .position(|note| note.id == id)
            .map(|index| self.notes.remove(index)))
    }

    pub fn filter(&self, filter: &NoteFilter) -> Vec<Note> {
        self.notes
            .iter()
            .filter(|note| filter.matches(note))
            .cloned()
            .collect()
    }
}

/// Canonical (lowercase, hyphenated) form of a note id.
fn parse_id(id: &str) -> Result<String> {
    Uuid::parse_str(id)
        .map(|uuid| uuid.to_string())
        .map_err(|_| StoreError::InvalidId(id.to_string()))
}
