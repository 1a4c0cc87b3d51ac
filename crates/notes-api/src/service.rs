//! Note operations on top of a [`NoteStore`].
//!
//! Input is validated here before it can reach the store, so every stored note
//! has a non-empty title. Every store failure is flattened into
//! [`ServiceError::Internal`], keeping the store's own error type out of the
//! HTTP layer.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::model::{CreateNote, Note, NoteFilter, NoteUpdate, TagQuery, ValidationError};
use crate::store::{NoteStore, StoreError};

/// The service call that failed, used as the error message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    GetAll,
    GetOne,
    Update,
    Delete,
    GetByTag,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "Create",
            Operation::GetAll => "Get all",
            Operation::GetOne => "Get one",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
            Operation::GetByTag => "Get by tag",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    #[error("{operation} error: {cause}")]
    Internal { operation: Operation, cause: String },
}

impl ServiceError {
    fn internal(operation: Operation) -> impl FnOnce(StoreError) -> ServiceError {
        move |err| {
            tracing::error!("{} failed: {}", operation, err);
            ServiceError::Internal {
                operation,
                cause: err.to_string(),
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Stateless facade over the note store. Cheap to clone.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// Store a new note. Tags are normalized; absent tags become `[]`.
    pub async fn create(&self, request: CreateNote) -> Result<Note> {
        let note = request.validate()?;

        let created = self
            .store
            .create(note)
            .await
            .map_err(ServiceError::internal(Operation::Create))?;
        tracing::info!("Created note {}", created.id);
        Ok(created)
    }

    pub async fn list_all(&self) -> Result<Vec<Note>> {
        self.store
            .find_all()
            .await
            .map_err(ServiceError::internal(Operation::GetAll))
    }

    /// `Ok(None)` when no note has this id.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Note>> {
        self.store
            .find_by_id(id)
            .await
            .map_err(ServiceError::internal(Operation::GetOne))
    }

    /// Apply a partial update, returning the note after the change.
    pub async fn update_by_id(&self, id: &str, update: NoteUpdate) -> Result<Option<Note>> {
        let changes = update.validate()?;
        let updated = self
            .store
            .update_by_id(id, changes)
            .await
            .map_err(ServiceError::internal(Operation::Update))?;

        match &updated {
            Some(note) => tracing::info!("Updated note {}", note.id),
            None => tracing::debug!("Update skipped, no note {}", id),
        }
        Ok(updated)
    }

    /// Permanently remove a note, returning the removed note.
    pub async fn delete_by_id(&self, id: &str) -> Result<Option<Note>> {
        let removed = self
            .store
            .delete_by_id(id)
            .await
            .map_err(ServiceError::internal(Operation::Delete))?;

        match &removed {
            Some(note) => tracing::info!("Deleted note {}", note.id),
            None => tracing::debug!("Delete skipped, no note {}", id),
        }
        Ok(removed)
    }

    /// Notes carrying any of the queried tags.
    pub async fn find_by_tag(&self, query: impl Into<TagQuery>) -> Result<Vec<Note>> {
        let filter = NoteFilter::AnyTag(query.into().into_tags());
        self.store
            .find_by_filter(&filter)
            .await
            .map_err(ServiceError::internal(Operation::GetByTag))
    }
}
