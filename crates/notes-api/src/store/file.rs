//! JSON file backed note store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::Rng;
use tokio::fs;
use tokio::sync::RwLock;

use super::{NoteCollection, NoteStore, Result};
use crate::model::{NewNote, Note, NoteChanges, NoteFilter};

/// Keeps the collection in memory and rewrites the whole document after
/// every mutation.
///
/// A mutation is applied to a copy of the collection, persisted, and only
/// then swapped in, so a failed write leaves the visible state unchanged.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    notes: RwLock<NoteCollection>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading any notes already saved there.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let notes = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let notes: NoteCollection = serde_json::from_str(&content)?;
            tracing::info!("Loaded {} notes from {:?}", notes.len(), path);
            notes
        } else {
            tracing::info!("No note file at {:?}, starting empty", path);
            NoteCollection::default()
        };

        Ok(Self {
            path,
            notes: RwLock::new(notes),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, notes: &NoteCollection) -> Result<()> {
        let content = serde_json::to_string_pretty(notes)?;
        atomic_write(&self.path, &content).await?;
        tracing::debug!("Persisted {} notes to {:?}", notes.len(), self.path);
        Ok(())
    }
}

/// Random hex suffix for temp file names.
fn random_hex() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex::encode(bytes)
}

/// Write via temp file + rename so readers never see a partial document.
async fn atomic_write(path: &Path, content: &str) -> std::io::Result<()> {
    let temp_path = path.with_extension(format!("{}.tmp", random_hex()));

    if let Err(e) = fs::write(&temp_path, content).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }

    Ok(())
}

#[async_trait]
impl NoteStore for JsonFileStore {
    async fn create(&self, note: NewNote) -> Result<Note> {
        let mut current = self.notes.write().await;
        let mut next = current.clone();
        let created = next.insert(note);
        self.persist(&next).await?;
        *current = next;
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<Note>> {
        Ok(self.notes.read().await.all())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Note>> {
        self.notes.read().await.get(id)
    }

    async fn update_by_id(&self, id: &str, changes: NoteChanges) -> Result<Option<Note>> {
        let mut current = self.notes.write().await;
        let mut next = current.clone();
        let Some(updated) = next.update(id, &changes)? else {
            return Ok(None);
        };
        self.persist(&next).await?;
        *current = next;
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Note>> {
        let mut current = self.notes.write().await;
        let mut next = current.clone();
        let Some(removed) = next.remove(id)? else {
            return Ok(None);
        };
        self.persist(&next).await?;
        *current = next;
        Ok(Some(removed))
    }

    async fn find_by_filter(&self, filter: &NoteFilter) -> Result<Vec<Note>> {
        Ok(self.notes.read().await.filter(filter))
    }
}
