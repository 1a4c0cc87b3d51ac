//! Note entity, request payloads and tag normalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Store-assigned identifier (UUID v4, hyphenated)
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rejected request payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,
    #[error("title must not be empty")]
    EmptyTitle,
}

/// Tags as sent by a client: either one space-separated string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TagInput {
    Raw(String),
    List(Vec<String>),
}

impl TagInput {
    /// Normalize into stored form: trimmed, no blank entries, order kept.
    pub fn normalize(self) -> Vec<String> {
        match self {
            TagInput::Raw(raw) => split_tags(&raw),
            TagInput::List(list) => list
                .iter()
                .map(|tag| tag.trim())
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl From<&str> for TagInput {
    fn from(raw: &str) -> Self {
        TagInput::Raw(raw.to_string())
    }
}

/// Split a raw tag string on single spaces, dropping empty tokens.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(' ')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Body of `POST /notes/add`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateNote {
    /// Optional at the serde level so a missing title is reported as a
    /// validation error rather than a body rejection.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Option<TagInput>,
}

impl CreateNote {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_tags(mut self, tags: impl Into<TagInput>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Check the title and normalize tags into a note ready for the store.
    pub fn validate(self) -> Result<NewNote, ValidationError> {
        let title = match self.title {
            None => return Err(ValidationError::MissingTitle),
            Some(title) if title.trim().is_empty() => return Err(ValidationError::EmptyTitle),
            Some(title) => title,
        };

        Ok(NewNote {
            title,
            content: self.content,
            tags: self.tags.map(TagInput::normalize).unwrap_or_default(),
        })
    }
}

/// Body of `PATCH /notes/update/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoteUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// `None`: field absent. `Some(None)`: explicit `null`, clears tags.
    #[serde(default, deserialize_with = "present")]
    pub tags: Option<Option<TagInput>>,
}

impl NoteUpdate {
    /// Reject a blank title, then convert into store changes.
    pub fn validate(self) -> Result<NoteChanges, ValidationError> {
        if self.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(self.into())
    }
}

/// Distinguishes an explicit `null` from a missing field.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A note ready to be inserted, as produced by [`CreateNote::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: Option<String>,
    pub tags: Vec<String>,
}

/// A partial update as applied by a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NoteChanges {
    /// Apply the changes in place and bump `updated_at`.
    pub fn apply(&self, note: &mut Note, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(content) = &self.content {
            note.content = Some(content.clone());
        }
        if let Some(tags) = &self.tags {
            note.tags = tags.clone();
        }
        note.updated_at = now;
    }
}

impl From<NoteUpdate> for NoteChanges {
    fn from(update: NoteUpdate) -> Self {
        Self {
            title: update.title,
            content: update.content,
            tags: update
                .tags
                .map(|tags| tags.map(TagInput::normalize).unwrap_or_default()),
        }
    }
}

/// Tags to look up in a filter query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagQuery {
    One(String),
    Many(Vec<String>),
}

impl TagQuery {
    pub fn into_tags(self) -> Vec<String> {
        match self {
            TagQuery::One(tag) => vec![tag],
            TagQuery::Many(tags) => tags,
        }
    }
}

impl From<&str> for TagQuery {
    fn from(tag: &str) -> Self {
        TagQuery::One(tag.to_string())
    }
}

impl From<String> for TagQuery {
    fn from(tag: String) -> Self {
        TagQuery::One(tag)
    }
}

impl From<Vec<String>> for TagQuery {
    fn from(tags: Vec<String>) -> Self {
        TagQuery::Many(tags)
    }
}

impl From<&[&str]> for TagQuery {
    fn from(tags: &[&str]) -> Self {
        TagQuery::Many(tags.iter().map(|tag| tag.to_string()).collect())
    }
}

/// Selection criteria understood by every store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteFilter {
    /// Notes carrying at least one of the given tags
    AnyTag(Vec<String>),
}

impl NoteFilter {
    pub fn matches(&self, note: &Note) -> bool {
        match self {
            NoteFilter::AnyTag(tags) => note.tags.iter().any(|tag| tags.contains(tag)),
        }
    }
}
