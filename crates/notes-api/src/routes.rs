//! HTTP routes for the notes API.
//!
//! Every handler takes [`Authorized`] first, so the API key check runs
//! before any other extractor and before the store is touched.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use axum_extra::extract::Query;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::guard::Authorized;
use crate::model::{CreateNote, Note, NoteUpdate};
use crate::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/notes/add", post(create_note))
        .route("/notes/all", get(list_notes))
        .route("/notes/one/{id}", get(get_note))
        .route("/notes/update/{id}", patch(update_note))
        .route("/notes/delete/{id}", delete(delete_note))
        .route("/notes/filter", get(filter_notes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handler for `POST /notes/add`
async fn create_note(
    _: Authorized,
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateNote>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let note = state.notes.create(request).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// Handler for `GET /notes/all`
async fn list_notes(
    _: Authorized,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(state.notes.list_all().await?))
}

/// Handler for `GET /notes/one/{id}`; a miss is `null`, not 404.
async fn get_note(
    _: Authorized,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Note>>, ApiError> {
    Ok(Json(state.notes.get_by_id(&id).await?))
}

/// Handler for `PATCH /notes/update/{id}`
async fn update_note(
    _: Authorized,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<NoteUpdate>,
) -> Result<Json<Option<Note>>, ApiError> {
    Ok(Json(state.notes.update_by_id(&id, update).await?))
}

/// Handler for `DELETE /notes/delete/{id}`; responds with the removed note.
async fn delete_note(
    _: Authorized,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Note>>, ApiError> {
    Ok(Json(state.notes.delete_by_id(&id).await?))
}

/// `?tag=a&tag=b`; a single `tag` deserializes to a one-element list.
#[derive(Debug, Deserialize)]
struct FilterQuery {
    #[serde(default)]
    tag: Vec<String>,
}

/// Handler for `GET /notes/filter`
async fn filter_notes(
    _: Authorized,
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(state.notes.find_by_tag(query.tag).await?))
}
