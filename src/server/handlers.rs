use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::error::HttpError;
use super::AppState;
use crate::entity::{Note, NoteCreate, NotePatch};

pub async fn list_notes(State(state): State<AppState>) -> Json<Vec<Note>> {
    let notes = state.store.list();
    debug!(count = notes.len(), "listed notes");
    Json(notes)
}

pub async fn create_note(
    State(state): State<AppState>,
    Json(fields): Json<NoteCreate>,
) -> Result<Json<Note>, HttpError> {
    fields.validate()?;
    let note = state.store.create(fields);
    info!(id = %note.id, "note created");
    Ok(Json(note))
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, HttpError> {
    state
        .store
        .get(&id)
        .map(Json)
        .ok_or(HttpError::NotFound { id })
}

pub async fn patch_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<NotePatch>,
) -> Result<Json<Note>, HttpError> {
    let note = state.store.update(&id, &patch)?;
    debug!(id = %note.id, "note patched");
    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    if state.store.delete(&id) {
        info!(id = %id, "note deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(HttpError::NotFound { id })
    }
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "notes": state.store.len() }))
}
