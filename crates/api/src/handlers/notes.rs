//! Handlers for the `/notes` resource.
//!
//! Scoping works exactly as for categories. The serialized form adds the
//! derived `last_edited` / `last_edited_label` fields computed in the
//! server's local timezone.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};
use takenotes_core::error::CoreError;
use takenotes_core::notes::{last_edited_label, validate_note_title, DEFAULT_NOTE_CATEGORY};
use takenotes_core::types::{DbId, Timestamp};
use takenotes_db::models::note::{CreateNote, Note, UpdateNote};
use takenotes_db::repositories::{CategoryRepo, NoteRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter / response types
// ---------------------------------------------------------------------------

/// Query parameters for listing notes. `category` is the canonical
/// filter name; `category_id` is accepted as an alias.
#[derive(Debug, Deserialize)]
pub struct NoteListParams {
    pub category: Option<DbId>,
    pub category_id: Option<DbId>,
}

/// Serialized note as returned by every note endpoint.
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub category: Option<DbId>,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Mirror of `updated_at`, kept as a separate field for display code.
    pub last_edited: Timestamp,
    /// "Today", "Yesterday", or e.g. "Jan 05", relative to the server's
    /// current local date.
    pub last_edited_label: String,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        let now = Local::now();
        let label = last_edited_label(&note.updated_at.with_timezone(&Local), &now);
        NoteResponse {
            id: note.id,
            title: note.title,
            content: note.content,
            category: note.category_id,
            category_name: note.category_name,
            category_color: note.category_color,
            created_at: note.created_at,
            updated_at: note.updated_at,
            last_edited: note.updated_at,
            last_edited_label: label,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/notes?category=<id>
///
/// List the caller's notes, most recently updated first. The optional
/// category filter is applied as-is; the notes themselves are already
/// scoped to the caller, so a foreign category id simply matches nothing
/// of theirs.
pub async fn list_notes(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NoteListParams>,
) -> AppResult<impl IntoResponse> {
    let category_id = params.category.or(params.category_id);
    let notes = NoteRepo::list(&state.pool, auth.user_id, category_id).await?;
    let body: Vec<NoteResponse> = notes.into_iter().map(NoteResponse::from).collect();
    Ok(Json(body))
}

/// POST /api/v1/notes
///
/// Create a note. An explicit `category` always wins; when omitted or
/// null, the note defaults into the caller's "Random Thoughts" category
/// if one exists, otherwise it is created uncategorized.
pub async fn create_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateNote>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = input.title.as_mut() {
        *title = title.trim().to_string();
        validate_note_title(title).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let category_id = match input.category {
        Some(id) => Some(id),
        None => CategoryRepo::find_by_name_ci(&state.pool, auth.user_id, DEFAULT_NOTE_CATEGORY)
            .await?
            .map(|c| c.id),
    };

    let note = NoteRepo::create(&state.pool, auth.user_id, &input, category_id).await?;

    tracing::info!(user_id = %auth.user_id, note_id = %note.id, "Note created");

    Ok((StatusCode::CREATED, Json(NoteResponse::from(note))))
}

/// GET /api/v1/notes/{id}
pub async fn get_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let note = NoteRepo::find_by_id(&state.pool, auth.user_id, id)
        .await?
        .ok_or_else(|| note_not_found(id))?;
    Ok(Json(NoteResponse::from(note)))
}

/// PATCH/PUT /api/v1/notes/{id}
///
/// Partial update; the `category` field is tri-state (absent = keep,
/// null = clear, id = set).
pub async fn update_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateNote>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = input.title.as_mut() {
        *title = title.trim().to_string();
        validate_note_title(title).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let note = NoteRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or_else(|| note_not_found(id))?;

    Ok(Json(NoteResponse::from(note)))
}

/// DELETE /api/v1/notes/{id}
pub async fn delete_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = NoteRepo::delete(&state.pool, auth.user_id, id).await?;
    if !deleted {
        return Err(note_not_found(id));
    }

    tracing::info!(user_id = %auth.user_id, note_id = %id, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn note_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Note", id })
}
