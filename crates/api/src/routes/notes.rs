//! Route definitions for the note resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Note routes mounted at `/notes`. All require authentication.
///
/// ```text
/// GET    /        -> list_notes (?category=<id>)
/// POST   /        -> create_note
/// GET    /{id}    -> get_note
/// PATCH  /{id}    -> update_note
/// PUT    /{id}    -> update_note
/// DELETE /{id}    -> delete_note
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notes::list_notes).post(notes::create_note))
        .route(
            "/{id}",
            get(notes::get_note)
                .patch(notes::update_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
}
