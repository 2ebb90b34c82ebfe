pub mod auth;
pub mod categories;
pub mod health;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register          register (public)
/// /auth/token             obtain token pair (public)
/// /auth/token/refresh     refresh access token (public)
///
/// /categories             list, create
/// /categories/{id}        get, update (PATCH/PUT), delete
///
/// /notes                  list (?category=<id>), create
/// /notes/{id}             get, update (PATCH/PUT), delete
/// ```
///
/// Everything outside `/auth` requires a Bearer access token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", categories::router())
        .nest("/notes", notes::router())
}
