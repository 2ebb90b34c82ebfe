//! Route definitions for registration and token endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Auth routes mounted at `/auth`. All are public.
///
/// ```text
/// POST /register        -> register
/// POST /token           -> obtain_token
/// POST /token/refresh   -> refresh_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/token", post(auth::obtain_token))
        .route("/token/refresh", post(auth::refresh_token))
}
