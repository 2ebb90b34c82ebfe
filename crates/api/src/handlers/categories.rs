//! Handlers for the `/categories` resource.
//!
//! Every operation is scoped to the authenticated caller; a category id
//! owned by someone else behaves exactly like a nonexistent one.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use takenotes_core::categories::{validate_category_name, validate_color};
use takenotes_core::error::CoreError;
use takenotes_core::types::DbId;
use takenotes_db::is_unique_violation;
use takenotes_db::models::category::{CreateCategory, UpdateCategory};
use takenotes_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Message reported when the (caller, name) pair already exists.
const DUPLICATE_NAME: &str = "Category with this name already exists for this user.";

/// GET /api/v1/categories
///
/// List the caller's categories ordered by name, each carrying the count
/// of the caller's own notes in it.
pub async fn list_categories(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_with_counts(&state.pool, auth.user_id).await?;
    Ok(Json(categories))
}

/// POST /api/v1/categories
///
/// Create a category. The (caller, name) uniqueness invariant is enforced
/// by the store constraint; the violation is caught here and reported as
/// a validation error.
pub async fn create_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    // Names are stored trimmed so "Work" and " Work" are the same name.
    input.name = input.name.trim().to_string();
    validate_category_name(&input.name)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    if let Some(ref color) = input.color {
        validate_color(color).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let category = match CategoryRepo::create(&state.pool, auth.user_id, &input).await {
        Ok(category) => category,
        Err(err) if is_unique_violation(&err, "uq_categories_user_name") => {
            return Err(AppError::Core(CoreError::Validation(DUPLICATE_NAME.into())));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(user_id = %auth.user_id, category_id = %category.id, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, auth.user_id, id)
        .await?
        .ok_or_else(|| category_not_found(id))?;
    Ok(Json(category))
}

/// PATCH/PUT /api/v1/categories/{id}
///
/// Partial update. A name change that collides with an existing name
/// re-trips the unique constraint and is reported the same way as on
/// creation.
pub async fn update_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = input.name.as_mut() {
        *name = name.trim().to_string();
        validate_category_name(name)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    if let Some(ref color) = input.color {
        validate_color(color).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let updated = match CategoryRepo::update(&state.pool, auth.user_id, id, &input).await {
        Ok(updated) => updated,
        Err(err) if is_unique_violation(&err, "uq_categories_user_name") => {
            return Err(AppError::Core(CoreError::Validation(DUPLICATE_NAME.into())));
        }
        Err(err) => return Err(err.into()),
    };
    let category = updated.ok_or_else(|| category_not_found(id))?;

    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
///
/// Deletes the category; the caller's notes in it survive with their
/// category reference cleared. Returns 204.
pub async fn delete_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CategoryRepo::delete(&state.pool, auth.user_id, id).await?;
    if !deleted {
        return Err(category_not_found(id));
    }

    tracing::info!(user_id = %auth.user_id, category_id = %id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn category_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}
