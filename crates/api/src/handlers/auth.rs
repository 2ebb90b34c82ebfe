//! Handlers for the `/auth` resource (registration, token obtain, refresh).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::Acquire;
use takenotes_core::categories::DEFAULT_CATEGORIES;
use takenotes_core::error::CoreError;
use takenotes_core::types::DbId;
use takenotes_db::is_unique_violation;
use takenotes_db::models::category::CreateCategory;
use takenotes_db::models::user::CreateUser;
use takenotes_db::repositories::{CategoryRepo, UserRepo};
use validator::{ValidationError, ValidationErrors};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, validate_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Maximum length of a username in characters.
const MAX_USERNAME_LENGTH: usize = 150;

/// Uniform message for every credential failure at token obtain. Never
/// reveals whether the username exists.
const BAD_CREDENTIALS: &str = "No active account found with the given credentials";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/token`.
#[derive(Debug, Deserialize)]
pub struct ObtainTokenRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/token/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Access + refresh token pair.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Response body for `POST /auth/register`.
///
/// `tokens` is omitted when token issuance failed; registration itself
/// still succeeds in that case.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: DbId,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenPair>,
}

/// Response body for `POST /auth/token/refresh`.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account, seed its default categories, and issue a token
/// pair. Token issuance is best-effort: a signing failure is logged and
/// the response simply omits `tokens`.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let username = input.username.trim();

    // 1. Field validation.
    let mut errors = ValidationErrors::new();
    if username.is_empty() {
        errors.add(
            "username".into(),
            field_error("required", "Username must not be empty"),
        );
    } else if username.chars().count() > MAX_USERNAME_LENGTH {
        errors.add(
            "username".into(),
            field_error(
                "length",
                &format!("Username must be at most {MAX_USERNAME_LENGTH} characters"),
            ),
        );
    }
    if let Err(msg) = validate_password_strength(&input.password) {
        errors.add("password".into(), field_error("length", &msg));
    }
    if !errors.is_empty() {
        return Err(errors.into());
    }

    // 2. Case-insensitive uniqueness pre-check. The lower(username)
    //    unique index remains the authoritative guard below.
    if UserRepo::username_taken(&state.pool, username).await? {
        return Err(duplicate_username_error());
    }

    // 3. Hash the password.
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // 4. Create the user and seed the default categories in a single
    //    transaction: an error on any statement rolls back the whole
    //    registration, never leaving an account without its categories.
    let mut tx = state.pool.begin().await?;

    let create = CreateUser {
        username: username.to_string(),
        password_hash: Some(password_hash),
        is_staff: false,
        is_superuser: false,
    };
    let user = match UserRepo::create(&mut *tx, &create).await {
        Ok(user) => user,
        // Lost a race with a concurrent registration of the same name.
        Err(err)
            if is_unique_violation(&err, "uq_users_username")
                || is_unique_violation(&err, "uq_users_username_lower") =>
        {
            return Err(duplicate_username_error());
        }
        Err(err) => return Err(err.into()),
    };

    // A uniqueness conflict on a seeded category cannot happen for a
    // brand-new user, but if it somehow does it must not abort
    // registration. Each seed runs under a savepoint so a swallowed
    // conflict does not poison the outer transaction.
    for (name, color) in DEFAULT_CATEGORIES {
        let seed = CreateCategory {
            name: (*name).to_string(),
            color: Some((*color).to_string()),
        };
        let mut savepoint = tx.begin().await?;
        match CategoryRepo::create(&mut *savepoint, user.id, &seed).await {
            Ok(_) => savepoint.commit().await?,
            Err(err) if is_unique_violation(&err, "uq_categories_user_name") => {
                tracing::debug!(user_id = %user.id, category = %name, "Default category already exists, skipping");
                savepoint.rollback().await?;
            }
            Err(err) => return Err(err.into()),
        }
    }

    tx.commit().await?;

    // 5. Issue tokens, best-effort.
    let tokens = issue_token_pair(&state, user.id);
    if tokens.is_none() {
        tracing::warn!(user_id = %user.id, "Token issuance failed during registration");
    }

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            username: user.username,
            tokens,
        }),
    ))
}

/// POST /api/v1/auth/token
///
/// Authenticate with username + password. Returns an access + refresh
/// token pair. All failure modes produce the same 401.
pub async fn obtain_token(
    State(state): State<AppState>,
    Json(input): Json<ObtainTokenRequest>,
) -> AppResult<Json<TokenPair>> {
    // Login lookups are exact (case-sensitive).
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(bad_credentials)?;

    let password_valid = verify_password(&input.password, user.password_hash.as_deref())
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid || !user.is_active {
        return Err(bad_credentials());
    }

    let access = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh = generate_refresh_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(TokenPair { access, refresh }))
}

/// POST /api/v1/auth/token/refresh
///
/// Exchange a valid refresh token for a new access token.
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<RefreshResponse>> {
    let claims = validate_refresh_token(&input.refresh, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    })?;

    // The account must still exist and be active.
    let user = UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let access = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(RefreshResponse { access }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate an access + refresh pair, or `None` if signing fails.
fn issue_token_pair(state: &AppState, user_id: DbId) -> Option<TokenPair> {
    let access = generate_access_token(user_id, &state.config.jwt).ok()?;
    let refresh = generate_refresh_token(user_id, &state.config.jwt).ok()?;
    Some(TokenPair { access, refresh })
}

/// Build a single field-level [`ValidationError`].
fn field_error(code: &'static str, message: &str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.to_string().into());
    err
}

/// The field-level error reported for a duplicate username.
fn duplicate_username_error() -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add(
        "username".into(),
        field_error("unique", "A user with this username already exists."),
    );
    errors.into()
}

fn bad_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(BAD_CREDENTIALS.into()))
}
