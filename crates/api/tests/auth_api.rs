//! HTTP-level integration tests for registration and token endpoints.
//!
//! Covers registration (default category seeding, duplicate usernames,
//! weak passwords), token obtain (uniform failure), and refresh.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, register_user};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registering yields the new identity, a token pair, and exactly the
/// three default categories with their fixed colors.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_seeds_default_categories(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (json, access) = register_user(app, "new@example.com").await;

    assert!(json["id"].is_string(), "response must contain the user id");
    assert_eq!(json["username"], "new@example.com");
    assert!(json["tokens"]["refresh"].is_string());

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/categories", &access).await;
    assert_eq!(response.status(), StatusCode::OK);

    let categories = body_json(response).await;
    let listed: Vec<(&str, &str)> = categories
        .as_array()
        .unwrap()
        .iter()
        .map(|c| (c["name"].as_str().unwrap(), c["color"].as_str().unwrap()))
        .collect();
    // Listing is ordered by name.
    assert_eq!(
        listed,
        [
            ("Personal", "#F59E0B"),
            ("Random Thoughts", "#A78BFA"),
            ("School", "#60A5FA"),
        ]
    );
}

/// Usernames are trimmed of surrounding whitespace before any checks.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_trims_username(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "  padded  ", "password": "pass1234" });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["username"], "padded");
}

/// A duplicate username is rejected case-insensitively, with the error
/// attached to the `username` field.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_username(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    register_user(app, "Taken").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "taken", "password": "pass1234" });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(
        json["fields"]["username"].is_array(),
        "error must name the username field, got: {json}"
    );
}

/// Passwords shorter than 6 characters are rejected with field detail.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_weak_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "weak", "password": "12345" });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["password"].is_array());
}

/// An empty (or whitespace-only) username is rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_empty_username(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "   ", "password": "pass1234" });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"]["username"].is_array());
}

// ---------------------------------------------------------------------------
// Token obtain
// ---------------------------------------------------------------------------

/// Valid credentials return an access + refresh pair.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_obtain_token_success(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    register_user(app, "logger").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "logger", "password": "pass1234" });
    let response = post_json(app, "/api/v1/auth/token", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access"].is_string());
    assert!(json["refresh"].is_string());
}

/// Wrong password and nonexistent username produce identical responses.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_obtain_token_uniform_failure(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    register_user(app, "victim").await;

    let app = common::build_test_app(pool.clone());
    let wrong_pw = post_json(
        app,
        "/api/v1/auth/token",
        serde_json::json!({ "username": "victim", "password": "not-it" }),
    )
    .await;

    let app = common::build_test_app(pool);
    let no_user = post_json(
        app,
        "/api/v1/auth/token",
        serde_json::json!({ "username": "ghost", "password": "whatever" }),
    )
    .await;

    assert_eq!(wrong_pw.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(no_user.status(), StatusCode::UNAUTHORIZED);

    let wrong_pw_json = body_json(wrong_pw).await;
    let no_user_json = body_json(no_user).await;
    assert_eq!(
        wrong_pw_json, no_user_json,
        "failure responses must not distinguish unknown users"
    );
}

/// A deactivated account fails token obtain like any bad credential.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_obtain_token_inactive_account(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (json, _) = register_user(app, "dormant").await;
    let user_id: uuid::Uuid = json["id"].as_str().unwrap().parse().unwrap();

    takenotes_db::repositories::UserRepo::deactivate(&pool, user_id)
        .await
        .expect("deactivation should succeed");

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "dormant", "password": "pass1234" });
    let response = post_json(app, "/api/v1/auth/token", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Refresh
// ---------------------------------------------------------------------------

/// A valid refresh token mints a new access token that works.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_returns_usable_access_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (json, _) = register_user(app, "refresher").await;
    let refresh = json["tokens"]["refresh"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/token/refresh",
        serde_json::json!({ "refresh": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let access = body_json(response).await["access"]
        .as_str()
        .unwrap()
        .to_string();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notes", &access).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// An access token is not accepted where a refresh token is required.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rejects_access_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, access) = register_user(app, "sneaky").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/token/refresh",
        serde_json::json!({ "refresh": access }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Garbage refresh tokens are rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rejects_malformed_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/token/refresh",
        serde_json::json!({ "refresh": "not-a-jwt" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Refresh fails once the account is deactivated.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rejects_deactivated_account(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (json, _) = register_user(app, "gone").await;
    let refresh = json["tokens"]["refresh"].as_str().unwrap();
    let user_id: uuid::Uuid = json["id"].as_str().unwrap().parse().unwrap();

    takenotes_db::repositories::UserRepo::deactivate(&pool, user_id)
        .await
        .expect("deactivation should succeed");

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/token/refresh",
        serde_json::json!({ "refresh": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Bearer enforcement
// ---------------------------------------------------------------------------

/// Protected routes reject missing and malformed tokens uniformly.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_protected_routes_require_bearer_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = common::get(app, "/api/v1/categories").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notes", "garbage-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
