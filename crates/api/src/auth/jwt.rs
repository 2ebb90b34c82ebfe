//! JWT access- and refresh-token generation and validation.
//!
//! Both token kinds are HS256-signed JWTs carrying a [`Claims`] payload;
//! they differ only in lifetime and the `token_type` claim, which is
//! checked on every validation so a refresh token can never authorize an
//! API call and an access token can never mint new tokens. Tokens are
//! fully stateless: nothing about them is persisted server-side.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use takenotes_core::types::DbId;
use uuid::Uuid;

/// The `token_type` claim value for access tokens.
pub const TOKEN_TYPE_ACCESS: &str = "access";
/// The `token_type` claim value for refresh tokens.
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's id.
    pub sub: DbId,
    /// Either [`TOKEN_TYPE_ACCESS`] or [`TOKEN_TYPE_REFRESH`].
    pub token_type: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 15).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `7`     |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let refresh_token_expiry_days: i64 = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_DAYS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
            refresh_token_expiry_days,
        }
    }
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expiry_secs = config.access_token_expiry_mins * 60;
    generate_token(user_id, TOKEN_TYPE_ACCESS, expiry_secs, config)
}

/// Generate an HS256 refresh token for the given user.
pub fn generate_refresh_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expiry_secs = config.refresh_token_expiry_days * 24 * 60 * 60;
    generate_token(user_id, TOKEN_TYPE_REFRESH, expiry_secs, config)
}

fn generate_token(
    user_id: DbId,
    token_type: &str,
    expiry_secs: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        token_type: token_type.to_string(),
        exp: now + expiry_secs,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Errors produced when validating a token.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Signature invalid, malformed, or expired.
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
    /// Structurally valid token of the wrong kind (e.g. a refresh token
    /// presented as a bearer credential).
    #[error("Wrong token type: expected {expected}")]
    WrongType { expected: &'static str },
}

/// Validate an access token, returning the embedded [`Claims`].
pub fn validate_access_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    validate_token(token, TOKEN_TYPE_ACCESS, config)
}

/// Validate a refresh token, returning the embedded [`Claims`].
pub fn validate_refresh_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    validate_token(token, TOKEN_TYPE_REFRESH, config)
}

fn validate_token(
    token: &str,
    expected_type: &'static str,
    config: &JwtConfig,
) -> Result<Claims, TokenError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;

    if token_data.claims.token_type != expected_type {
        return Err(TokenError::WrongType {
            expected: expected_type,
        });
    }
    Ok(token_data.claims)
}
