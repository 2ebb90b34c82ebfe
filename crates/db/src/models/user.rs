//! User account model.

use serde::Serialize;
use sqlx::FromRow;
use takenotes_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// `password_hash` is `None` for accounts without a usable password;
/// such accounts can never authenticate with credentials.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    /// Already-hashed password (PHC string), or `None` for an account
    /// with an unusable password.
    pub password_hash: Option<String>,
    pub is_staff: bool,
    pub is_superuser: bool,
}
