//! Category model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use takenotes_core::types::{DbId, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: DbId,
    pub name: String,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category row joined with the owner's note count, as returned by
/// listings. `note_count` only counts notes belonging to the category's
/// owner, never other users' notes that happen to reference it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryWithCount {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: DbId,
    pub name: String,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub note_count: i64,
}

/// DTO for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub color: Option<String>,
}

/// DTO for partially updating a category.
#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub color: Option<String>,
}
