//! Note model.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use takenotes_core::types::{DbId, Timestamp};

/// A row from the `notes` table joined to its optional category, as used
/// by every read path. `category_name` / `category_color` are denormalized
/// for display and are `None` when the note has no category.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Note {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: DbId,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a note. All fields are optional: an empty note in the
/// caller's default category is a valid creation.
#[derive(Debug, Default, Deserialize)]
pub struct CreateNote {
    pub title: Option<String>,
    pub content: Option<String>,
    /// Explicit category id. When absent or null the store falls back to
    /// the owner's "Random Thoughts" category, if one exists.
    pub category: Option<DbId>,
}

/// DTO for partially updating a note.
///
/// `category` is tri-state: field absent keeps the current category,
/// explicit `null` clears it, an id sets it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNote {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_explicit_null")]
    pub category: Option<Option<DbId>>,
}

/// Deserialize a field so that JSON `null` becomes `Some(None)` while a
/// missing field (via `#[serde(default)]`) stays `None`.
fn deserialize_explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<DbId>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}
