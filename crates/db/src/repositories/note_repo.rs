//! Repository for the `notes` table.
//!
//! Read paths LEFT JOIN the optional category so listings carry the
//! denormalized category name/color in one round trip. As with
//! categories, every query is pre-scoped to the owning user.

use sqlx::PgPool;
use takenotes_core::types::DbId;

use crate::models::note::{CreateNote, Note, UpdateNote};

/// Joined column list for notes queries (`n` = notes, `c` = categories).
const COLUMNS: &str = "n.id, n.user_id, n.category_id, \
    c.name AS category_name, c.color AS category_color, \
    n.title, n.content, n.created_at, n.updated_at";

/// Provides CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Create a note for the given user, returning the created row joined
    /// to its category.
    ///
    /// `category_id` is the already-resolved category (explicit or
    /// defaulted by the caller); a nonexistent id surfaces as a
    /// foreign-key violation.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateNote,
        category_id: Option<DbId>,
    ) -> Result<Note, sqlx::Error> {
        let query = format!(
            "WITH ins AS (
                INSERT INTO notes (user_id, category_id, title, content)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT {} FROM ins n
             LEFT JOIN categories c ON c.id = n.category_id",
            COLUMNS
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .bind(category_id)
            .bind(input.title.as_deref().unwrap_or(""))
            .bind(input.content.as_deref().unwrap_or(""))
            .fetch_one(pool)
            .await
    }

    /// List the user's notes, most recently updated first, optionally
    /// filtered to a single category.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        category_id: Option<DbId>,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes n
             LEFT JOIN categories c ON c.id = n.category_id
             WHERE n.user_id = $1 AND ($2::uuid IS NULL OR n.category_id = $2)
             ORDER BY n.updated_at DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Find one of the user's notes by id.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes n
             LEFT JOIN categories c ON c.id = n.category_id
             WHERE n.user_id = $1 AND n.id = $2"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update one of the user's notes, returning the updated
    /// row or `None` if the id is not theirs.
    ///
    /// The category is tri-state: [`UpdateNote::category`] absent keeps
    /// the current link, explicit null clears it, an id sets it.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let set_category = input.category.is_some();
        let category_id = input.category.flatten();
        let query = format!(
            "WITH upd AS (
                UPDATE notes SET
                    title = COALESCE($3, title),
                    content = COALESCE($4, content),
                    category_id = CASE WHEN $5 THEN $6 ELSE category_id END
                WHERE user_id = $1 AND id = $2
                RETURNING *
             )
             SELECT {} FROM upd n
             LEFT JOIN categories c ON c.id = n.category_id",
            COLUMNS
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(set_category)
            .bind(category_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete one of the user's notes.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
