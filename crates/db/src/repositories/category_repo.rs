//! Repository for the `categories` table.
//!
//! Every query here is pre-scoped to the owning user: "not yours" and
//! "does not exist" are structurally the same empty result.

use sqlx::{PgExecutor, PgPool};
use takenotes_core::categories::DEFAULT_CATEGORY_COLOR;
use takenotes_core::types::DbId;

use crate::models::category::{Category, CategoryWithCount, CreateCategory, UpdateCategory};

/// Column list for categories queries (aliased as `c`).
const COLUMNS: &str = "c.id, c.user_id, c.name, c.color, c.created_at, c.updated_at";

/// Subquery counting the owner's own notes in a category. Other users'
/// notes referencing the category never count.
const NOTE_COUNT: &str = "(SELECT COUNT(*) FROM notes n
     WHERE n.category_id = c.id AND n.user_id = c.user_id) AS note_count";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Create a category for the given user, returning the created row.
    /// Takes any Postgres executor; registration calls it on the same
    /// transaction that created the user.
    ///
    /// A duplicate (user, name) pair surfaces as a unique violation on
    /// `uq_categories_user_name`; callers decide whether to report it
    /// (normal creation) or swallow it (registration seeding).
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        input: &CreateCategory,
    ) -> Result<CategoryWithCount, sqlx::Error> {
        let color = input.color.as_deref().unwrap_or(DEFAULT_CATEGORY_COLOR);
        let query = format!(
            "WITH c AS (
                INSERT INTO categories (user_id, name, color)
                VALUES ($1, $2, $3)
                RETURNING *
             )
             SELECT {COLUMNS}, {NOTE_COUNT} FROM c"
        );
        sqlx::query_as::<_, CategoryWithCount>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(color)
            .fetch_one(executor)
            .await
    }

    /// List the user's categories ordered by name, each with the count of
    /// the user's own notes in it.
    pub async fn list_with_counts(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CategoryWithCount>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, {NOTE_COUNT} FROM categories c
             WHERE c.user_id = $1
             ORDER BY c.name"
        );
        sqlx::query_as::<_, CategoryWithCount>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find one of the user's categories by id, with note count.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<CategoryWithCount>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, {NOTE_COUNT} FROM categories c
             WHERE c.user_id = $1 AND c.id = $2"
        );
        sqlx::query_as::<_, CategoryWithCount>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the user's category with the given name, compared
    /// case-insensitively. Used to resolve the default note category.
    pub async fn find_by_name_ci(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories c
             WHERE c.user_id = $1 AND lower(c.name) = lower($2)
             LIMIT 1"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Partially update one of the user's categories, returning the
    /// updated row or `None` if the id is not theirs. A name change that
    /// collides with an existing name re-trips the unique constraint.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<CategoryWithCount>, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                UPDATE categories SET
                    name = COALESCE($3, name),
                    color = COALESCE($4, color)
                WHERE user_id = $1 AND id = $2
                RETURNING *
             )
             SELECT {COLUMNS}, {NOTE_COUNT} FROM c"
        );
        sqlx::query_as::<_, CategoryWithCount>(&query)
            .bind(user_id)
            .bind(id)
            .bind(&input.name)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete one of the user's categories. Notes referencing it keep
    /// existing with their category reference cleared (FK SET NULL).
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
