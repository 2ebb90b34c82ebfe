//! Persistence layer for the takenotes backend.
//!
//! Exposes a Postgres connection pool, the migrations runner, `models/`
//! (row structs + Create/Update DTOs) and `repositories/` (stateless CRUD
//! over those rows). All queries in repositories that touch user-owned
//! data take the owner's id and scope on it; callers never filter
//! ownership after the fact.

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Convenience alias used throughout the workspace.
pub type DbPool = PgPool;

/// Create a connection pool for the given database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Verify the database is reachable with a trivial round-trip query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Whether a sqlx error is a unique-constraint violation on the named
/// constraint. Used to translate anticipated conflicts (duplicate
/// category name, duplicate username) into validation errors instead of
/// letting them surface as 500s.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}

/// Whether a sqlx error is a foreign-key violation (Postgres 23503),
/// e.g. a note created against a category id that does not exist.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23503"),
        _ => false,
    }
}
