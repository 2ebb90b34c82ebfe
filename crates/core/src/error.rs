//! Domain-level error taxonomy.
//!
//! Variants map one-to-one onto the HTTP responses produced by the api
//! crate: validation failures are always recoverable 400s, ownership
//! failures and missing rows are indistinguishable 404s, and anything
//! unexpected is a sanitized 500.

use crate::types::DbId;

/// Domain error shared by repositories and handlers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The resource does not exist, or is owned by a different user.
    /// Both cases render identically so callers cannot probe for the
    /// existence of other users' data.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed input or an invariant violation (duplicate category
    /// name, field too long, weak password).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing, malformed, or expired credentials. The message is
    /// deliberately uniform per failure class.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// An unexpected internal failure. The message is logged but never
    /// sent to the client verbatim.
    #[error("Internal error: {0}")]
    Internal(String),
}
