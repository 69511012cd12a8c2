//! Database-layer error type.

use std::time::Duration;

use fairshare_core::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// No row matched. For versioned updates this also covers a stale
    /// version: the row exists but another writer advanced it first.
    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The statement did not finish within the configured query timeout.
    /// Safe to retry.
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl DbError {
    pub fn group_not_found(id: DbId) -> Self {
        DbError::NotFound {
            entity: "Group",
            id,
        }
    }
}
