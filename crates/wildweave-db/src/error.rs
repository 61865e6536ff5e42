//! [`DbError`] covers pool, query, migration and row-decoding failures.
//! The pipeline never sees it directly: the blocking adapter folds it into
//! [`SourceError`], which the pipeline absorbs.

use wildweave_narrative::SourceError;

/// Failure inside the region database layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Query or connection failure.
    #[error("region database: {0}")]
    Postgres(#[from] sqlx::Error),

    /// Schema migration failure.
    #[error("schema migration: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The runtime driving the blocking adapter could not start.
    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),

    /// A stored row could not be decoded into a domain record.
    #[error("invalid row {id}: {reason}")]
    InvalidRow {
        /// Key of the offending row.
        id: i64,
        /// What was wrong with it.
        reason: String,
    },

    /// Unusable connection settings.
    #[error("database settings: {0}")]
    Config(String),
}

impl From<DbError> for SourceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Postgres(sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed) => {
                Self::Unavailable(err.to_string())
            }
            DbError::Runtime(_) | DbError::Config(_) => Self::Unavailable(err.to_string()),
            DbError::InvalidRow { id, reason } => Self::InvalidRow { id, reason },
            DbError::Postgres(_) | DbError::Migration(_) => Self::Query(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_exhaustion_means_unavailable() {
        let err = SourceError::from(DbError::Postgres(sqlx::Error::PoolTimedOut));
        assert!(matches!(err, SourceError::Unavailable(_)));
    }

    #[test]
    fn invalid_rows_keep_their_key() {
        let err = SourceError::from(DbError::InvalidRow {
            id: 7,
            reason: "bad category".to_owned(),
        });
        assert!(matches!(err, SourceError::InvalidRow { id: 7, .. }));
    }
}
