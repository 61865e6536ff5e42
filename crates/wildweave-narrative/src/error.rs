//! Error types for the `wildweave-narrative` crate.
//!
//! Hint and region lookups go through [`HintSource`](crate::HintSource) and
//! [`RegionIndex`](crate::RegionIndex) implementations that may be backed by
//! a database. Their failures are reported as [`SourceError`] and absorbed
//! at the stage boundary: the loader logs them and degrades to "no hints".

/// Errors returned by hint sources and region indexes.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// No backing store is connected.
    #[error("hint source unavailable: {0}")]
    Unavailable(String),

    /// The backing store rejected or failed a query.
    #[error("hint query failed: {0}")]
    Query(String),

    /// The query did not finish in time.
    #[error("hint query timed out after {0} ms")]
    Timeout(u64),

    /// A stored row could not be decoded.
    #[error("invalid stored row {id}: {reason}")]
    InvalidRow {
        /// Identifier of the offending row.
        id: i64,
        /// What was wrong with it.
        reason: String,
    },
}
