//! Error types for the `wildweave-world` crate.
//!
//! Sampling itself never fails (invalid input maps to a neutral value and a
//! log line); these errors surface from the harvest ledger and from
//! restoring persisted state.

use wildweave_types::Coord;

/// Errors that can occur during world-state operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A resource index does not name a resource kind.
    #[error("unknown resource index {0}")]
    UnknownResource(usize),

    /// A harvest amount was negative, NaN, or infinite.
    #[error("invalid harvest amount {amount} at ({}, {})", .at.x, .at.y)]
    InvalidHarvestAmount {
        /// The rejected amount.
        amount: f32,
        /// Where the harvest was attempted.
        at: Coord,
    },

    /// A persisted harvest record could not be restored.
    #[error("corrupt harvest record at ({}, {}): {reason}", .at.x, .at.y)]
    CorruptHarvestRecord {
        /// Coordinate of the record.
        at: Coord,
        /// What was wrong with it.
        reason: String,
    },
}
