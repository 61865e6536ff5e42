//! Failures of a single `wildweave-engine` invocation.

/// Anything that stops a command from completing.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// `wildweave.yaml` could not be loaded.
    #[error("config: {source}")]
    Config {
        /// Cause.
        #[from]
        source: wildweave_core::ConfigError,
    },

    /// The requested hour is out of range.
    #[error("game clock: {source}")]
    Clock {
        /// Cause.
        #[from]
        source: wildweave_core::ClockError,
    },

    /// Harvesting or harvest restore was rejected.
    #[error("resources: {source}")]
    World {
        /// Cause.
        #[from]
        source: wildweave_world::WorldError,
    },

    /// The region database failed.
    #[error("region database: {source}")]
    Db {
        /// Cause.
        #[from]
        source: wildweave_db::DbError,
    },

    /// The hint fixture file could not be read.
    #[error("fixture read error: {source}")]
    FixtureIo {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The hint fixture file is not valid JSON.
    #[error("fixture parse error: {source}")]
    FixtureJson {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// A command-line argument was rejected.
    #[error("usage error: {message}")]
    Usage {
        /// Description of the problem.
        message: String,
    },
}
