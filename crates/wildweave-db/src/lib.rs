//! Data layer for Wildweave (`PostgreSQL`).
//!
//! `PostgreSQL` holds the authored narrative data the description pipeline
//! reads (regions, region profiles, region hints), the hint usage log it
//! writes, and the harvest snapshot that survives restarts.
//!
//! # Architecture
//!
//! ```text
//! DescriptionPipeline (sync)
//!     |
//!     +-- HintSource / RegionIndex --> PgRegionStore (blocking adapter)
//!         |-- HintStore     (hints, profiles, usage log)
//!         |-- RegionStore   (containment, neighbours, fixture import)
//!         +-- HarvestStore  (harvest snapshot)
//! ```
//!
//! # Modules
//!
//! - [`postgres`] -- `PostgreSQL` connection pool and configuration
//! - [`hint_store`] -- Hint, profile and usage-log queries
//! - [`region_store`] -- Region lookups and fixture import
//! - [`harvest_store`] -- Harvest snapshot persistence
//! - [`blocking`] -- Synchronous trait adapter for the pipeline
//! - [`error`] -- Shared error types

pub mod blocking;
pub mod error;
pub mod harvest_store;
pub mod hint_store;
pub mod postgres;
pub mod region_store;

// Re-export primary types for convenience.
pub use blocking::PgRegionStore;
pub use error::DbError;
pub use harvest_store::{HarvestRow, HarvestStore};
pub use hint_store::{HintRow, HintStore, ProfileRow};
pub use postgres::{PostgresConfig, PostgresPool};
pub use region_store::{ImportSummary, NeighborRow, RegionRow, RegionStore};
