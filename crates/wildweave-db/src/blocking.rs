//! Synchronous adapter over the async stores.
//!
//! Description generation runs on the caller's thread, inside a game loop
//! that is not async. [`PgRegionStore`] owns a single-threaded Tokio
//! runtime and drives each query to completion under a timeout, so the
//! pipeline sees plain [`HintSource`] and [`RegionIndex`] implementations.

use std::future::Future;
use std::time::Duration;

use sqlx::PgPool;
use tokio::runtime::{Builder, Runtime};
use wildweave_narrative::{HintFixture, HintSource, HintUsage, RegionIndex, SourceError};
use wildweave_types::{RegionHint, RegionId, RegionNeighbor, RegionProfile, RegionRef};
use wildweave_world::HarvestRecord;

use crate::error::DbError;
use crate::harvest_store::HarvestStore;
use crate::hint_store::HintStore;
use crate::postgres::{PostgresConfig, PostgresPool};
use crate::region_store::{ImportSummary, RegionStore};

/// PostgreSQL-backed hint source and region index with blocking calls.
pub struct PgRegionStore {
    runtime: Runtime,
    pool: PostgresPool,
    query_timeout: Duration,
}

impl core::fmt::Debug for PgRegionStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PgRegionStore")
            .field("query_timeout", &self.query_timeout)
            .finish_non_exhaustive()
    }
}

impl PgRegionStore {
    /// Start a runtime and connect the pool.
    ///
    /// `query_timeout` bounds every call made through the trait seams; it
    /// is taken from the configured statement timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Runtime`] if the runtime cannot start, or the
    /// connection error from [`PostgresPool::connect`].
    pub fn connect(config: &PostgresConfig) -> Result<Self, DbError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let pool = runtime.block_on(PostgresPool::connect(config))?;
        Ok(Self {
            runtime,
            pool,
            query_timeout: config.statement_timeout,
        })
    }

    /// Override the per-call timeout.
    #[must_use]
    pub const fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    fn pg(&self) -> &PgPool {
        self.pool.pool()
    }

    /// Drive `future` under the query timeout.
    fn run<T>(&self, future: impl Future<Output = Result<T, DbError>>) -> Result<T, SourceError> {
        let timeout = self.query_timeout;
        match self.runtime.block_on(tokio::time::timeout(timeout, future)) {
            Ok(result) => result.map_err(SourceError::from),
            Err(_) => Err(SourceError::Timeout(
                u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            )),
        }
    }

    /// Apply pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Migration`] if a migration fails.
    pub fn run_migrations(&self) -> Result<(), DbError> {
        self.runtime.block_on(self.pool.run_migrations())
    }

    /// Write a fixture's regions, profiles and hints.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if a write fails.
    pub fn import_fixture(&self, fixture: &HintFixture) -> Result<ImportSummary, DbError> {
        self.runtime
            .block_on(RegionStore::new(self.pg()).import_fixture(fixture))
    }

    /// Replace the stored harvest snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the transaction fails.
    pub fn save_harvest(&self, records: &[HarvestRecord]) -> Result<(), DbError> {
        self.runtime
            .block_on(HarvestStore::new(self.pg()).save_all(records))
    }

    /// Load the stored harvest snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub fn load_harvest(&self) -> Result<Vec<HarvestRecord>, DbError> {
        self.runtime.block_on(HarvestStore::new(self.pg()).load_all())
    }

    /// Close the pool.
    pub fn close(&self) {
        self.runtime.block_on(self.pool.close());
    }
}

impl HintSource for PgRegionStore {
    fn fetch_hints(
        &self,
        region: RegionId,
        weather: &str,
        limit: usize,
    ) -> Result<Vec<RegionHint>, SourceError> {
        self.run(HintStore::new(self.pg()).fetch_hints(region, weather, limit))
    }

    fn fetch_profile(&self, region: RegionId) -> Result<Option<RegionProfile>, SourceError> {
        self.run(HintStore::new(self.pg()).fetch_profile(region))
    }

    fn fetch_region_description(&self, region: RegionId) -> Result<Option<String>, SourceError> {
        self.run(HintStore::new(self.pg()).fetch_region_description(region))
    }

    fn record_usage(&self, usage: &HintUsage) -> Result<(), SourceError> {
        self.run(HintStore::new(self.pg()).record_usage(usage))
    }
}

impl RegionIndex for PgRegionStore {
    fn enclosing_regions(&self, zone: i32, x: i32, y: i32) -> Result<Vec<RegionRef>, SourceError> {
        self.run(RegionStore::new(self.pg()).enclosing_regions(zone, x, y))
    }

    fn neighbors(&self, x: i32, y: i32, radius: f64) -> Result<Vec<RegionNeighbor>, SourceError> {
        self.run(RegionStore::new(self.pg()).neighbors(x, y, radius))
    }
}
