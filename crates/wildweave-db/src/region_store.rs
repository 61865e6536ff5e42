//! Region lookups and fixture import.
//!
//! Regions are stored as inclusive axis-aligned rectangles. Containment and
//! distance are computed in SQL so a lookup is one indexed query.

use sqlx::PgPool;
use wildweave_narrative::{FixtureRegion, HintFixture};
use wildweave_types::{RegionId, RegionKind, RegionNeighbor, RegionRef};

use crate::error::DbError;
use crate::hint_store::HintStore;

/// Operations on the `regions` table.
pub struct RegionStore<'a> {
    pool: &'a PgPool,
}

/// Counts of rows written by [`RegionStore::import_fixture`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Regions upserted.
    pub regions: usize,
    /// Hints upserted.
    pub hints: usize,
    /// Profiles upserted.
    pub profiles: usize,
}

impl<'a> RegionStore<'a> {
    /// Create a new region store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Regions of `zone` containing `(x, y)`, geographic ones first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails, or
    /// [`DbError::InvalidRow`] if a row has an unknown kind code.
    pub async fn enclosing_regions(&self, zone: i32, x: i32, y: i32) -> Result<Vec<RegionRef>, DbError> {
        let rows = sqlx::query_as::<_, RegionRow>(
            r"SELECT id, kind, name
              FROM regions
              WHERE zone = $1
                AND $2 BETWEEN min_x AND max_x
                AND $3 BETWEEN min_y AND max_y
              ORDER BY kind, id",
        )
        .bind(zone)
        .bind(x)
        .bind(y)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(RegionRef::try_from).collect()
    }

    /// Regions within `radius` of `(x, y)`, nearest first.
    ///
    /// Distance is Euclidean to the nearest edge; it is 0 inside a region.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn neighbors(&self, x: i32, y: i32, radius: f64) -> Result<Vec<RegionNeighbor>, DbError> {
        let rows = sqlx::query_as::<_, NeighborRow>(
            r"SELECT id, distance, characteristics
              FROM (
                  SELECT r.id,
                         sqrt(power(GREATEST(r.min_x - $1, $1 - r.max_x, 0), 2)
                            + power(GREATEST(r.min_y - $2, $2 - r.max_y, 0), 2))::DOUBLE PRECISION AS distance,
                         p.key_characteristics AS characteristics
                  FROM regions r
                  LEFT JOIN region_profiles p ON p.region_id = r.id
              ) nearby
              WHERE distance <= $3
              ORDER BY distance, id",
        )
        .bind(x)
        .bind(y)
        .bind(radius)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| RegionNeighbor {
                id: RegionId::new(row.id),
                distance: row.distance,
                characteristics: row.characteristics.unwrap_or_default(),
            })
            .collect())
    }

    /// Insert or replace one region.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the upsert fails.
    pub async fn upsert_region(&self, region: &FixtureRegion) -> Result<(), DbError> {
        sqlx::query(
            r"INSERT INTO regions (id, zone, kind, name, min_x, min_y, max_x, max_y, description)
              VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
              ON CONFLICT (id) DO UPDATE SET
                  zone = EXCLUDED.zone,
                  kind = EXCLUDED.kind,
                  name = EXCLUDED.name,
                  min_x = EXCLUDED.min_x,
                  min_y = EXCLUDED.min_y,
                  max_x = EXCLUDED.max_x,
                  max_y = EXCLUDED.max_y,
                  description = EXCLUDED.description",
        )
        .bind(region.id.into_inner())
        .bind(region.zone)
        .bind(region.kind.code())
        .bind(&region.name)
        .bind(region.min.x.min(region.max.x))
        .bind(region.min.y.min(region.max.y))
        .bind(region.min.x.max(region.max.x))
        .bind(region.min.y.max(region.max.y))
        .bind(region.description.as_deref())
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Write a whole fixture: regions, then profiles, then hints.
    ///
    /// Existing rows with the same keys are replaced. The hint id sequence
    /// is moved past the largest imported id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if any write fails.
    pub async fn import_fixture(&self, fixture: &HintFixture) -> Result<ImportSummary, DbError> {
        for region in &fixture.regions {
            self.upsert_region(region).await?;
        }

        let hints = HintStore::new(self.pool);
        for profile in &fixture.profiles {
            hints.upsert_profile(profile).await?;
        }
        for hint in &fixture.hints {
            hints.upsert_hint(hint).await?;
        }

        if !fixture.hints.is_empty() {
            sqlx::query(
                r"SELECT setval(pg_get_serial_sequence('region_hints', 'id'), GREATEST(MAX(id), 1))
                  FROM region_hints",
            )
            .execute(self.pool)
            .await?;
        }

        let summary = ImportSummary {
            regions: fixture.regions.len(),
            hints: fixture.hints.len(),
            profiles: fixture.profiles.len(),
        };
        tracing::info!(
            regions = summary.regions,
            hints = summary.hints,
            profiles = summary.profiles,
            "Imported hint fixture"
        );
        Ok(summary)
    }
}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A region row as returned by containment lookups.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RegionRow {
    /// Region key.
    pub id: i64,
    /// Kind code (1-4).
    pub kind: i32,
    /// Display name.
    pub name: String,
}

impl TryFrom<RegionRow> for RegionRef {
    type Error = DbError;

    fn try_from(row: RegionRow) -> Result<Self, Self::Error> {
        let kind = RegionKind::from_code(row.kind).ok_or_else(|| DbError::InvalidRow {
            id: row.id,
            reason: format!("unknown region kind {}", row.kind),
        })?;
        Ok(Self {
            id: RegionId::new(row.id),
            kind,
            name: row.name,
        })
    }
}

/// A region row with its distance from a query point.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NeighborRow {
    /// Region key.
    pub id: i64,
    /// Distance to the query point.
    pub distance: f64,
    /// Key characteristics from the region's profile.
    pub characteristics: Option<serde_json::Value>,
}
