//! Persistence of harvest depletion.
//!
//! The in-memory harvest ledger is the working copy. It is written out as a
//! whole snapshot (replace-all in one transaction) and read back on start.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use wildweave_types::ResourceKind;
use wildweave_world::HarvestRecord;

use crate::error::DbError;

/// Operations on the `harvest_nodes` table.
pub struct HarvestStore<'a> {
    pool: &'a PgPool,
}

impl<'a> HarvestStore<'a> {
    /// Create a new harvest store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Replace every stored node with `records`.
    ///
    /// The delete and the insert share one transaction, so readers see
    /// either the old snapshot or the new one.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the transaction fails.
    pub async fn save_all(&self, records: &[HarvestRecord]) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(r"DELETE FROM harvest_nodes").execute(&mut *tx).await?;

        if !records.is_empty() {
            let len = records.len();
            let mut xs = Vec::with_capacity(len);
            let mut ys = Vec::with_capacity(len);
            let mut resources = Vec::with_capacity(len);
            let mut consumed = Vec::with_capacity(len);
            let mut harvested_at = Vec::with_capacity(len);
            let mut counts = Vec::with_capacity(len);

            for record in records {
                xs.push(record.x);
                ys.push(record.y);
                resources.push(record.kind.as_str().to_owned());
                consumed.push(record.consumed.clamp(0.0, 1.0));
                harvested_at.push(record.last_harvest);
                counts.push(i32::try_from(record.harvest_count).unwrap_or(i32::MAX));
            }

            sqlx::query(
                r"INSERT INTO harvest_nodes (x, y, resource, consumed, last_harvest, harvest_count)
                  SELECT * FROM UNNEST($1::INTEGER[], $2::INTEGER[], $3::TEXT[], $4::REAL[], $5::TIMESTAMPTZ[], $6::INTEGER[])",
            )
            .bind(&xs)
            .bind(&ys)
            .bind(&resources)
            .bind(&consumed)
            .bind(&harvested_at)
            .bind(&counts)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(count = records.len(), "Saved harvest nodes (batch UNNEST)");
        Ok(())
    }

    /// Every stored node, in coordinate order.
    ///
    /// Rows naming an unknown resource are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn load_all(&self) -> Result<Vec<HarvestRecord>, DbError> {
        let rows = sqlx::query_as::<_, HarvestRow>(
            r"SELECT x, y, resource, consumed, last_harvest, harvest_count
              FROM harvest_nodes
              ORDER BY x, y, resource",
        )
        .fetch_all(self.pool)
        .await?;

        let records: Vec<HarvestRecord> = rows
            .into_iter()
            .filter_map(|row| {
                let record = row.clone().into_record();
                if record.is_none() {
                    tracing::warn!(x = row.x, y = row.y, resource = %row.resource, "Skipping harvest node with unknown resource");
                }
                record
            })
            .collect();
        tracing::debug!(count = records.len(), "Loaded harvest nodes");
        Ok(records)
    }
}

/// A row from the `harvest_nodes` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HarvestRow {
    /// Node coordinate.
    pub x: i32,
    /// Node coordinate.
    pub y: i32,
    /// Resource name.
    pub resource: String,
    /// Consumed fraction.
    pub consumed: f32,
    /// Time of the last harvest.
    pub last_harvest: DateTime<Utc>,
    /// Node harvest counter.
    pub harvest_count: i32,
}

impl HarvestRow {
    /// Convert into a ledger record; `None` for an unknown resource name.
    pub fn into_record(self) -> Option<HarvestRecord> {
        let kind = ResourceKind::parse(&self.resource)?;
        Some(HarvestRecord {
            x: self.x,
            y: self.y,
            kind,
            consumed: self.consumed.clamp(0.0, 1.0),
            last_harvest: self.last_harvest,
            harvest_count: u32::try_from(self.harvest_count).unwrap_or(0),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(resource: &str) -> HarvestRow {
        HarvestRow {
            x: 3,
            y: -4,
            resource: resource.to_owned(),
            consumed: 1.4,
            last_harvest: DateTime::<Utc>::UNIX_EPOCH,
            harvest_count: -2,
        }
    }

    #[test]
    fn rows_are_sanitised_into_records() {
        let record = row("herbs").into_record().unwrap();
        assert_eq!(record.kind, ResourceKind::Herbs);
        assert!((record.consumed - 1.0).abs() < f32::EPSILON);
        assert_eq!(record.harvest_count, 0);
    }

    #[test]
    fn unknown_resources_are_dropped() {
        assert!(row("mithril").into_record().is_none());
    }
}
