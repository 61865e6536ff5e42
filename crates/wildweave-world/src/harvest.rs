//! Harvest depletion state with lazy linear regeneration.
//!
//! A [`HarvestLedger`] holds one [`HarvestNode`] per coordinate that has
//! ever been harvested. Regeneration is computed on read from the elapsed
//! wall-clock time since the last harvest, so nodes need no periodic tick:
//!
//! ```text
//! remaining = consumed - consumed * regen_rate_per_hour * hours_elapsed
//! ```
//!
//! floored at zero. The ledger can be snapshotted into flat
//! [`HarvestRecord`]s for persistence and restored on startup.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use wildweave_types::{Coord, ResourceKind};

use crate::error::WorldError;
use crate::resource::config;

/// Remaining consumption below this counts as fully regenerated.
const REGENERATED_EPSILON: f32 = 0.001;

/// Depletion of one resource kind at one coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarvestSlot {
    /// Fraction of the level consumed, as of `last_harvest`.
    pub consumed: f32,
    /// When the slot was last harvested.
    pub last_harvest: DateTime<Utc>,
}

impl HarvestSlot {
    /// Consumption left after regenerating until `now`.
    pub fn remaining(&self, kind: ResourceKind, now: DateTime<Utc>) -> f32 {
        let hours = hours_between(self.last_harvest, now);
        let recovered = self.consumed * config(kind).regen_rate_per_hour * hours;
        (self.consumed - recovered).max(0.0)
    }
}

/// All harvest state at one coordinate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HarvestNode {
    slots: [Option<HarvestSlot>; ResourceKind::COUNT],
    harvest_count: u32,
}

impl HarvestNode {
    /// The slot for a kind, if it was ever harvested.
    pub fn slot(&self, kind: ResourceKind) -> Option<&HarvestSlot> {
        self.slots.get(kind.index()).and_then(Option::as_ref)
    }

    /// Total number of harvests recorded at this coordinate.
    pub const fn harvest_count(&self) -> u32 {
        self.harvest_count
    }

    /// Most recent harvest across all kinds.
    pub fn last_harvest(&self) -> Option<DateTime<Utc>> {
        self.slots.iter().flatten().map(|slot| slot.last_harvest).max()
    }

    fn fully_regenerated(&self, now: DateTime<Utc>) -> bool {
        ResourceKind::ALL.into_iter().all(|kind| {
            self.slot(kind)
                .is_none_or(|slot| slot.remaining(kind, now) < REGENERATED_EPSILON)
        })
    }
}

/// Flat persisted form of one harvest slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestRecord {
    /// Coordinate of the node.
    pub x: i32,
    /// Coordinate of the node.
    pub y: i32,
    /// Resource kind of the slot.
    pub kind: ResourceKind,
    /// Consumed fraction as of `last_harvest`.
    pub consumed: f32,
    /// When the slot was last harvested.
    pub last_harvest: DateTime<Utc>,
    /// Harvest counter of the whole node.
    pub harvest_count: u32,
}

/// Per-coordinate harvest state.
#[derive(Debug, Clone, Default)]
pub struct HarvestLedger {
    nodes: HashMap<Coord, HarvestNode>,
}

impl HarvestLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of coordinates with harvest state.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no coordinate has harvest state.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at a coordinate.
    pub fn node(&self, at: Coord) -> Option<&HarvestNode> {
        self.nodes.get(&at)
    }

    /// Record a harvest of `amount` (a fraction of the available level).
    ///
    /// The kind's depletion rate scales how much of the amount actually
    /// depletes the node. Returns the consumed fraction after the harvest.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidHarvestAmount`] if `amount` is negative
    /// or not finite.
    pub fn harvest(
        &mut self,
        kind: ResourceKind,
        at: Coord,
        amount: f32,
        now: DateTime<Utc>,
    ) -> Result<f32, WorldError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(WorldError::InvalidHarvestAmount { amount, at });
        }
        let node = self.nodes.entry(at).or_default();
        let previous = node.slot(kind).map_or(0.0, |slot| slot.remaining(kind, now));
        let consumed = amount
            .mul_add(config(kind).depletion_rate, previous)
            .clamp(0.0, 1.0);
        if let Some(slot) = node.slots.get_mut(kind.index()) {
            *slot = Some(HarvestSlot {
                consumed,
                last_harvest: now,
            });
        }
        node.harvest_count = node.harvest_count.saturating_add(1);

        tracing::debug!(
            x = at.x,
            y = at.y,
            resource = kind.as_str(),
            consumed,
            "Recorded harvest"
        );
        Ok(consumed)
    }

    /// Consumption left at a coordinate after regeneration until `now`.
    pub fn remaining_consumed(&self, kind: ResourceKind, at: Coord, now: DateTime<Utc>) -> f32 {
        self.nodes
            .get(&at)
            .and_then(|node| node.slot(kind))
            .map_or(0.0, |slot| slot.remaining(kind, now))
    }

    /// Multiplier applied to a sampled level: `1 - remaining_consumed`.
    pub fn depletion_factor(&self, kind: ResourceKind, at: Coord, now: DateTime<Utc>) -> f32 {
        (1.0 - self.remaining_consumed(kind, at, now)).clamp(0.0, 1.0)
    }

    /// Drop nodes that have fully regenerated or were last harvested
    /// longer than `max_age` ago. Returns the number removed.
    pub fn sweep(&mut self, now: DateTime<Utc>, max_age: Duration) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|_, node| {
            let stale = node
                .last_harvest()
                .is_none_or(|last| now.signed_duration_since(last) > max_age);
            !(stale || node.fully_regenerated(now))
        });
        let removed = before.saturating_sub(self.nodes.len());
        if removed > 0 {
            tracing::debug!(removed, remaining = self.nodes.len(), "Swept harvest ledger");
        }
        removed
    }

    /// Remove every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Flatten the ledger for persistence.
    pub fn snapshot(&self) -> Vec<HarvestRecord> {
        let mut records: Vec<HarvestRecord> = self
            .nodes
            .iter()
            .flat_map(|(at, node)| {
                ResourceKind::ALL.into_iter().filter_map(move |kind| {
                    node.slot(kind).map(|slot| HarvestRecord {
                        x: at.x,
                        y: at.y,
                        kind,
                        consumed: slot.consumed,
                        last_harvest: slot.last_harvest,
                        harvest_count: node.harvest_count,
                    })
                })
            })
            .collect();
        records.sort_by(|a, b| (a.x, a.y, a.kind).cmp(&(b.x, b.y, b.kind)));
        records
    }

    /// Load persisted records, replacing any slot they name.
    ///
    /// Returns the number of records applied.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CorruptHarvestRecord`] for a record whose
    /// consumed fraction is outside `[0, 1]` or not finite. Records before
    /// the corrupt one stay applied.
    pub fn restore(&mut self, records: &[HarvestRecord]) -> Result<usize, WorldError> {
        for record in records {
            let at = Coord::new(record.x, record.y);
            if !record.consumed.is_finite() || !(0.0..=1.0).contains(&record.consumed) {
                return Err(WorldError::CorruptHarvestRecord {
                    at,
                    reason: format!("consumed fraction {} out of range", record.consumed),
                });
            }
            let node = self.nodes.entry(at).or_default();
            if let Some(slot) = node.slots.get_mut(record.kind.index()) {
                *slot = Some(HarvestSlot {
                    consumed: record.consumed,
                    last_harvest: record.last_harvest,
                });
            }
            node.harvest_count = node.harvest_count.max(record.harvest_count);
        }
        tracing::info!(records = records.len(), nodes = self.nodes.len(), "Restored harvest ledger");
        Ok(records.len())
    }
}

/// Elapsed hours between two instants, zero if `now` precedes `then`.
fn hours_between(then: DateTime<Utc>, now: DateTime<Utc>) -> f32 {
    let millis = now.signed_duration_since(then).num_milliseconds().max(0);
    // Precision loss is irrelevant at hour granularity.
    #[allow(clippy::cast_precision_loss)]
    let hours = millis as f32 / 3_600_000.0;
    hours
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
    }

    #[test]
    fn harvest_creates_node_lazily() {
        let mut ledger = HarvestLedger::new();
        assert!(ledger.is_empty());
        let consumed = ledger.harvest(ResourceKind::Herbs, Coord::new(3, 4), 0.5, t0());
        assert!(consumed.is_ok());
        // Herbs deplete at 0.7 of the harvested amount.
        assert!((consumed.unwrap_or_default() - 0.35).abs() < 1e-6);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.node(Coord::new(3, 4)).map(HarvestNode::harvest_count), Some(1));
    }

    #[test]
    fn regeneration_is_linear_and_floored() {
        let mut ledger = HarvestLedger::new();
        let at = Coord::new(0, 0);
        let _ = ledger.harvest(ResourceKind::Water, at, 1.0, t0());
        let start = ledger.remaining_consumed(ResourceKind::Water, at, t0());
        let one_hour = ledger.remaining_consumed(ResourceKind::Water, at, t0() + Duration::hours(1));
        let three_hours =
            ledger.remaining_consumed(ResourceKind::Water, at, t0() + Duration::hours(3));
        assert!((start - 0.6).abs() < 1e-6);
        // Water regenerates half of the consumed amount per hour.
        assert!((one_hour - 0.3).abs() < 1e-5);
        assert!(three_hours.abs() < f32::EPSILON);
    }

    #[test]
    fn repeated_harvests_accumulate_but_cap() {
        let mut ledger = HarvestLedger::new();
        let at = Coord::new(1, 1);
        for _ in 0..5 {
            let _ = ledger.harvest(ResourceKind::Stone, at, 0.5, t0());
        }
        let factor = ledger.depletion_factor(ResourceKind::Stone, at, t0());
        assert!(factor.abs() < f32::EPSILON);
    }

    #[test]
    fn invalid_amount_is_rejected() {
        let mut ledger = HarvestLedger::new();
        let result = ledger.harvest(ResourceKind::Wood, Coord::new(0, 0), -0.1, t0());
        assert!(matches!(result, Err(WorldError::InvalidHarvestAmount { .. })));
        let result = ledger.harvest(ResourceKind::Wood, Coord::new(0, 0), f32::NAN, t0());
        assert!(result.is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn sweep_drops_regenerated_and_stale_nodes() {
        let mut ledger = HarvestLedger::new();
        let _ = ledger.harvest(ResourceKind::Water, Coord::new(0, 0), 0.5, t0());
        let _ = ledger.harvest(ResourceKind::Stone, Coord::new(9, 9), 0.5, t0());
        // After four hours the water has fully recovered; stone has not.
        let removed = ledger.sweep(t0() + Duration::hours(4), Duration::days(7));
        assert_eq!(removed, 1);
        assert!(ledger.node(Coord::new(9, 9)).is_some());
        let removed = ledger.sweep(t0() + Duration::days(8), Duration::days(7));
        assert_eq!(removed, 1);
        assert!(ledger.is_empty());
    }

    #[test]
    fn snapshot_restore_preserves_state() {
        let mut ledger = HarvestLedger::new();
        let _ = ledger.harvest(ResourceKind::Game, Coord::new(-5, 8), 0.4, t0());
        let _ = ledger.harvest(ResourceKind::Wood, Coord::new(-5, 8), 0.2, t0());
        let records = ledger.snapshot();
        assert_eq!(records.len(), 2);

        let mut restored = HarvestLedger::new();
        assert_eq!(restored.restore(&records).ok(), Some(2));
        let now = t0() + Duration::minutes(30);
        for kind in [ResourceKind::Game, ResourceKind::Wood] {
            let a = ledger.remaining_consumed(kind, Coord::new(-5, 8), now);
            let b = restored.remaining_consumed(kind, Coord::new(-5, 8), now);
            assert!((a - b).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn restore_rejects_out_of_range_records() {
        let mut ledger = HarvestLedger::new();
        let record = HarvestRecord {
            x: 0,
            y: 0,
            kind: ResourceKind::Clay,
            consumed: 1.5,
            last_harvest: t0(),
            harvest_count: 1,
        };
        let result = ledger.restore(&[record]);
        assert!(matches!(result, Err(WorldError::CorruptHarvestRecord { .. })));
    }
}
