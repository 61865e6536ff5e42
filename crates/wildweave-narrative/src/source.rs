//! Collaborator seams for hints and regions, with in-memory implementations.
//!
//! [`HintSource`] supplies authored hints, region profiles and region
//! descriptions; [`RegionIndex`] answers which regions enclose or surround a
//! coordinate. The PostgreSQL-backed implementations live in
//! `wildweave-db`; the in-memory ones here serve tests and offline
//! fixtures.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wildweave_types::{
    Coord, HintCategory, HintId, RegionHint, RegionId, RegionKind, RegionNeighbor, RegionProfile,
    RegionRef, Season, TimeCategory,
};

use crate::error::SourceError;

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// One appended hint, reported for usage analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintUsage {
    /// The hint that was used.
    pub hint: HintId,
    /// Region the hint belongs to.
    pub region: RegionId,
    /// Its category.
    pub category: HintCategory,
    /// Where it was shown.
    pub at: Coord,
    /// Weather tag at the time.
    pub weather: String,
    /// Season at the time.
    pub season: Season,
    /// Time category at the time.
    pub time: TimeCategory,
    /// Wall-clock time of use.
    pub used_at: DateTime<Utc>,
}

/// Source of authored hints and region narrative data.
pub trait HintSource {
    /// Active hints of a region admitted by `weather` (an empty tag admits
    /// all), highest priority first, at most `limit` rows.
    fn fetch_hints(
        &self,
        region: RegionId,
        weather: &str,
        limit: usize,
    ) -> Result<Vec<RegionHint>, SourceError>;

    /// The region's narrative profile, if one is stored.
    fn fetch_profile(&self, region: RegionId) -> Result<Option<RegionProfile>, SourceError>;

    /// The region's authored description, if one is stored.
    fn fetch_region_description(&self, region: RegionId) -> Result<Option<String>, SourceError>;

    /// Record that a hint was shown.
    fn record_usage(&self, usage: &HintUsage) -> Result<(), SourceError> {
        let _ = usage;
        Ok(())
    }
}

impl<T: HintSource + ?Sized> HintSource for Arc<T> {
    fn fetch_hints(
        &self,
        region: RegionId,
        weather: &str,
        limit: usize,
    ) -> Result<Vec<RegionHint>, SourceError> {
        (**self).fetch_hints(region, weather, limit)
    }

    fn fetch_profile(&self, region: RegionId) -> Result<Option<RegionProfile>, SourceError> {
        (**self).fetch_profile(region)
    }

    fn fetch_region_description(&self, region: RegionId) -> Result<Option<String>, SourceError> {
        (**self).fetch_region_description(region)
    }

    fn record_usage(&self, usage: &HintUsage) -> Result<(), SourceError> {
        (**self).record_usage(usage)
    }
}

/// Spatial lookup of regions.
pub trait RegionIndex {
    /// Every region whose area contains `(x, y)` in `zone`.
    fn enclosing_regions(&self, zone: i32, x: i32, y: i32) -> Result<Vec<RegionRef>, SourceError>;

    /// Regions within `radius` of `(x, y)`, with their distance.
    fn neighbors(&self, x: i32, y: i32, radius: f64) -> Result<Vec<RegionNeighbor>, SourceError> {
        let _ = (x, y, radius);
        Ok(Vec::new())
    }
}

impl<T: RegionIndex + ?Sized> RegionIndex for Arc<T> {
    fn enclosing_regions(&self, zone: i32, x: i32, y: i32) -> Result<Vec<RegionRef>, SourceError> {
        (**self).enclosing_regions(zone, x, y)
    }

    fn neighbors(&self, x: i32, y: i32, radius: f64) -> Result<Vec<RegionNeighbor>, SourceError> {
        (**self).neighbors(x, y, radius)
    }
}

/// The region that supplies hints:the first geographic region, else the
/// first encounter region.
pub fn primary_region(regions: &[RegionRef]) -> Option<&RegionRef> {
    regions
        .iter()
        .find(|region| region.kind == RegionKind::Geographic)
        .or_else(|| regions.iter().find(|region| region.kind == RegionKind::Encounter))
}

// ---------------------------------------------------------------------------
// Fixture format
// ---------------------------------------------------------------------------

/// A rectangular region in a fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureRegion {
    /// Region identifier.
    pub id: RegionId,
    /// Region kind.
    pub kind: RegionKind,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Zone the region belongs to.
    #[serde(default)]
    pub zone: i32,
    /// South-west corner, inclusive.
    pub min: Coord,
    /// North-east corner, inclusive.
    pub max: Coord,
    /// Authored description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Offline hint data: regions, hints and profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HintFixture {
    /// Regions.
    #[serde(default)]
    pub regions: Vec<FixtureRegion>,
    /// Hints.
    #[serde(default)]
    pub hints: Vec<RegionHint>,
    /// Profiles.
    #[serde(default)]
    pub profiles: Vec<RegionProfile>,
}

impl HintFixture {
    /// Split into a hint source and a region index.
    pub fn into_parts(self) -> (InMemoryHintSource, RectRegionIndex) {
        let mut index = RectRegionIndex::default();
        let mut source = InMemoryHintSource::default();
        for region in self.regions {
            let characteristics = self
                .profiles
                .iter()
                .find(|profile| profile.region == region.id)
                .map(|profile| profile.key_characteristics.clone())
                .unwrap_or_default();
            if let Some(description) = region.description.clone() {
                source.descriptions.insert(region.id, description);
            }
            index.regions.push(RectRegion {
                region: RegionRef {
                    id: region.id,
                    kind: region.kind,
                    name: region.name,
                },
                zone: region.zone,
                min: region.min,
                max: region.max,
                characteristics,
            });
        }
        source.hints = self.hints;
        for profile in self.profiles {
            source.profiles.insert(profile.region, profile);
        }
        (source, index)
    }
}

// ---------------------------------------------------------------------------
// In-memory implementations
// ---------------------------------------------------------------------------

/// Hint source over owned vectors.
#[derive(Debug, Default)]
pub struct InMemoryHintSource {
    hints: Vec<RegionHint>,
    profiles: HashMap<RegionId, RegionProfile>,
    descriptions: HashMap<RegionId, String>,
    usage: Mutex<Vec<HintUsage>>,
}

impl InMemoryHintSource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hint.
    #[must_use]
    pub fn with_hint(mut self, hint: RegionHint) -> Self {
        self.hints.push(hint);
        self
    }

    /// Add or replace a profile.
    #[must_use]
    pub fn with_profile(mut self, profile: RegionProfile) -> Self {
        self.profiles.insert(profile.region, profile);
        self
    }

    /// Add or replace a region description.
    #[must_use]
    pub fn with_description(mut self, region: RegionId, text: impl Into<String>) -> Self {
        self.descriptions.insert(region, text.into());
        self
    }

    /// Usage records captured so far.
    pub fn usage(&self) -> Vec<HintUsage> {
        self.usage.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

impl HintSource for InMemoryHintSource {
    fn fetch_hints(
        &self,
        region: RegionId,
        weather: &str,
        limit: usize,
    ) -> Result<Vec<RegionHint>, SourceError> {
        let mut rows: Vec<RegionHint> = self
            .hints
            .iter()
            .filter(|hint| hint.region == region && hint.active && hint.matches_weather(weather))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.cmp(&b.id)));
        rows.truncate(limit);
        Ok(rows)
    }

    fn fetch_profile(&self, region: RegionId) -> Result<Option<RegionProfile>, SourceError> {
        Ok(self.profiles.get(&region).cloned())
    }

    fn fetch_region_description(&self, region: RegionId) -> Result<Option<String>, SourceError> {
        Ok(self.descriptions.get(&region).cloned())
    }

    fn record_usage(&self, usage: &HintUsage) -> Result<(), SourceError> {
        let mut log = self
            .usage
            .lock()
            .map_err(|poisoned| SourceError::Unavailable(poisoned.to_string()))?;
        log.push(usage.clone());
        Ok(())
    }
}

/// An axis-aligned region rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectRegion {
    /// The region.
    pub region: RegionRef,
    /// Zone it belongs to.
    pub zone: i32,
    /// South-west corner, inclusive.
    pub min: Coord,
    /// North-east corner, inclusive.
    pub max: Coord,
    /// Characteristics blob reported to neighbours.
    pub characteristics: serde_json::Value,
}

impl RectRegion {
    /// Whether the rectangle contains `(x, y)`.
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min.x && x <= self.max.x && y >= self.min.y && y <= self.max.y
    }

    /// Euclidean distance from `(x, y)` to the rectangle; 0 inside.
    pub fn distance_to(&self, x: i32, y: i32) -> f64 {
        let dx = f64::from(self.min.x.saturating_sub(x).max(x.saturating_sub(self.max.x)).max(0));
        let dy = f64::from(self.min.y.saturating_sub(y).max(y.saturating_sub(self.max.y)).max(0));
        dx.hypot(dy)
    }
}

/// Region index over rectangles.
#[derive(Debug, Clone, Default)]
pub struct RectRegionIndex {
    regions: Vec<RectRegion>,
}

impl RectRegionIndex {
    /// Index over `regions`.
    pub const fn new(regions: Vec<RectRegion>) -> Self {
        Self { regions }
    }

    /// Indexed rectangles.
    pub fn regions(&self) -> &[RectRegion] {
        &self.regions
    }
}

impl RegionIndex for RectRegionIndex {
    fn enclosing_regions(&self, zone: i32, x: i32, y: i32) -> Result<Vec<RegionRef>, SourceError> {
        Ok(self
            .regions
            .iter()
            .filter(|rect| rect.zone == zone && rect.contains(x, y))
            .map(|rect| rect.region.clone())
            .collect())
    }

    fn neighbors(&self, x: i32, y: i32, radius: f64) -> Result<Vec<RegionNeighbor>, SourceError> {
        let mut found: Vec<RegionNeighbor> = self
            .regions
            .iter()
            .filter_map(|rect| {
                let distance = rect.distance_to(x, y);
                (distance <= radius).then(|| RegionNeighbor {
                    id: rect.region.id,
                    distance,
                    characteristics: rect.characteristics.clone(),
                })
            })
            .collect();
        found.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Ok(found)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn region(id: i64, kind: RegionKind) -> RegionRef {
        RegionRef {
            id: RegionId::new(id),
            kind,
            name: format!("region {id}"),
        }
    }

    fn hint(id: i64, priority: i32, weather: &str) -> RegionHint {
        RegionHint {
            id: HintId::new(id),
            region: RegionId::new(1),
            category: HintCategory::Atmosphere,
            text: format!("hint {id}"),
            priority,
            weather_conditions: weather.to_owned(),
            seasonal_weights: serde_json::Value::Null,
            time_weights: serde_json::Value::Null,
            resource_triggers: serde_json::Value::Null,
            created_at: DateTime::default(),
            active: true,
        }
    }

    #[test]
    fn geographic_regions_are_preferred() {
        let refs = vec![region(2, RegionKind::Encounter), region(3, RegionKind::Geographic)];
        assert_eq!(primary_region(&refs).unwrap().id, RegionId::new(3));
        let refs = vec![region(4, RegionKind::Sector), region(2, RegionKind::Encounter)];
        assert_eq!(primary_region(&refs).unwrap().id, RegionId::new(2));
        assert!(primary_region(&[region(5, RegionKind::SectorTransform)]).is_none());
    }

    #[test]
    fn fetch_filters_orders_and_limits() {
        let mut inactive = hint(4, 100, "");
        inactive.active = false;
        let source = InMemoryHintSource::new()
            .with_hint(hint(1, 5, "clear,cloudy"))
            .with_hint(hint(2, 9, "stormy"))
            .with_hint(hint(3, 7, ""))
            .with_hint(inactive);
        let rows = source.fetch_hints(RegionId::new(1), "clear", 20).unwrap();
        let ids: Vec<i64> = rows.iter().map(|h| h.id.into_inner()).collect();
        assert_eq!(ids, vec![3, 1]);
        let rows = source.fetch_hints(RegionId::new(1), "stormy", 1).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, HintId::new(2));
    }

    #[test]
    fn rect_index_finds_enclosing_and_neighbors() {
        let index = RectRegionIndex::new(vec![
            RectRegion {
                region: region(1, RegionKind::Geographic),
                zone: 0,
                min: Coord::new(0, 0),
                max: Coord::new(99, 99),
                characteristics: serde_json::Value::Null,
            },
            RectRegion {
                region: region(2, RegionKind::Geographic),
                zone: 0,
                min: Coord::new(100, 0),
                max: Coord::new(199, 99),
                characteristics: serde_json::json!({"mood": ["dark"]}),
            },
        ]);
        let inside = index.enclosing_regions(0, 95, 50).unwrap();
        assert_eq!(inside.len(), 1);
        assert!(index.enclosing_regions(1, 95, 50).unwrap().is_empty());

        let near = index.neighbors(95, 50, 10.0).unwrap();
        assert_eq!(near.len(), 2);
        assert!(near[0].distance.abs() < f64::EPSILON);
        assert!((near[1].distance - 5.0).abs() < 1e-9);
    }

    #[test]
    fn usage_is_recorded() {
        let source = InMemoryHintSource::new();
        let usage = HintUsage {
            hint: HintId::new(1),
            region: RegionId::new(1),
            category: HintCategory::Flora,
            at: Coord::new(1, 2),
            weather: "clear".to_owned(),
            season: Season::Spring,
            time: TimeCategory::Morning,
            used_at: DateTime::default(),
        };
        source.record_usage(&usage).unwrap();
        assert_eq!(source.usage(), vec![usage]);
    }
}
