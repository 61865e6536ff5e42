//! Records shared across the pipeline crates.
//!
//! Region hints and profiles mirror the rows of the region store. Their JSON
//! blobs are kept as [`serde_json::Value`] and interpreted by the narrative
//! crate; a blob that is absent is [`serde_json::Value::Null`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{
    DescriptionStyle, HintCategory, RegionKind, ResourceKind, Season, SunState, TimeCategory,
};
use crate::ids::{HintId, RegionId};

// ---------------------------------------------------------------------------
// Coordinates and time
// ---------------------------------------------------------------------------

/// A wilderness coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// East-west position.
    pub x: i32,
    /// North-south position.
    pub y: i32,
}

impl Coord {
    /// Create a coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another coordinate.
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

/// A point on the in-game calendar.
///
/// The absolute hour counter is the source of truth; the other fields are
/// derived from it by [`GameTime::from_absolute_hour`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameTime {
    /// Hours elapsed since the start of year zero.
    pub absolute_hour: u64,
    /// Hour of the day, 0-23.
    pub hour: u8,
    /// Day of the month, 0-34.
    pub day: u8,
    /// Month of the year, 0-11.
    pub month: u8,
    /// Year number.
    pub year: u64,
}

impl GameTime {
    /// Hours in an in-game day.
    pub const HOURS_PER_DAY: u64 = 24;
    /// Days in an in-game month.
    pub const DAYS_PER_MONTH: u64 = 35;
    /// Months in an in-game year.
    pub const MONTHS_PER_YEAR: u64 = 12;

    /// Derive the calendar fields from an absolute hour counter.
    pub fn from_absolute_hour(absolute_hour: u64) -> Self {
        let hour = absolute_hour % Self::HOURS_PER_DAY;
        let days = absolute_hour / Self::HOURS_PER_DAY;
        let day = days % Self::DAYS_PER_MONTH;
        let months = days / Self::DAYS_PER_MONTH;
        let month = months % Self::MONTHS_PER_YEAR;
        let year = months / Self::MONTHS_PER_YEAR;
        Self {
            absolute_hour,
            hour: u8::try_from(hour).unwrap_or(0),
            day: u8::try_from(day).unwrap_or(0),
            month: u8::try_from(month).unwrap_or(0),
            year,
        }
    }

    /// Convenience constructor for the first day of `month` in year zero.
    pub fn at(month: u8, hour: u8) -> Self {
        let month = u64::from(month) % Self::MONTHS_PER_YEAR;
        let hour = u64::from(hour) % Self::HOURS_PER_DAY;
        let absolute = month
            .saturating_mul(Self::DAYS_PER_MONTH)
            .saturating_mul(Self::HOURS_PER_DAY)
            .saturating_add(hour);
        Self::from_absolute_hour(absolute)
    }

    /// Season of the current month.
    pub const fn season(&self) -> Season {
        Season::from_month(self.month)
    }

    /// Sun state of the current hour.
    pub const fn sun_state(&self) -> SunState {
        SunState::from_hour(self.hour)
    }

    /// Four-way time category of the current hour.
    pub const fn time_category(&self) -> TimeCategory {
        TimeCategory::from_hour(self.hour)
    }
}

// ---------------------------------------------------------------------------
// Resource levels
// ---------------------------------------------------------------------------

/// One abundance value in `[0, 1]` per [`ResourceKind`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceLevels([f32; ResourceKind::COUNT]);

impl ResourceLevels {
    /// Wrap a raw array, clamping every value into `[0, 1]`.
    pub fn from_array(values: [f32; ResourceKind::COUNT]) -> Self {
        Self(values.map(clamp_unit))
    }

    /// Level of one kind.
    pub fn get(&self, kind: ResourceKind) -> f32 {
        self.0.get(kind.index()).copied().unwrap_or(0.0)
    }

    /// Replace the level of one kind (clamped).
    pub fn set(&mut self, kind: ResourceKind, level: f32) {
        if let Some(slot) = self.0.get_mut(kind.index()) {
            *slot = clamp_unit(level);
        }
    }

    /// Raw array in kind index order.
    pub const fn as_array(&self) -> &[f32; ResourceKind::COUNT] {
        &self.0
    }

    /// Iterate `(kind, level)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, f32)> + '_ {
        ResourceKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// Ecological health composite of the living resources.
    pub fn ecological_health(&self) -> f32 {
        let health = 0.35 * self.get(ResourceKind::Vegetation)
            + 0.25 * self.get(ResourceKind::Water)
            + 0.25 * self.get(ResourceKind::Game)
            + 0.15 * self.get(ResourceKind::Herbs);
        clamp_unit(health)
    }
}

/// Clamp into `[0, 1]`, mapping NaN to zero.
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// Regions
// ---------------------------------------------------------------------------

/// A region enclosing a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRef {
    /// Region identifier.
    pub id: RegionId,
    /// Region type tag.
    pub kind: RegionKind,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// A nearby region considered for tonal blending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionNeighbor {
    /// Region identifier.
    pub id: RegionId,
    /// Distance from the query coordinate to the region.
    pub distance: f64,
    /// The neighbour's key-characteristics blob.
    #[serde(default)]
    pub characteristics: serde_json::Value,
}

/// An authored descriptive fragment attached to a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionHint {
    /// Hint identifier.
    pub id: HintId,
    /// Owning region.
    pub region: RegionId,
    /// Category tag.
    pub category: HintCategory,
    /// The fragment itself.
    #[serde(default)]
    pub text: String,
    /// Higher values are loaded first.
    #[serde(default)]
    pub priority: i32,
    /// Comma-separated weather tags (`clear,cloudy`); empty matches all.
    #[serde(default)]
    pub weather_conditions: String,
    /// Seasonal weight blob, e.g. `{"spring": 1.2, "winter": 0.4}`.
    #[serde(default)]
    pub seasonal_weights: serde_json::Value,
    /// Time-of-day weight blob, e.g. `{"night": 1.5}`.
    #[serde(default)]
    pub time_weights: serde_json::Value,
    /// Resource trigger blob, e.g. `{"water": 0.6}`.
    #[serde(default)]
    pub resource_triggers: serde_json::Value,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    /// Inactive hints are never loaded.
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl RegionHint {
    /// Whether the hint's weather list admits `tag`.
    pub fn matches_weather(&self, tag: &str) -> bool {
        let conditions = self.weather_conditions.trim();
        conditions.is_empty()
            || tag.is_empty()
            || conditions
                .split(',')
                .any(|condition| condition.trim().eq_ignore_ascii_case(tag))
    }
}

/// Narrative profile of a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    /// Owning region.
    pub region: RegionId,
    /// Overall theme, free text.
    #[serde(default)]
    pub theme: String,
    /// Dominant mood word.
    #[serde(default)]
    pub dominant_mood: String,
    /// Key-characteristics blob used for mood weighting.
    #[serde(default)]
    pub key_characteristics: serde_json::Value,
    /// Narrative style.
    #[serde(default)]
    pub style: DescriptionStyle,
    /// Complexity from 1 (plain) to 5 (ornate).
    #[serde(default = "default_complexity")]
    pub complexity: u8,
}

const fn default_complexity() -> u8 {
    3
}

impl RegionProfile {
    /// Neutral profile used when a region has none stored.
    pub fn neutral(region: RegionId) -> Self {
        Self {
            region,
            theme: String::new(),
            dominant_mood: String::new(),
            key_characteristics: serde_json::Value::Null,
            style: DescriptionStyle::default(),
            complexity: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_time_derivation() {
        let time = GameTime::from_absolute_hour(24 * 35 * 13 + 24 * 3 + 7);
        assert_eq!(time.hour, 7);
        assert_eq!(time.day, 3);
        assert_eq!(time.month, 1);
        assert_eq!(time.year, 1);
        assert_eq!(time.season(), Season::Winter);
    }

    #[test]
    fn game_time_at_month() {
        let time = GameTime::at(3, 23);
        assert_eq!(time.month, 3);
        assert_eq!(time.hour, 23);
        assert_eq!(time.season(), Season::Spring);
        assert_eq!(time.sun_state(), SunState::Dark);
    }

    #[test]
    fn levels_are_clamped() {
        let mut levels = ResourceLevels::default();
        levels.set(ResourceKind::Water, 1.7);
        levels.set(ResourceKind::Salt, f32::NAN);
        assert!((levels.get(ResourceKind::Water) - 1.0).abs() < f32::EPSILON);
        assert!(levels.get(ResourceKind::Salt).abs() < f32::EPSILON);
    }

    #[test]
    fn ecological_health_weights() {
        let levels = ResourceLevels::from_array([1.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert!((levels.ecological_health() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn weather_list_matching() {
        let hint = RegionHint {
            id: HintId::new(1),
            region: RegionId::new(1),
            category: HintCategory::Atmosphere,
            text: String::new(),
            priority: 0,
            weather_conditions: "clear, cloudy".to_owned(),
            seasonal_weights: serde_json::Value::Null,
            time_weights: serde_json::Value::Null,
            resource_triggers: serde_json::Value::Null,
            created_at: Utc::now(),
            active: true,
        };
        assert!(hint.matches_weather("cloudy"));
        assert!(!hint.matches_weather("stormy"));
    }

    #[test]
    fn hint_deserializes_with_defaults() {
        let json = r#"{"id": 7, "region": 3, "category": "sounds", "text": "Frogs croak."}"#;
        let hint: Result<RegionHint, _> = serde_json::from_str(json);
        assert!(hint.is_ok());
        let hint = hint.ok();
        assert_eq!(hint.as_ref().map(|h| h.active), Some(true));
        assert_eq!(hint.map(|h| h.seasonal_weights.is_null()), Some(true));
    }
}
