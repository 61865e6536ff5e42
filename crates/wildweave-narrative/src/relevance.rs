//! Multi-factor hint relevance.
//!
//! Each loaded hint is scored against the moment it is about to be shown
//! in. The four core factors (loader weight, seasonal, time-of-day,
//! weather) are each dampened with [`dampen`] so no single dimension
//! dominates, then multiplied with the standalone regional mood factor and
//! the boundary, resource-health and trigger adjustments.

use serde_json::Value;
use wildweave_types::{HintCategory, HintWeather, RegionId, RegionNeighbor, ResourceLevels, Season, SunState, TimeCategory};

use crate::loader::WeightedHint;
use crate::style::mentions_any_word;
use crate::weights;

/// Lower clamp of the weather factor.
pub const WEATHER_MIN: f64 = 0.1;
/// Upper clamp of the weather factor.
pub const WEATHER_MAX: f64 = 2.5;
/// Lower clamp of the mood factor.
pub const MOOD_MIN: f64 = 0.3;
/// Upper clamp of the mood factor.
pub const MOOD_MAX: f64 = 1.8;

/// Squash a factor towards 1: `0.8 + 0.2 f`.
pub fn dampen(factor: f64) -> f64 {
    0.2_f64.mul_add(factor, 0.8)
}

fn mentions(text: &str, words: &[&str]) -> bool {
    mentions_any_word(text, words)
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

const CLEAR_ALLOW: &[&str] = &["sunlight", "sunshine", "bright", "clear", "blue sky", "warm", "golden", "dappled", "shimmer"];
const CLEAR_DENY: &[&str] = &["rain", "storm", "thunder", "lightning", "downpour", "drizzle", "puddle", "soaked", "mud"];
const CLOUDY_ALLOW: &[&str] = &["cloud", "overcast", "grey", "gray", "muted", "diffuse", "hazy", "shade"];
const CLOUDY_DENY: &[&str] = &["blazing", "scorching", "cloudless", "sunshine", "sunlight"];
const RAINY_ALLOW: &[&str] = &["rain", "drizzle", "wet", "damp", "puddle", "drip", "mist", "soaked", "mud"];
const RAINY_DENY: &[&str] = &["dry", "dusty", "parched", "sunlight", "sunshine", "cloudless"];
const STORMY_ALLOW: &[&str] = &["storm", "wind", "gale", "thunder", "lightning", "torrent", "lash", "tempest", "howl"];
const STORMY_DENY: &[&str] = &["calm", "still", "gentle", "tranquil", "peaceful", "serene", "sunlight", "sunshine"];
const ELECTRIC: &[&str] = &["thunder", "lightning"];

/// Weather factor for `text` under a raw 0-255 intensity.
///
/// An allow-list match boosts and takes precedence over a deny-list match,
/// which penalizes; text matching neither reads 1.0. Boost and penalty
/// scale with how deep into its band the intensity sits.
pub fn weather_relevance(text: &str, raw: u8) -> f64 {
    let lower = text.to_lowercase();
    let intensity = f64::from(raw) / 255.0;
    let (allow, deny, boost, penalty) = match HintWeather::from_intensity(raw) {
        HintWeather::Clear => {
            let clarity = (1.0 - f64::from(raw) / 64.0).clamp(0.0, 1.0);
            (
                CLEAR_ALLOW,
                CLEAR_DENY,
                0.5_f64.mul_add(clarity, 1.0),
                0.4_f64.mul_add(1.0 - clarity, 0.3),
            )
        }
        HintWeather::Cloudy => (
            CLOUDY_ALLOW,
            CLOUDY_DENY,
            0.4_f64.mul_add(intensity, 1.0),
            0.2_f64.mul_add(-intensity, 0.6),
        ),
        HintWeather::Rainy => (
            RAINY_ALLOW,
            RAINY_DENY,
            0.6_f64.mul_add(intensity, 1.0),
            0.4_f64.mul_add(1.0 - intensity, 0.2),
        ),
        HintWeather::Stormy => {
            let electric = if mentions(&lower, ELECTRIC) { 0.1 } else { 0.0 };
            (
                STORMY_ALLOW,
                STORMY_DENY,
                0.8_f64.mul_add(intensity, 1.0) + electric,
                0.3_f64.mul_add(1.0 - intensity, 0.1),
            )
        }
    };

    let value = if mentions(&lower, allow) {
        boost
    } else if mentions(&lower, deny) {
        penalty
    } else {
        1.0
    };
    value.clamp(WEATHER_MIN, WEATHER_MAX)
}

// ---------------------------------------------------------------------------
// Regional mood
// ---------------------------------------------------------------------------

const LOUD: &[&str] = &["roar", "thunder", "crash", "howl", "shriek", "boom", "clamor", "bellow"];
const GLOOMY: &[&str] = &["shadow", "dark", "gloom"];
const CHEERFUL: &[&str] = &["cheerful", "bright", "merry", "joyful", "sunny"];

/// Every string value in a characteristics blob, lower-cased.
///
/// Objects and arrays are walked recursively; string-encoded JSON is parsed
/// first, and a plain string that is not JSON counts as one tag.
pub fn characteristic_tags(blob: &Value) -> Vec<String> {
    fn walk(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::String(text) => out.push(text.to_lowercase()),
            Value::Array(items) => items.iter().for_each(|item| walk(item, out)),
            Value::Object(map) => map.values().for_each(|item| walk(item, out)),
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }

    let mut out = Vec::new();
    match blob {
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(parsed @ (Value::Object(_) | Value::Array(_))) => walk(&parsed, &mut out),
            _ => walk(blob, &mut out),
        },
        other => walk(other, &mut out),
    }
    out
}

fn tagged(tags: &[String], words: &[&str]) -> bool {
    tags.iter().any(|tag| mentions(tag, words))
}

/// Mood factor of one hint in a region with `tags`, clamped to
/// `[MOOD_MIN, MOOD_MAX]`.
pub fn mood_multiplier(category: HintCategory, text: &str, tags: &[String]) -> f64 {
    let lower = text.to_lowercase();
    let mut factor = 1.0_f64;

    if category == HintCategory::Mystical && tagged(tags, &["mystical", "ethereal", "magical"]) {
        factor *= 1.8;
    }
    if mentions(&lower, LOUD) && tagged(tags, &["tranquil", "peaceful", "serene"]) {
        factor *= 0.3;
    }
    if tagged(tags, &["dark", "ominous", "foreboding"]) {
        if mentions(&lower, GLOOMY) {
            factor *= 1.5;
        }
        if mentions(&lower, CHEERFUL) {
            factor *= 0.5;
        }
    }
    if category == HintCategory::Fauna && tagged(tags, &["wild", "untamed"]) {
        factor *= 1.3;
    }
    if category == HintCategory::Flora {
        if tagged(tags, &["lush", "verdant", "fertile"]) {
            factor *= 1.4;
        }
        if tagged(tags, &["desolate", "barren", "bleak"]) {
            factor *= 0.6;
        }
    }

    factor.clamp(MOOD_MIN, MOOD_MAX)
}

/// Cosine-smoothed influence of a region `distance` away, out to `radius`.
pub fn transition_influence(distance: f64, radius: f64) -> f64 {
    if radius <= 0.0 || !distance.is_finite() {
        return 0.0;
    }
    let linear = (1.0 - distance / radius).clamp(0.0, 1.0);
    0.5_f64.mul_add(-(std::f64::consts::PI * linear).cos(), 0.5)
}

/// Mood tags of the current region and its neighbours, each with an
/// influence weight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoodField {
    members: Vec<(f64, Vec<String>)>,
}

impl MoodField {
    /// Field of a single region.
    pub fn new(own: &Value) -> Self {
        Self {
            members: vec![(1.0, characteristic_tags(own))],
        }
    }

    /// Add neighbouring regions within `radius`; `own` itself is skipped.
    #[must_use]
    pub fn with_neighbors(mut self, own: RegionId, neighbors: &[RegionNeighbor], radius: f64) -> Self {
        for neighbor in neighbors.iter().filter(|neighbor| neighbor.id != own) {
            let influence = transition_influence(neighbor.distance, radius);
            if influence > 0.0 {
                self.members
                    .push((influence, characteristic_tags(&neighbor.characteristics)));
            }
        }
        self
    }

    /// Regions contributing, the current one included.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no region contributes.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Influence-weighted average of the per-region mood factors.
    pub fn multiplier(&self, category: HintCategory, text: &str) -> f64 {
        let (weighted, total) = self
            .members
            .iter()
            .fold((0.0, 0.0), |(weighted, total), (influence, tags)| {
                (
                    influence.mul_add(mood_multiplier(category, text, tags), weighted),
                    total + influence,
                )
            });
        if total > 0.0 { weighted / total } else { 1.0 }
    }
}

// ---------------------------------------------------------------------------
// Boundary proximity
// ---------------------------------------------------------------------------

/// Closeness to a tile edge: 1 on the edge, falling to 0 a quarter tile in.
pub fn boundary_proximity(x: i32, y: i32, tile: i32) -> f64 {
    if tile <= 0 {
        return 0.0;
    }
    let edge_distance = |v: i32| {
        let offset = v.rem_euclid(tile);
        offset.min(tile.saturating_sub(offset))
    };
    let nearest = f64::from(edge_distance(x).min(edge_distance(y)));
    let band = f64::from(tile) / 4.0;
    if nearest >= band { 0.0 } else { 1.0 - nearest / band }
}

/// Category adjustment for boundary proximity `p`.
pub fn boundary_factor(category: HintCategory, proximity: f64) -> f64 {
    match category {
        HintCategory::Mystical | HintCategory::Landmarks | HintCategory::Atmosphere => {
            0.4_f64.mul_add(-proximity, 1.0)
        }
        HintCategory::Flora | HintCategory::Fauna | HintCategory::WeatherInfluence => {
            0.3_f64.mul_add(proximity, 1.0)
        }
        _ => 1.0,
    }
}

// ---------------------------------------------------------------------------
// Resource health
// ---------------------------------------------------------------------------

const ABUNDANCE: &[&str] = &["lush", "thriving", "abundant", "verdant", "teeming", "flourishing", "bountiful", "rich"];
const SCARCITY: &[&str] = &["sparse", "barren", "withered", "scarce", "parched", "meager", "struggling", "dead"];

/// Tilt towards abundance or scarcity phrasing by area health.
pub fn health_factor(category: HintCategory, text: &str, health: f32) -> f64 {
    let lower = text.to_lowercase();
    let abundant = mentions(&lower, ABUNDANCE);
    let scarce = mentions(&lower, SCARCITY);
    let health = f64::from(health).clamp(0.0, 1.0);
    let mut factor = 1.0_f64;

    if health > 0.7 {
        let strength = ((health - 0.7) / 0.3).clamp(0.0, 1.0);
        if abundant {
            factor *= 0.4_f64.mul_add(strength, 1.1);
        }
        if scarce {
            factor *= 0.4_f64.mul_add(-strength, 0.9);
        }
        if matches!(category, HintCategory::Flora | HintCategory::Fauna) {
            factor *= 0.2_f64.mul_add(strength, 1.0);
        }
    } else if health < 0.3 {
        let strength = ((0.3 - health) / 0.3).clamp(0.0, 1.0);
        if scarce {
            factor *= 0.4_f64.mul_add(strength, 1.1);
        }
        if abundant {
            factor *= 0.4_f64.mul_add(-strength, 0.9);
        }
    } else {
        let tilt = ((health - 0.5) / 0.2).clamp(-1.0, 1.0);
        if abundant {
            factor *= 0.1_f64.mul_add(tilt, 1.0);
        }
        if scarce {
            factor *= 0.1_f64.mul_add(-tilt, 1.0);
        }
    }
    factor
}

// ---------------------------------------------------------------------------
// Composite
// ---------------------------------------------------------------------------

/// The moment and place a hint is scored against.
#[derive(Debug, Clone, Copy)]
pub struct Scoring<'a> {
    /// Season.
    pub season: Season,
    /// Time category.
    pub time: TimeCategory,
    /// Sun state.
    pub sun: SunState,
    /// Raw weather intensity.
    pub weather: u8,
    /// Local resource levels, for triggers.
    pub levels: &'a ResourceLevels,
    /// Area ecological health.
    pub health: f32,
    /// Boundary proximity of the tile.
    pub boundary: f64,
    /// Regional mood field.
    pub mood: &'a MoodField,
}

/// Composite relevance of a weighted hint.
pub fn composite(hint: &WeightedHint, scoring: &Scoring<'_>) -> f64 {
    let record = &hint.hint;
    let seasonal = weights::seasonal(&record.seasonal_weights, scoring.season);
    let time = weights::time_of_day(&record.time_weights, scoring.time, scoring.sun);
    let weather = weather_relevance(&record.text, scoring.weather);

    dampen(hint.weight)
        * dampen(seasonal)
        * dampen(time)
        * dampen(weather)
        * scoring.mood.multiplier(record.category, &record.text)
        * boundary_factor(record.category, scoring.boundary)
        * health_factor(record.category, &record.text, scoring.health)
        * weights::resource_triggers(&record.resource_triggers, scoring.levels)
}
