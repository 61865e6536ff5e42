//! Loading and weaving properties over the public API.
//!
//! Hints come from [`InMemoryHintSource`]; contexts are built by hand so
//! weather, season and time are exact.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::SeedableRng;
use rand::rngs::{SmallRng, StdRng};
use serde_json::json;
use wildweave_narrative::relevance::{characteristic_tags, mood_multiplier, weather_relevance};
use wildweave_narrative::{
    HintCache, HintCacheConfig, HintCacheKey, HintLoader, HintQuery, HintWeaver, InMemoryHintSource,
    WeaveContext, WeightedHint,
};
use wildweave_types::{
    Coord, DescriptionStyle, HintCategory, HintId, HintWeather, RegionHint, RegionId, RegionProfile,
    ResourceKind, ResourceLevels, Season, SectorType, SunState, TimeCategory,
};
use wildweave_world::EnvironmentalContext;

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn env(weather: u8, season: Season, hour: u8) -> EnvironmentalContext {
    EnvironmentalContext {
        season,
        sun: SunState::from_hour(hour),
        hour,
        month: 5,
        weather,
        light_level: 100,
        artificial_light: 0,
        natural_light: 100,
        has_light_sources: false,
        sector: SectorType::Forest,
        elevation: 0.2,
        elevation_meters: 200.0,
        near_water: false,
        in_forest: true,
        in_mountains: false,
    }
}

fn hint(id: i64, category: HintCategory, text: &str) -> RegionHint {
    RegionHint {
        id: HintId::new(id),
        region: RegionId::new(5),
        category,
        text: text.to_owned(),
        priority: 10,
        weather_conditions: String::new(),
        seasonal_weights: serde_json::Value::Null,
        time_weights: serde_json::Value::Null,
        resource_triggers: serde_json::Value::Null,
        created_at: t0(),
        active: true,
    }
}

fn catalogue() -> Vec<RegionHint> {
    vec![
        hint(1, HintCategory::Atmosphere, "An ethereal stillness hangs beneath the canopy."),
        hint(2, HintCategory::Atmosphere, "The air tastes of moss and old rain."),
        hint(3, HintCategory::WeatherInfluence, "Wind drives the rain sideways through the trunks."),
        hint(4, HintCategory::Fauna, "A fox slips between the ferns."),
        hint(5, HintCategory::Fauna, "Crows argue somewhere overhead."),
        hint(6, HintCategory::Flora, "Ferns whisper against the roots."),
        hint(7, HintCategory::Sounds, "A woodpecker drums in the distance."),
        hint(8, HintCategory::Scents, "Resin and wet earth scent the air."),
        hint(9, HintCategory::SeasonalChanges, "Fresh buds crowd every branch."),
        hint(10, HintCategory::TimeOfDay, "Morning dew beads on every leaf."),
        hint(11, HintCategory::Mystical, "Faint runes glow on a leaning stone."),
        hint(12, HintCategory::Landmarks, "A mossy cairn marks an old boundary."),
    ]
}

fn source() -> InMemoryHintSource {
    catalogue()
        .into_iter()
        .fold(InMemoryHintSource::new(), InMemoryHintSource::with_hint)
}

fn profile() -> RegionProfile {
    RegionProfile {
        region: RegionId::new(5),
        theme: "old growth".to_owned(),
        dominant_mood: "serene".to_owned(),
        key_characteristics: json!({"atmosphere": ["mystical"], "terrain": "lush"}),
        style: DescriptionStyle::Poetic,
        complexity: 4,
    }
}

fn weighted(hints: Vec<RegionHint>) -> Vec<WeightedHint> {
    hints
        .into_iter()
        .map(|hint| WeightedHint {
            hint: Arc::new(hint),
            weight: 1.0,
        })
        .collect()
}

#[test]
fn stormy_thunder_outranks_gentle_calm() {
    let intensity = 210.0 / 255.0;
    let thunder = weather_relevance("Thunder shakes the branches.", 210);
    assert!(thunder >= 0.8_f64.mul_add(intensity, 1.0));
    let calm = weather_relevance("A gentle calm settles.", 210);
    assert!(calm <= 0.3_f64.mul_add(1.0 - intensity, 0.1) + 1e-9);
}

#[test]
fn mystical_region_mood_is_clamped_high() {
    let tags = characteristic_tags(&json!({"atmosphere": ["mystical"]}));
    let factor = mood_multiplier(HintCategory::Mystical, "Anything at all.", &tags);
    assert!((factor - 1.8).abs() < f64::EPSILON);
}

#[test]
fn expired_full_cache_sweeps_before_insert() {
    let config = HintCacheConfig {
        capacity: 4,
        ..HintCacheConfig::default()
    };
    let mut cache = HintCache::new(config);
    let batch: Arc<[WeightedHint]> = Arc::from(weighted(vec![hint(1, HintCategory::Flora, "Moss.")]));
    let key = |region: i64| HintCacheKey {
        region: RegionId::new(region),
        weather: HintWeather::Rainy,
        time: TimeCategory::Evening,
        season: Season::Autumn,
    };
    for region in 0..4 {
        cache.insert(key(region), 0.4, Arc::clone(&batch), t0());
    }
    let later = t0() + Duration::minutes(10);
    cache.insert(key(100), 0.4, Arc::clone(&batch), later);
    assert!(cache.len() < config.capacity);
    assert!(cache.get(&key(100), 0.4, later).is_some());
}

#[test]
fn loader_keys_on_discrete_context_and_health_tolerance() {
    let source = source();
    let mut loader = HintLoader::default();
    let query = HintQuery {
        region: RegionId::new(5),
        weather: HintWeather::Clear,
        time: TimeCategory::Morning,
        sun: SunState::Light,
        season: Season::Spring,
        health: 0.60,
    };
    let first = loader.load_hints(&source, &query, t0()).unwrap();
    assert_eq!(first.len(), 12);

    let near = HintQuery { health: 0.64, ..query };
    assert!(Arc::ptr_eq(&first, &loader.load_hints(&source, &near, t0()).unwrap()));

    let far = HintQuery { health: 0.70, ..query };
    assert!(!Arc::ptr_eq(&first, &loader.load_hints(&source, &far, t0()).unwrap()));

    let stormy = HintQuery {
        weather: HintWeather::Stormy,
        ..query
    };
    assert!(!Arc::ptr_eq(&first, &loader.load_hints(&source, &stormy, t0()).unwrap()));

    let stats = loader.stats(t0());
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 3);
}

#[test]
fn no_hint_is_woven_twice() {
    let hints = weighted(catalogue());
    let profile = profile();
    let mut levels = ResourceLevels::default();
    levels.set(ResourceKind::Vegetation, 0.8);
    let weaver = HintWeaver::default();
    for weather in [20_u8, 100, 160, 230] {
        let env = env(weather, Season::Spring, 8);
        let ctx = WeaveContext {
            env: &env,
            levels: &levels,
            health: 0.8,
            at: Coord::new(3, 40),
            profile: &profile,
            neighbors: &[],
        };
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = weaver.weave_detailed("Tall oaks tower overhead.", &hints, &ctx, &mut rng);
            let ids: HashSet<HintId> = outcome.used.iter().map(|hint| hint.id).collect();
            assert_eq!(ids.len(), outcome.used.len());
            assert!(!outcome.used.is_empty());
            for used in &outcome.used {
                assert!(outcome.text.matches(used.text.as_str()).count() <= 1);
            }
        }
    }
}

#[test]
fn clear_weather_never_fills_the_weather_slot() {
    let hints = weighted(vec![
        hint(3, HintCategory::WeatherInfluence, "Wind drives the rain sideways."),
        hint(1, HintCategory::Atmosphere, "Light pools on the forest floor."),
    ]);
    let profile = RegionProfile::neutral(RegionId::new(5));
    let levels = ResourceLevels::default();
    let env = env(10, Season::Summer, 13);
    let ctx = WeaveContext {
        env: &env,
        levels: &levels,
        health: 0.5,
        at: Coord::new(30, 30),
        profile: &profile,
        neighbors: &[],
    };
    for seed in 0..30 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let outcome = HintWeaver::default().weave_detailed("A glade.", &hints, &ctx, &mut rng);
        assert!(outcome.used.iter().all(|hint| hint.id != HintId::new(3)));
    }

    let stormy = env_with_weather(&env, 200);
    let ctx = WeaveContext { env: &stormy, ..ctx };
    let mut rng = SmallRng::seed_from_u64(1);
    let outcome = HintWeaver::default().weave_detailed("A glade.", &hints, &ctx, &mut rng);
    assert!(outcome.used.iter().any(|hint| hint.id == HintId::new(3)));
}

fn env_with_weather(base: &EnvironmentalContext, weather: u8) -> EnvironmentalContext {
    EnvironmentalContext { weather, ..*base }
}

#[test]
fn weaving_is_deterministic_per_seed() {
    let hints = weighted(catalogue());
    let profile = profile();
    let levels = ResourceLevels::default();
    let env = env(90, Season::Spring, 7);
    let ctx = WeaveContext {
        env: &env,
        levels: &levels,
        health: 0.5,
        at: Coord::new(100, 100),
        profile: &profile,
        neighbors: &[],
    };
    let weave = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        HintWeaver::default().weave("Dense ferns carpet the ground.", &hints, &ctx, &mut rng)
    };
    assert_eq!(weave(9), weave(9));
    assert!(weave(9).ends_with("\r\n"));
}
