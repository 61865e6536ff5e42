//! End-to-end sampling properties over the public API.
//!
//! These drive [`ResourceSampler`] with both the Perlin fields (for range
//! and determinism over real terrain) and constant fields (for scenarios
//! that need exact environmental inputs).

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Duration, Utc};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wildweave_types::{Coord, GameTime, ResourceKind, SectorType};
use wildweave_world::fields::raw_from_celsius;
use wildweave_world::sampler::{aridity_factor, unpenalized_water_blend};
use wildweave_world::{
    CacheConfig, EnvironmentFields, Moment, PerlinFields, ResourceSampler, UniformFields, config,
};

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn at(month: u8, hour: u8, wall: DateTime<Utc>) -> Moment {
    Moment::new(GameTime::at(month, hour), wall)
}

#[test]
fn perlin_levels_stay_in_range() {
    let fields = PerlinFields::new(1234, 1024);
    let mut sampler = ResourceSampler::default();
    for x in (-1000..1000).step_by(97) {
        for y in (-1000..1000).step_by(89) {
            let levels = sampler.levels_at(&fields, x, y, at(6, 12, t0()));
            for (kind, level) in levels.iter() {
                assert!((0.0..=1.0).contains(&level), "{kind} at ({x}, {y}) = {level}");
            }
        }
    }
}

#[test]
fn samples_within_ttl_are_bit_identical() {
    let fields = PerlinFields::new(99, 1024);
    let mut sampler = ResourceSampler::default();
    for kind in ResourceKind::ALL {
        let first = sampler.sample(&fields, kind, 317, -42, at(3, 9, t0()));
        let second = sampler.sample(&fields, kind, 317, -42, at(3, 9, t0() + Duration::seconds(299)));
        assert_eq!(first.to_bits(), second.to_bits(), "{kind}");
    }
}

#[test]
fn expired_cells_are_recomputed() {
    let fields = PerlinFields::new(99, 1024);
    let mut sampler = ResourceSampler::new(CacheConfig {
        ttl: Duration::seconds(5),
        ..CacheConfig::default()
    });
    let _ = sampler.sample(&fields, ResourceKind::Wood, 0, 0, at(3, 9, t0()));
    let _ = sampler.sample(&fields, ResourceKind::Wood, 0, 0, at(3, 9, t0() + Duration::seconds(6)));
    let stats = sampler.cache_stats(t0() + Duration::seconds(6));
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.total_entries, 1);
}

#[test]
fn hot_arid_desert_water_is_severely_penalized() {
    let desert = UniformFields {
        elevation: 150,
        temperature: raw_from_celsius(30.0),
        moisture: 60,
        weather: 20,
        detail: 0.6,
        sector: None,
    };
    assert_eq!(desert.sector_at(0, 0), SectorType::Desert);
    assert!(desert.temperature(0, 0) >= 216);

    let unpenalized_blend = unpenalized_water_blend(&desert, 0, 0);
    let water = config(ResourceKind::Water);
    let baseline = (unpenalized_blend * water.base_multiplier).clamp(0.0, 1.0) * 0.8;

    let mut sampler = ResourceSampler::default();
    let sampled = sampler.sample(&desert, ResourceKind::Water, 0, 0, at(6, 12, t0()));
    assert!(sampled <= 0.1 * baseline, "{sampled} vs baseline {baseline}");
    assert!((aridity_factor(30.0, 60) - 0.05).abs() < f32::EPSILON);
}

#[test]
fn harvest_depletes_then_recovers_monotonically() {
    let fields = PerlinFields::new(7, 1024);
    let mut sampler = ResourceSampler::default();
    let mut rng = SmallRng::seed_from_u64(42);
    let spot = Coord::new(120, 64);
    let pre = sampler.sample(&fields, ResourceKind::Herbs, spot.x, spot.y, at(4, 10, t0()));

    let outcome = sampler
        .harvest(&fields, ResourceKind::Herbs, spot, 0.6, at(4, 10, t0()), &mut rng)
        .unwrap();
    assert!((outcome.level_before - pre).abs() < f32::EPSILON);

    let just_after = sampler.sample(
        &fields,
        ResourceKind::Herbs,
        spot.x,
        spot.y,
        at(4, 10, t0() + Duration::seconds(1)),
    );
    assert!(just_after <= pre);

    let mut previous = just_after;
    for hours in [1, 2, 4, 6, 9, 12] {
        let level = sampler.sample(
            &fields,
            ResourceKind::Herbs,
            spot.x,
            spot.y,
            at(4, 10, t0() + Duration::hours(hours)),
        );
        assert!(level >= previous, "regressed at {hours}h");
        assert!(level <= pre + f32::EPSILON);
        previous = level;
    }
    // Herbs recover 10% of the consumed amount per hour; by hour 12 the
    // node has fully regenerated.
    assert!((previous - pre).abs() < 1e-6);
}

#[test]
fn ledger_snapshot_survives_restart() {
    let fields = UniformFields::default();
    let mut sampler = ResourceSampler::default();
    let mut rng = SmallRng::seed_from_u64(3);
    let spot = Coord::new(-8, 8);
    sampler
        .harvest(&fields, ResourceKind::Stone, spot, 0.5, at(0, 12, t0()), &mut rng)
        .unwrap();
    let depleted = sampler.sample(&fields, ResourceKind::Stone, spot.x, spot.y, at(0, 12, t0()));

    let records = sampler.ledger().snapshot();
    let mut restarted = ResourceSampler::default();
    assert_eq!(restarted.ledger_mut().restore(&records).ok(), Some(1));
    let restored = restarted.sample(&fields, ResourceKind::Stone, spot.x, spot.y, at(0, 12, t0()));
    assert_eq!(depleted.to_bits(), restored.to_bits());
}

#[test]
fn maintenance_clears_expired_state() {
    let fields = UniformFields::default();
    let mut sampler = ResourceSampler::default();
    let mut rng = SmallRng::seed_from_u64(5);
    sampler
        .harvest(&fields, ResourceKind::Water, Coord::new(1, 1), 0.3, at(0, 12, t0()), &mut rng)
        .unwrap();
    let later = t0() + Duration::hours(6);
    let (cells, nodes) = sampler.maintain(later, Duration::days(7));
    assert_eq!(cells, 1);
    assert_eq!(nodes, 1);
    assert!(sampler.ledger().is_empty());
    assert!(sampler.cache().is_empty());
}
