//! Static resource configuration and the modifiers applied on top of the
//! environmental blend.
//!
//! The configuration table is immutable for the life of the process. The
//! seasonal table is keyed by month quarter (months 0-2 winter, 3-5
//! spring, 6-8 summer, 9-11 autumn), which is deliberately offset from the
//! narrative season so that growth lags the calendar by a month.

use rand::Rng;
use wildweave_types::{HarvestSkill, ResourceKind, ResourceQuality};

use crate::error::WorldError;

/// Static tuning for one resource kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceConfig {
    /// Which detail-noise layer drives micro-variation.
    pub noise_layer: u32,
    /// Frequency of the detail noise.
    pub noise_frequency: f64,
    /// Scales the environmental blend before clamping.
    pub base_multiplier: f32,
    /// Fraction of the consumed amount recovered per real hour.
    pub regen_rate_per_hour: f32,
    /// Fraction of the available level one harvest removes.
    pub depletion_rate: f32,
    /// Percent spread used when rolling quality.
    pub quality_variance: u8,
    /// Whether the seasonal table applies.
    pub seasonal_affected: bool,
    /// Whether the weather table applies.
    pub weather_affected: bool,
    /// Skill used to harvest.
    pub harvest_skill: HarvestSkill,
    /// Display name.
    pub name: &'static str,
    /// One-line description for survey output.
    pub description: &'static str,
}

/// The configuration table, in [`ResourceKind`] index order.
pub const RESOURCE_CONFIGS: [ResourceConfig; ResourceKind::COUNT] = [
    ResourceConfig {
        noise_layer: 0,
        noise_frequency: 0.05,
        base_multiplier: 1.0,
        regen_rate_per_hour: 0.2,
        depletion_rate: 0.8,
        quality_variance: 20,
        seasonal_affected: true,
        weather_affected: true,
        harvest_skill: HarvestSkill::Foresting,
        name: "vegetation",
        description: "General plant cover: grasses, shrubs and undergrowth",
    },
    ResourceConfig {
        noise_layer: 1,
        noise_frequency: 0.09,
        base_multiplier: 0.3,
        regen_rate_per_hour: 0.01,
        depletion_rate: 0.9,
        quality_variance: 30,
        seasonal_affected: false,
        weather_affected: false,
        harvest_skill: HarvestSkill::Mining,
        name: "minerals",
        description: "Ore and metal-bearing rock",
    },
    ResourceConfig {
        noise_layer: 2,
        noise_frequency: 0.03,
        base_multiplier: 1.2,
        regen_rate_per_hour: 0.5,
        depletion_rate: 0.6,
        quality_variance: 10,
        seasonal_affected: false,
        weather_affected: true,
        harvest_skill: HarvestSkill::Survival,
        name: "water",
        description: "Fresh water from springs, streams and pools",
    },
    ResourceConfig {
        noise_layer: 3,
        noise_frequency: 0.12,
        base_multiplier: 0.4,
        regen_rate_per_hour: 0.1,
        depletion_rate: 0.7,
        quality_variance: 40,
        seasonal_affected: true,
        weather_affected: true,
        harvest_skill: HarvestSkill::Foresting,
        name: "herbs",
        description: "Medicinal and culinary plants",
    },
    ResourceConfig {
        noise_layer: 4,
        noise_frequency: 0.04,
        base_multiplier: 0.6,
        regen_rate_per_hour: 0.15,
        depletion_rate: 0.5,
        quality_variance: 25,
        seasonal_affected: true,
        weather_affected: false,
        harvest_skill: HarvestSkill::Hunting,
        name: "game",
        description: "Animals that can be hunted",
    },
    ResourceConfig {
        noise_layer: 5,
        noise_frequency: 0.06,
        base_multiplier: 0.8,
        regen_rate_per_hour: 0.05,
        depletion_rate: 0.9,
        quality_variance: 15,
        seasonal_affected: true,
        weather_affected: false,
        harvest_skill: HarvestSkill::Foresting,
        name: "wood",
        description: "Timber suitable for building and fuel",
    },
    ResourceConfig {
        noise_layer: 6,
        noise_frequency: 0.07,
        base_multiplier: 0.5,
        regen_rate_per_hour: 0.005,
        depletion_rate: 0.95,
        quality_variance: 5,
        seasonal_affected: false,
        weather_affected: false,
        harvest_skill: HarvestSkill::Mining,
        name: "stone",
        description: "Building stone and loose rock",
    },
    ResourceConfig {
        noise_layer: 7,
        noise_frequency: 0.08,
        base_multiplier: 0.3,
        regen_rate_per_hour: 0.02,
        depletion_rate: 0.8,
        quality_variance: 15,
        seasonal_affected: false,
        weather_affected: true,
        harvest_skill: HarvestSkill::Mining,
        name: "clay",
        description: "Workable clay from banks and lowland beds",
    },
    ResourceConfig {
        noise_layer: 8,
        noise_frequency: 0.1,
        base_multiplier: 0.2,
        regen_rate_per_hour: 0.03,
        depletion_rate: 0.7,
        quality_variance: 20,
        seasonal_affected: false,
        weather_affected: true,
        harvest_skill: HarvestSkill::Survival,
        name: "salt",
        description: "Salt crusts, flats and brine",
    },
];

/// Configuration for a kind.
pub const fn config(kind: ResourceKind) -> &'static ResourceConfig {
    match kind {
        ResourceKind::Vegetation => &RESOURCE_CONFIGS[0],
        ResourceKind::Minerals => &RESOURCE_CONFIGS[1],
        ResourceKind::Water => &RESOURCE_CONFIGS[2],
        ResourceKind::Herbs => &RESOURCE_CONFIGS[3],
        ResourceKind::Game => &RESOURCE_CONFIGS[4],
        ResourceKind::Wood => &RESOURCE_CONFIGS[5],
        ResourceKind::Stone => &RESOURCE_CONFIGS[6],
        ResourceKind::Clay => &RESOURCE_CONFIGS[7],
        ResourceKind::Salt => &RESOURCE_CONFIGS[8],
    }
}

/// Resolve a raw resource index.
///
/// # Errors
///
/// Returns [`WorldError::UnknownResource`] for an index past the last kind.
pub const fn kind_from_index(index: usize) -> Result<ResourceKind, WorldError> {
    match ResourceKind::from_index(index) {
        Some(kind) => Ok(kind),
        None => Err(WorldError::UnknownResource(index)),
    }
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Month quarter used by the seasonal table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quarter {
    Winter,
    Spring,
    Summer,
    Autumn,
}

const fn quarter(month: u8) -> Quarter {
    match month % 12 {
        0..=2 => Quarter::Winter,
        3..=5 => Quarter::Spring,
        6..=8 => Quarter::Summer,
        _ => Quarter::Autumn,
    }
}

/// Seasonal multiplier for a kind in a zero-based month.
///
/// Returns 1.0 for kinds whose configuration is not seasonal.
pub fn seasonal_modifier(kind: ResourceKind, month: u8) -> f32 {
    if !config(kind).seasonal_affected {
        return 1.0;
    }
    let q = quarter(month);
    match kind {
        ResourceKind::Vegetation | ResourceKind::Herbs => match q {
            Quarter::Winter => 0.3,
            Quarter::Spring => 1.8,
            Quarter::Summer => 1.2,
            Quarter::Autumn => 0.7,
        },
        ResourceKind::Game => match q {
            Quarter::Winter => 0.5,
            Quarter::Spring => 1.3,
            Quarter::Summer => 1.0,
            Quarter::Autumn => 1.1,
        },
        ResourceKind::Wood => match q {
            Quarter::Winter => 0.8,
            Quarter::Spring => 1.2,
            Quarter::Summer | Quarter::Autumn => 1.0,
        },
        ResourceKind::Minerals
        | ResourceKind::Water
        | ResourceKind::Stone
        | ResourceKind::Clay
        | ResourceKind::Salt => 1.0,
    }
}

/// Weather multiplier for a kind at a raw weather intensity.
///
/// Returns 1.0 for kinds whose configuration is not weather-affected.
pub fn weather_modifier(kind: ResourceKind, weather: u8) -> f32 {
    if !config(kind).weather_affected {
        return 1.0;
    }
    match kind {
        ResourceKind::Water => match weather {
            226..=255 => 2.0,
            201..=225 => 1.5,
            178..=200 => 1.2,
            _ => 0.8,
        },
        ResourceKind::Vegetation | ResourceKind::Herbs => match weather {
            201..=255 => 1.1,
            178..=200 => 1.05,
            _ => 1.0,
        },
        ResourceKind::Clay => {
            if weather >= 178 {
                1.3
            } else {
                1.0
            }
        }
        ResourceKind::Salt => {
            if weather >= 178 {
                0.7
            } else {
                1.0
            }
        }
        ResourceKind::Minerals | ResourceKind::Game | ResourceKind::Wood | ResourceKind::Stone => {
            1.0
        }
    }
}

// ---------------------------------------------------------------------------
// Quality
// ---------------------------------------------------------------------------

/// Roll the quality of a harvest from the local level and the kind's
/// configured variance.
pub fn roll_quality(kind: ResourceKind, level: f32, rng: &mut impl Rng) -> ResourceQuality {
    let variance = f32::from(config(kind).quality_variance) / 100.0;
    let spread: f32 = rng.random_range(-1.0..=1.0);
    let score = spread.mul_add(variance, level.clamp(0.0, 1.0));
    if score >= 0.95 {
        ResourceQuality::Legendary
    } else if score >= 0.8 {
        ResourceQuality::Rare
    } else if score >= 0.6 {
        ResourceQuality::Uncommon
    } else if score >= 0.3 {
        ResourceQuality::Common
    } else {
        ResourceQuality::Poor
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn table_is_in_index_order() {
        for kind in ResourceKind::ALL {
            assert_eq!(config(kind).name, kind.as_str());
            assert_eq!(
                usize::try_from(config(kind).noise_layer).ok(),
                Some(kind.index())
            );
        }
    }

    #[test]
    fn index_resolution() {
        assert_eq!(kind_from_index(2).ok(), Some(ResourceKind::Water));
        assert!(matches!(kind_from_index(9), Err(WorldError::UnknownResource(9))));
    }

    #[test]
    fn vegetation_follows_the_quarters() {
        assert!((seasonal_modifier(ResourceKind::Vegetation, 1) - 0.3).abs() < f32::EPSILON);
        assert!((seasonal_modifier(ResourceKind::Vegetation, 4) - 1.8).abs() < f32::EPSILON);
        assert!((seasonal_modifier(ResourceKind::Vegetation, 7) - 1.2).abs() < f32::EPSILON);
        assert!((seasonal_modifier(ResourceKind::Vegetation, 10) - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn non_seasonal_kinds_are_neutral() {
        for month in 0..12 {
            assert!((seasonal_modifier(ResourceKind::Stone, month) - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn water_responds_to_storms() {
        assert!((weather_modifier(ResourceKind::Water, 240) - 2.0).abs() < f32::EPSILON);
        assert!((weather_modifier(ResourceKind::Water, 210) - 1.5).abs() < f32::EPSILON);
        assert!((weather_modifier(ResourceKind::Water, 180) - 1.2).abs() < f32::EPSILON);
        assert!((weather_modifier(ResourceKind::Water, 20) - 0.8).abs() < f32::EPSILON);
        assert!((weather_modifier(ResourceKind::Game, 240) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn quality_tracks_level() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            // Stone has a 5% variance, so a full node is never below rare.
            let quality = roll_quality(ResourceKind::Stone, 1.0, &mut rng);
            assert!(quality >= ResourceQuality::Rare);
            let quality = roll_quality(ResourceKind::Stone, 0.0, &mut rng);
            assert_eq!(quality, ResourceQuality::Poor);
        }
    }
}
