//! Shared builders for unit tests.

use wildweave_types::{ResourceKind, ResourceLevels, Season, SectorType, SunState};
use wildweave_world::EnvironmentalContext;

/// Clear-sky context at 100 m with no artificial light.
pub fn context(sector: SectorType, season: Season, sun: SunState, hour: u8) -> EnvironmentalContext {
    EnvironmentalContext {
        season,
        sun,
        hour,
        month: 3,
        weather: 40,
        light_level: 100,
        artificial_light: 0,
        natural_light: 100,
        has_light_sources: false,
        sector,
        elevation: 0.1,
        elevation_meters: 100.0,
        near_water: false,
        in_forest: sector.is_forest(),
        in_mountains: sector.is_mountainous(),
    }
}

/// Levels with the four description-driving kinds set.
pub fn levels(vegetation: f32, minerals: f32, water: f32, game: f32) -> ResourceLevels {
    let mut levels = ResourceLevels::default();
    levels.set(ResourceKind::Vegetation, vegetation);
    levels.set(ResourceKind::Minerals, minerals);
    levels.set(ResourceKind::Water, water);
    levels.set(ResourceKind::Game, game);
    levels
}
