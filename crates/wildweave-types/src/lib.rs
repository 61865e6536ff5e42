//! Shared type definitions for the Wildweave description pipeline.
//!
//! This crate is the single source of truth for the taxonomy shared by the
//! sampler, the template selector, the hint loader and the weaver. Every
//! parallel classification (sector types, hint categories, resource kinds)
//! is an enum here so downstream matches stay exhaustive.
//!
//! # Modules
//!
//! - [`ids`] -- Integer identifier newtypes (regions, hints, rooms)
//! - [`enums`] -- Enumeration types (resources, sectors, weather, hints)
//! - [`structs`] -- Records shared across crates (hints, profiles, levels)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    AbundanceTier, DescriptionStyle, HarvestSkill, HintCategory, HintWeather, RegionKind,
    ResourceKind, ResourceQuality, SectorType, Season, Sky, SunState, TimeCategory,
    WeatherBucket,
};
pub use ids::{HintId, RegionId, RoomVnum};
pub use structs::{
    Coord, GameTime, RegionHint, RegionNeighbor, RegionProfile, RegionRef, ResourceLevels,
};
