//! Resources, harvest state, and environment for the Wildweave pipeline.
//!
//! This crate answers "what is here, and what is it like right now" for a
//! wilderness coordinate: continuous resource abundance derived from
//! coherent noise fields, a grid-snapped spatial cache over those values,
//! per-coordinate harvest depletion with lazy regeneration, and the
//! per-request environmental context consumed by the description stages.
//!
//! # Modules
//!
//! - [`cache`] -- Two-dimensional binary tree memoizing per-cell levels
//!   with a TTL and capacity sweeps.
//! - [`environment`] -- [`EnvironmentalContext`] builder: weather, calendar,
//!   light, terrain and elevation for one request.
//! - [`error`] -- Error types for harvest and index operations.
//! - [`fields`] -- The [`EnvironmentFields`] seam plus Perlin and constant
//!   implementations.
//! - [`harvest`] -- [`HarvestLedger`] with linear regeneration and
//!   persistence records.
//! - [`resource`] -- Static per-kind configuration, seasonal and weather
//!   modifiers, quality rolls.
//! - [`room`] -- Read-only room, character and item views.
//! - [`sampler`] -- [`ResourceSampler`]: blend, modifiers, cache and
//!   depletion.
//! - [`survey`] -- Operator surveys and ASCII abundance maps.

pub mod cache;
pub mod environment;
pub mod error;
pub mod fields;
pub mod harvest;
pub mod resource;
pub mod room;
pub mod sampler;
pub mod survey;

// Re-export primary types at crate root.
pub use cache::{CacheConfig, CacheStats, SpatialResourceCache};
pub use environment::EnvironmentalContext;
pub use error::WorldError;
pub use fields::{EnvironmentFields, PerlinFields, UniformFields};
pub use harvest::{HarvestLedger, HarvestRecord};
pub use resource::{RESOURCE_CONFIGS, ResourceConfig, config};
pub use room::{CharacterView, ItemView, RoomView};
pub use sampler::{HarvestOutcome, Moment, ResourceSampler};
pub use survey::{Survey, abundance_word, resource_map};
