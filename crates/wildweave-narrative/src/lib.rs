//! Description text for the Wildweave pipeline.
//!
//! This crate turns resource levels and an environmental context into
//! prose: a base description assembled from curated templates and detail
//! clauses, then optionally enriched with authored region hints that are
//! loaded, weighted, cached, scored and woven into the base text.
//!
//! # Modules
//!
//! - [`base`] -- Opening sentence selection and clause assembly.
//! - [`clauses`] -- Vegetation, geology, water, elevation, atmosphere and
//!   wildlife clauses.
//! - [`error`] -- [`SourceError`] for hint sources and region indexes.
//! - [`hint_cache`] -- [`HintCache`]: TTL cache of shared hint batches
//!   keyed by region, weather, time and season with health tolerance.
//! - [`loader`] -- [`HintLoader`]: query, weight, normalize and cache.
//! - [`pools`] -- Template pools by terrain family and abundance tier.
//! - [`relevance`] -- Weather, mood, boundary and health scoring.
//! - [`select`] -- Weighted random choice and bounded template retries.
//! - [`semantic`] -- Narrative element extraction and reconstruction.
//! - [`source`] -- The [`HintSource`] and [`RegionIndex`] seams with
//!   in-memory implementations and the offline fixture format.
//! - [`style`] -- Per-style vocabulary.
//! - [`template`] -- Named-placeholder templates.
//! - [`voice`] -- Observational voice normalization.
//! - [`weaver`] -- [`HintWeaver`]: category slots and weaving.
//! - [`weights`] -- Seasonal, time-of-day and resource-trigger blobs.

pub mod base;
pub mod clauses;
pub mod error;
pub mod hint_cache;
pub mod loader;
pub mod pools;
pub mod relevance;
pub mod select;
pub mod semantic;
pub mod source;
pub mod style;
pub mod template;
pub mod voice;
pub mod weaver;
pub mod weights;

#[cfg(test)]
mod fixtures;

// Re-export primary types at crate root.
pub use base::{finish, select_and_format};
pub use error::SourceError;
pub use hint_cache::{HintBatch, HintCache, HintCacheConfig, HintCacheKey, HintCacheStats};
pub use loader::{HintLoader, HintQuery, LoaderConfig, WeightedHint};
pub use pools::TerrainFamily;
pub use source::{
    FixtureRegion, HintFixture, HintSource, HintUsage, InMemoryHintSource, RectRegion,
    RectRegionIndex, RegionIndex, primary_region,
};
pub use template::Template;
pub use weaver::{HintWeaver, Slot, WeaveContext, WeaveOutcome, WeaverConfig};
