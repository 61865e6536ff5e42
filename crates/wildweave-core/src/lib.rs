//! Configuration, game clock, and orchestration for Wildweave.
//!
//! This crate assembles the resource, environment and narrative stages
//! into the description pipeline a game server calls when a player looks
//! around the wilderness.
//!
//! # Modules
//!
//! - [`clock`] -- Game clock deriving calendar, season and sun state from
//!   an absolute hour counter.
//! - [`config`] -- Configuration loading from `wildweave.yaml` into
//!   strongly-typed structs.
//! - [`pipeline`] -- [`DescriptionPipeline`]: base, enhanced and unified
//!   descriptions, harvesting, surveys and cache maintenance.
//!
//! [`DescriptionPipeline`]: pipeline::DescriptionPipeline

pub mod clock;
pub mod config;
pub mod pipeline;

// Re-export primary types at crate root.
pub use clock::{ClockError, GameClock};
pub use config::{ConfigError, EngineConfig, LogFormat};
pub use pipeline::{
    DescriptionPipeline, DynHintSource, DynRegionIndex, FALLBACK_DESCRIPTION, MaintenanceReport,
    PipelineStats,
};
