//! The description pipeline.
//!
//! [`DescriptionPipeline`] owns every cache the stages need (spatial
//! resource cache, harvest ledger, hint cache, profile cache) and wires the
//! stages together:
//!
//! 1. Environmental context for the room or coordinate.
//! 2. Resource levels through the spatial cache and harvest ledger.
//! 3. Base description from the template pools.
//! 4. Region lookup, hint loading and weaving.
//!
//! Every public operation degrades instead of failing: a missing region, an
//! unavailable hint source or an empty hint batch makes the stage return
//! `None`, and the caller falls back to the next-simpler text.
//!
//! Randomness is derived per request from the world seed, the coordinate
//! and the absolute game hour, so the same tile at the same hour with the
//! same cache state always reads the same.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use wildweave_narrative::{
    HintCacheStats, HintLoader, HintQuery, HintSource, HintUsage, HintWeaver, RegionIndex,
    WeaveContext, finish, primary_region, select_and_format,
};
use wildweave_types::{Coord, GameTime, RegionNeighbor, RegionRef, ResourceKind, RoomVnum};
use wildweave_world::{
    CacheStats, CharacterView, EnvironmentFields, EnvironmentalContext, HarvestOutcome,
    HarvestRecord, Moment, PerlinFields, ResourceSampler, RoomView, Survey, WorldError,
    resource_map,
};

use crate::clock::{ClockError, GameClock};
use crate::config::EngineConfig;

/// Text shown when every strategy fails.
pub const FALLBACK_DESCRIPTION: &str = "You see nothing special.";

/// Unified descriptions this short are treated as failures.
const MIN_UNIFIED_LEN: usize = 10;

/// Boxed hint source shared by the pipeline.
pub type DynHintSource = Box<dyn HintSource + Send + Sync>;

/// Boxed region index shared by the pipeline.
pub type DynRegionIndex = Box<dyn RegionIndex + Send + Sync>;

/// Counters across every pipeline cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Spatial resource cache.
    pub resource_cache: CacheStats,
    /// Hint batch cache.
    pub hint_cache: HintCacheStats,
    /// Region profiles cached.
    pub cached_profiles: usize,
    /// Coordinates with harvest state.
    pub harvest_nodes: usize,
    /// Current absolute game hour.
    pub absolute_hour: u64,
}

/// What a maintenance pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MaintenanceReport {
    /// Expired resource cache cells.
    pub resource_cells: usize,
    /// Regenerated or stale harvest nodes.
    pub harvest_nodes: usize,
    /// Expired hint batches and profiles.
    pub hint_entries: usize,
}

/// Everything needed to weave hints at one coordinate.
struct HintScene {
    region: RegionRef,
    env: EnvironmentalContext,
    at: Coord,
}

/// The wilderness description pipeline.
pub struct DescriptionPipeline<F> {
    config: EngineConfig,
    fields: F,
    sampler: ResourceSampler,
    loader: HintLoader,
    weaver: HintWeaver,
    source: DynHintSource,
    regions: DynRegionIndex,
    clock: GameClock,
    pinned_wall: Option<DateTime<Utc>>,
}

impl<F> core::fmt::Debug for DescriptionPipeline<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DescriptionPipeline")
            .field("seed", &self.config.world.seed)
            .field("absolute_hour", &self.clock.absolute_hour())
            .field("harvest_nodes", &self.sampler.ledger().len())
            .finish_non_exhaustive()
    }
}

impl DescriptionPipeline<PerlinFields> {
    /// Pipeline over Perlin fields built from the configured seed and extent.
    pub fn with_perlin(config: EngineConfig, source: DynHintSource, regions: DynRegionIndex) -> Self {
        let seed = config.world.seed;
        let folded = (seed ^ (seed >> 32)) & u64::from(u32::MAX);
        let fields = PerlinFields::new(u32::try_from(folded).unwrap_or(0), config.world.half_extent);
        Self::new(config, fields, source, regions)
    }
}

impl<F: EnvironmentFields> DescriptionPipeline<F> {
    /// Assemble a pipeline with empty caches, at hour zero.
    pub fn new(config: EngineConfig, fields: F, source: DynHintSource, regions: DynRegionIndex) -> Self {
        let sampler = ResourceSampler::new(config.resources.cache_config());
        let loader = HintLoader::new(config.hints.loader_config());
        let weaver = HintWeaver::new(config.weaver.weaver_config());
        Self {
            config,
            fields,
            sampler,
            loader,
            weaver,
            source,
            regions,
            clock: GameClock::default(),
            pinned_wall: None,
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The environment fields.
    pub const fn fields(&self) -> &F {
        &self.fields
    }

    /// The game clock.
    pub const fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// Move the game clock to `clock` and let the fields catch up.
    pub fn set_clock(&mut self, clock: GameClock) {
        self.clock = clock;
        self.fields.advance_to(&clock.now());
    }

    /// Advance the game clock by `hours`.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::HourOverflow`] if the counter would overflow.
    pub fn advance_hours(&mut self, hours: u64) -> Result<GameTime, ClockError> {
        let time = self.clock.advance_by(hours)?;
        self.fields.advance_to(&time);
        Ok(time)
    }

    /// Freeze wall-clock time at `at`; `None` follows the system clock.
    pub fn pin_wall_clock(&mut self, at: Option<DateTime<Utc>>) {
        self.pinned_wall = at;
    }

    fn wall_now(&self) -> DateTime<Utc> {
        self.pinned_wall.unwrap_or_else(Utc::now)
    }

    fn moment(&self) -> Moment {
        Moment::new(self.clock.now(), self.wall_now())
    }

    fn request_rng(&self, at: Coord) -> StdRng {
        StdRng::seed_from_u64(request_seed(self.config.world.seed, at, self.clock.absolute_hour()))
    }

    // -----------------------------------------------------------------------
    // Description operations
    // -----------------------------------------------------------------------

    /// Base description for a wilderness room, without hints.
    ///
    /// Returns `None` for a room without wilderness coordinates.
    pub fn generate_resource_aware_description(
        &mut self,
        viewer: &CharacterView,
        room: &RoomView,
    ) -> Option<String> {
        let Some(at) = room.wilderness_coords() else {
            tracing::warn!(vnum = %room.vnum, "Description requested for a room without coordinates");
            return None;
        };
        let room = with_viewer(room, viewer);
        let moment = self.moment();
        let mut rng = self.request_rng(at);
        let env = EnvironmentalContext::build(&room, &self.fields, &moment.game, &mut rng)?;
        let levels = self.sampler.levels_at(&self.fields, at.x, at.y, moment);
        select_and_format(&room, &levels, &env, &mut rng)
    }

    /// Weave region hints into an existing base description.
    ///
    /// Returns `None` when no region encloses the coordinate or no hint
    /// qualifies; the caller should then show `base` as is.
    pub fn enhance_base_description_with_hints(
        &mut self,
        base: &str,
        viewer: &CharacterView,
        zone: i32,
        x: i32,
        y: i32,
    ) -> Option<String> {
        let scene = self.scene(Some(viewer), zone, x, y)?;
        let mut rng = self.request_rng(scene.at);
        self.weave_scene(base, &scene, &mut rng)
    }

    /// Full pipeline from a coordinate alone.
    ///
    /// The region's authored description is preferred as the base text;
    /// without one the generated base is used. Returns `None` when no region
    /// encloses the coordinate.
    pub fn create_unified_wilderness_description(&mut self, zone: i32, x: i32, y: i32) -> Option<String> {
        let scene = self.scene(None, zone, x, y)?;
        let mut rng = self.request_rng(scene.at);

        let authored = match self.source.fetch_region_description(scene.region.id) {
            Ok(text) => text.filter(|text| !text.trim().is_empty()),
            Err(err) => {
                tracing::warn!(region = %scene.region.id, error = %err, "Region description query failed");
                None
            }
        };
        let base = if let Some(text) = authored {
            finish(text)
        } else {
            let room = self.wilderness_room(zone, scene.at, None);
            let moment = self.moment();
            let levels = self.sampler.levels_at(&self.fields, x, y, moment);
            select_and_format(&room, &levels, &scene.env, &mut rng)?
        };

        Some(self.weave_scene(&base, &scene, &mut rng).unwrap_or(base))
    }

    /// Best available description for a wilderness coordinate.
    ///
    /// Tries the unified description, then the hint-enhanced generated
    /// base, then the generated base, then [`FALLBACK_DESCRIPTION`].
    pub fn describe_wilderness(&mut self, viewer: &CharacterView, zone: i32, x: i32, y: i32) -> String {
        if let Some(text) = self
            .create_unified_wilderness_description(zone, x, y)
            .filter(|text| text.len() > MIN_UNIFIED_LEN)
        {
            tracing::debug!(x, y, len = text.len(), "Unified description");
            return text;
        }

        let room = self.wilderness_room(zone, Coord::new(x, y), Some(viewer));
        let Some(base) = self.generate_resource_aware_description(viewer, &room) else {
            return FALLBACK_DESCRIPTION.to_owned();
        };
        self.enhance_base_description_with_hints(&base, viewer, zone, x, y)
            .unwrap_or(base)
    }

    fn wilderness_room(&self, zone: i32, at: Coord, viewer: Option<&CharacterView>) -> RoomView {
        let mut room = RoomView::wilderness(RoomVnum::new(0), zone, at, self.fields.sector_at(at.x, at.y));
        room.occupants.extend(viewer.cloned());
        room
    }

    /// Region and context for a hint weave, or `None` when no region
    /// encloses the coordinate.
    fn scene(&mut self, viewer: Option<&CharacterView>, zone: i32, x: i32, y: i32) -> Option<HintScene> {
        let regions = match self.regions.enclosing_regions(zone, x, y) {
            Ok(regions) => regions,
            Err(err) => {
                tracing::warn!(zone, x, y, error = %err, "Region lookup failed");
                return None;
            }
        };
        let Some(region) = primary_region(&regions).filter(|region| region.id.is_valid()).cloned() else {
            tracing::debug!(zone, x, y, "No enclosing region");
            return None;
        };

        let at = Coord::new(x, y);
        let room = self.wilderness_room(zone, at, viewer);
        let mut rng = self.request_rng(at);
        let env = EnvironmentalContext::build(&room, &self.fields, &self.clock.now(), &mut rng)?;
        tracing::debug!(region = %region.id, x, y, weather = env.hint_weather().as_str(), "Resolved region");
        Some(HintScene { region, env, at })
    }

    /// Load, select and weave hints for a scene, reporting usage.
    fn weave_scene(&mut self, base: &str, scene: &HintScene, rng: &mut StdRng) -> Option<String> {
        let moment = self.moment();
        let at = scene.at;
        let levels = self.sampler.levels_at(&self.fields, at.x, at.y, moment);
        let health = self
            .sampler
            .area_health(&self.fields, at.x, at.y, self.config.world.health_radius, moment);

        let env = &scene.env;
        let query = HintQuery {
            region: scene.region.id,
            weather: env.hint_weather(),
            time: env.time_category(),
            sun: env.sun,
            season: env.season,
            health,
        };
        let batch = self.loader.load_hints(self.source.as_ref(), &query, moment.wall)?;
        let profile = self.loader.profile(self.source.as_ref(), scene.region.id, moment.wall);
        let neighbors = self.neighbors(at);

        let ctx = WeaveContext {
            env,
            levels: &levels,
            health,
            at,
            profile: &profile,
            neighbors: &neighbors,
        };
        let outcome = self.weaver.weave_detailed(base, &batch, &ctx, rng);
        if outcome.used.is_empty() {
            return None;
        }

        for hint in &outcome.used {
            let usage = HintUsage {
                hint: hint.id,
                region: hint.region,
                category: hint.category,
                at,
                weather: query.weather.as_str().to_owned(),
                season: query.season,
                time: query.time,
                used_at: moment.wall,
            };
            if let Err(err) = self.source.record_usage(&usage) {
                tracing::warn!(hint = %hint.id, error = %err, "Failed to record hint usage");
            }
        }
        Some(outcome.text)
    }

    fn neighbors(&self, at: Coord) -> Vec<RegionNeighbor> {
        let radius = self.config.weaver.transition_radius;
        self.regions.neighbors(at.x, at.y, radius).unwrap_or_else(|err| {
            tracing::warn!(x = at.x, y = at.y, error = %err, "Neighbour lookup failed");
            Vec::new()
        })
    }

    // -----------------------------------------------------------------------
    // Resources and harvesting
    // -----------------------------------------------------------------------

    /// Level of one resource kind at a coordinate.
    pub fn resource_level(&mut self, kind: ResourceKind, x: i32, y: i32) -> f32 {
        let moment = self.moment();
        self.sampler.sample(&self.fields, kind, x, y, moment)
    }

    /// Level of the resource kind at `index`; unknown indexes yield 0.0.
    pub fn resource_level_by_index(&mut self, index: usize, x: i32, y: i32) -> f32 {
        let moment = self.moment();
        self.sampler.sample_index(&self.fields, index, x, y, moment)
    }

    /// Harvest `amount` of `kind` at a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidHarvestAmount`] for a negative or
    /// non-finite amount.
    pub fn harvest(&mut self, kind: ResourceKind, x: i32, y: i32, amount: f32) -> Result<HarvestOutcome, WorldError> {
        let at = Coord::new(x, y);
        let moment = self.moment();
        let mut rng = self.request_rng(at);
        self.sampler.harvest(&self.fields, kind, at, amount, moment, &mut rng)
    }

    /// Harvest state for persistence.
    pub fn harvest_snapshot(&self) -> Vec<HarvestRecord> {
        self.sampler.ledger().snapshot()
    }

    /// Restore persisted harvest state.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CorruptHarvestRecord`] for a record out of
    /// range; records before it stay restored.
    pub fn restore_harvest(&mut self, records: &[HarvestRecord]) -> Result<usize, WorldError> {
        self.sampler.ledger_mut().restore(records)
    }

    // -----------------------------------------------------------------------
    // Operator surfaces
    // -----------------------------------------------------------------------

    /// Resource survey at a coordinate.
    pub fn survey(&mut self, x: i32, y: i32) -> Survey {
        let moment = self.moment();
        Survey::take(&mut self.sampler, &self.fields, Coord::new(x, y), moment)
    }

    /// ASCII abundance map of one kind around a coordinate.
    pub fn resource_map(&mut self, kind: ResourceKind, x: i32, y: i32, radius: i32) -> String {
        let moment = self.moment();
        resource_map(&mut self.sampler, &self.fields, kind, Coord::new(x, y), radius, moment)
    }

    /// Counters across every cache.
    pub fn stats(&self) -> PipelineStats {
        let now = self.wall_now();
        PipelineStats {
            resource_cache: self.sampler.cache_stats(now),
            hint_cache: self.loader.stats(now),
            cached_profiles: self.loader.cached_profiles(),
            harvest_nodes: self.sampler.ledger().len(),
            absolute_hour: self.clock.absolute_hour(),
        }
    }

    /// Sweep expired cache entries and stale harvest nodes.
    pub fn maintain(&mut self) -> MaintenanceReport {
        let now = self.wall_now();
        let (resource_cells, harvest_nodes) =
            self.sampler.maintain(now, self.config.resources.harvest_max_age());
        let hint_entries = self.loader.sweep(now);
        let report = MaintenanceReport {
            resource_cells,
            harvest_nodes,
            hint_entries,
        };
        tracing::info!(resource_cells, harvest_nodes, hint_entries, "Pipeline maintenance");
        report
    }

    /// Drop every cached resource cell, hint batch and profile. Harvest
    /// state is kept.
    pub fn clear_caches(&mut self) {
        self.sampler.clear_cache();
        self.loader.clear();
    }
}

/// Add the viewer to the room's occupants unless already present.
fn with_viewer<'a>(room: &'a RoomView, viewer: &CharacterView) -> Cow<'a, RoomView> {
    if room.occupants.contains(viewer) {
        Cow::Borrowed(room)
    } else {
        let mut room = room.clone();
        room.occupants.push(viewer.clone());
        Cow::Owned(room)
    }
}

/// Mix the world seed, a coordinate and an hour into a request seed.
pub fn request_seed(seed: u64, at: Coord, absolute_hour: u64) -> u64 {
    let x = u64::from_le_bytes(i64::from(at.x).to_le_bytes());
    let y = u64::from_le_bytes(i64::from(at.y).to_le_bytes());
    [x, y, absolute_hour]
        .into_iter()
        .fold(mix(seed), |state, part| mix(state ^ mix(part)))
}

/// `SplitMix64` finalizer.
const fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
