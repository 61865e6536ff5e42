//! Resource level sampling.
//!
//! A level is produced in three stages:
//!
//! 1. [`environmental_blend`]: a per-kind mix of elevation, moisture,
//!    temperature and detail noise, before any tuning.
//! 2. [`environmental_level`]: the blend scaled by the kind's base
//!    multiplier, clamped, then adjusted for the season and the weather.
//!    This is what the spatial cache memoizes per cell.
//! 3. [`ResourceSampler::levels_at`]: the cached cell levels multiplied by
//!    the harvest depletion factor at the exact coordinate.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use wildweave_types::{Coord, GameTime, ResourceKind, ResourceLevels, ResourceQuality};

use crate::cache::{CacheConfig, CacheStats, SpatialResourceCache};
use crate::error::WorldError;
use crate::fields::{EnvironmentFields, celsius_from_raw};
use crate::harvest::HarvestLedger;
use crate::resource::{config, kind_from_index, roll_quality, seasonal_modifier, weather_modifier};

/// Temperature at which living resources are most comfortable.
const COMFORT_CELSIUS: f32 = 18.0;
/// Distance from [`COMFORT_CELSIUS`] at which comfort reaches zero.
const COMFORT_SPAN: f32 = 30.0;
/// Normalized elevation above which trees thin out.
const TREE_LINE: f32 = 0.75;

/// Game time and wall-clock time of one request.
///
/// Game time drives seasonal effects; wall-clock time drives cache expiry
/// and harvest regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    /// In-game calendar position.
    pub game: GameTime,
    /// Real time.
    pub wall: DateTime<Utc>,
}

impl Moment {
    /// Bundle a game time and a wall-clock time.
    pub const fn new(game: GameTime, wall: DateTime<Utc>) -> Self {
        Self { game, wall }
    }
}

// ---------------------------------------------------------------------------
// Environmental blend
// ---------------------------------------------------------------------------

/// Environmental inputs at one coordinate, normalized.
#[derive(Debug, Clone, Copy)]
struct Inputs {
    elevation: f32,
    moisture: f32,
    moisture_raw: u8,
    celsius: f32,
}

impl Inputs {
    fn read(fields: &impl EnvironmentFields, x: i32, y: i32) -> Self {
        let moisture_raw = fields.moisture(x, y);
        Self {
            elevation: f32::from(fields.elevation(x, y)) / 255.0,
            moisture: f32::from(moisture_raw) / 255.0,
            moisture_raw,
            celsius: celsius_from_raw(fields.temperature(x, y)),
        }
    }

    fn comfort(&self) -> f32 {
        (1.0 - (self.celsius - COMFORT_CELSIUS).abs() / COMFORT_SPAN).clamp(0.0, 1.0)
    }

    fn heat(&self) -> f32 {
        ((self.celsius + 30.0) / 65.0).clamp(0.0, 1.0)
    }

    /// Preference for mid elevations, 1.0 at the midpoint.
    fn mid_elevation(&self) -> f32 {
        let offset = self.elevation - 0.5;
        (4.0 * offset).mul_add(-offset, 1.0).max(0.0)
    }

    fn vegetation(&self, micro: f32) -> f32 {
        0.35 * self.moisture + 0.3 * self.mid_elevation() + 0.2 * self.comfort() + 0.15 * micro
    }
}

fn micro(fields: &impl EnvironmentFields, kind: ResourceKind, x: i32, y: i32) -> f32 {
    let cfg = config(kind);
    let value = fields.detail_noise(cfg.noise_layer, x, y, cfg.noise_frequency);
    // Detail noise is in [0, 1]; f32 precision is plenty.
    #[allow(clippy::cast_possible_truncation)]
    let value = value.clamp(0.0, 1.0) as f32;
    value
}

/// Multiplier applied to water in hot, dry terrain.
///
/// Hot (at least 25 °C) with raw moisture under 80 gives 0.05; warm (at
/// least 20 °C) with raw moisture under 110 gives 0.10.
pub fn aridity_factor(celsius: f32, moisture_raw: u8) -> f32 {
    if celsius >= 25.0 && moisture_raw < 80 {
        0.05
    } else if celsius >= 20.0 && moisture_raw < 110 {
        0.10
    } else {
        1.0
    }
}

/// Water blend with no aridity penalty.
pub fn unpenalized_water_blend(fields: &impl EnvironmentFields, x: i32, y: i32) -> f32 {
    let inputs = Inputs::read(fields, x, y);
    water_blend(&inputs, micro(fields, ResourceKind::Water, x, y))
}

fn water_blend(inputs: &Inputs, micro: f32) -> f32 {
    0.5 * inputs.moisture + 0.3 * (1.0 - inputs.elevation) + 0.2 * micro
}

/// The raw per-kind blend of environmental inputs, before tuning.
pub fn environmental_blend(fields: &impl EnvironmentFields, kind: ResourceKind, x: i32, y: i32) -> f32 {
    let inputs = Inputs::read(fields, x, y);
    let micro = micro(fields, kind, x, y);
    let blend = match kind {
        ResourceKind::Vegetation => inputs.vegetation(micro),
        ResourceKind::Minerals => {
            0.6 * inputs.elevation + 0.25 * micro + 0.15 * (1.0 - inputs.moisture)
        }
        ResourceKind::Water => {
            water_blend(&inputs, micro) * aridity_factor(inputs.celsius, inputs.moisture_raw)
        }
        ResourceKind::Herbs => {
            let base = 0.4 * inputs.moisture + 0.3 * inputs.comfort() + 0.3 * micro;
            if inputs.elevation > 0.8 { base * 0.5 } else { base }
        }
        ResourceKind::Game => {
            let cover = inputs.vegetation(micro);
            0.4 * cover + 0.3 * inputs.moisture + 0.3 * micro
        }
        ResourceKind::Wood => {
            let cover = inputs.vegetation(micro);
            let tree_line = if inputs.elevation < TREE_LINE { 1.0 } else { 0.4 };
            (cover * tree_line).mul_add(0.7, 0.3 * micro)
        }
        ResourceKind::Stone => {
            0.5 * inputs.elevation + 0.3 * micro + 0.2 * (1.0 - inputs.moisture)
        }
        ResourceKind::Clay => {
            let lowland = inputs.moisture * (1.0 - inputs.elevation);
            let band = 1.0 - (inputs.elevation - 0.3).abs();
            0.5 * lowland + 0.3 * micro + 0.2 * band
        }
        ResourceKind::Salt => 0.4 * inputs.heat() + 0.3 * (1.0 - inputs.moisture) + 0.3 * micro,
    };
    blend.clamp(0.0, 1.0)
}

/// Environmental level of a kind: blend, base multiplier, season and
/// weather, each stage clamped to `[0, 1]`.
pub fn environmental_level(
    fields: &impl EnvironmentFields,
    kind: ResourceKind,
    x: i32,
    y: i32,
    month: u8,
) -> f32 {
    let scaled = (environmental_blend(fields, kind, x, y) * config(kind).base_multiplier).clamp(0.0, 1.0);
    let seasonal = seasonal_modifier(kind, month);
    let weather = weather_modifier(kind, fields.weather(x, y));
    (scaled * seasonal * weather).clamp(0.0, 1.0)
}

/// Environmental levels of every kind at one coordinate.
pub fn environmental_levels(fields: &impl EnvironmentFields, x: i32, y: i32, month: u8) -> ResourceLevels {
    ResourceLevels::from_array(
        ResourceKind::ALL.map(|kind| environmental_level(fields, kind, x, y, month)),
    )
}

// ---------------------------------------------------------------------------
// Sampler
// ---------------------------------------------------------------------------

/// Result of a successful harvest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HarvestOutcome {
    /// Harvested kind.
    pub kind: ResourceKind,
    /// Level before the harvest.
    pub level_before: f32,
    /// Level right after the harvest.
    pub level_after: f32,
    /// Quality rolled for the yield.
    pub quality: ResourceQuality,
}

/// Resource sampler with its spatial cache and harvest ledger.
#[derive(Debug, Default)]
pub struct ResourceSampler {
    cache: SpatialResourceCache,
    ledger: HarvestLedger,
}

impl ResourceSampler {
    /// Create a sampler with an empty cache and ledger.
    pub fn new(cache: CacheConfig) -> Self {
        Self {
            cache: SpatialResourceCache::new(cache),
            ledger: HarvestLedger::new(),
        }
    }

    /// The spatial cache.
    pub const fn cache(&self) -> &SpatialResourceCache {
        &self.cache
    }

    /// The harvest ledger.
    pub const fn ledger(&self) -> &HarvestLedger {
        &self.ledger
    }

    /// Mutable harvest ledger, for restoring persisted state.
    pub const fn ledger_mut(&mut self) -> &mut HarvestLedger {
        &mut self.ledger
    }

    /// Cache counters.
    pub fn cache_stats(&self, now: DateTime<Utc>) -> CacheStats {
        self.cache.stats(now)
    }

    /// Levels of every kind at `(x, y)`, depletion applied.
    pub fn levels_at(
        &mut self,
        fields: &impl EnvironmentFields,
        x: i32,
        y: i32,
        moment: Moment,
    ) -> ResourceLevels {
        let month = moment.game.month;
        let cell_levels = self.cache.get_or_compute(x, y, moment.wall, |cell| {
            environmental_levels(fields, cell.x, cell.y, month)
        });
        let at = Coord::new(x, y);
        let mut levels = cell_levels;
        for (kind, level) in cell_levels.iter() {
            levels.set(kind, level * self.ledger.depletion_factor(kind, at, moment.wall));
        }
        levels
    }

    /// Level of one kind at `(x, y)`.
    pub fn sample(
        &mut self,
        fields: &impl EnvironmentFields,
        kind: ResourceKind,
        x: i32,
        y: i32,
        moment: Moment,
    ) -> f32 {
        self.levels_at(fields, x, y, moment).get(kind)
    }

    /// Level of the kind at `index`; an unknown index yields 0.0.
    pub fn sample_index(
        &mut self,
        fields: &impl EnvironmentFields,
        index: usize,
        x: i32,
        y: i32,
        moment: Moment,
    ) -> f32 {
        match kind_from_index(index) {
            Ok(kind) => self.sample(fields, kind, x, y, moment),
            Err(err) => {
                tracing::warn!(x, y, error = %err, "Invalid resource kind index");
                0.0
            }
        }
    }

    /// Ecological health averaged over a square of `radius` around
    /// `(x, y)`, each sample weighted by linear distance falloff.
    pub fn area_health(
        &mut self,
        fields: &impl EnvironmentFields,
        x: i32,
        y: i32,
        radius: i32,
        moment: Moment,
    ) -> f32 {
        let radius = radius.clamp(0, 8);
        let reach = f64::from(radius) + 1.0;
        let center = Coord::new(x, y);
        let mut total = 0.0_f64;
        let mut weights = 0.0_f64;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let at = Coord::new(x.saturating_add(dx), y.saturating_add(dy));
                let weight = (1.0 - center.distance_to(at) / reach).max(0.0);
                if weight <= 0.0 {
                    continue;
                }
                let health = self.levels_at(fields, at.x, at.y, moment).ecological_health();
                total += f64::from(health) * weight;
                weights += weight;
            }
        }
        if weights <= 0.0 {
            return 0.0;
        }
        // A weighted mean of values in [0, 1].
        #[allow(clippy::cast_possible_truncation)]
        let health = (total / weights) as f32;
        health.clamp(0.0, 1.0)
    }

    /// Harvest `amount` of `kind` at a coordinate.
    ///
    /// The quality of the yield is rolled against the pre-harvest level.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidHarvestAmount`] for a negative or
    /// non-finite amount.
    pub fn harvest(
        &mut self,
        fields: &impl EnvironmentFields,
        kind: ResourceKind,
        at: Coord,
        amount: f32,
        moment: Moment,
        rng: &mut impl Rng,
    ) -> Result<HarvestOutcome, WorldError> {
        let level_before = self.sample(fields, kind, at.x, at.y, moment);
        let quality = roll_quality(kind, level_before, rng);
        self.ledger.harvest(kind, at, amount, moment.wall)?;
        let level_after = self.sample(fields, kind, at.x, at.y, moment);
        tracing::info!(
            x = at.x,
            y = at.y,
            resource = kind.as_str(),
            level_before,
            level_after,
            quality = quality.as_str(),
            "Harvested resource"
        );
        Ok(HarvestOutcome {
            kind,
            level_before,
            level_after,
            quality,
        })
    }

    /// Expire cache entries and drop stale harvest nodes.
    ///
    /// Returns `(cache entries removed, harvest nodes removed)`.
    pub fn maintain(&mut self, now: DateTime<Utc>, harvest_max_age: Duration) -> (usize, usize) {
        let cells = self.cache.sweep(now);
        let nodes = self.ledger.sweep(now, harvest_max_age);
        (cells, nodes)
    }

    /// Drop every cached cell. Harvest state is kept.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
