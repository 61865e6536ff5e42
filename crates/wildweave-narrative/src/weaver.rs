//! Contextual hint weaving.
//!
//! The weaver walks a fixed list of category slots. Each slot fires with
//! its own probability and, when it fires, draws one unused hint from its
//! candidates by composite relevance. The picks are then woven into the
//! base description, semantically when the hints carry enough narrative
//! signal and by plain concatenation otherwise, and finally passed through
//! the region's style vocabulary.

use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;
use wildweave_types::{Coord, HintCategory, HintId, HintWeather, RegionHint, RegionNeighbor, RegionProfile, ResourceLevels};
use wildweave_world::EnvironmentalContext;

use crate::base::finish;
use crate::loader::WeightedHint;
use crate::relevance::{self, MoodField, Scoring};
use crate::select::weighted_index;
use crate::semantic::{self, NarrativeElements, SEMANTIC_THRESHOLD};
use crate::style::{STYLE_COMPLEXITY_THRESHOLD, apply_style};

/// Weather relevance a non-weather hint needs to fill the weather slot.
pub const WEATHER_SLOT_RELEVANCE: f64 = 1.2;

/// Tuning for [`HintWeaver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaverConfig {
    /// Integration weight needed for semantic weaving.
    pub semantic_threshold: f64,
    /// Tile edge length for boundary proximity.
    pub tile_size: i32,
    /// Radius over which neighbouring regions blend in.
    pub transition_radius: f64,
    /// Minimum profile complexity for style vocabulary.
    pub style_complexity: u8,
}

impl Default for WeaverConfig {
    fn default() -> Self {
        Self {
            semantic_threshold: SEMANTIC_THRESHOLD,
            tile_size: 64,
            transition_radius: 32.0,
            style_complexity: STYLE_COMPLEXITY_THRESHOLD,
        }
    }
}

/// Category slots, in weaving order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Always fires.
    Atmosphere,
    /// Fires whenever the sky is not clear.
    Weather,
    /// Wildlife.
    Fauna,
    /// Plant life.
    Flora,
    /// Sounds and scents.
    Senses,
    /// Seasonal changes.
    Seasonal,
    /// Time-of-day details.
    TimeOfDay,
    /// The uncanny.
    Mystical,
}

impl Slot {
    /// Every slot in weaving order.
    pub const ORDER: [Self; 8] = [
        Self::Atmosphere,
        Self::Weather,
        Self::Fauna,
        Self::Flora,
        Self::Senses,
        Self::Seasonal,
        Self::TimeOfDay,
        Self::Mystical,
    ];

    /// Probability that the slot fires.
    pub const fn chance(self) -> f64 {
        match self {
            Self::Atmosphere | Self::Weather => 1.0,
            Self::Fauna => 0.66,
            Self::Flora | Self::Senses | Self::TimeOfDay => 0.5,
            Self::Seasonal | Self::Mystical => 0.33,
        }
    }

    /// Whether `hint` may fill this slot; `weather` is its weather
    /// relevance.
    pub fn admits(self, hint: &RegionHint, weather: f64) -> bool {
        match self {
            Self::Atmosphere => hint.category == HintCategory::Atmosphere,
            Self::Weather => {
                hint.category == HintCategory::WeatherInfluence
                    || (matches!(
                        hint.category,
                        HintCategory::Atmosphere | HintCategory::Sounds | HintCategory::Flora
                    ) && weather > WEATHER_SLOT_RELEVANCE)
            }
            Self::Fauna => hint.category == HintCategory::Fauna,
            Self::Flora => hint.category == HintCategory::Flora,
            Self::Senses => matches!(hint.category, HintCategory::Sounds | HintCategory::Scents),
            Self::Seasonal => hint.category == HintCategory::SeasonalChanges,
            Self::TimeOfDay => hint.category == HintCategory::TimeOfDay,
            Self::Mystical => hint.category == HintCategory::Mystical,
        }
    }
}

/// Where and for whom a weave happens.
#[derive(Debug, Clone, Copy)]
pub struct WeaveContext<'a> {
    /// Environmental context of the request.
    pub env: &'a EnvironmentalContext,
    /// Resource levels at the coordinate.
    pub levels: &'a ResourceLevels,
    /// Area ecological health.
    pub health: f32,
    /// The coordinate.
    pub at: Coord,
    /// Profile of the hints' region.
    pub profile: &'a RegionProfile,
    /// Regions near the coordinate.
    pub neighbors: &'a [RegionNeighbor],
}

/// Result of a weave, with the hints that went into it.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaveOutcome {
    /// Final text.
    pub text: String,
    /// Selected hints, in slot order.
    pub used: Vec<Arc<RegionHint>>,
    /// Whether semantic integration was used.
    pub semantic: bool,
}

/// Scores, selects and weaves hints.
#[derive(Debug, Clone, Copy, Default)]
pub struct HintWeaver {
    config: WeaverConfig,
}

impl HintWeaver {
    /// Weaver with the given tuning.
    pub const fn new(config: WeaverConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub const fn config(&self) -> &WeaverConfig {
        &self.config
    }

    /// Weave `hints` into `base`. Empty hints return `base` unchanged.
    pub fn weave(&self, base: &str, hints: &[WeightedHint], ctx: &WeaveContext<'_>, rng: &mut impl Rng) -> String {
        self.weave_detailed(base, hints, ctx, rng).text
    }

    /// Like [`weave`](Self::weave), also reporting what was used.
    pub fn weave_detailed(
        &self,
        base: &str,
        hints: &[WeightedHint],
        ctx: &WeaveContext<'_>,
        rng: &mut impl Rng,
    ) -> WeaveOutcome {
        let unchanged = || WeaveOutcome {
            text: base.to_owned(),
            used: Vec::new(),
            semantic: false,
        };
        if hints.is_empty() {
            return unchanged();
        }

        let used = self.select(hints, ctx, rng);
        if used.is_empty() {
            tracing::debug!(x = ctx.at.x, y = ctx.at.y, "No hint slot filled");
            return unchanged();
        }

        let env = ctx.env;
        let elements = NarrativeElements::extract(&used, ctx.profile, env.season, env.time_category());
        let semantic = elements.is_sufficient(self.config.semantic_threshold);
        let woven = if semantic {
            semantic::integrate(base, &used, &elements, ctx.profile, env.time_category())
        } else {
            concatenate(base, &used)
        };
        let text = apply_style(
            &woven,
            ctx.profile.style,
            ctx.profile.complexity,
            self.config.style_complexity,
        );

        tracing::debug!(
            x = ctx.at.x,
            y = ctx.at.y,
            hints = used.len(),
            semantic,
            weight = elements.weight,
            "Wove hints"
        );
        WeaveOutcome { text, used, semantic }
    }

    /// Run the slots and return the picked hints in slot order.
    pub fn select(&self, hints: &[WeightedHint], ctx: &WeaveContext<'_>, rng: &mut impl Rng) -> Vec<Arc<RegionHint>> {
        let env = ctx.env;
        let own = ctx.profile.region;
        let mood = MoodField::new(&ctx.profile.key_characteristics).with_neighbors(
            own,
            ctx.neighbors,
            self.config.transition_radius,
        );
        let scoring = Scoring {
            season: env.season,
            time: env.time_category(),
            sun: env.sun,
            weather: env.weather,
            levels: ctx.levels,
            health: ctx.health,
            boundary: relevance::boundary_proximity(ctx.at.x, ctx.at.y, self.config.tile_size),
            mood: &mood,
        };
        let scores: Vec<f64> = hints.iter().map(|hint| relevance::composite(hint, &scoring)).collect();
        let weather_scores: Vec<f64> = hints
            .iter()
            .map(|hint| relevance::weather_relevance(&hint.hint.text, env.weather))
            .collect();
        let cloudy = env.hint_weather() != HintWeather::Clear;

        let mut used_ids: HashSet<HintId> = HashSet::new();
        let mut picked = Vec::new();
        for slot in Slot::ORDER {
            if slot == Slot::Weather && !cloudy {
                continue;
            }
            if !rng.random_bool(slot.chance()) {
                continue;
            }
            let candidates: Vec<(usize, f64)> = hints
                .iter()
                .zip(scores.iter().zip(&weather_scores))
                .enumerate()
                .filter(|(_, (hint, (_, weather)))| {
                    !used_ids.contains(&hint.hint.id) && slot.admits(&hint.hint, **weather)
                })
                .map(|(index, (_, (score, _)))| (index, *score))
                .collect();
            let weights: Vec<f64> = candidates.iter().map(|(_, score)| *score).collect();
            let Some(choice) = weighted_index(&weights, rng).and_then(|at| candidates.get(at)) else {
                continue;
            };
            if let Some(hint) = hints.get(choice.0) {
                used_ids.insert(hint.hint.id);
                picked.push(Arc::clone(&hint.hint));
            }
        }
        picked
    }
}

/// Append hints to `base` as plain sentences.
pub fn concatenate(base: &str, hints: &[Arc<RegionHint>]) -> String {
    let mut out = base.trim().to_owned();
    for hint in hints {
        let text = hint.text.trim();
        if text.is_empty() {
            continue;
        }
        if !out.is_empty() {
            if !out.ends_with(['.', '!', '?']) {
                out.push('.');
            }
            out.push(' ');
        }
        out.push_str(text);
    }
    finish(semantic::clean(&out))
}
