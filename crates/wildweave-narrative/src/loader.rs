//! Hint loading with contextual weighting and caching.
//!
//! [`HintLoader`] is the only path from a [`HintSource`] to the weaver. A
//! miss issues one query, weights each row by its seasonal and time-of-day
//! blobs, drops rows below the relevance floor, rewrites the text into
//! observational voice and stores the batch in the [`HintCache`]. Source
//! failures are logged and read as "no hints".

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use wildweave_types::{HintWeather, RegionHint, RegionId, RegionProfile, Season, SunState, TimeCategory};

use crate::hint_cache::{HintBatch, HintCache, HintCacheConfig, HintCacheKey, HintCacheStats};
use crate::source::HintSource;
use crate::{voice, weights};

/// A shared hint with the weight it earned in the current context.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedHint {
    /// The shared, immutable record.
    pub hint: Arc<RegionHint>,
    /// Seasonal weight times time-of-day weight.
    pub weight: f64,
}

/// Tuning for [`HintLoader`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoaderConfig {
    /// Maximum rows requested per query.
    pub limit: usize,
    /// Rows weighted below this are dropped.
    pub relevance_floor: f64,
    /// Cache tuning, shared by the profile cache.
    pub cache: HintCacheConfig,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            limit: 20,
            relevance_floor: 0.25,
            cache: HintCacheConfig::default(),
        }
    }
}

/// Everything a hint lookup is keyed and weighted on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HintQuery {
    /// Region to load.
    pub region: RegionId,
    /// Weather condition, also the row filter tag.
    pub weather: HintWeather,
    /// Time category.
    pub time: TimeCategory,
    /// Sun state, consulted when a blob has no category key.
    pub sun: SunState,
    /// Season.
    pub season: Season,
    /// Ecological health of the surrounding area, `[0, 1]`.
    pub health: f32,
}

impl HintQuery {
    const fn key(&self) -> HintCacheKey {
        HintCacheKey {
            region: self.region,
            weather: self.weather,
            time: self.time,
            season: self.season,
        }
    }
}

/// Loader and cache of region hints and profiles.
#[derive(Debug, Default)]
pub struct HintLoader {
    config: LoaderConfig,
    cache: HintCache,
    profiles: HashMap<RegionId, (RegionProfile, DateTime<Utc>)>,
}

impl HintLoader {
    /// Loader with empty caches.
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            cache: HintCache::new(config.cache),
            profiles: HashMap::new(),
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Weighted hints for `query`, from the cache when possible.
    ///
    /// Returns `None` when the source fails or no row qualifies. Empty
    /// results are not cached.
    pub fn load_hints<S>(&mut self, source: &S, query: &HintQuery, now: DateTime<Utc>) -> Option<HintBatch>
    where
        S: HintSource + ?Sized,
    {
        let key = query.key();
        if let Some(batch) = self.cache.get(&key, query.health, now) {
            tracing::debug!(region = %query.region, hints = batch.len(), "Hint cache hit");
            return Some(batch);
        }

        let rows = match source.fetch_hints(query.region, query.weather.as_str(), self.config.limit) {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(region = %query.region, error = %err, "Hint query failed");
                return None;
            }
        };

        let weighted: Vec<WeightedHint> = rows
            .into_iter()
            .filter_map(|row| self.weigh(row, query))
            .collect();
        if weighted.is_empty() {
            tracing::debug!(region = %query.region, weather = query.weather.as_str(), "No qualifying hints");
            return None;
        }

        tracing::debug!(region = %query.region, hints = weighted.len(), "Loaded hints");
        let batch: HintBatch = Arc::from(weighted);
        self.cache.insert(key, query.health, Arc::clone(&batch), now);
        Some(batch)
    }

    fn weigh(&self, mut row: RegionHint, query: &HintQuery) -> Option<WeightedHint> {
        if !row.active || row.text.trim().is_empty() {
            return None;
        }
        let weight = weights::seasonal(&row.seasonal_weights, query.season)
            * weights::time_of_day(&row.time_weights, query.time, query.sun);
        if weight < self.config.relevance_floor {
            tracing::debug!(hint = %row.id, weight, "Hint below relevance floor");
            return None;
        }
        row.text = voice::to_observational(row.text.trim());
        Some(WeightedHint {
            hint: Arc::new(row),
            weight,
        })
    }

    /// The region's profile, or a neutral one when none is stored or the
    /// source fails. Found profiles are cached with the hint TTL.
    pub fn profile<S>(&mut self, source: &S, region: RegionId, now: DateTime<Utc>) -> RegionProfile
    where
        S: HintSource + ?Sized,
    {
        let ttl = self.config.cache.ttl;
        if let Some((profile, stored_at)) = self.profiles.get(&region)
            && now.signed_duration_since(*stored_at) <= ttl
        {
            return profile.clone();
        }

        match source.fetch_profile(region) {
            Ok(Some(profile)) => {
                self.profiles.insert(region, (profile.clone(), now));
                profile
            }
            Ok(None) => RegionProfile::neutral(region),
            Err(err) => {
                tracing::warn!(region = %region, error = %err, "Profile query failed");
                RegionProfile::neutral(region)
            }
        }
    }

    /// Drop expired hint batches and profiles. Returns how many were removed.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> usize {
        let ttl = self.config.cache.ttl;
        let before = self.profiles.len();
        self.profiles
            .retain(|_, (_, stored_at)| now.signed_duration_since(*stored_at) <= ttl);
        self.cache
            .sweep(now)
            .saturating_add(before.saturating_sub(self.profiles.len()))
    }

    /// Drop every cached batch and profile.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.profiles.clear();
    }

    /// Hint cache counters.
    pub fn stats(&self, now: DateTime<Utc>) -> HintCacheStats {
        self.cache.stats(now)
    }

    /// Profiles currently cached.
    pub fn cached_profiles(&self) -> usize {
        self.profiles.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;
    use serde_json::json;
    use wildweave_types::{DescriptionStyle, HintCategory, HintId};

    use super::*;
    use crate::error::SourceError;
    use crate::source::InMemoryHintSource;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn hint(id: i64, text: &str, seasonal: serde_json::Value) -> RegionHint {
        RegionHint {
            id: HintId::new(id),
            region: RegionId::new(7),
            category: HintCategory::Atmosphere,
            text: text.to_owned(),
            priority: 5,
            weather_conditions: String::new(),
            seasonal_weights: seasonal,
            time_weights: serde_json::Value::Null,
            resource_triggers: serde_json::Value::Null,
            created_at: t0(),
            active: true,
        }
    }

    fn query() -> HintQuery {
        HintQuery {
            region: RegionId::new(7),
            weather: HintWeather::Clear,
            time: TimeCategory::Morning,
            sun: SunState::Light,
            season: Season::Spring,
            health: 0.5,
        }
    }

    struct FailingSource;

    impl HintSource for FailingSource {
        fn fetch_hints(&self, _: RegionId, _: &str, _: usize) -> Result<Vec<RegionHint>, SourceError> {
            Err(SourceError::Timeout(250))
        }

        fn fetch_profile(&self, _: RegionId) -> Result<Option<RegionProfile>, SourceError> {
            Err(SourceError::Unavailable("offline".to_owned()))
        }

        fn fetch_region_description(&self, _: RegionId) -> Result<Option<String>, SourceError> {
            Ok(None)
        }
    }

    #[test]
    fn rows_below_floor_are_dropped_and_voice_normalized() {
        let source = InMemoryHintSource::new()
            .with_hint(hint(1, "You hear birdsong.", json!({"spring": 1.2})))
            .with_hint(hint(2, "Frost rimes the reeds.", json!({"spring": 0.1})))
            .with_hint(hint(3, "   ", serde_json::Value::Null));
        let mut loader = HintLoader::default();
        let batch = loader.load_hints(&source, &query(), t0()).unwrap();
        assert_eq!(batch.len(), 1);
        let first = batch.first().unwrap();
        assert_eq!(first.hint.id, HintId::new(1));
        assert_eq!(first.hint.text, "The area hear birdsong.");
        assert!((first.weight - 1.2).abs() < 1e-9);
    }

    #[test]
    fn second_load_is_served_from_cache() {
        let source = InMemoryHintSource::new().with_hint(hint(1, "Mist pools low.", json!({})));
        let mut loader = HintLoader::default();
        let first = loader.load_hints(&source, &query(), t0()).unwrap();
        let mut near = query();
        near.health = 0.52;
        let second = loader.load_hints(&source, &near, t0() + Duration::seconds(5)).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.stats(t0()).hits, 1);
    }

    #[test]
    fn failures_and_empty_results_yield_none() {
        let mut loader = HintLoader::default();
        assert!(loader.load_hints(&FailingSource, &query(), t0()).is_none());
        let empty = InMemoryHintSource::new();
        assert!(loader.load_hints(&empty, &query(), t0()).is_none());
        assert_eq!(loader.stats(t0()).entries, 0);
    }

    #[test]
    fn profiles_fall_back_to_neutral_and_cache_hits() {
        let mut loader = HintLoader::default();
        let neutral = loader.profile(&FailingSource, RegionId::new(7), t0());
        assert_eq!(neutral, RegionProfile::neutral(RegionId::new(7)));

        let stored = RegionProfile {
            region: RegionId::new(7),
            theme: "old growth".to_owned(),
            dominant_mood: "serene".to_owned(),
            key_characteristics: json!({"mood": "tranquil"}),
            style: DescriptionStyle::Pastoral,
            complexity: 4,
        };
        let source = InMemoryHintSource::new().with_profile(stored.clone());
        assert_eq!(loader.profile(&source, RegionId::new(7), t0()), stored);
        assert_eq!(loader.cached_profiles(), 1);
        assert_eq!(loader.sweep(t0() + Duration::seconds(400)), 1);
        assert_eq!(loader.cached_profiles(), 0);
    }
}
