//! Time-bounded cache of loaded hint batches.
//!
//! Entries are keyed by region, weather condition, time category and
//! season. Resource health is continuous, so each key holds a short chain
//! of entries and a lookup matches the first one whose stored health lies
//! within the configured tolerance. Batches are shared: a hit hands out an
//! `Arc` clone, never a copy of the hints.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use wildweave_types::{HintWeather, RegionId, Season, TimeCategory};

use crate::loader::WeightedHint;

/// A shared, immutable batch of weighted hints.
pub type HintBatch = Arc<[WeightedHint]>;

/// Tuning for [`HintCache`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HintCacheConfig {
    /// How long a batch stays valid.
    pub ttl: Duration,
    /// Maximum number of entries across all keys.
    pub capacity: usize,
    /// Two healths closer than this share an entry.
    pub health_tolerance: f32,
}

impl Default for HintCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::seconds(300),
            capacity: 100,
            health_tolerance: 0.05,
        }
    }
}

/// Discrete part of a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HintCacheKey {
    /// Region the hints belong to.
    pub region: RegionId,
    /// Weather condition.
    pub weather: HintWeather,
    /// Time category.
    pub time: TimeCategory,
    /// Season.
    pub season: Season,
}

#[derive(Debug, Clone)]
struct Entry {
    health: f32,
    batch: HintBatch,
    stored_at: DateTime<Utc>,
}

/// Counters reported by [`HintCache::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HintCacheStats {
    /// Entries currently held.
    pub entries: usize,
    /// Entries past their TTL.
    pub expired: usize,
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that found nothing valid.
    pub misses: u64,
}

/// Hint batch cache with TTL and capacity sweeps.
#[derive(Debug, Default)]
pub struct HintCache {
    config: HintCacheConfig,
    entries: HashMap<HintCacheKey, Vec<Entry>>,
    hits: u64,
    misses: u64,
}

impl HintCache {
    /// Empty cache.
    pub fn new(config: HintCacheConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &HintCacheConfig {
        &self.config
    }

    /// Entries held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Whether no entries are held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, stored_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(stored_at) <= self.config.ttl
    }

    fn same_bucket(&self, a: f32, b: f32) -> bool {
        (a - b).abs() < self.config.health_tolerance
    }

    /// Look up a batch.
    pub fn get(&mut self, key: &HintCacheKey, health: f32, now: DateTime<Utc>) -> Option<HintBatch> {
        let found = self.entries.get(key).and_then(|chain| {
            chain
                .iter()
                .find(|entry| {
                    self.same_bucket(entry.health, health) && self.is_fresh(entry.stored_at, now)
                })
                .map(|entry| Arc::clone(&entry.batch))
        });
        if found.is_some() {
            self.hits = self.hits.saturating_add(1);
        } else {
            self.misses = self.misses.saturating_add(1);
        }
        found
    }

    /// Store a batch, sweeping and evicting first when at capacity.
    pub fn insert(&mut self, key: HintCacheKey, health: f32, batch: HintBatch, now: DateTime<Utc>) {
        if self.len() >= self.config.capacity {
            let swept = self.sweep(now);
            tracing::debug!(swept, "Hint cache at capacity, swept expired entries");
            while self.len() >= self.config.capacity && self.evict_oldest() {}
        }

        let tolerance = self.config.health_tolerance;
        let chain = self.entries.entry(key).or_default();
        chain.retain(|entry| (entry.health - health).abs() >= tolerance);
        chain.push(Entry {
            health,
            batch,
            stored_at: now,
        });
    }

    /// Drop expired entries. Returns how many were removed.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> usize {
        let ttl = self.config.ttl;
        let mut removed = 0_usize;
        self.entries.retain(|_, chain| {
            let before = chain.len();
            chain.retain(|entry| now.signed_duration_since(entry.stored_at) <= ttl);
            removed = removed.saturating_add(before.saturating_sub(chain.len()));
            !chain.is_empty()
        });
        removed
    }

    fn evict_oldest(&mut self) -> bool {
        let oldest = self
            .entries
            .iter()
            .flat_map(|(key, chain)| {
                chain
                    .iter()
                    .enumerate()
                    .map(move |(index, entry)| (*key, index, entry.stored_at))
            })
            .min_by_key(|(_, _, stored_at)| *stored_at);
        let Some((key, index, _)) = oldest else {
            return false;
        };
        if let Some(chain) = self.entries.get_mut(&key) {
            if index < chain.len() {
                chain.remove(index);
            }
            if chain.is_empty() {
                self.entries.remove(&key);
            }
        }
        true
    }

    /// Drop everything and reset counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Current counters.
    pub fn stats(&self, now: DateTime<Utc>) -> HintCacheStats {
        let expired = self
            .entries
            .values()
            .flatten()
            .filter(|entry| !self.is_fresh(entry.stored_at, now))
            .count();
        HintCacheStats {
            entries: self.len(),
            expired,
            hits: self.hits,
            misses: self.misses,
        }
    }
}
