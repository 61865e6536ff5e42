//! Grid-snapped spatial memo of sampled resource levels.
//!
//! Entries live in a two-dimensional binary tree that splits on `x` at even
//! depths and `y` at odd depths. The tree does not rebalance on insert; a
//! sweep rebuilds it from the surviving entries by median split, which keeps
//! lookups logarithmic between sweeps in practice.
//!
//! The cache only memoizes environmental values. Harvest depletion is
//! applied on top by the sampler per exact coordinate, so a harvest never
//! has to wait for a cell to expire.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use wildweave_types::{Coord, ResourceLevels};

/// Default cell edge length in coordinates.
pub const DEFAULT_GRID_SIZE: i32 = 10;
/// Default entry lifetime in seconds.
pub const DEFAULT_TTL_SECS: i64 = 300;
/// Default entry cap.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Tuning for a [`SpatialResourceCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Cell edge length; values below 1 are treated as 1.
    pub grid_size: i32,
    /// Entry lifetime.
    pub ttl: Duration,
    /// Entry count that triggers a sweep.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            ttl: Duration::seconds(DEFAULT_TTL_SECS),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Counters reported by [`SpatialResourceCache::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries currently stored.
    pub total_entries: usize,
    /// Stored entries past their TTL.
    pub expired_entries: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to compute.
    pub misses: u64,
}

/// One memoized grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    cell: Coord,
    levels: ResourceLevels,
    stored_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Node {
    entry: Entry,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    const fn leaf(entry: Entry) -> Self {
        Self {
            entry,
            left: None,
            right: None,
        }
    }
}

/// Whether `cell` sorts before `pivot` on the axis used at this depth.
const fn goes_left(cell: Coord, pivot: Coord, split_on_x: bool) -> bool {
    if split_on_x {
        cell.x < pivot.x
    } else {
        cell.y < pivot.y
    }
}

/// Spatial memo of per-cell resource levels.
#[derive(Debug)]
pub struct SpatialResourceCache {
    root: Option<Box<Node>>,
    len: usize,
    config: CacheConfig,
    hits: u64,
    misses: u64,
}

impl Default for SpatialResourceCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl SpatialResourceCache {
    /// Create an empty cache.
    pub const fn new(config: CacheConfig) -> Self {
        Self {
            root: None,
            len: 0,
            config,
            hits: 0,
            misses: 0,
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Snap a coordinate to its cell origin with floor division, so that
    /// negative coordinates share cells with their western/southern side.
    pub const fn snap(&self, x: i32, y: i32) -> Coord {
        let grid = if self.config.grid_size < 1 {
            1
        } else {
            self.config.grid_size
        };
        Coord::new(
            x.div_euclid(grid).saturating_mul(grid),
            y.div_euclid(grid).saturating_mul(grid),
        )
    }

    /// Number of stored entries, expired ones included.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing is stored.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Levels for the cell containing `(x, y)`, computing them with
    /// `compute` on a miss.
    ///
    /// `compute` receives the snapped cell origin, so every coordinate in a
    /// cell shares one set of values.
    pub fn get_or_compute<F>(&mut self, x: i32, y: i32, now: DateTime<Utc>, compute: F) -> ResourceLevels
    where
        F: FnOnce(Coord) -> ResourceLevels,
    {
        let cell = self.snap(x, y);
        if let Some(entry) = self.find(cell)
            && self.is_fresh(entry, now)
        {
            let levels = entry.levels;
            self.hits = self.hits.saturating_add(1);
            return levels;
        }

        self.misses = self.misses.saturating_add(1);
        let levels = compute(cell);
        self.store(Entry {
            cell,
            levels,
            stored_at: now,
        }, now);
        levels
    }

    /// Drop the cell containing `(x, y)` so the next lookup recomputes it.
    pub fn invalidate(&mut self, x: i32, y: i32) -> bool {
        let cell = self.snap(x, y);
        if self.find(cell).is_none() {
            return false;
        }
        let survivors: Vec<Entry> = self.entries().into_iter().filter(|e| e.cell != cell).collect();
        self.rebuild(survivors);
        true
    }

    /// Remove expired entries. Returns the number removed.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.len;
        let survivors: Vec<Entry> = self
            .entries()
            .into_iter()
            .filter(|entry| self.is_fresh(entry, now))
            .collect();
        self.rebuild(survivors);
        let removed = before.saturating_sub(self.len);
        if removed > 0 {
            tracing::debug!(removed, remaining = self.len, "Swept resource cache");
        }
        removed
    }

    /// Remove every entry and reset the counters.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
        self.hits = 0;
        self.misses = 0;
    }

    /// Entry counts and hit/miss counters.
    pub fn stats(&self, now: DateTime<Utc>) -> CacheStats {
        let entries = self.entries();
        let expired = entries.iter().filter(|entry| !self.is_fresh(entry, now)).count();
        CacheStats {
            total_entries: self.len,
            expired_entries: expired,
            hits: self.hits,
            misses: self.misses,
        }
    }

    fn is_fresh(&self, entry: &Entry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.stored_at) <= self.config.ttl
    }

    fn find(&self, cell: Coord) -> Option<&Entry> {
        let mut current = self.root.as_deref();
        let mut split_on_x = true;
        while let Some(node) = current {
            if node.entry.cell == cell {
                return Some(&node.entry);
            }
            current = if goes_left(cell, node.entry.cell, split_on_x) {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
            split_on_x = !split_on_x;
        }
        None
    }

    fn store(&mut self, entry: Entry, now: DateTime<Utc>) {
        let replacing = self.find(entry.cell).is_some();
        if !replacing && self.len >= self.config.max_entries {
            self.sweep(now);
            if self.len >= self.config.max_entries {
                self.evict_oldest();
            }
        }
        if insert(&mut self.root, entry, true) {
            self.len = self.len.saturating_add(1);
        }
    }

    fn evict_oldest(&mut self) {
        let mut entries = self.entries();
        let oldest = entries
            .iter()
            .enumerate()
            .min_by_key(|(_, entry)| entry.stored_at)
            .map(|(index, _)| index);
        if let Some(index) = oldest {
            let evicted = entries.swap_remove(index);
            tracing::debug!(x = evicted.cell.x, y = evicted.cell.y, "Evicted oldest resource cell");
            self.rebuild(entries);
        }
    }

    /// Every stored entry, in no particular order.
    fn entries(&self) -> Vec<Entry> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            out.push(node.entry);
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        out
    }

    fn rebuild(&mut self, mut entries: Vec<Entry>) {
        self.len = entries.len();
        self.root = build_balanced(&mut entries, true);
    }
}

/// Insert or replace. Returns `true` when a new node was created.
fn insert(slot: &mut Option<Box<Node>>, entry: Entry, split_on_x: bool) -> bool {
    match slot {
        None => {
            *slot = Some(Box::new(Node::leaf(entry)));
            true
        }
        Some(node) => {
            if node.entry.cell == entry.cell {
                node.entry = entry;
                return false;
            }
            if goes_left(entry.cell, node.entry.cell, split_on_x) {
                insert(&mut node.left, entry, !split_on_x)
            } else {
                insert(&mut node.right, entry, !split_on_x)
            }
        }
    }
}

/// Build a tree by median split on alternating axes.
fn build_balanced(entries: &mut [Entry], split_on_x: bool) -> Option<Box<Node>> {
    if entries.is_empty() {
        return None;
    }
    if split_on_x {
        entries.sort_unstable_by_key(|entry| (entry.cell.x, entry.cell.y));
    } else {
        entries.sort_unstable_by_key(|entry| (entry.cell.y, entry.cell.x));
    }
    let mut median = entries.len() / 2;
    // Equal keys on the split axis must land right of the pivot.
    while median > 0
        && entries
            .get(median.saturating_sub(1))
            .zip(entries.get(median))
            .is_some_and(|(before, at)| !goes_left(before.cell, at.cell, split_on_x))
    {
        median = median.saturating_sub(1);
    }
    let (left, rest) = entries.split_at_mut(median);
    let (pivot, right) = rest.split_first_mut()?;
    Some(Box::new(Node {
        entry: *pivot,
        left: build_balanced(left, !split_on_x),
        right: build_balanced(right, !split_on_x),
    }))
}

#[cfg(test)]
mod tests {
    use wildweave_types::ResourceKind;

    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
    }

    fn levels(value: f32) -> ResourceLevels {
        ResourceLevels::from_array([value; ResourceKind::COUNT])
    }

    #[test]
    fn snapping_uses_floor_division() {
        let cache = SpatialResourceCache::default();
        assert_eq!(cache.snap(15, 9), Coord::new(10, 0));
        assert_eq!(cache.snap(-1, -10), Coord::new(-10, -10));
        assert_eq!(cache.snap(-11, 0), Coord::new(-20, 0));
    }

    #[test]
    fn hit_within_ttl_miss_after() {
        let mut cache = SpatialResourceCache::default();
        let first = cache.get_or_compute(3, 4, t0(), |_| levels(0.5));
        let second = cache.get_or_compute(7, 1, t0() + Duration::seconds(300), |_| levels(0.9));
        assert_eq!(first, second);
        let stats = cache.stats(t0());
        assert_eq!((stats.hits, stats.misses), (1, 1));

        let third = cache.get_or_compute(3, 4, t0() + Duration::seconds(301), |_| levels(0.9));
        assert_eq!(third, levels(0.9));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn compute_receives_cell_origin() {
        let mut cache = SpatialResourceCache::default();
        let mut seen = None;
        let _ = cache.get_or_compute(-3, 27, t0(), |cell| {
            seen = Some(cell);
            levels(0.1)
        });
        assert_eq!(seen, Some(Coord::new(-10, 20)));
    }

    #[test]
    fn capacity_sweeps_expired_then_evicts_oldest() {
        let config = CacheConfig {
            grid_size: 1,
            ttl: Duration::seconds(10),
            max_entries: 3,
        };
        let mut cache = SpatialResourceCache::new(config);
        let _ = cache.get_or_compute(0, 0, t0(), |_| levels(0.1));
        let _ = cache.get_or_compute(1, 0, t0() + Duration::seconds(20), |_| levels(0.2));
        let _ = cache.get_or_compute(2, 0, t0() + Duration::seconds(21), |_| levels(0.3));
        // (0, 0) is expired and gets swept to make room.
        let _ = cache.get_or_compute(3, 0, t0() + Duration::seconds(22), |_| levels(0.4));
        assert_eq!(cache.len(), 3);
        // Nothing is expired now, so the oldest live entry (1, 0) goes.
        let _ = cache.get_or_compute(4, 0, t0() + Duration::seconds(23), |_| levels(0.5));
        assert_eq!(cache.len(), 3);
        let recomputed = cache.get_or_compute(1, 0, t0() + Duration::seconds(24), |_| levels(0.7));
        assert_eq!(recomputed, levels(0.7));
    }

    #[test]
    fn tree_lookup_survives_many_cells() {
        let config = CacheConfig {
            grid_size: 1,
            ..CacheConfig::default()
        };
        let mut cache = SpatialResourceCache::new(config);
        for x in -15..15 {
            for y in -15..15 {
                let _ = cache.get_or_compute(x, y, t0(), |_| levels(0.3));
            }
        }
        assert_eq!(cache.len(), 900);
        // Force a rebuild and check every cell still hits.
        assert_eq!(cache.sweep(t0()), 0);
        for x in -15..15 {
            for y in -15..15 {
                let value = cache.get_or_compute(x, y, t0(), |_| levels(0.8));
                assert_eq!(value, levels(0.3));
            }
        }
        assert_eq!(cache.stats(t0()).misses, 900);
    }

    #[test]
    fn invalidate_forces_recompute() {
        let mut cache = SpatialResourceCache::default();
        let _ = cache.get_or_compute(5, 5, t0(), |_| levels(0.6));
        assert!(cache.invalidate(1, 9));
        assert!(!cache.invalidate(1, 9));
        let value = cache.get_or_compute(5, 5, t0(), |_| levels(0.2));
        assert_eq!(value, levels(0.2));
    }

    #[test]
    fn clear_resets_everything() {
        let mut cache = SpatialResourceCache::default();
        let _ = cache.get_or_compute(5, 5, t0(), |_| levels(0.6));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(t0()), CacheStats::default());
    }
}
