//! In-memory byte-weighted LRU artwork cache.

use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::domain::entities::{Artwork, ArtworkKey, ArtworkPair};
use crate::domain::errors::ArtworkError;
use crate::domain::ports::ArtworkCachePort;
use crate::infrastructure::config::ArtworkConfig;

struct CacheState {
    entries: LruCache<ArtworkKey, ArtworkPair>,
    weight: usize,
}

/// LRU cache for artwork pairs bounded by total pixel-buffer bytes.
///
/// Every read and write goes through one mutex. No I/O happens while it
/// is held.
pub struct ArtworkCache {
    state: Mutex<CacheState>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    rejections: AtomicU64,
}

impl ArtworkCache {
    /// Creates a cache holding at most `capacity` bytes. Zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: LruCache::unbounded(),
                weight: 0,
            }),
            capacity: capacity.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            rejections: AtomicU64::new(0),
        }
    }

    /// Creates a cache sized from configuration.
    #[must_use]
    pub fn from_config(config: &ArtworkConfig) -> Self {
        Self::new(config.capacity_bytes())
    }

    /// Returns the full-size half of a cached pair.
    pub fn full_image(&self, key: &ArtworkKey) -> Option<Artwork> {
        self.get(key).map(|pair| pair.full().clone())
    }

    /// Returns the icon half of a cached pair.
    pub fn icon_image(&self, key: &ArtworkKey) -> Option<Artwork> {
        self.get(key).map(|pair| pair.icon().clone())
    }

    /// Returns true if `key` is cached. Does not touch recency.
    pub fn contains(&self, key: &ArtworkKey) -> bool {
        self.state.lock().entries.contains(key)
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        let (entries, weight_bytes) = {
            let state = self.state.lock();
            (state.entries.len(), state.weight)
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            entries,
            weight_bytes,
            capacity_bytes: self.capacity,
            evictions: self.evictions.load(Ordering::Relaxed),
            rejections: self.rejections.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for ArtworkCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtworkCache")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached pairs.
    pub entries: usize,
    /// Current summed weight.
    pub weight_bytes: usize,
    /// Configured capacity.
    pub capacity_bytes: usize,
    /// Pairs evicted to make room.
    pub evictions: u64,
    /// Pairs refused for exceeding capacity on their own.
    pub rejections: u64,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} pairs, {}/{} bytes, {:.1}% hit rate ({} hits, {} misses), {} evicted, {} rejected",
            self.entries,
            self.weight_bytes,
            self.capacity_bytes,
            self.hit_rate,
            self.hits,
            self.misses,
            self.evictions,
            self.rejections
        )
    }
}

impl ArtworkCachePort for ArtworkCache {
    fn get(&self, key: &ArtworkKey) -> Option<ArtworkPair> {
        let mut state = self.state.lock();
        if let Some(pair) = state.entries.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "Artwork cache hit");
            Some(pair.clone())
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "Artwork cache miss");
            None
        }
    }

    fn peek(&self, key: &ArtworkKey) -> Option<ArtworkPair> {
        self.state.lock().entries.peek(key).cloned()
    }

    fn put(&self, key: ArtworkKey, pair: ArtworkPair) -> Result<(), ArtworkError> {
        let weight = pair.weight();
        if weight > self.capacity {
            self.rejections.fetch_add(1, Ordering::Relaxed);
            warn!(key = %key, weight, capacity = self.capacity, "Artwork too large to cache");
            return Err(ArtworkError::CapacityRejected {
                weight,
                capacity: self.capacity,
            });
        }

        let mut state = self.state.lock();
        debug!(key = %key, weight, "Storing artwork in memory cache");

        if let Some(replaced) = state.entries.put(key, pair) {
            state.weight -= replaced.weight();
        }
        state.weight += weight;

        // The new entry is most recent and fits alone, so this stops before reaching it.
        while state.weight > self.capacity {
            let Some((evicted_key, evicted)) = state.entries.pop_lru() else {
                break;
            };
            state.weight -= evicted.weight();
            self.evictions.fetch_add(1, Ordering::Relaxed);
            debug!(key = %evicted_key, weight = evicted.weight(), "Evicted artwork from memory cache");
        }

        Ok(())
    }

    fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    fn total_weight(&self) -> usize {
        self.state.lock().weight
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.weight = 0;
        debug!("Cleared memory artwork cache");
    }
}
