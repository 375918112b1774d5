//! Port definition for artwork caching.

use crate::domain::entities::{ArtworkKey, ArtworkPair};
use crate::domain::errors::ArtworkError;

/// Port for a byte-weighted artwork cache.
///
/// Implementations must be thread-safe and must never block on I/O.
pub trait ArtworkCachePort: Send + Sync {
    /// Returns the cached pair and marks it most recently used.
    fn get(&self, key: &ArtworkKey) -> Option<ArtworkPair>;

    /// Returns the cached pair without touching its recency.
    fn peek(&self, key: &ArtworkKey) -> Option<ArtworkPair>;

    /// Stores a pair, evicting least recently used entries as needed.
    ///
    /// # Errors
    /// Returns `ArtworkError::CapacityRejected` if the pair alone exceeds
    /// the cache capacity. Nothing is stored or evicted in that case.
    fn put(&self, key: ArtworkKey, pair: ArtworkPair) -> Result<(), ArtworkError>;

    /// Returns the number of cached pairs.
    fn len(&self) -> usize;

    /// Returns true if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the summed weight of every cached pair.
    fn total_weight(&self) -> usize;

    /// Returns the capacity in bytes.
    fn capacity(&self) -> usize;

    /// Removes every entry.
    fn clear(&self);
}
