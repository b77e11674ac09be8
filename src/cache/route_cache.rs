//! Memo of the best known tour per node set.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;
use serde::Serialize;

use crate::models::{RouteKey, Tour};

/// A cached tour and its cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachedRoute {
    /// Tour ordering stored for the key's node set.
    pub tour: Tour,
    /// Cost of `tour`.
    pub cost: f64,
}

/// Counters describing cache usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    /// Lookups that found an entry.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Entries currently stored.
    pub entries: usize,
}

/// Route memo keyed by canonical node set.
///
/// Keys are set-based, so every ordering of the same nodes shares one slot.
/// [`RouteCache::store`] overwrites unconditionally: the last write wins even
/// if it is more expensive than what was there.
///
/// The map sits behind a lock so one cache can serve several solves running
/// on different threads; each method takes the lock once.
///
/// # Examples
///
/// ```
/// use u_tour::cache::RouteCache;
/// use u_tour::distance::DistanceMatrix;
/// use u_tour::models::{RouteKey, Tour};
///
/// let dm = DistanceMatrix::new(4);
/// let cache = RouteCache::new();
/// let tour = Tour::new(vec![2, 0, 1], &dm).unwrap();
/// cache.store(tour.key(), tour.clone(), 12.0);
///
/// let hit = cache.lookup(&RouteKey::from_nodes(&[0, 1, 2])).unwrap();
/// assert_eq!(hit.tour, tour);
/// assert_eq!(cache.stats().hits, 1);
/// ```
#[derive(Debug, Default)]
pub struct RouteCache {
    entries: RwLock<HashMap<RouteKey, CachedRoute>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RouteCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache with room for `capacity` node sets.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::with_capacity(capacity)),
            ..Self::default()
        }
    }

    // Entries are plain data, so a writer that panicked cannot leave one
    // half-built; a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<RouteKey, CachedRoute>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<RouteKey, CachedRoute>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns the entry stored for `key`, if any.
    pub fn lookup(&self, key: &RouteKey) -> Option<CachedRoute> {
        let found = self.read().get(key).cloned();
        match &found {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("route cache hit for {} nodes (cost {:.4})", key.len(), entry.cost);
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!("route cache miss for {} nodes", key.len());
            }
        }
        found
    }

    /// Stores `tour` and `cost` under `key`, replacing any existing entry.
    pub fn store(&self, key: RouteKey, tour: Tour, cost: f64) {
        let nodes = key.len();
        let previous = self.write().insert(key, CachedRoute { tour, cost });
        if let Some(prev) = previous {
            if prev.cost < cost {
                debug!(
                    "route cache entry for {nodes} nodes replaced by a worse tour ({:.4} -> {cost:.4})",
                    prev.cost
                );
            }
        }
    }

    /// Returns `true` if an entry exists for `key`. Does not count as a lookup.
    pub fn contains(&self, key: &RouteKey) -> bool {
        self.read().contains_key(key)
    }

    /// Number of stored node sets.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&self) {
        self.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Current hit/miss counters and entry count.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}
