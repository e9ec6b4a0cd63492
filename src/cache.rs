// LRU memoization of listing results.
// Keyed on (catalog version, criteria) so a reloaded catalog never serves stale pages.

use crate::catalog::Catalog;
use crate::inventory::{filter_and_sort, FilterCriteria};
use crate::models::Vehicle;
use cached::{Cached, SizedCache};
use std::sync::{Arc, Mutex, MutexGuard};

type ListingKey = (u64, FilterCriteria);

pub struct ListingCache {
    inner: Mutex<SizedCache<ListingKey, Arc<Vec<Vehicle>>>>,
}

impl ListingCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(SizedCache::with_size(capacity.max(1))),
        }
    }

    // The lock is released while filtering so concurrent requests only contend on lookups
    pub fn listings(&self, catalog: &Catalog, criteria: &FilterCriteria) -> Arc<Vec<Vehicle>> {
        let key = (catalog.version(), criteria.clone());

        if let Some(hit) = self.lock().cache_get(&key) {
            tracing::debug!(version = key.0, "Listing cache hit");
            return Arc::clone(hit);
        }

        let computed = Arc::new(filter_and_sort(catalog.vehicles(), criteria));

        let mut cache = self.lock();
        // Another request may have filled the slot meanwhile; keep the stored result
        if let Some(stored) = cache.cache_get(&key) {
            return Arc::clone(stored);
        }
        cache.cache_set(key, Arc::clone(&computed));
        computed
    }

    pub fn len(&self) -> usize {
        self.lock().cache_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A poisoned lock only means another request panicked mid-insert; the map is still usable
    fn lock(&self) -> MutexGuard<'_, SizedCache<ListingKey, Arc<Vec<Vehicle>>>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for ListingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingCache").field("entries", &self.len()).finish()
    }
}
