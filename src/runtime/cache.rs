//! Bounded cache of fragment fetches.
//!
//! Each address maps to one shared entry, so concurrent requests for the same
//! fragment wait on a single fetch. Eviction follows insertion order, not
//! recency: reading an entry never refreshes its position.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;

use super::fetch::{FetchError, Fragment, FragmentFetcher};
use crate::debug;

/// Maximum number of cached fragments.
pub const FRAGMENT_CACHE_CAPACITY: usize = 5;

/// A fetch in flight or finished, shared by everyone asking for its address.
#[derive(Debug)]
pub struct FragmentEntry {
    address: String,
    result: OnceCell<Result<Fragment, FetchError>>,
}

impl FragmentEntry {
    fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            result: OnceCell::new(),
        }
    }

    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.result.initialized()
    }
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: FxHashMap<String, Arc<FragmentEntry>>,
    /// Addresses, oldest first
    order: VecDeque<String>,
}

#[derive(Debug)]
pub struct FragmentCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
}

impl Default for FragmentCache {
    fn default() -> Self {
        Self::with_capacity(FRAGMENT_CACHE_CAPACITY)
    }
}

impl FragmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            capacity: capacity.max(1),
        }
    }

    /// Look up the entry for `address`, creating and inserting it on a miss.
    /// Inserting past capacity evicts the oldest entries.
    fn entry(&self, address: &str) -> Arc<FragmentEntry> {
        let mut inner = self.inner.lock();
        if let Some(entry) = inner.entries.get(address) {
            return Arc::clone(entry);
        }

        let entry = Arc::new(FragmentEntry::new(address));
        inner.entries.insert(address.to_string(), Arc::clone(&entry));
        inner.order.push_back(address.to_string());

        while inner.order.len() > self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
                debug!("cache"; "evicted {}", oldest);
            }
        }
        entry
    }

    /// Fetch `address` through the cache.
    ///
    /// A failed fetch is removed so the next request retries, but only if the
    /// slot still holds the entry that failed.
    pub async fn fetch<F: FragmentFetcher>(
        &self,
        address: &str,
        fetcher: &F,
        signal: &CancellationToken,
    ) -> Result<Fragment, FetchError> {
        let entry = self.entry(address);
        let result = entry
            .result
            .get_or_init(|| fetcher.fetch(address, signal))
            .await
            .clone();

        if result.is_err() {
            self.evict(&entry);
        }
        result
    }

    /// Remove `entry` if it is still the cached entry for its address.
    pub fn evict(&self, entry: &Arc<FragmentEntry>) -> bool {
        let mut inner = self.inner.lock();
        let current = inner
            .entries
            .get(entry.address())
            .is_some_and(|cached| Arc::ptr_eq(cached, entry));
        if !current {
            return false;
        }
        inner.entries.remove(entry.address());
        inner.order.retain(|address| address != entry.address());
        true
    }

    pub fn contains(&self, address: &str) -> bool {
        self.inner.lock().entries.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cached addresses, oldest first.
    pub fn addresses(&self) -> Vec<String> {
        self.inner.lock().order.iter().cloned().collect()
    }
}
