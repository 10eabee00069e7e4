//! # Least Recently Used (LRU) cache
//!
//! Fixed-capacity cache with O(1) insert, get, and eviction. Eviction is
//! deterministic: inserting a new key into a full cache always removes the
//! least recently touched entry, where a touch is any `insert`, `get`, or
//! `touch` on a key.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │                        LruCache<K, V>                         │
//!   │                                                               │
//!   │   ┌─────────────────────────────────────────────────────┐     │
//!   │   │  FxHashMap<K, SlotId>  (key index)                  │     │
//!   │   │                                                     │     │
//!   │   │  ┌───────┬────────────────────────────────────┐     │     │
//!   │   │  │  Key  │  SlotId                            │     │     │
//!   │   │  ├───────┼────────────────────────────────────┤     │     │
//!   │   │  │  k_1  │  ─────────────────────────────┐    │     │     │
//!   │   │  │  k_2  │  ───────────────────────┐     │    │     │     │
//!   │   │  └───────┴─────────────────────────┼─────┼────┘     │     │
//!   │   └────────────────────────────────────┼─────┼──────────┘     │
//!   │                                        ▼     ▼                │
//!   │   ┌─────────────────────────────────────────────────────┐     │
//!   │   │  RecencyList<Entry<K, V>>                           │     │
//!   │   │                                                     │     │
//!   │   │  front ─► [k_2:v_2] ◄──► [k_1:v_1] ◄─ back          │     │
//!   │   │           (MRU)          (LRU)                      │     │
//!   │   └─────────────────────────────────────────────────────┘     │
//!   └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index stores arena handles, never nodes. Handles are removed from
//! the index in the same step that removes their node from the list, so
//! the two structures always describe the same key set. `LruCache` is the
//! only type that mutates either one.
//!
//! ## Operations
//!
//! | Method           | Complexity | Promotes? | Notes                          |
//! |------------------|------------|-----------|--------------------------------|
//! | `try_new(cap)`   | O(1)       | -         | `Err(ConfigError)` for cap 0   |
//! | `insert(k, v)`   | O(1) avg   | yes       | Update never evicts            |
//! | `get(&k)`        | O(1) avg   | yes       | Miss has no side effects       |
//! | `contains(&k)`   | O(1) avg   | no        | Existence check                |
//! | `remove(&k)`     | O(1) avg   | -         | Index + list unlink together   |
//! | `pop_lru()`      | O(1)       | -         | Back of the recency list       |
//! | `peek_lru()`     | O(1)       | no        |                                |
//! | `touch(&k)`      | O(1) avg   | yes       | Promote without retrieving     |
//! | `recency_rank()` | O(n)       | no        | 0 = MRU                        |
//! | `iter()`         | O(n)       | no        | Front (MRU) to back (LRU)      |
//!
//! There is no non-promoting `get` variant: a hit always moves the key to
//! the front, so the recency order is a pure function of the call history.
//!
//! ## Thread safety
//!
//! `LruCache` is single-threaded. [`ConcurrentLruCache`] (feature
//! `concurrency`) wraps it in a `parking_lot::Mutex`; an exclusive lock is
//! the right granularity here because even `get` relinks list nodes, and
//! any finer locking could let one thread observe an index handle whose
//! node another thread is concurrently evicting.

use std::hash::Hash;
use std::mem;

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::recency_list::RecencyList;
use crate::ds::slot_arena::SlotId;
use crate::error::ConfigError;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::{LruMetrics, LruMetricsSnapshot};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// One cached key-value pair, stored inside a recency-list node.
///
/// The key lives in the node as well as the index so that eviction from
/// the back of the list can name the key to drop from the index.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity LRU cache.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
///
/// let mut cache = LruCache::try_new(2).unwrap();
/// cache.insert(1, "one");
/// cache.insert(2, "two");
///
/// // Touching key 1 makes key 2 the eviction candidate.
/// assert_eq!(cache.get(&1), Some(&"one"));
/// cache.insert(3, "three");
///
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.get(&1), Some(&"one"));
/// ```
#[derive(Debug)]
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, SlotId>,
    order: RecencyList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// Capacity must be at least 1; zero is a configuration error and no
    /// cache is produced.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache = LruCache::<u64, String>::try_new(100).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(LruCache::<u64, String>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be at least 1"));
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: RecencyList::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Number of entries currently cached.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if `key` is cached. Does not promote.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Inserts a key-value pair, returning the previous value if the key
    /// was already present.
    ///
    /// An existing key is updated in place and promoted; this path never
    /// changes `len()` and never evicts. A new key inserted at capacity
    /// first evicts the least recently used entry, so exactly one slot is
    /// always free for the insertion.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::try_new(1).unwrap();
    /// assert_eq!(cache.insert(5, 50), None);
    /// assert_eq!(cache.insert(5, 99), Some(50)); // update, no eviction
    /// assert_eq!(cache.len(), 1);
    /// assert_eq!(cache.get(&5), Some(&99));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let old = self
                .order
                .get_mut(id)
                .map(|entry| mem::replace(&mut entry.value, value));
            self.order.move_to_front(id);
            return old;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.order.len() == self.capacity {
            // Evict back entry and its index handle as one step.
            if let Some(evicted) = self.order.pop_back() {
                self.index.remove(&evicted.key);
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();
            }
        }

        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        None
    }

    /// Gets a reference to a value, promoting the key to most recently
    /// used.
    ///
    /// A miss returns `None` and leaves the cache completely unchanged.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_front(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Removes a key, returning its value if it existed.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key);
        #[cfg(feature = "metrics")]
        self.metrics.record_remove(id.is_some());
        self.order.remove(id?).map(|entry| entry.value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.order.pop_back();
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru(entry.is_some());
        let entry = entry?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    /// Returns the least recently used entry without removing or
    /// promoting it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let back = self.order.back();
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru(back.is_some());
        back.map(|entry| (&entry.key, &entry.value))
    }

    /// Promotes a key to most recently used without retrieving its value.
    ///
    /// Returns `true` if the key existed.
    pub fn touch(&mut self, key: &K) -> bool {
        let found = match self.index.get(key) {
            Some(&id) => self.order.move_to_front(id),
            None => false,
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_touch(found);
        found
    }

    /// Returns the key's position in recency order (0 = MRU), or `None`
    /// if absent. Scans the list in O(n); intended for verification.
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        let rank = self.order.iter().position(|entry| entry.key == *key);
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank(rank.is_some());
        rank
    }

    /// Iterates over `(key, value)` pairs from most to least recently
    /// used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Returns the keys in recency order, front (MRU) first.
    ///
    /// This is the enumeration hook used for parity testing against the
    /// reference console protocol.
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.order.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Removes all entries. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    /// Verifies the index/list bijection and size bound.
    ///
    /// Available in debug and test builds only.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index len {} != list len {}",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.order.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.order.len(),
                self.capacity
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for id in self.order.iter_ids() {
            let entry = self
                .order
                .get(id)
                .ok_or_else(|| InvariantError::new("list handle resolves to no node"))?;
            if !seen.insert(entry.key.clone()) {
                return Err(InvariantError::new("duplicate key in recency list"));
            }
            match self.index.get(&entry.key) {
                Some(&mapped) if mapped == id => {},
                Some(_) => {
                    return Err(InvariantError::new("index handle does not match list node"));
                },
                None => return Err(InvariantError::new("list key missing from index")),
            }
        }

        self.order.debug_validate_invariants();
        Ok(())
    }

    /// Copies out the current counters plus size gauges.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evicted_entries: self.metrics.evicted_entries,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            peek_lru_calls: self.metrics.peek_lru_calls.get(),
            peek_lru_found: self.metrics.peek_lru_found.get(),
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            cache_len: self.len(),
            capacity: self.capacity,
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LruCache::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

/// Thread-safe wrapper around [`LruCache`] using a single exclusive lock.
///
/// Every public call holds the lock for its full duration: a correct
/// operation touches the recency list and the key index jointly, so no
/// interleaving may observe one updated and the other not.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::ConcurrentLruCache;
///
/// let cache = ConcurrentLruCache::try_new(2).unwrap();
/// cache.insert(1, "one".to_string());
/// assert_eq!(cache.get(&1), Some("one".to_string()));
/// ```
#[cfg(feature = "concurrency")]
#[derive(Debug)]
pub struct ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Mutex<LruCache<K, V>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Mutex::new(LruCache::try_new(capacity)?),
        })
    }

    /// Inserts a key-value pair, returning the previous value if present.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let mut cache = self.inner.lock();
        cache.insert(key, value)
    }

    /// Gets a clone of the value, promoting the key.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let mut cache = self.inner.lock();
        cache.get(key).cloned()
    }

    /// Returns `true` if `key` is cached. Does not promote.
    pub fn contains(&self, key: &K) -> bool {
        let cache = self.inner.lock();
        cache.contains(key)
    }

    /// Removes a key, returning its value if it existed.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut cache = self.inner.lock();
        cache.remove(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        let mut cache = self.inner.lock();
        cache.pop_lru()
    }

    /// Promotes a key to most recently used; `true` if it existed.
    pub fn touch(&self, key: &K) -> bool {
        let mut cache = self.inner.lock();
        cache.touch(key)
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        let cache = self.inner.lock();
        cache.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        let cache = self.inner.lock();
        cache.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        let cache = self.inner.lock();
        cache.capacity()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        let mut cache = self.inner.lock();
        cache.clear();
    }

    /// Returns the keys in recency order, front (MRU) first.
    pub fn keys_by_recency(&self) -> Vec<K> {
        let cache = self.inner.lock();
        cache.keys_by_recency()
    }

    /// Copies out the current counters plus size gauges.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        let cache = self.inner.lock();
        cache.metrics_snapshot()
    }
}
