//! Cache trait hierarchy.
//!
//! The hierarchy separates what every cache can do from what only a
//! recency-ordered cache can do:
//!
//! ```text
//!   CoreCache<K, V>            insert / get / contains / len / capacity / clear
//!        │
//!        ▼
//!   MutableCache<K, V>         + remove(&K)
//!        │
//!        ▼
//!   LruCacheTrait<K, V>        + pop_lru / peek_lru / touch / recency_rank
//! ```
//!
//! [`LruCache`](crate::policy::lru::LruCache) implements all three, so
//! generic code can bound on exactly the operation set it needs.

/// Core cache operations independent of eviction policy.
///
/// # Example
///
/// ```
/// use lrukit::traits::CoreCache;
/// use lrukit::policy::lru::LruCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::try_new(100).unwrap();
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key
    /// existed.
    ///
    /// Inserting a new key into a full cache evicts an entry according to
    /// the eviction policy first. Updating an existing key never evicts.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// May update eviction state (for LRU: promotes the key to most
    /// recently used). Use [`contains`](Self::contains) for an
    /// existence check without side effects.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;

    /// Removes all entries.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key, returning its value if it existed.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes several keys, returning the values that existed.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<V> {
        keys.iter().filter_map(|key| self.remove(key)).collect()
    }
}

/// Recency-tracking operations specific to LRU caches.
///
/// # Example
///
/// ```
/// use lrukit::traits::{CoreCache, LruCacheTrait};
/// use lrukit::policy::lru::LruCache;
///
/// let mut cache = LruCache::try_new(3).unwrap();
/// cache.insert(1, "one");
/// cache.insert(2, "two");
///
/// // Promote key 1 without retrieving its value.
/// assert!(cache.touch(&1));
/// assert_eq!(cache.recency_rank(&1), Some(0));
/// assert_eq!(cache.pop_lru(), Some((2, "two")));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without removing or
    /// promoting it.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Promotes a key to most recently used without retrieving its value.
    ///
    /// Returns `true` if the key existed.
    fn touch(&mut self, key: &K) -> bool;

    /// Returns the key's position in recency order (0 = MRU), scanning
    /// the list in O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}
