//! lrukit: fixed-capacity LRU caching built on an arena-backed recency list.
//!
//! The core type is [`policy::lru::LruCache`]: O(1) insert/get with
//! deterministic least-recently-used eviction. List nodes live in a
//! [`ds::SlotArena`] and are addressed by stable [`ds::SlotId`] handles,
//! so the key index can point into the recency list without raw pointers.
//!
//! ```
//! use lrukit::prelude::*;
//!
//! let mut cache = LruCache::try_new(2)?;
//! cache.insert(1, "one");
//! cache.insert(2, "two");
//! assert_eq!(cache.get(&1), Some(&"one")); // promotes key 1
//! cache.insert(3, "three");                // evicts key 2
//! assert!(!cache.contains(&2));
//! # Ok::<(), lrukit::error::ConfigError>(())
//! ```

pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
