//! Eviction policy implementations.

pub mod lru;
