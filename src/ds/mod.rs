//! Internal data structures shared by the cache core.

pub mod recency_list;
pub mod slot_arena;

pub use recency_list::RecencyList;
pub use slot_arena::{SlotArena, SlotId};
