//! Doubly linked recency list backed by [`SlotArena`].
//!
//! Nodes are stored in the arena and linked by [`SlotId`], which gives
//! callers stable handles and O(1) splice operations without any raw
//! pointers. The list runs front (most recently used) to back (least
//! recently used):
//!
//! ```text
//!   front ─► [id_2] ◄──► [id_0] ◄──► [id_1] ◄─ back
//!            (MRU)                   (LRU)
//! ```
//!
//! The list is the sole owner of its nodes. Anything else that wants to
//! point at a node (such as a cache's key index) keeps a `SlotId` and must
//! discard it in the same step that removes the node.
//!
//! `debug_validate_invariants()` walks the links in debug/test builds.

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Arena-backed doubly linked list ordered from most to least recently used.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    front: Option<SlotId>,
    back: Option<SlotId>,
}

impl<T> RecencyList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            front: None,
            back: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            front: None,
            back: None,
        }
    }

    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` refers to a live node in this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Returns the value at the front (MRU position).
    pub fn front(&self) -> Option<&T> {
        self.front
            .and_then(|id| self.arena.get(id).map(|node| &node.value))
    }

    /// Returns the handle of the front node.
    pub fn front_id(&self) -> Option<SlotId> {
        self.front
    }

    /// Returns the value at the back (LRU position).
    pub fn back(&self) -> Option<&T> {
        self.back
            .and_then(|id| self.arena.get(id).map(|node| &node.value))
    }

    /// Returns the handle of the back node.
    pub fn back_id(&self) -> Option<SlotId> {
        self.back
    }

    /// Returns the value of node `id`, if live.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value of node `id`, if live.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Inserts a new node at the front and returns its handle.
    ///
    /// On an empty list the new node becomes both front and back.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.front,
        });
        match self.front {
            Some(old_front) => {
                if let Some(node) = self.arena.get_mut(old_front) {
                    node.prev = Some(id);
                }
            },
            None => self.back = Some(id),
        }
        self.front = Some(id);
        id
    }

    /// Detaches and returns the back (LRU) value.
    ///
    /// Returns `None` on an empty list; never fails otherwise. A
    /// single-node list becomes empty with both ends cleared.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.back?;
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Removes the node `id` from anywhere in the list and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Relinks node `id` as the new front.
    ///
    /// Already-front nodes are left alone (still a success). Returns
    /// `false` only for a dead handle.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if Some(id) == self.front {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.front = None;
        self.back = None;
    }

    /// Iterates over values from front (MRU) to back (LRU).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.front,
        }
    }

    /// Iterates over handles from front to back.
    pub fn iter_ids(&self) -> IdIter<'_, T> {
        IdIter {
            list: self,
            current: self.front,
        }
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            },
            None => self.front = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            },
            None => self.back = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }

        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_front = self.front;
        match self.arena.get_mut(id) {
            Some(node) => {
                node.prev = None;
                node.next = old_front;
            },
            None => return,
        }
        match old_front {
            Some(front_id) => {
                if let Some(front_node) = self.arena.get_mut(front_id) {
                    front_node.prev = Some(id);
                }
            },
            None => self.back = Some(id),
        }
        self.front = Some(id);
    }

    #[cfg(any(test, debug_assertions))]
    /// Walks the list and asserts link consistency against the arena.
    pub fn debug_validate_invariants(&self) {
        if self.front.is_none() || self.back.is_none() {
            assert!(self.front.is_none());
            assert!(self.back.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.front;
        let mut prev = None;

        while let Some(id) = current {
            assert!(seen.insert(id), "cycle through node {:?}", id);
            let node = self.arena.get(id).expect("linked node missing from arena");
            assert_eq!(node.prev, prev);
            if node.next.is_none() {
                assert_eq!(self.back, Some(id));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len());
        }

        assert_eq!(count, self.len());
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back value iterator.
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

/// Front-to-back handle iterator.
pub struct IdIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for IdIter<'a, T> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(id)
    }
}
