//! Slot arena with free-list reuse.
//!
//! Values live in a `Vec<Option<T>>` and are addressed by [`SlotId`], a
//! stable integer handle. Removing a value pushes its index onto a free
//! list so later inserts reuse the slot instead of growing the vector.
//! Handles never dangle in the raw-pointer sense: a dead `SlotId` simply
//! resolves to `None`.

/// Stable handle into a [`SlotArena`].
///
/// Valid exactly as long as the value it was returned for has not been
/// removed. After removal the index may be reused by a later insert, so
/// holders must drop their handle in the same step that removes the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Returns the raw slot index. Only meaningful for diagnostics.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena of slots with O(1) insert, lookup, and removal.
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Creates an empty arena with space reserved for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Stores `value` and returns its handle, reusing a free slot if one
    /// is available.
    pub fn insert(&mut self, value: T) -> SlotId {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(value);
                idx
            },
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            },
        };
        self.len += 1;
        SlotId(idx)
    }

    /// Removes and returns the value at `id`, freeing the slot.
    ///
    /// Returns `None` if `id` is already dead.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(value)
    }

    /// Returns a reference to the value at `id`, if live.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Returns a mutable reference to the value at `id`, if live.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Returns `true` if `id` refers to a live value.
    pub fn contains(&self, id: SlotId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every value and resets the free list.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }

    /// Iterates over live `(SlotId, &T)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|value| (SlotId(idx), value)))
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
