//! Temporary checkpoint regions over an arena's unused suffix.
//!
//! A [`TempRegion`] is a borrowed scratch view over the bytes between the
//! parent arena's bump cursor and the end of its current block, captured at
//! [`Arena::begin_temp`](crate::Arena::begin_temp). Allocations made through
//! the region land in the parent's block but are discarded wholesale — in
//! O(1), by rewinding the parent's cursor — when the region is ended.

/// Checkpoint token for a scratch view over a parent arena.
///
/// The region owns no memory: its `capacity` is the parent's remaining
/// capacity at open time and its allocations live in the parent's current
/// block. While the region is open the parent is sealed and refuses direct
/// allocations. The token is consumed by
/// [`Arena::end_temp`](crate::Arena::end_temp), which both discards every
/// allocation made through it and unseals the parent — there is no way to
/// keep allocating through an ended region.
///
/// A region never grows: a request beyond its captured capacity fails even
/// when the parent's policy is growable.
#[must_use]
pub struct TempRegion {
    /// Matches the id recorded by the parent while this region is open.
    id: u64,
    /// Index of the parent block the region allocates into.
    block: usize,
    /// Parent cursor at open time; the region's first byte.
    base: usize,
    /// Fixed capacity in bytes, captured at open time.
    capacity: usize,
    /// Bytes allocated through the region so far (padding included).
    used: usize,
}

impl TempRegion {
    pub(crate) fn new(id: u64, block: usize, base: usize, capacity: usize) -> Self {
        Self {
            id,
            block,
            base,
            capacity,
            used: 0,
        }
    }

    /// Bump-allocate `len` bytes, returning the absolute offset within the
    /// parent block, or `None` on shortfall.
    ///
    /// Offsets are aligned in the parent block's coordinate space, so
    /// region handles obey the same alignment guarantee as direct ones.
    pub(crate) fn bump(&mut self, len: usize, align: usize) -> Option<usize> {
        debug_assert!(align.is_power_of_two());
        let start = self.base.checked_add(self.used)?;
        let pad = start.wrapping_neg() & (align - 1);
        let end = self.used.checked_add(pad)?.checked_add(len)?;
        if end > self.capacity {
            return None;
        }
        self.used = end;
        Some(start + pad)
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Index of the parent block this region allocates into.
    pub fn block_index(&self) -> usize {
        self.block
    }

    /// Fixed capacity in bytes, captured when the region was opened.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes allocated through the region so far, alignment padding included.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Remaining free capacity in bytes.
    pub fn remaining(&self) -> usize {
        self.capacity - self.used
    }

    /// Whether nothing has been allocated through the region yet.
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }
}
