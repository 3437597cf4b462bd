//! Contiguous backing blocks.
//!
//! A [`Block`] is one contiguous byte allocation with a bump cursor. Blocks
//! are the fundamental storage unit of the arena: the arena owns a chain of
//! them, linked by index, and only ever bumps the cursor of the current one.

use std::fmt;

/// A single contiguous memory block with bump allocation.
///
/// The backing storage is allocated to full capacity at creation and never
/// resized, so offsets handed out by [`Block::alloc`] stay valid for the
/// block's whole lifetime. Blocks are never freed individually — the whole
/// chain is released when the owning arena is dropped.
pub struct Block {
    /// Backing storage. Allocated to full capacity at creation.
    data: Vec<u8>,
    /// Bump pointer: next free byte offset.
    cursor: usize,
}

impl Block {
    /// Create a new block with the given capacity in bytes.
    ///
    /// The storage is zero-initialised at creation; allocations made
    /// without the `CLEAR` flag may still observe stale data later if the
    /// region was previously claimed by a discarded temporary region.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            cursor: 0,
        }
    }

    /// Bump-allocate `len` bytes, aligning the starting offset.
    ///
    /// Returns the starting offset, or `None` if the remaining capacity
    /// cannot hold the alignment padding plus `len` bytes.
    pub fn alloc(&mut self, len: usize, align: usize) -> Option<usize> {
        debug_assert!(align.is_power_of_two());
        let pad = self.cursor.wrapping_neg() & (align - 1);
        let start = self.cursor.checked_add(pad)?;
        let end = start.checked_add(len)?;
        if end > self.data.len() {
            return None;
        }
        self.cursor = end;
        Some(start)
    }

    /// Get a shared slice at the given offset and length.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len` exceeds the block's capacity.
    pub fn slice(&self, offset: usize, len: usize) -> &[u8] {
        &self.data[offset..offset + len]
    }

    /// Get a mutable slice at the given offset and length.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len` exceeds the block's capacity.
    pub fn slice_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        &mut self.data[offset..offset + len]
    }

    /// Move the cursor to an absolute position.
    ///
    /// Used by the arena to seal the block while a temporary region is open
    /// (`used = capacity`) and to restore the checkpointed cursor when the
    /// region ends. The bytes between the new and old cursor are un-claimed,
    /// not zeroed.
    pub(crate) fn set_used(&mut self, used: usize) {
        debug_assert!(used <= self.data.len());
        self.cursor = used;
    }

    /// Number of bytes currently allocated.
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Remaining free capacity in bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Memory usage of the backing storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len()
    }
}

impl fmt::Debug for Block {
    /// Summarises cursor and capacity without dumping the backing bytes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("capacity", &self.data.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_alloc_bumps_cursor() {
        let mut block = Block::new(1024);
        let a = block.alloc(100, 1).unwrap();
        let b = block.alloc(200, 1).unwrap();
        assert_eq!(a, 0);
        assert_eq!(b, 100);
        assert_eq!(block.used(), 300);
        assert_eq!(block.remaining(), 724);
    }

    #[test]
    fn alloc_fails_when_full() {
        let mut block = Block::new(100);
        assert!(block.alloc(100, 1).is_some());
        assert!(block.alloc(1, 1).is_none());
    }

    #[test]
    fn exact_capacity_alloc_succeeds() {
        let mut block = Block::new(64);
        assert_eq!(block.alloc(64, 8), Some(0));
        assert_eq!(block.remaining(), 0);
    }

    #[test]
    fn alignment_pads_the_start_offset() {
        let mut block = Block::new(1024);
        block.alloc(3, 1).unwrap();
        let offset = block.alloc(8, 8).unwrap();
        assert_eq!(offset, 8);
        assert_eq!(block.used(), 16);
    }

    #[test]
    fn padding_counts_against_capacity() {
        let mut block = Block::new(16);
        block.alloc(9, 1).unwrap();
        // 7 bytes of padding would be needed; 9 + 7 + 8 > 16.
        assert!(block.alloc(8, 8).is_none());
    }

    #[test]
    fn slice_reads_written_data() {
        let mut block = Block::new(64);
        let offset = block.alloc(4, 1).unwrap();
        {
            let s = block.slice_mut(offset, 4);
            s.copy_from_slice(&[1, 2, 3, 4]);
        }
        assert_eq!(block.slice(offset, 4), &[1, 2, 3, 4]);
    }

    #[test]
    fn set_used_rewinds_without_zeroing() {
        let mut block = Block::new(64);
        let offset = block.alloc(4, 1).unwrap();
        block.slice_mut(offset, 4).fill(0xAB);
        block.set_used(0);
        assert_eq!(block.used(), 0);
        // Rewinding un-claims the bytes but leaves them intact.
        assert_eq!(block.slice(offset, 4), &[0xAB; 4]);
    }

    #[test]
    fn debug_output_omits_the_backing_bytes() {
        let mut block = Block::new(64);
        block.alloc(16, 1).unwrap();
        let formatted = format!("{block:?}");
        assert!(formatted.contains("capacity: 64"));
        assert!(formatted.contains("cursor: 16"));
    }

    #[test]
    fn overflowing_request_is_rejected() {
        let mut block = Block::new(64);
        assert!(block.alloc(usize::MAX, 8).is_none());
    }
}
