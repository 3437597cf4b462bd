//! Allocation handles and request flags.
//!
//! An [`AllocHandle`] encodes the physical location of an allocation within
//! an arena's block chain. Handles are plain indices, so returning one never
//! borrows the arena; the bytes are resolved on demand through
//! [`Arena::slice`](crate::Arena::slice) and
//! [`Arena::slice_mut`](crate::Arena::slice_mut) in O(1).

use std::fmt;
use std::ops::BitOr;

/// Physical location of an allocation within an arena's block chain.
///
/// A handle stays resolvable until the owning arena is dropped. Handles
/// produced inside a temporary region additionally become dangling by
/// contract once the region is ended: the bytes are un-claimed, not freed,
/// so resolving such a handle still yields a slice, but a later allocation
/// may reuse it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct AllocHandle {
    /// Index of the block this allocation lives in.
    pub(crate) block: usize,
    /// Byte offset of the allocation within that block.
    pub(crate) offset: usize,
    /// Length of the allocation in bytes.
    pub(crate) len: usize,
}

impl AllocHandle {
    /// Create a new handle.
    pub(crate) fn new(block: usize, offset: usize, len: usize) -> Self {
        Self { block, offset, len }
    }

    /// Index of the block this allocation lives in.
    pub fn block_index(&self) -> usize {
        self.block
    }

    /// Byte offset of the allocation within its block.
    ///
    /// Always a multiple of the arena's configured alignment.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the allocation in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for AllocHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AllocHandle(block={}, off={}, len={})",
            self.block, self.offset, self.len
        )
    }
}

/// Request flags for [`Arena::alloc`](crate::Arena::alloc) and
/// [`Arena::alloc_temp`](crate::Arena::alloc_temp).
///
/// This is a closed bit-set: the only values constructible are combinations
/// of the named constants, so unrecognised flag bits are unrepresentable
/// rather than rejected at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocFlags(u8);

impl AllocFlags {
    /// No special behaviour; the returned bytes may hold stale data.
    pub const NONE: AllocFlags = AllocFlags(0);

    /// Zero-fill exactly the requested bytes before returning the handle.
    ///
    /// Alignment padding preceding the allocation is never touched.
    pub const CLEAR: AllocFlags = AllocFlags(1);

    /// Whether all flags in `other` are set in `self`.
    pub fn contains(self, other: AllocFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for AllocFlags {
    type Output = AllocFlags;

    fn bitor(self, rhs: AllocFlags) -> AllocFlags {
        AllocFlags(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_round_trip() {
        let h = AllocHandle::new(2, 128, 64);
        assert_eq!(h.block_index(), 2);
        assert_eq!(h.offset(), 128);
        assert_eq!(h.len(), 64);
        assert!(!h.is_empty());
    }

    #[test]
    fn display_names_all_fields() {
        let h = AllocHandle::new(1, 8, 16);
        let s = h.to_string();
        assert!(s.contains("block=1"));
        assert!(s.contains("off=8"));
        assert!(s.contains("len=16"));
    }

    #[test]
    fn flags_default_is_none() {
        assert_eq!(AllocFlags::default(), AllocFlags::NONE);
        assert!(!AllocFlags::NONE.contains(AllocFlags::CLEAR));
    }

    #[test]
    fn flags_combine_with_bitor() {
        let flags = AllocFlags::NONE | AllocFlags::CLEAR;
        assert!(flags.contains(AllocFlags::CLEAR));
        assert!(flags.contains(AllocFlags::NONE));
    }
}
