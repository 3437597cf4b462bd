//! The caller-facing arena handle.
//!
//! An [`Arena`] tracks a chain of [`Block`]s (linked by index, newest
//! last), the growth policy, and the open-temporary state. All allocation
//! goes through the current block's bump cursor; on shortfall a growable
//! arena appends a block and rebinds "current", so callers never observe a
//! block boundary.

use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

use crate::block::Block;
use crate::config::{ArenaConfig, GrowthPolicy};
use crate::error::ArenaError;
use crate::handle::{AllocFlags, AllocHandle};
use crate::temp::TempRegion;

/// Whether the arena currently has an open temporary region.
///
/// `Locked` is the explicit rendering of "the parent reports itself
/// exhausted": while set, the current block's cursor sits at its capacity
/// and every direct allocation fails the capacity check, so parent and
/// region can never interleave allocations in the same bytes.
#[derive(Debug)]
enum TempState {
    /// No temporary region is open.
    Free,
    /// A temporary region is open; `saved_used` is the cursor to restore.
    Locked {
        /// Identity of the open region, checked on every region call.
        id: u64,
        /// Current block's cursor at open time.
        saved_used: usize,
    },
}

/// A scoped, growable bump allocator over a chain of backing blocks.
///
/// Single-threaded by design: there is no internal synchronisation, every
/// operation completes in bounded time dominated by at most one system
/// allocation, and sharing one arena across threads is expressed (and
/// prevented) by ordinary ownership. Give each thread its own arena.
///
/// Dropping the arena walks the chain and returns every block's backing
/// memory to the system allocator. There is no per-allocation free.
///
/// # Example
///
/// ```
/// use tarn_arena::{AllocFlags, Arena, ArenaError, GrowthPolicy};
///
/// let mut arena = Arena::new(GrowthPolicy::Growable, 4096)?;
/// let handle = arena.alloc(64, AllocFlags::CLEAR)?;
/// assert!(arena.slice(handle).iter().all(|&b| b == 0));
///
/// let mut scratch = arena.begin_temp();
/// let tmp = arena.alloc_temp(&mut scratch, 512, AllocFlags::NONE)?;
/// arena.slice_mut(tmp).fill(0xFF);
/// arena.end_temp(scratch); // discards the 512 bytes in O(1)
/// # Ok::<(), ArenaError>(())
/// ```
#[derive(Debug)]
pub struct Arena {
    /// Immutable configuration (policy, growth sizing, alignment).
    config: ArenaConfig,
    /// Block chain, oldest first. The current block is always the last.
    blocks: SmallVec<[Block; 2]>,
    /// Index of the block currently being filled.
    current: usize,
    /// Open-temporary state.
    temp: TempState,
}

/// Id source for temporary regions.
///
/// Process-global so region tokens are unique across arenas: handing a
/// region to any arena other than the one that opened it always trips the
/// identity check, never aliases another arena's open region.
static NEXT_TEMP_ID: AtomicU64 = AtomicU64::new(0);

impl Arena {
    /// Create an arena with the given policy and initial capacity, using
    /// the default alignment.
    ///
    /// Shorthand for [`Arena::with_config`].
    pub fn new(policy: GrowthPolicy, initial_capacity: usize) -> Result<Self, ArenaError> {
        Self::with_config(ArenaConfig::new(policy, initial_capacity))
    }

    /// Create an arena from a full configuration.
    ///
    /// A nonzero `initial_capacity` eagerly allocates the first block; zero
    /// defers it to the first allocation, which is only valid for
    /// [`GrowthPolicy::Growable`].
    ///
    /// Returns `Err(ArenaError::InvalidConfig)` for a fixed policy with
    /// zero initial capacity, or for an alignment that is neither zero nor
    /// a power of two.
    pub fn with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        if config.policy == GrowthPolicy::Fixed && config.initial_capacity == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "fixed arena requires a nonzero initial capacity".into(),
            });
        }
        if config.align != 0 && !config.align.is_power_of_two() {
            return Err(ArenaError::InvalidConfig {
                reason: format!("align must be a power of two (got {})", config.align),
            });
        }

        let mut blocks = SmallVec::new();
        if config.initial_capacity > 0 {
            blocks.push(Block::new(config.initial_capacity));
        }

        Ok(Self {
            config,
            blocks,
            current: 0,
            temp: TempState::Free,
        })
    }

    /// Allocate `len` bytes from the arena.
    ///
    /// The fast path is a single aligned bump of the current block's
    /// cursor. On shortfall a growable arena appends a block sized by
    /// [`ArenaConfig::block_capacity_for`] and retries; a fixed arena — or
    /// any arena while its temporary region is open — fails with
    /// [`ArenaError::CapacityExceeded`].
    ///
    /// With [`AllocFlags::CLEAR`], exactly `len` bytes are zero-filled
    /// before the handle is returned.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero; zero-size allocations are a contract
    /// violation, not a recoverable error.
    pub fn alloc(&mut self, len: usize, flags: AllocFlags) -> Result<AllocHandle, ArenaError> {
        assert!(len > 0, "allocation size must be nonzero");

        if let TempState::Locked { .. } = self.temp {
            // Sealed: the parent reports itself exhausted until end_temp.
            return Err(ArenaError::CapacityExceeded {
                requested: len,
                remaining: 0,
            });
        }

        let align = self.config.effective_align();
        if let Some(block) = self.blocks.get_mut(self.current) {
            if let Some(offset) = block.alloc(len, align) {
                return Ok(self.finish(AllocHandle::new(self.current, offset, len), flags));
            }
        }

        match self.config.policy {
            GrowthPolicy::Fixed => Err(ArenaError::CapacityExceeded {
                requested: len,
                remaining: self.remaining(),
            }),
            GrowthPolicy::Growable => {
                self.grow(len);
                let offset = self.blocks[self.current]
                    .alloc(len, align)
                    .expect("fresh block is sized to fit the request");
                Ok(self.finish(AllocHandle::new(self.current, offset, len), flags))
            }
        }
    }

    /// Append a block large enough for `requested` bytes and make it current.
    ///
    /// Any unused tail of the previous block is permanently stranded; that
    /// is the accepted trade for O(1) growth and stable handles.
    fn grow(&mut self, requested: usize) {
        self.blocks
            .push(Block::new(self.config.block_capacity_for(requested)));
        self.current = self.blocks.len() - 1;
    }

    /// Apply request flags to a freshly allocated region.
    fn finish(&mut self, handle: AllocHandle, flags: AllocFlags) -> AllocHandle {
        if flags.contains(AllocFlags::CLEAR) {
            self.slice_mut(handle).fill(0);
        }
        handle
    }

    /// Open a temporary region over the unused suffix of the current block.
    ///
    /// Captures the current cursor, seals the block (`used = capacity`) so
    /// direct allocations fail until the region ends, and returns the
    /// checkpoint token. On a lazy arena with no blocks yet the region has
    /// zero capacity and rejects every request.
    ///
    /// # Panics
    ///
    /// Panics if a temporary region is already open. Nesting is not
    /// supported; there is no rollback stack.
    pub fn begin_temp(&mut self) -> TempRegion {
        assert!(
            matches!(self.temp, TempState::Free),
            "a temporary region is already open"
        );
        let id = NEXT_TEMP_ID.fetch_add(1, Ordering::Relaxed);

        let (saved_used, capacity) = match self.blocks.get_mut(self.current) {
            Some(block) => {
                let saved = block.used();
                let free = block.remaining();
                let total = block.capacity();
                block.set_used(total);
                (saved, free)
            }
            None => (0, 0),
        };

        self.temp = TempState::Locked { id, saved_used };
        TempRegion::new(id, self.current, saved_used, capacity)
    }

    /// Allocate `len` bytes from an open temporary region.
    ///
    /// Identical bump semantics to [`Arena::alloc`], except the region
    /// never grows: a request beyond its captured capacity fails with
    /// [`ArenaError::CapacityExceeded`] even when the arena is growable.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero or if `region` is not this arena's
    /// currently open temporary region.
    pub fn alloc_temp(
        &mut self,
        region: &mut TempRegion,
        len: usize,
        flags: AllocFlags,
    ) -> Result<AllocHandle, ArenaError> {
        assert!(len > 0, "allocation size must be nonzero");
        self.check_open_region(region.id());

        let align = self.config.effective_align();
        match region.bump(len, align) {
            Some(offset) => Ok(self.finish(AllocHandle::new(region.block_index(), offset, len), flags)),
            None => Err(ArenaError::CapacityExceeded {
                requested: len,
                remaining: region.remaining(),
            }),
        }
    }

    /// End a temporary region, discarding everything allocated through it.
    ///
    /// Restores the cursor captured at open time — an O(1) rewind — and
    /// unseals the arena. The discarded bytes are un-claimed, not zeroed.
    ///
    /// # Panics
    ///
    /// Panics if `region` is not this arena's currently open temporary
    /// region.
    pub fn end_temp(&mut self, region: TempRegion) {
        let saved_used = match self.temp {
            TempState::Locked { id, saved_used } if id == region.id() => saved_used,
            _ => panic!("region is not this arena's open temporary region"),
        };
        debug_assert_eq!(region.block_index(), self.current);

        if let Some(block) = self.blocks.get_mut(self.current) {
            block.set_used(saved_used);
        }
        self.temp = TempState::Free;
    }

    /// Release the arena, returning every block in the chain to the system
    /// allocator.
    ///
    /// Plain `drop` performs the same teardown; this form additionally
    /// asserts the usage protocol.
    ///
    /// # Panics
    ///
    /// Panics if a temporary region is still open.
    pub fn release(self) {
        assert!(
            matches!(self.temp, TempState::Free),
            "cannot release an arena with an open temporary region"
        );
    }

    fn check_open_region(&self, region_id: u64) {
        match self.temp {
            TempState::Locked { id, .. } if id == region_id => {}
            _ => panic!("region is not this arena's open temporary region"),
        }
    }

    /// Resolve a handle to a shared byte slice.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not refer to a region inside this arena's
    /// blocks (e.g. a handle from a different arena).
    pub fn slice(&self, handle: AllocHandle) -> &[u8] {
        self.blocks[handle.block_index()].slice(handle.offset(), handle.len())
    }

    /// Resolve a handle to a mutable byte slice.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not refer to a region inside this arena's
    /// blocks.
    pub fn slice_mut(&mut self, handle: AllocHandle) -> &mut [u8] {
        self.blocks[handle.block_index()].slice_mut(handle.offset(), handle.len())
    }

    /// Remaining free capacity of the current block in bytes.
    ///
    /// Zero while a temporary region is open (the block is sealed) and
    /// zero for a lazy arena that has not allocated its first block.
    pub fn remaining(&self) -> usize {
        self.blocks.get(self.current).map_or(0, Block::remaining)
    }

    /// Bytes allocated from the current block.
    ///
    /// Equals [`Arena::capacity`] while a temporary region is open.
    pub fn used(&self) -> usize {
        self.blocks.get(self.current).map_or(0, Block::used)
    }

    /// Capacity of the current block in bytes — not the chain total.
    pub fn capacity(&self) -> usize {
        self.blocks.get(self.current).map_or(0, Block::capacity)
    }

    /// The arena's growth policy.
    pub fn policy(&self) -> GrowthPolicy {
        self.config.policy
    }

    /// Number of blocks in the chain.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Total bytes allocated across the whole chain, stranded tails
    /// excluded.
    pub fn total_used(&self) -> usize {
        self.blocks.iter().map(Block::used).sum()
    }

    /// Total backing memory across the whole chain in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.blocks.iter().map(Block::memory_bytes).sum()
    }
}

impl Default for Arena {
    /// The lazy default: a growable arena with no blocks yet.
    ///
    /// Behaves identically to `Arena::new(GrowthPolicy::Growable, 0)` — the
    /// first allocation creates the first block.
    fn default() -> Self {
        Self {
            config: ArenaConfig::default(),
            blocks: SmallVec::new(),
            current: 0,
            temp: TempState::Free,
        }
    }
}
