//! Arena configuration and growth policy.

/// Controls what happens when the current block cannot satisfy a request.
///
/// A `Fixed` arena owns exactly one block for its whole lifetime and fails
/// requests that do not fit. A `Growable` arena appends a new block and
/// retries, so a block boundary is never visible to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthPolicy {
    /// Exhaustion is a terminal failure for the request.
    Fixed,
    /// Exhaustion appends a new block sized by [`ArenaConfig::block_capacity_for`].
    Growable,
}

/// Configuration for an arena.
///
/// Validated by [`Arena::with_config`](crate::Arena::with_config); all
/// values are immutable after construction.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Whether the arena may append blocks when the current one is full.
    pub policy: GrowthPolicy,

    /// Capacity of the eagerly created first block, in bytes.
    ///
    /// Zero defers block creation to the first allocation, which is only
    /// valid for [`GrowthPolicy::Growable`].
    pub initial_capacity: usize,

    /// Alignment applied to every allocation's starting offset.
    ///
    /// Zero selects [`ArenaConfig::DEFAULT_ALIGN`]. Nonzero values must be
    /// powers of two. Alignment is an offset guarantee: every handle's
    /// offset within its block is a multiple of this value.
    pub align: usize,
}

impl ArenaConfig {
    /// Default growth increment: 1MB per appended block.
    ///
    /// Requests larger than this get a block sized to fit them exactly.
    pub const DEFAULT_BLOCK_BYTES: usize = 1 << 20;

    /// Default allocation alignment: natural pointer alignment.
    pub const DEFAULT_ALIGN: usize = std::mem::align_of::<usize>();

    /// Create a config with the given policy and initial capacity, using
    /// the default alignment.
    pub fn new(policy: GrowthPolicy, initial_capacity: usize) -> Self {
        Self {
            policy,
            initial_capacity,
            align: 0,
        }
    }

    /// The alignment actually applied to allocations (resolves the
    /// zero-means-default convention).
    pub fn effective_align(&self) -> usize {
        if self.align == 0 {
            Self::DEFAULT_ALIGN
        } else {
            self.align
        }
    }

    /// Capacity of a block appended to satisfy a request of `requested`
    /// bytes: the larger of the request and the default growth increment.
    ///
    /// Sizing to at least the request means a single oversized allocation
    /// is honoured with an exact-fit block; sizing small requests up to
    /// the increment amortises future allocations into the same block.
    pub fn block_capacity_for(&self, requested: usize) -> usize {
        requested.max(Self::DEFAULT_BLOCK_BYTES)
    }
}

impl Default for ArenaConfig {
    /// The lazy default: growable, no eager block, default alignment.
    fn default() -> Self {
        Self::new(GrowthPolicy::Growable, 0)
    }
}
