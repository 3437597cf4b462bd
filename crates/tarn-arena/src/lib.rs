//! Scoped, growable bump-allocation arenas with transient checkpoint
//! regions.
//!
//! Provides O(1) bump allocation from a chain of contiguous backing
//! blocks, transparent growth when the current block is exhausted, and a
//! temporary-region mechanism for carving a scratch sub-arena out of
//! unused capacity and discarding everything in it with a single cursor
//! rewind.
//!
//! # Architecture
//!
//! ```text
//! Arena (policy + open-temporary state)
//! ├── Block chain (SmallVec<Block>, index-linked, heterogeneous sizes)
//! │   └── Block (contiguous Vec<u8> with bump cursor)
//! ├── TempRegion (checkpoint token over the current block's free suffix)
//! └── AllocHandle (block index + offset + len, resolved via slice())
//! ```
//!
//! # Design
//!
//! - **Handles, not references.** Allocations are returned as
//!   [`AllocHandle`]s and resolved to byte slices through
//!   [`Arena::slice`]/[`Arena::slice_mut`], so the arena hands out any
//!   number of allocations without lifetime entanglement and growth never
//!   invalidates one.
//! - **Sealed parent.** While a [`TempRegion`] is open the arena's current
//!   block reports `used == capacity`, so every direct allocation fails
//!   the same capacity check as genuine exhaustion. Parent and region can
//!   never interleave in the same bytes.
//! - **Single-threaded.** One arena per thread; there is no internal
//!   synchronisation and no per-allocation free.
//!
//! All storage is safe `Vec<u8>`; this crate contains no `unsafe`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod block;
pub mod config;
pub mod error;
pub mod handle;
pub mod temp;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use config::{ArenaConfig, GrowthPolicy};
pub use error::ArenaError;
pub use handle::{AllocFlags, AllocHandle};
pub use temp::TempRegion;
