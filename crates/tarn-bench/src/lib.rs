//! Benchmark workloads and utilities for the tarn arena allocator.
//!
//! Provides pre-built arena shapes so the criterion benches and any ad-hoc
//! profiling share the same workloads:
//!
//! - [`fixed_arena_1mb`]: single-block fixed arena for fast-path measurement
//! - [`growable_arena_4k`]: small growable arena for growth measurement

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tarn_arena::{Arena, GrowthPolicy};

/// Build a 1MB fixed arena: the fast path never grows or fails within a
/// bench iteration of modest allocation counts.
pub fn fixed_arena_1mb() -> Arena {
    Arena::new(GrowthPolicy::Fixed, 1 << 20).expect("nonzero fixed capacity is valid")
}

/// Build a 4KB growable arena: bench iterations overflow it quickly, so
/// growth events dominate the measurement.
pub fn growable_arena_4k() -> Arena {
    Arena::new(GrowthPolicy::Growable, 4096).expect("growable config is valid")
}
