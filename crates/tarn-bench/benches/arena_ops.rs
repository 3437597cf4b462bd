//! Criterion micro-benchmarks for arena allocation, growth, and
//! temporary-region cycling.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tarn_arena::{AllocFlags, ArenaConfig};
use tarn_bench::{fixed_arena_1mb, growable_arena_4k};

/// Benchmark: 1024 fast-path allocations from a pre-sized fixed arena.
fn bench_alloc_fast_path(c: &mut Criterion) {
    c.bench_function("alloc_fast_path_1024x64", |b| {
        b.iter(|| {
            let mut arena = fixed_arena_1mb();
            for _ in 0..1024 {
                let handle = arena.alloc(64, AllocFlags::NONE).unwrap();
                black_box(handle);
            }
            black_box(arena.used());
        });
    });
}

/// Benchmark: same workload with zero-fill, isolating the CLEAR cost.
fn bench_alloc_cleared(c: &mut Criterion) {
    c.bench_function("alloc_cleared_1024x64", |b| {
        b.iter(|| {
            let mut arena = fixed_arena_1mb();
            for _ in 0..1024 {
                let handle = arena.alloc(64, AllocFlags::CLEAR).unwrap();
                black_box(handle);
            }
            black_box(arena.used());
        });
    });
}

/// Benchmark: allocations that repeatedly overflow a small growable arena,
/// measuring the growth path end to end.
fn bench_growth(c: &mut Criterion) {
    c.bench_function("growth_16_blocks", |b| {
        b.iter(|| {
            let mut arena = growable_arena_4k();
            // Each request fills a whole growth increment, so every
            // allocation after the first is a growth event.
            for _ in 0..16 {
                let handle = arena
                    .alloc(ArenaConfig::DEFAULT_BLOCK_BYTES, AllocFlags::NONE)
                    .unwrap();
                black_box(handle);
            }
            black_box(arena.block_count());
        });
    });
}

/// Benchmark: open a temporary region, fill it, discard it — the
/// per-frame scratch pattern.
fn bench_temp_region_cycle(c: &mut Criterion) {
    c.bench_function("temp_region_cycle", |b| {
        let mut arena = fixed_arena_1mb();
        b.iter(|| {
            let mut scratch = arena.begin_temp();
            for _ in 0..256 {
                let handle = arena.alloc_temp(&mut scratch, 256, AllocFlags::NONE).unwrap();
                black_box(handle);
            }
            arena.end_temp(scratch);
            black_box(arena.used());
        });
    });
}

criterion_group!(
    benches,
    bench_alloc_fast_path,
    bench_alloc_cleared,
    bench_growth,
    bench_temp_region_cycle
);
criterion_main!(benches);
