//! Criterion micro-benchmarks for shape metrics and topology on large sets.

use chunkclaim_bench::{comb, serpentine, solid_square};
use chunkclaim_core::ClaimedSet;
use chunkclaim_shape::{
    approx_diameter4, hole_cells4, is_connected4, max_filled_square_side, perimeter_edges, Bounds,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// 100×100 block with a 10×10 hole punched in the middle.
fn holed_square_10k() -> ClaimedSet {
    let mut set = solid_square(100);
    for c in ClaimedSet::rect(45, 45, 54, 54).iter() {
        set.remove(c);
    }
    set
}

fn bench_perimeter_10k(c: &mut Criterion) {
    let set = solid_square(100);
    c.bench_function("perimeter_10k", |b| {
        b.iter(|| black_box(perimeter_edges(black_box(&set))));
    });
}

fn bench_holes_10k(c: &mut Criterion) {
    let set = holed_square_10k();
    c.bench_function("hole_cells_10k", |b| {
        b.iter(|| black_box(hole_cells4(black_box(&set)).len()));
    });
}

fn bench_connected_10k(c: &mut Criterion) {
    let set = holed_square_10k();
    c.bench_function("is_connected_10k", |b| {
        b.iter(|| black_box(is_connected4(black_box(&set))));
    });
}

fn bench_diameter_serpentine(c: &mut Criterion) {
    // 50 runs of 100 cells: ~5K-cell path.
    let set = serpentine(50, 100);
    c.bench_function("diameter_serpentine_5k", |b| {
        b.iter(|| black_box(approx_diameter4(black_box(&set))));
    });
}

fn bench_max_square(c: &mut Criterion) {
    let solid = solid_square(100);
    let solid_bounds = Bounds::of(&solid);
    let sparse = comb(50, 50);
    let sparse_bounds = Bounds::of(&sparse);
    let mut group = c.benchmark_group("max_square");
    group.bench_function("solid_10k", |b| {
        b.iter(|| {
            solid_bounds.map(|bounds| black_box(max_filled_square_side(&solid, &bounds)))
        });
    });
    group.bench_function("comb_2.5k", |b| {
        b.iter(|| {
            sparse_bounds.map(|bounds| black_box(max_filled_square_side(&sparse, &bounds)))
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_perimeter_10k,
    bench_holes_10k,
    bench_connected_10k,
    bench_diameter_serpentine,
    bench_max_square
);
criterion_main!(benches);
