//! Route-planning benchmarks for tracer_core.
//!
//! Run with: `cargo bench -p tracer_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tracer_core::floor_plan::{CellKind, CellRecord, FloorPlan, ProductRef};
use tracer_core::grid::{Coord, StoreGrid};
use tracer_core::pathfinding::find_path;
use tracer_core::planner::RoutePlanner;

/// Store with shelf rows every third row, one gap per row alternating sides.
fn aisle_store(size: u32) -> FloorPlan {
    let mut cells = vec![
        CellRecord::new(0, 0, CellKind::Entrance),
        CellRecord::new(size - 1, size - 1, CellKind::Checkout),
    ];
    let mut product = 0;
    for row in (2..size - 1).step_by(3) {
        let gap = if (row / 3) % 2 == 0 { size - 2 } else { 1 };
        for col in 0..size {
            if col == gap {
                continue;
            }
            let mut cell = CellRecord::new(row, col, CellKind::Shelf);
            if col % 4 == 2 {
                cell = cell.with_product(ProductRef::Name(format!("P{product}")));
                product += 1;
            }
            cells.push(cell);
        }
    }
    FloorPlan::from_cells(cells)
}

/// Benchmarks a single A* search across the store.
pub fn pathfinding_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_path");
    for size in [20u32, 50, 100] {
        let grid = StoreGrid::build(aisle_store(size).cells()).grid;
        let goal = Coord::new(size - 1, size - 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
            b.iter(|| find_path(black_box(grid), Coord::new(0, 0), goal));
        });
    }
    group.finish();
}

/// Benchmarks full planning with exact and greedy ordering.
pub fn planner_benchmark(c: &mut Criterion) {
    let plan = aisle_store(50);
    let planner = RoutePlanner::default();
    let mut group = c.benchmark_group("plan");
    for count in [3usize, 5, 12] {
        let items: Vec<String> = (0..count).map(|i| format!("P{}", i * 2)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &items, |b, items| {
            b.iter(|| planner.plan(black_box(&plan), items));
        });
    }
    group.finish();
}

criterion_group!(benches, pathfinding_benchmark, planner_benchmark);
criterion_main!(benches);
