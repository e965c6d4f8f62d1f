//! Criterion micro-benchmarks for coverage planning.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xycover_core::{Cell, CellGrid, ObstacleGrid};
use xycover_planner::{
    CoveragePlanner, PathReconnector, PlannerOptions, ReconnectQuery, SearchStrategy,
};

/// Deterministic scatter of rockpoints over roughly 2% of the table.
fn scattered_grid(size: usize) -> ObstacleGrid {
    let mut grid = ObstacleGrid::new(size);
    for i in 0u64..(size * size / 50) as u64 {
        let x = (i.wrapping_mul(6364136223846793007) >> 33) as usize % size;
        let y = (i.wrapping_mul(1442695040888963407) >> 33) as usize % size;
        grid.set_obstacle(Cell::new(x as i32, y as i32));
    }
    grid
}

/// Benchmark: full run on an empty 64x64 table with radius 3.
fn bench_cover_empty_64(c: &mut Criterion) {
    let grid = ObstacleGrid::new(64);

    c.bench_function("cover_empty_64_r3", |b| {
        b.iter(|| {
            let mut planner = CoveragePlanner::new(&grid, PlannerOptions::new(3)).unwrap();
            black_box(planner.run().unwrap());
        });
    });
}

/// Benchmark: full run on a scattered 64x64 table, both reconnection strategies.
fn bench_cover_scattered_64(c: &mut Criterion) {
    let grid = scattered_grid(64);

    for strategy in [SearchStrategy::AStar, SearchStrategy::IdaStar] {
        let options = PlannerOptions::new(2).with_strategy(strategy);
        c.bench_function(&format!("cover_scattered_64_r2_{}", strategy), |b| {
            b.iter(|| {
                let mut planner = CoveragePlanner::new(&grid, options).unwrap();
                black_box(planner.run().unwrap());
            });
        });
    }
}

/// Benchmark: corner-to-corner reconnection through a fully visited 48x48 table.
fn bench_reconnect_open(c: &mut Criterion) {
    let mut visited = CellGrid::new(48);
    for x in 0..48 {
        for y in 0..48 {
            visited.set(Cell::new(x, y), true);
        }
    }
    let query = ReconnectQuery::new(Cell::new(0, 0), Cell::new(47, 47), &visited);

    for strategy in [SearchStrategy::AStar, SearchStrategy::IdaStar] {
        let reconnector = PathReconnector::new(strategy);
        c.bench_function(&format!("reconnect_open_48_{}", strategy), |b| {
            b.iter(|| black_box(reconnector.find_route(&query)));
        });
    }
}

criterion_group!(
    benches,
    bench_cover_empty_64,
    bench_cover_scattered_64,
    bench_reconnect_open
);
criterion_main!(benches);
