//! Measure rebuilding a field, once over an open map and once over a maze of
//! walls
//!
//! World is 256 tiles by 256 tiles
//!

use bevy::prelude::*;
use bevy_floodfill_paths::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Every fourth column is a wall with a single gap, alternating between the
/// top and bottom of the map so the expansion has to snake across it
fn prepare_maze(length: u32) -> SolidityGrid {
	let mut grid = SolidityGrid::new(length, length);
	let l = length as i32;
	for (i, x) in (2..l).step_by(4).enumerate() {
		if i % 2 == 0 {
			grid.fill_solid(IRect::new(x, 0, x + 1, l - 2));
		} else {
			grid.fill_solid(IRect::new(x, 2, x + 1, l));
		}
	}
	grid
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(100);
	let open = SolidityGrid::new(256, 256);
	let maze = prepare_maze(256);
	let region = IRect::new(0, 0, 256, 256);
	// reuse the engine so only the first iteration allocates
	let mut paths = FloodFillPaths::new();
	group.bench_function("calc_flood_fill_open", |b| {
		b.iter(|| {
			paths.fill_paths_tile_region(black_box(&open), black_box(IVec2::new(128, 128)), region)
		})
	});
	group.bench_function("calc_flood_fill_maze", |b| {
		b.iter(|| paths.fill_paths_tile_region(black_box(&maze), black_box(IVec2::new(0, 0)), region))
	});
	group.bench_function("calc_flood_fill_radius", |b| {
		b.iter(|| paths.fill_paths_in_radius(black_box(&open), black_box(IVec2::new(4096, 4096)), 320))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
