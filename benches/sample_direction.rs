//! Measure steering a crowd of agents from a single field, pursuing and
//! wandering
//!

use bevy::prelude::*;
use bevy_floodfill_paths::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};

/// Build a field over a 64x64 map and scatter 1000 agent footprints over it
fn prepare_crowd() -> (FloodFillPaths, Vec<Footprint>) {
	let mut grid = SolidityGrid::new(64, 64);
	grid.fill_solid(IRect::new(20, 10, 22, 50));
	grid.fill_solid(IRect::new(40, 14, 42, 64));
	let mut paths = FloodFillPaths::new();
	paths.fill_paths_tile_region(&grid, IVec2::new(2, 2), IRect::new(0, 0, 64, 64));
	let footprints = (0..1000)
		.map(|i| Footprint::new((i * 37) % 2000, (i * 53) % 2000, 24, 24))
		.collect();
	(paths, footprints)
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(100);
	let (paths, footprints) = prepare_crowd();
	group.bench_function("sample_direction_crowd", |b| {
		b.iter(|| {
			for footprint in footprints.iter() {
				black_box(paths.interpolated_direction(black_box(footprint), 4.0, false));
			}
		})
	});
	let mut rng = StdRng::seed_from_u64(0);
	group.bench_function("sample_wander_crowd", |b| {
		b.iter(|| {
			let mut field = paths.clone();
			for footprint in footprints.iter() {
				black_box(field.random_further_direction(black_box(footprint), 4.0, &mut rng));
			}
		})
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
