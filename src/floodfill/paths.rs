//! [FloodFillPaths] owns a [FieldBuffer] and rebuilds it around a source,
//! typically once per frame per pursued target. Agents then ask it for
//! steering vectors, see [crate::floodfill::sampling].
//!

use std::collections::BinaryHeap;

use crate::prelude::*;
use bevy::prelude::*;

/// Flood-fill pathfinding engine for a single source
#[derive(Component, Clone)]
pub struct FloodFillPaths {
	/// Cost field of the most recent build
	buffer: FieldBuffer,
	/// Scratch heap reused between builds
	heap: BinaryHeap<ExpansionNode>,
	/// Number of world units along one side of a tile
	tile_size: i32,
}

impl Default for FloodFillPaths {
	fn default() -> Self {
		FloodFillPaths::new()
	}
}

impl FloodFillPaths {
	/// Create a new instance of [FloodFillPaths] using [TILE_SIZE]
	pub fn new() -> Self {
		FloodFillPaths::with_tile_size(TILE_SIZE)
	}
	/// Create a new instance of [FloodFillPaths] for a world whose tiles are
	/// `tile_size` units across
	pub fn with_tile_size(tile_size: i32) -> Self {
		if tile_size <= 0 {
			panic!("Tile size must be greater than zero, got {}", tile_size);
		}
		FloodFillPaths {
			buffer: FieldBuffer::new(),
			heap: BinaryHeap::new(),
			tile_size,
		}
	}
	/// Number of world units along one side of a tile
	pub fn get_tile_size(&self) -> i32 {
		self.tile_size
	}
	/// Get a reference to the field
	pub fn get_buffer(&self) -> &FieldBuffer {
		&self.buffer
	}
	/// Get a mutable reference to the field
	pub(crate) fn get_buffer_mut(&mut self) -> &mut FieldBuffer {
		&mut self.buffer
	}
	/// How the back-vectors of the field should currently be interpreted
	pub fn get_mode(&self) -> FieldMode {
		self.buffer.get_mode()
	}
	/// Logical width of the field in tiles
	pub fn width(&self) -> i32 {
		self.buffer.width()
	}
	/// Logical height of the field in tiles
	pub fn height(&self) -> i32 {
		self.buffer.height()
	}
	/// Tile coordinates of the top left cell of the field
	pub fn get_origin(&self) -> IVec2 {
		self.buffer.get_origin()
	}
	/// Get the record of a tile given in world tile coordinates, [None] if it
	/// lies outside of the field
	pub fn get_node(&self, tile: IVec2) -> Option<&FieldNode> {
		self.buffer.get_tile(tile)
	}
	/// Rebuild the field over `region` (tile coordinates, exclusive max) with
	/// the expansion rooted at `source_tile` (tile coordinates, must lie within
	/// `region`).
	///
	/// The buffer grows to fit the region if required, solidity is re-sampled
	/// and every record reset before expanding
	pub fn fill_paths_tile_region<S: Solidity + ?Sized>(
		&mut self,
		solidity: &S,
		source_tile: IVec2,
		region: IRect,
	) {
		let inside = region.contains(source_tile)
			&& source_tile.x < region.max.x
			&& source_tile.y < region.max.y;
		debug_assert!(
			inside,
			"Source tile {:?} lies outside of region {:?}",
			source_tile, region
		);
		let source_tile = if inside || region.is_empty() {
			source_tile
		} else {
			warn!(
				"Source tile {:?} lies outside of region {:?}, clamping",
				source_tile, region
			);
			source_tile.clamp(region.min, region.max - IVec2::ONE)
		};
		self.buffer.reset(region, solidity);
		let local = source_tile - region.min;
		let visited = flood_fill(&mut self.buffer, &mut self.heap, local);
		trace!(
			"Flood filled {} of {} cells from {:?}\n{}",
			visited,
			region.size().x * region.size().y,
			source_tile,
			self.buffer
		);
	}
	/// Rebuild the field over the tiles covered by a `2 * radius` square
	/// centred on `source_xy` (world units). The square is slid back inside
	/// the map if it would hang over an edge
	pub fn fill_paths_in_radius<S: Solidity + ?Sized>(
		&mut self,
		solidity: &S,
		source_xy: IVec2,
		radius: i32,
	) {
		let region = self.radius_tile_region(solidity.get_size(), source_xy, radius);
		let source_tile = source_xy.div_euclid(IVec2::splat(self.tile_size));
		let source_tile = source_tile.clamp(region.min, (region.max - IVec2::ONE).max(region.min));
		self.fill_paths_tile_region(solidity, source_tile, region);
	}
	/// Tile region covered by a `2 * radius` view centred on `source_xy` and
	/// clamped inside a map of `map_tiles` tiles
	fn radius_tile_region(&self, map_tiles: UVec2, source_xy: IVec2, radius: i32) -> IRect {
		let world = map_tiles.as_ivec2() * self.tile_size;
		let view = IVec2::splat(radius.max(0) * 2).min(world);
		// keep the view inside the world, a view bigger than the world pins to the origin
		let min = (source_xy - view / 2).clamp(IVec2::ZERO, world - view);
		let max = min + view;
		let tile_min = min.div_euclid(IVec2::splat(self.tile_size));
		// a partially covered tile still counts
		let tile_max = (max + IVec2::splat(self.tile_size - 1)).div_euclid(IVec2::splat(self.tile_size));
		let tile_max = tile_max.min(map_tiles.as_ivec2()).max(tile_min + IVec2::ONE);
		IRect::from_corners(tile_min, tile_max)
	}
	/// Pin a tile (world tile coordinates) so that re-pointing passes give it
	/// no direction. Returns false if the tile lies outside of the field
	pub fn mark_cell(&mut self, tile: IVec2) -> bool {
		let local = tile - self.buffer.get_origin();
		if let Some(node) = self.buffer.get_mut(local.x, local.y) {
			node.set_marked(true);
			true
		} else {
			false
		}
	}
	/// Remove every mark placed by [FloodFillPaths::mark_cell]
	pub fn clear_marks(&mut self) {
		self.buffer.clear_marks();
	}
}
