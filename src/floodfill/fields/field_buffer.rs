//! The [FieldBuffer] is a reusable 2D grid of [FieldNode] records.
//!
//! It distinguishes between its *allocated* extent, which only ever grows
//! (each dimension rounded up to a power of two), and its *logical* extent,
//! the size of the region most recently built. The logical extent is anchored
//! at an *origin* given in tile coordinates, so local cell `(0, 0)` is tile
//! `origin` in the world.
//!
//! ```text
//!  allocated 8x4
//!  _______________________
//! |o_|__|__|__|__|  |  |  |
//! |__|__|__|__|__|  |  |  |   o = origin, logical extent 5x3
//! |__|__|__|__|__|  |  |  |
//! |  |  |  |  |  |  |  |  |
//!  ‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾
//! ```
//!
//! Only cells inside the logical extent are ever read or written, growing the
//! allocation is the only time the buffer touches the allocator.
//!

use std::fmt;

use crate::prelude::*;
use bevy::prelude::*;

/// Reusable, origin-relative grid of [FieldNode]
#[derive(Default, Clone)]
pub struct FieldBuffer {
	/// Row-major storage of `allocated.x * allocated.y` records
	nodes: Vec<FieldNode>,
	/// Allocated dimensions, each a power of two (or zero before first use)
	allocated: UVec2,
	/// Dimensions of the region most recently built
	size: UVec2,
	/// Tile coordinates of local cell `(0, 0)`
	origin: IVec2,
	/// Number of cells whose back-vector was last written by a wander pass
	randomized_cells: usize,
}

impl FieldBuffer {
	/// Create a new, unallocated [FieldBuffer]
	pub fn new() -> Self {
		FieldBuffer::default()
	}
	/// True until a region has been built
	pub fn is_empty(&self) -> bool {
		self.size == UVec2::ZERO
	}
	/// Allocated `(width, height)`
	pub fn get_allocated_size(&self) -> UVec2 {
		self.allocated
	}
	/// Logical `(width, height)` of the region most recently built
	pub fn get_size(&self) -> UVec2 {
		self.size
	}
	/// Logical width
	pub fn width(&self) -> i32 {
		self.size.x as i32
	}
	/// Logical height
	pub fn height(&self) -> i32 {
		self.size.y as i32
	}
	/// Tile coordinates of local cell `(0, 0)`
	pub fn get_origin(&self) -> IVec2 {
		self.origin
	}
	/// How the back-vectors should currently be interpreted
	pub fn get_mode(&self) -> FieldMode {
		if self.randomized_cells > 0 {
			FieldMode::Randomized
		} else {
			FieldMode::Gradient
		}
	}
	/// Whether local `(x, y)` lies within the logical extent
	pub fn contains(&self, x: i32, y: i32) -> bool {
		x >= 0 && y >= 0 && x < self.width() && y < self.height()
	}
	/// Storage index of local `(x, y)`
	fn index(&self, x: i32, y: i32) -> usize {
		y as usize * self.allocated.x as usize + x as usize
	}
	/// Get the record of local `(x, y)`, [None] outside of the logical extent
	pub fn get(&self, x: i32, y: i32) -> Option<&FieldNode> {
		if self.contains(x, y) {
			Some(&self.nodes[self.index(x, y)])
		} else {
			None
		}
	}
	/// Get a mutable record of local `(x, y)`, [None] outside of the logical
	/// extent
	pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut FieldNode> {
		if self.contains(x, y) {
			let i = self.index(x, y);
			Some(&mut self.nodes[i])
		} else {
			None
		}
	}
	/// Get the record of a tile given in world tile coordinates
	pub fn get_tile(&self, tile: IVec2) -> Option<&FieldNode> {
		let local = tile - self.origin;
		self.get(local.x, local.y)
	}
	/// Anything outside of the logical extent counts as solid
	pub fn is_solid_or_out_of_bounds(&self, x: i32, y: i32) -> bool {
		self.get(x, y).is_none_or(|node| node.is_solid())
	}
	/// Grow the allocation so that a region of `size` fits. Dimensions grow
	/// independently to the next power of two and never shrink
	fn grow_to_fit(&mut self, size: UVec2) {
		if size.x <= self.allocated.x && size.y <= self.allocated.y {
			return;
		}
		let alloc = UVec2::new(
			self.allocated.x.max(power_of_two_round(size.x)),
			self.allocated.y.max(power_of_two_round(size.y)),
		);
		debug!(
			"Growing FieldBuffer from {}x{} to {}x{}",
			self.allocated.x, self.allocated.y, alloc.x, alloc.y
		);
		self.nodes = vec![FieldNode::default(); (alloc.x * alloc.y) as usize];
		self.allocated = alloc;
	}
	/// Point the buffer at a new `region` of tiles: grow the allocation if
	/// need be, re-sample solidity and reset every record inside the region.
	///
	/// `region` is in tile coordinates with an exclusive max corner
	pub fn reset<S: Solidity + ?Sized>(&mut self, region: IRect, solidity: &S) {
		let size = region.size().max(IVec2::ZERO).as_uvec2();
		self.grow_to_fit(size);
		self.origin = region.min;
		self.size = size;
		self.randomized_cells = 0;
		for y in 0..self.height() {
			for x in 0..self.width() {
				let solid = solidity.is_solid(x + region.min.x, y + region.min.y);
				let i = self.index(x, y);
				self.nodes[i] = FieldNode::new(solid);
			}
		}
	}
	/// Overwrite the back-vector of local `(x, y)` with a gradient direction
	pub fn set_gradient_back(&mut self, x: i32, y: i32, back: Ordinal) {
		if let Some(node) = self.get_mut(x, y) {
			let was_randomized = node.is_randomized();
			node.set_back(back);
			node.set_randomized(false);
			if was_randomized {
				self.randomized_cells -= 1;
			}
		}
	}
	/// Overwrite the back-vector of local `(x, y)` with a wander direction
	pub fn set_randomized_back(&mut self, x: i32, y: i32, back: Ordinal) {
		if let Some(node) = self.get_mut(x, y) {
			let was_randomized = node.is_randomized();
			node.set_back(back);
			node.set_randomized(true);
			if !was_randomized {
				self.randomized_cells += 1;
			}
		}
	}
	/// Clear the `marked` flag of every cell in the logical extent
	pub fn clear_marks(&mut self) {
		for y in 0..self.height() {
			for x in 0..self.width() {
				let i = self.index(x, y);
				self.nodes[i].set_marked(false);
			}
		}
	}
}

/// Prints the cost of each cell, `#` for a solid cell and `.` for a cell the
/// expansion never reached
impl fmt::Display for FieldBuffer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for y in 0..self.height() {
			let row: Vec<String> = (0..self.width())
				.map(|x| {
					let node = &self.nodes[self.index(x, y)];
					if node.is_solid() {
						"#".to_string()
					} else if !node.is_visited() {
						".".to_string()
					} else {
						node.get_cost().to_string()
					}
				})
				.collect();
			writeln!(f, "{}", row.join(" "))?;
		}
		Ok(())
	}
}
