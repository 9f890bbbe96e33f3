//! An agent occupies an axis-aligned rectangle in world units, its
//! [Footprint]. Samplers map the footprint onto the tiles it overlaps
//!

use bevy::prelude::*;

/// Axis-aligned rectangle of an agent in world units
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Footprint {
	/// Top left corner
	position: IVec2,
	/// `(width, height)`
	size: IVec2,
}

impl Footprint {
	/// Create a new instance of [Footprint] from its top left corner and
	/// dimensions
	pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
		Footprint {
			position: IVec2::new(x, y),
			size: IVec2::new(width, height),
		}
	}
	/// Create a [Footprint] of `size` centred on `centre`
	pub fn from_centre(centre: IVec2, size: IVec2) -> Self {
		Footprint {
			position: centre - size / 2,
			size,
		}
	}
	/// Top left corner
	pub fn get_position(&self) -> IVec2 {
		self.position
	}
	/// `(width, height)`
	pub fn get_size(&self) -> IVec2 {
		self.size
	}
	/// Left edge
	pub fn left(&self) -> i32 {
		self.position.x
	}
	/// Top edge
	pub fn top(&self) -> i32 {
		self.position.y
	}
	/// Right edge, exclusive
	pub fn right(&self) -> i32 {
		self.position.x + self.size.x
	}
	/// Bottom edge, exclusive
	pub fn bottom(&self) -> i32 {
		self.position.y + self.size.y
	}
	/// A footprint without area can't overlap anything
	pub fn is_degenerate(&self) -> bool {
		self.size.x <= 0 || self.size.y <= 0
	}
	/// Inclusive `(min, max)` tile coordinates overlapped by the footprint
	pub fn get_tile_span(&self, tile_size: i32) -> (IVec2, IVec2) {
		let min = IVec2::new(
			self.left().div_euclid(tile_size),
			self.top().div_euclid(tile_size),
		);
		let max = IVec2::new(
			(self.right() - 1).div_euclid(tile_size),
			(self.bottom() - 1).div_euclid(tile_size),
		);
		(min, max)
	}
	/// Area of the overlap between the footprint and tile `(x, y)`, `0` when
	/// they don't touch
	pub fn overlap_with_tile(&self, x: i32, y: i32, tile_size: i32) -> i32 {
		let sx = (x * tile_size).max(self.left());
		let sy = (y * tile_size).max(self.top());
		let ex = ((x + 1) * tile_size).min(self.right());
		let ey = ((y + 1) * tile_size).min(self.bottom());
		(ex - sx).max(0) * (ey - sy).max(0)
	}
}

impl From<IRect> for Footprint {
	fn from(rect: IRect) -> Self {
		Footprint {
			position: rect.min,
			size: rect.size(),
		}
	}
}
