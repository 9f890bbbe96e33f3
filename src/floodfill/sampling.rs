//! Converting a built field into steering vectors.
//!
//! An agent's [Footprint] overlaps one or more cells of the field. Each
//! overlapped cell with a back-vector contributes it, weighted by how much of
//! the footprint lies in that cell:
//!
//! ```text
//!  _____________
//! |  ↙  |  ←  |     footprint covers 3/4 of the right cell and 1/4 of
//! |   ┌─┼───┐ |     the left, so the result leans mostly west
//! |___│_|___│_|
//!     └─────┘
//! ```
//!
//! Unless asked to be lenient a contribution is only counted if moving the
//! whole footprint along it would not run into a solid tile, so agents
//! hugging a wall don't get pushed into it. If that rejects everything the
//! query is repeated leniently so an agent in a tight spot never freezes.
//!
//! The wander query first re-points the back-vectors of the overlapped cells
//! at random neighbours which are no closer to the source, then aggregates in
//! the same way, giving a flee/wander direction.
//!

use crate::prelude::*;
use bevy::prelude::*;
use rand::Rng;

impl FloodFillPaths {
	/// Inclusive local `(min, max)` cells overlapped by `footprint`, clamped
	/// to the field. [None] if the footprint misses the field entirely
	fn footprint_cells(&self, footprint: &Footprint) -> Option<(IVec2, IVec2)> {
		let origin = self.get_origin();
		let overlaps = self.overlaps(footprint);
		debug_assert!(
			overlaps,
			"Footprint {:?} lies entirely outside of the field at {:?} of size {}x{}",
			footprint,
			origin,
			self.width(),
			self.height()
		);
		if !overlaps {
			warn!(
				"Footprint {:?} lies entirely outside of the field, no direction available",
				footprint
			);
			return None;
		}
		let (min, max) = footprint.get_tile_span(self.get_tile_size());
		let (min, max) = (min - origin, max - origin);
		let min = IVec2::new(squish(min.x, 0, self.width()), squish(min.y, 0, self.height()));
		let max = IVec2::new(squish(max.x, 0, self.width()), squish(max.y, 0, self.height()));
		Some((min, max))
	}
	/// Whether `footprint` touches at least one cell of the field. Queries
	/// for a footprint which doesn't are a contract violation
	pub fn overlaps(&self, footprint: &Footprint) -> bool {
		if self.get_buffer().is_empty() || footprint.is_degenerate() {
			return false;
		}
		let (min, max) = footprint.get_tile_span(self.get_tile_size());
		let (min, max) = (min - self.get_origin(), max - self.get_origin());
		max.x >= 0 && max.y >= 0 && min.x < self.width() && min.y < self.height()
	}
	/// Whether a query can be answered at all
	fn can_sample(&self, footprint: &Footprint, speed: f32) -> bool {
		!self.get_buffer().is_empty() && !footprint.is_degenerate() && speed > 0.0 && speed.is_finite()
	}
	/// Convert a world position to a local cell
	fn world_to_local(&self, x: i32, y: i32) -> IVec2 {
		IVec2::new(x, y).div_euclid(IVec2::splat(self.get_tile_size())) - self.get_origin()
	}
	/// Whether the world position lands on a solid cell or outside the field
	fn is_world_blocked(&self, x: i32, y: i32) -> bool {
		let local = self.world_to_local(x, y);
		self.get_buffer().is_solid_or_out_of_bounds(local.x, local.y)
	}
	/// Steering vector of length `speed` for an agent occupying `footprint`,
	/// or [Vec2::ZERO] when the field offers no direction.
	///
	/// When `lenient` is false contributions that would move the footprint
	/// into a solid tile are dropped, and if nothing is left the query is
	/// retried leniently
	pub fn interpolated_direction(&self, footprint: &Footprint, speed: f32, lenient: bool) -> Vec2 {
		if !self.can_sample(footprint, speed) {
			return Vec2::ZERO;
		}
		let Some((min, max)) = self.footprint_cells(footprint) else {
			return Vec2::ZERO;
		};
		let origin = self.get_origin();
		// any further and every sample leaves the field
		let max_reach = (self.width().max(self.height()) + 1).saturating_mul(self.get_tile_size());
		let ispeed = (speed.ceil() as i32).min(max_reach);
		let mut acc = IVec2::ZERO;
		for y in min.y..=max.y {
			for x in min.x..=max.x {
				let Some(node) = self.get_buffer().get(x, y) else {
					continue;
				};
				if !node.has_direction() {
					continue;
				}
				if lenient || self.can_head(footprint, ispeed, node.get_back()) {
					let tile = IVec2::new(x, y) + origin;
					let sub_area = footprint.overlap_with_tile(tile.x, tile.y, self.get_tile_size()) + 1;
					let (dx, dy) = node.get_back_offset();
					acc += IVec2::new(dx, dy) * sub_area;
				}
			}
		}
		if acc == IVec2::ZERO {
			if lenient {
				Vec2::ZERO
			} else {
				self.interpolated_direction(footprint, speed, true)
			}
		} else {
			acc.as_vec2().normalize() * speed
		}
	}
	/// Whether translating `footprint` by `speed` units along `direction`
	/// keeps every sampled point of it off solid tiles.
	///
	/// The footprint is sampled on a tile-sized lattice clamped to its edges
	/// so that the last partial tile is always tested. Diagonal moves also
	/// test both orthogonal offsets so the footprint can't slip through a gap
	/// between two corners
	pub fn can_head(&self, footprint: &Footprint, speed: i32, direction: Ordinal) -> bool {
		let (dx, dy) = direction.get_offset();
		let is_diagonal = direction.is_diagonal();
		let tile_size = self.get_tile_size();
		let (sx, sy) = (footprint.left(), footprint.top());
		// last covered unit, edges are exclusive
		let (ex, ey) = (footprint.right() - 1, footprint.bottom() - 1);

		let mut y = sy;
		loop {
			let yy = squish(y, sy, ey + 1);
			let mut x = sx;
			loop {
				let xx = squish(x, sx, ex + 1);
				let moved_x = xx.saturating_add(dx.saturating_mul(speed));
				let moved_y = yy.saturating_add(dy.saturating_mul(speed));
				if self.is_world_blocked(moved_x, moved_y) {
					return false;
				}
				if is_diagonal && (self.is_world_blocked(xx, moved_y) || self.is_world_blocked(moved_x, yy)) {
					return false;
				}
				if x >= ex {
					break;
				}
				x = x.saturating_add(tile_size);
			}
			if y >= ey {
				break;
			}
			y = y.saturating_add(tile_size);
		}
		true
	}
	/// Flee/wander steering vector: every free cell under `footprint` is
	/// re-pointed at a random neighbour which is no closer to the source,
	/// then the result is aggregated as in
	/// [FloodFillPaths::interpolated_direction].
	///
	/// This mutates the field, afterwards [FloodFillPaths::get_mode] reports
	/// [FieldMode::Randomized]
	pub fn random_further_direction<R: Rng + ?Sized>(
		&mut self,
		footprint: &Footprint,
		speed: f32,
		rng: &mut R,
	) -> Vec2 {
		if !self.can_sample(footprint, speed) {
			return Vec2::ZERO;
		}
		let Some((min, max)) = self.footprint_cells(footprint) else {
			return Vec2::ZERO;
		};
		for y in min.y..=max.y {
			for x in min.x..=max.x {
				if !self.get_buffer().is_solid_or_out_of_bounds(x, y) {
					self.point_to_random_further(rng, x, y);
				}
			}
		}
		self.interpolated_direction(footprint, speed, false)
	}
	/// Re-point local cell `(x, y)` at one of its free neighbours whose cost
	/// is no smaller than its own. Scanning the neighbours in order, the first
	/// candidate is always taken and each later one replaces the choice on a
	/// coin flip. A marked cell is left without a direction
	fn point_to_random_further<R: Rng + ?Sized>(&mut self, rng: &mut R, x: i32, y: i32) {
		let Some(node) = self.get_buffer().get(x, y).copied() else {
			return;
		};
		let mut choice = Ordinal::Zero;
		let mut set = false;
		if !node.is_marked() {
			for ord in Ordinal::NEIGHBOURS.iter() {
				let (dx, dy) = ord.get_offset();
				let Some(neighbour) = self.get_buffer().get(x + dx, y + dy) else {
					continue;
				};
				if neighbour.is_solid() {
					continue;
				}
				if neighbour.get_cost() >= node.get_cost() && (!set || rng.random_range(0..2) == 1) {
					choice = *ord;
					set = true;
				}
			}
		}
		self.get_buffer_mut().set_randomized_back(x, y, choice);
	}
	/// Steering vector after re-pointing every free cell under `footprint` at
	/// its cheapest reached neighbour. Restores the toward-source gradient
	/// over cells a wander pass disturbed and gives a direction to cells the
	/// expansion never reached but which border reached ones
	pub fn local_min_direction(&mut self, footprint: &Footprint, speed: f32) -> Vec2 {
		if !self.can_sample(footprint, speed) {
			return Vec2::ZERO;
		}
		let Some((min, max)) = self.footprint_cells(footprint) else {
			return Vec2::ZERO;
		};
		for y in min.y..=max.y {
			for x in min.x..=max.x {
				if !self.get_buffer().is_solid_or_out_of_bounds(x, y) {
					self.point_to_local_min(x, y);
				}
			}
		}
		self.interpolated_direction(footprint, speed, false)
	}
	/// Re-point local cell `(x, y)` at the reached neighbour offering the
	/// cheapest route to the source. A reached cell cheaper than any such
	/// route (the source) and a marked cell are left without a direction
	fn point_to_local_min(&mut self, x: i32, y: i32) {
		let Some(node) = self.get_buffer().get(x, y).copied() else {
			return;
		};
		let mut choice = Ordinal::Zero;
		if !node.is_marked() {
			let mut min_distance = u32::MAX;
			for ord in Ordinal::NEIGHBOURS.iter() {
				let (dx, dy) = ord.get_offset();
				let Some(neighbour) = self.get_buffer().get(x + dx, y + dy) else {
					continue;
				};
				if neighbour.is_solid() || !neighbour.is_visited() {
					continue;
				}
				let distance = neighbour.get_cost() + ord.get_step_cost();
				if distance < min_distance {
					choice = *ord;
					min_distance = distance;
				}
			}
			if node.is_visited() && node.get_cost() < min_distance {
				choice = Ordinal::Zero;
			}
		}
		self.get_buffer_mut().set_gradient_back(x, y, choice);
	}
}
