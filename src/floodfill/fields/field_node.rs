//! A [FieldNode] is the record stored for every cell of a
//! [crate::prelude::FieldBuffer].
//!
//! Costs are measured in units where an orthogonal step is `100` and a
//! diagonal step is `140`. For a `5x5` open region with the source in the
//! top left a built field looks like:
//!
//! ```text
//!  ________________________________
//! |     |     |     |     |     |
//! |  0  | 100 | 200 | 300 | 400 |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! | 100 | 140 | 240 | 340 | 440 |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! | 200 | 240 | 280 | 380 | 480 |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! | 300 | 340 | 380 | 420 | 520 |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! | 400 | 440 | 480 | 520 | 560 |
//! |_____|_____|_____|_____|_____|
//! ```
//!

use crate::prelude::*;

/// State of a single cell of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldNode {
	/// Impassable flag sampled from the [Solidity] provider at build time
	solid: bool,
	/// Set once the cost of the cell is final
	visited: bool,
	/// Accumulated cost from the source, `0` when never reached
	cost: u32,
	/// Direction to move in to approach the source (or, after a wander pass,
	/// a randomly chosen neighbour that is no closer to the source)
	back: Ordinal,
	/// Scratch flag for samplers, a marked cell is given no direction when
	/// back-vectors are re-pointed
	marked: bool,
	/// Whether `back` was last written by a wander pass
	randomized: bool,
}

impl FieldNode {
	/// Create a fresh, unexpanded record
	pub fn new(solid: bool) -> Self {
		FieldNode {
			solid,
			..Default::default()
		}
	}
	/// Is the cell impassable
	pub fn is_solid(&self) -> bool {
		self.solid
	}
	/// Set the impassable flag
	pub fn set_solid(&mut self, solid: bool) {
		self.solid = solid;
	}
	/// Has the expansion fixed the final cost of this cell
	pub fn is_visited(&self) -> bool {
		self.visited
	}
	/// Flag the cost of the cell as final
	pub fn set_visited(&mut self) {
		self.visited = true;
	}
	/// Accumulated cost from the source
	pub fn get_cost(&self) -> u32 {
		self.cost
	}
	/// Set the accumulated cost
	pub fn set_cost(&mut self, cost: u32) {
		self.cost = cost;
	}
	/// The back-vector of the cell
	pub fn get_back(&self) -> Ordinal {
		self.back
	}
	/// The back-vector as a `(dx, dy)` offset
	pub fn get_back_offset(&self) -> (i32, i32) {
		self.back.get_offset()
	}
	/// Set the back-vector
	pub fn set_back(&mut self, back: Ordinal) {
		self.back = back;
	}
	/// Whether the cell carries a direction a sampler can use
	pub fn has_direction(&self) -> bool {
		!self.solid && self.back != Ordinal::Zero
	}
	/// Is the cell marked
	pub fn is_marked(&self) -> bool {
		self.marked
	}
	/// Set or clear the mark
	pub fn set_marked(&mut self, marked: bool) {
		self.marked = marked;
	}
	/// Was `back` last written by a wander pass
	pub fn is_randomized(&self) -> bool {
		self.randomized
	}
	/// Record who last wrote `back`
	pub(crate) fn set_randomized(&mut self, randomized: bool) {
		self.randomized = randomized;
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn fresh_node_has_no_information() {
		let node = FieldNode::new(false);
		assert!(!node.is_visited());
		assert_eq!(0, node.get_cost());
		assert_eq!((0, 0), node.get_back_offset());
		assert!(!node.has_direction());
	}
	#[test]
	fn solid_node_never_has_direction() {
		let mut node = FieldNode::new(true);
		node.set_back(Ordinal::East);
		assert!(!node.has_direction());
	}
}
