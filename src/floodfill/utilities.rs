//! Useful structures and tools used by the fields
//!

/// Number of world units along one side of a square tile
pub const TILE_SIZE: i32 = 32;
/// Cost of stepping to an orthogonally adjacent cell
pub const ORTHOGONAL_COST: u32 = 100;
/// Cost of stepping to a diagonally adjacent cell, approximates `√2 * 100`
pub const DIAGONAL_COST: u32 = 140;

/// Clamp `value` into the half-open range `[min, max)`.
///
/// When the range is empty `min` wins
pub fn squish(value: i32, min: i32, max: i32) -> i32 {
	value.min(max - 1).max(min)
}

/// Round `value` up to the nearest power of two, `0` rounds to `1`
pub fn power_of_two_round(value: u32) -> u32 {
	value.max(1).next_power_of_two()
}

/// Convenience way of describing the 8 directions of movement from a cell to
/// one of its neighbours, plus [Ordinal::Zero] for "no direction".
///
/// Rows grow downward, so [Ordinal::North] is an offset of `(0, -1)`
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
pub enum Ordinal {
	North,
	East,
	South,
	West,
	NorthEast,
	SouthEast,
	SouthWest,
	NorthWest,
	/// Special case, used by a cell that has no back-vector (the source or
	/// somewhere the expansion never reached)
	#[default]
	Zero,
}

impl Ordinal {
	/// All 8 directions in row-major scan order of the `3x3` neighbourhood,
	/// the order used whenever neighbours are examined
	pub const NEIGHBOURS: [Ordinal; 8] = [
		Ordinal::NorthWest,
		Ordinal::North,
		Ordinal::NorthEast,
		Ordinal::West,
		Ordinal::East,
		Ordinal::SouthWest,
		Ordinal::South,
		Ordinal::SouthEast,
	];
	/// Get the `(dx, dy)` offset of the direction
	pub fn get_offset(&self) -> (i32, i32) {
		match self {
			Ordinal::North => (0, -1),
			Ordinal::East => (1, 0),
			Ordinal::South => (0, 1),
			Ordinal::West => (-1, 0),
			Ordinal::NorthEast => (1, -1),
			Ordinal::SouthEast => (1, 1),
			Ordinal::SouthWest => (-1, 1),
			Ordinal::NorthWest => (-1, -1),
			Ordinal::Zero => (0, 0),
		}
	}
	/// Whether the direction moves along both axes
	pub fn is_diagonal(&self) -> bool {
		matches!(
			self,
			Ordinal::NorthEast | Ordinal::SouthEast | Ordinal::SouthWest | Ordinal::NorthWest
		)
	}
	/// Cost of a single step in this direction
	pub fn get_step_cost(&self) -> u32 {
		match self {
			Ordinal::Zero => 0,
			o if o.is_diagonal() => DIAGONAL_COST,
			_ => ORTHOGONAL_COST,
		}
	}
	/// Returns the opposite [Ordinal] of the current
	pub fn inverse(&self) -> Ordinal {
		match self {
			Ordinal::North => Ordinal::South,
			Ordinal::East => Ordinal::West,
			Ordinal::South => Ordinal::North,
			Ordinal::West => Ordinal::East,
			Ordinal::NorthEast => Ordinal::SouthWest,
			Ordinal::SouthEast => Ordinal::NorthWest,
			Ordinal::SouthWest => Ordinal::NorthEast,
			Ordinal::NorthWest => Ordinal::SouthEast,
			Ordinal::Zero => Ordinal::Zero,
		}
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn squish_inside() {
		let result = squish(5, 0, 10);
		let actual = 5;
		assert_eq!(actual, result);
	}
	#[test]
	fn squish_below() {
		let result = squish(-3, 0, 10);
		let actual = 0;
		assert_eq!(actual, result);
	}
	#[test]
	fn squish_excludes_upper_bound() {
		let result = squish(10, 0, 10);
		let actual = 9;
		assert_eq!(actual, result);
	}
	#[test]
	fn power_of_two_rounding() {
		let result: Vec<u32> = [0, 1, 2, 3, 10, 16, 17].iter().map(|v| power_of_two_round(*v)).collect();
		let actual = vec![1, 1, 2, 4, 16, 16, 32];
		assert_eq!(actual, result);
	}
	#[test]
	fn step_costs() {
		assert_eq!(ORTHOGONAL_COST, Ordinal::West.get_step_cost());
		assert_eq!(DIAGONAL_COST, Ordinal::SouthWest.get_step_cost());
		assert_eq!(0, Ordinal::Zero.get_step_cost());
	}
	#[test]
	fn inverse_offsets_cancel() {
		for ord in Ordinal::NEIGHBOURS.iter() {
			let (ax, ay) = ord.get_offset();
			let (bx, by) = ord.inverse().get_offset();
			assert_eq!((0, 0), (ax + bx, ay + by));
		}
	}
}
