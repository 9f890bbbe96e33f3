//! The expansion performs a Dijkstra search over a [FieldBuffer] from a source
//! cell, storing in each reached cell its accumulated cost and a back-vector
//! pointing at the neighbour it was reached from.
//!
//! 1. The source is given a cost of `0` and pushed onto a min-heap
//! 2. The cheapest cell is popped, stale entries (a cheaper route was found
//! after they were pushed) and already visited cells are skipped
//! 3. The popped cell is flagged as visited, its cost is now final
//! 4. Each of the 8 neighbours which is inside the region, not solid and not
//! visited is relaxed: if reaching it through the popped cell is cheaper than
//! anything found so far its cost and back-vector are updated and it is
//! pushed
//! 5. Repeat until the heap is empty
//!
//! Diagonal moves may not cut corners. If either of the orthogonal cells
//! flanking a diagonal is solid the move is forbidden:
//!
//! ```text
//!   _____
//!  |X |~ |  <- ~ cannot be reached diagonally from o
//!  |o_|__|
//! ```
//!

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::prelude::*;
use bevy::prelude::*;

/// A cell waiting on the heap along with the cost it was pushed with
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ExpansionNode {
	/// Local column
	column: i32,
	/// Local row
	row: i32,
	/// Accumulated cost when pushed
	cost: u32,
}

impl ExpansionNode {
	/// Create a new instance of [ExpansionNode]
	pub fn new(column: i32, row: i32, cost: u32) -> Self {
		ExpansionNode { column, row, cost }
	}
}

// `BinaryHeap` is a max-heap so the ordering on cost is flipped, position
// breaks ties so that the expansion order is fully deterministic
impl Ord for ExpansionNode {
	fn cmp(&self, other: &Self) -> Ordering {
		other
			.cost
			.cmp(&self.cost)
			.then_with(|| other.row.cmp(&self.row))
			.then_with(|| other.column.cmp(&self.column))
	}
}

impl PartialOrd for ExpansionNode {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// Whether moving from `(x, y)` in direction `ord` would cut past a solid
/// corner
fn cuts_corner(buffer: &FieldBuffer, x: i32, y: i32, ord: Ordinal) -> bool {
	if !ord.is_diagonal() {
		return false;
	}
	let (dx, dy) = ord.get_offset();
	buffer.is_solid_or_out_of_bounds(x + dx, y) || buffer.is_solid_or_out_of_bounds(x, y + dy)
}

/// Run the expansion from the local cell `source` over a freshly reset
/// `buffer`. The `heap` is scratch space which is cleared before use so that
/// its allocation can be reused between builds.
///
/// Returns the number of cells visited
pub fn flood_fill(buffer: &mut FieldBuffer, heap: &mut BinaryHeap<ExpansionNode>, source: IVec2) -> usize {
	heap.clear();
	let Some(source_node) = buffer.get_mut(source.x, source.y) else {
		warn!(
			"Flood fill source ({}, {}) lies outside of the {}x{} region",
			source.x,
			source.y,
			buffer.width(),
			buffer.height()
		);
		return 0;
	};
	// the source is always open even if the tile underneath is solid
	source_node.set_solid(false);
	source_node.set_cost(0);
	source_node.set_back(Ordinal::Zero);
	heap.push(ExpansionNode::new(source.x, source.y, 0));

	let mut visited = 0;
	while let Some(current) = heap.pop() {
		let Some(node) = buffer.get_mut(current.column, current.row) else {
			continue;
		};
		if node.is_visited() || current.cost > node.get_cost() {
			continue;
		}
		node.set_visited();
		visited += 1;
		for ord in Ordinal::NEIGHBOURS.iter() {
			let (dx, dy) = ord.get_offset();
			let (nx, ny) = (current.column + dx, current.row + dy);
			let cost = current.cost + ord.get_step_cost();
			let Some(neighbour) = buffer.get(nx, ny) else {
				continue;
			};
			if neighbour.is_solid() || neighbour.is_visited() {
				continue;
			}
			// an untouched neighbour has no back-vector yet
			let discovered = neighbour.get_back() != Ordinal::Zero;
			if discovered && cost >= neighbour.get_cost() {
				continue;
			}
			if cuts_corner(buffer, current.column, current.row, *ord) {
				continue;
			}
			if let Some(neighbour) = buffer.get_mut(nx, ny) {
				neighbour.set_cost(cost);
				neighbour.set_back(ord.inverse());
				heap.push(ExpansionNode::new(nx, ny, cost));
			}
		}
	}
	visited
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	use rand::{rngs::StdRng, Rng, SeedableRng};

	/// Reset a buffer over the whole of `grid` and expand from `source`
	fn build(grid: &SolidityGrid, source: IVec2) -> FieldBuffer {
		let mut buffer = FieldBuffer::new();
		let size = grid.get_size().as_ivec2();
		buffer.reset(IRect::new(0, 0, size.x, size.y), grid);
		let mut heap = BinaryHeap::new();
		flood_fill(&mut buffer, &mut heap, source);
		buffer
	}

	/// Repeatedly relax every edge until nothing changes, the slow but
	/// obviously correct answer
	fn brute_force_costs(grid: &SolidityGrid, source: IVec2) -> Vec<Option<u32>> {
		let size = grid.get_size().as_ivec2();
		let idx = |x: i32, y: i32| (y * size.x + x) as usize;
		let mut costs: Vec<Option<u32>> = vec![None; (size.x * size.y) as usize];
		costs[idx(source.x, source.y)] = Some(0);
		let mut changed = true;
		while changed {
			changed = false;
			for y in 0..size.y {
				for x in 0..size.x {
					let Some(cost) = costs[idx(x, y)] else {
						continue;
					};
					for ord in Ordinal::NEIGHBOURS.iter() {
						let (dx, dy) = ord.get_offset();
						let (nx, ny) = (x + dx, y + dy);
						if grid.is_solid(nx, ny) {
							continue;
						}
						if ord.is_diagonal() && (grid.is_solid(x + dx, y) || grid.is_solid(x, y + dy)) {
							continue;
						}
						let next = cost + ord.get_step_cost();
						if costs[idx(nx, ny)].is_none_or(|c| next < c) {
							costs[idx(nx, ny)] = Some(next);
							changed = true;
						}
					}
				}
			}
		}
		costs
	}

	/// Assert that every cell matches the brute force answer
	fn assert_matches_brute_force(grid: &SolidityGrid, source: IVec2) {
		let buffer = build(grid, source);
		let expected = brute_force_costs(grid, source);
		let size = grid.get_size().as_ivec2();
		for y in 0..size.y {
			for x in 0..size.x {
				let node = buffer.get(x, y).unwrap();
				let result = if node.is_visited() { Some(node.get_cost()) } else { None };
				let actual = if grid.is_solid(x, y) { None } else { expected[(y * size.x + x) as usize] };
				assert_eq!(actual, result, "cell ({}, {})\n{}", x, y, buffer);
			}
		}
	}

	#[test]
	fn heap_pops_cheapest_first() {
		let mut heap = BinaryHeap::new();
		heap.push(ExpansionNode::new(0, 0, 240));
		heap.push(ExpansionNode::new(1, 0, 100));
		heap.push(ExpansionNode::new(2, 0, 140));
		let result: Vec<u32> = std::iter::from_fn(|| heap.pop()).map(|n| n.cost).collect();
		let actual = vec![100, 140, 240];
		assert_eq!(actual, result);
	}
	#[test]
	fn open_field_octile_costs() {
		let grid = SolidityGrid::new(10, 10);
		let buffer = build(&grid, IVec2::ZERO);
		assert_eq!(1260, buffer.get(9, 9).unwrap().get_cost());
		assert_eq!(900, buffer.get(9, 0).unwrap().get_cost());
		assert_eq!(900, buffer.get(0, 9).unwrap().get_cost());
		assert_eq!(1060, buffer.get(9, 4).unwrap().get_cost());
	}
	#[test]
	fn source_is_visited_with_zero_cost() {
		let grid = SolidityGrid::new(5, 5);
		let buffer = build(&grid, IVec2::new(2, 2));
		let source = buffer.get(2, 2).unwrap();
		assert!(source.is_visited());
		assert_eq!(0, source.get_cost());
		assert_eq!(Ordinal::Zero, source.get_back());
	}
	#[test]
	fn solid_source_is_opened() {
		let grid = SolidityGrid::from_rows(&["...", ".#.", "..."]);
		let buffer = build(&grid, IVec2::new(1, 1));
		let source = buffer.get(1, 1).unwrap();
		assert!(!source.is_solid());
		assert!(source.is_visited());
		assert_eq!(100, buffer.get(1, 0).unwrap().get_cost());
	}
	#[test]
	fn back_vectors_point_toward_source() {
		let grid = SolidityGrid::new(5, 5);
		let buffer = build(&grid, IVec2::new(2, 2));
		assert_eq!(Ordinal::West, buffer.get(3, 2).unwrap().get_back());
		assert_eq!(Ordinal::SouthEast, buffer.get(1, 1).unwrap().get_back());
		assert_eq!(Ordinal::North, buffer.get(2, 4).unwrap().get_back());
	}
	#[test]
	fn no_corner_cutting() {
		// L-shaped corner, o is the source
		//  ___________
		// |o_|##|__|
		// |##|##|__|
		// |__|__|__|
		let grid = SolidityGrid::from_rows(&[".#.", "##.", "..."]);
		let buffer = build(&grid, IVec2::ZERO);
		// fully enclosed once diagonals are forbidden
		assert!(!buffer.get(2, 2).unwrap().is_visited());
		assert!(!buffer.get(2, 0).unwrap().is_visited());
	}
	#[test]
	fn diagonal_never_shorter_than_detour_around_corner() {
		// single solid cell, going from (0,1) to (1,0) has to walk around it
		//  ______
		// |__|~ |
		// |o_|##|
		let grid = SolidityGrid::from_rows(&["..", ".#"]);
		let buffer = build(&grid, IVec2::new(0, 1));
		let target = buffer.get(1, 0).unwrap();
		assert_eq!(200, target.get_cost());
		assert_eq!(Ordinal::West, target.get_back());
	}
	#[test]
	fn solid_cells_are_never_expanded() {
		let grid = SolidityGrid::from_rows(&["...", ".#.", "..."]);
		let buffer = build(&grid, IVec2::ZERO);
		let wall = buffer.get(1, 1).unwrap();
		assert!(!wall.is_visited());
		assert_eq!(Ordinal::Zero, wall.get_back());
	}
	#[test]
	fn unreached_cells_keep_no_information() {
		let grid = SolidityGrid::from_rows(&["..#..", "..#..", "..#.."]);
		let buffer = build(&grid, IVec2::ZERO);
		let node = buffer.get(4, 1).unwrap();
		assert!(!node.is_visited());
		assert_eq!(0, node.get_cost());
		assert_eq!(Ordinal::Zero, node.get_back());
	}
	#[test]
	fn hand_built_grids_match_brute_force() {
		let grid = SolidityGrid::from_rows(&[
			"..........",
			".####.....",
			".#....###.",
			".#.##...#.",
			"...#..#.#.",
			"####..#...",
			"...#.##.#.",
			".#...#..#.",
			".#.###.##.",
			"..........",
		]);
		assert_matches_brute_force(&grid, IVec2::new(0, 0));
		assert_matches_brute_force(&grid, IVec2::new(5, 4));
		assert_matches_brute_force(&grid, IVec2::new(9, 9));
	}
	#[test]
	fn random_grids_match_brute_force() {
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..25 {
			let mut grid = SolidityGrid::new(12, 9);
			for y in 0..9 {
				for x in 0..12 {
					grid.set_solid(x, y, rng.random_range(0..100) < 30);
				}
			}
			let source = IVec2::new(rng.random_range(0..12), rng.random_range(0..9));
			grid.set_solid(source.x, source.y, false);
			assert_matches_brute_force(&grid, source);
		}
	}
	#[test]
	fn identical_input_gives_identical_fields() {
		let grid = SolidityGrid::from_rows(&["....#...", "..#.#.#.", "..#...#.", "........"]);
		let first = build(&grid, IVec2::new(1, 1));
		// dirty a buffer with an unrelated build before reusing it
		let mut second = FieldBuffer::new();
		let mut heap = BinaryHeap::new();
		let other = SolidityGrid::new(8, 4);
		second.reset(IRect::new(0, 0, 8, 4), &other);
		flood_fill(&mut second, &mut heap, IVec2::new(7, 3));
		second.reset(IRect::new(0, 0, 8, 4), &grid);
		flood_fill(&mut second, &mut heap, IVec2::new(1, 1));
		for y in 0..4 {
			for x in 0..8 {
				assert_eq!(first.get(x, y), second.get(x, y));
			}
		}
	}
	#[test]
	fn visited_count() {
		let grid = SolidityGrid::from_rows(&["..#..", "..#..", "..#.."]);
		let mut buffer = FieldBuffer::new();
		buffer.reset(IRect::new(0, 0, 5, 3), &grid);
		let mut heap = BinaryHeap::new();
		let result = flood_fill(&mut buffer, &mut heap, IVec2::ZERO);
		let actual = 6;
		assert_eq!(actual, result);
	}
	#[test]
	fn source_outside_region_visits_nothing() {
		let grid = SolidityGrid::new(4, 4);
		let mut buffer = FieldBuffer::new();
		buffer.reset(IRect::new(0, 0, 4, 4), &grid);
		let mut heap = BinaryHeap::new();
		let result = flood_fill(&mut buffer, &mut heap, IVec2::new(9, 9));
		assert_eq!(0, result);
	}
}
