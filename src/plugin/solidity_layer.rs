//! Logic for keeping the [SolidityGrid] resource current and rebuilding the
//! field of every [PathTarget] from it
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Used to toggle whether a tile of the [SolidityGrid] is impassable
#[derive(Event)]
pub struct EventUpdateSolidity {
	/// Tile to update
	tile: IVec2,
	/// Whether the tile should become impassable
	solid: bool,
}

impl EventUpdateSolidity {
	/// Create a new instance of [EventUpdateSolidity]
	pub fn new(tile: IVec2, solid: bool) -> Self {
		EventUpdateSolidity { tile, solid }
	}
	/// Tile to update
	pub fn get_tile(&self) -> IVec2 {
		self.tile
	}
	/// Whether the tile should become impassable
	pub fn is_solid(&self) -> bool {
		self.solid
	}
}

/// A target which agents path toward (or wander away from). The
/// [FloodFillPaths] of the entity is rebuilt each frame around `position`
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
#[require(FloodFillPaths)]
pub struct PathTarget {
	/// Position of the target in world units
	position: IVec2,
	/// Half the side of the square of world the field covers
	radius: i32,
}

impl PathTarget {
	/// Create a new instance of [PathTarget]
	pub fn new(position: IVec2, radius: i32) -> Self {
		PathTarget { position, radius }
	}
	/// Position of the target in world units
	pub fn get_position(&self) -> IVec2 {
		self.position
	}
	/// Move the target
	pub fn set_position(&mut self, position: IVec2) {
		self.position = position;
	}
	/// Half the side of the square of world the field covers
	pub fn get_radius(&self) -> i32 {
		self.radius
	}
}

/// Read [EventUpdateSolidity] and apply them to the [SolidityGrid]
#[cfg(not(tarpaulin_include))]
pub fn process_solidity_updates(
	mut events: EventReader<EventUpdateSolidity>,
	mut grid: ResMut<SolidityGrid>,
) {
	for event in events.read() {
		let tile = event.get_tile();
		grid.set_solid(tile.x, tile.y, event.is_solid());
	}
}

/// Rebuild the field of every [PathTarget]
#[cfg(not(tarpaulin_include))]
pub fn rebuild_flood_fills(
	grid: Res<SolidityGrid>,
	mut query: Query<(&PathTarget, &mut FloodFillPaths)>,
) {
	for (target, mut paths) in &mut query {
		paths.fill_paths_in_radius(grid.as_ref(), target.get_position(), target.get_radius());
		debug!(
			"Rebuilt flood fill of {}x{} tiles around {:?}",
			paths.width(),
			paths.height(),
			target.get_position()
		);
	}
}
