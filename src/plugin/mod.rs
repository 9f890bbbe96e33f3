//! Defines the Bevy [Plugin] for FloodFillPaths
//!

use crate::prelude::*;
use bevy::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

pub mod agent_layer;
pub mod solidity_layer;

/// Ordering of the plugin systems within [Update]
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum FloodFillSet {
	/// Apply solidity changes and rebuild the field of every [PathTarget]
	Rebuild,
	/// Sample the freshly built fields for every [PathAgent]
	Steer,
}

/// Source of randomness for wandering agents. Insert your own before adding
/// the plugin to choose the seed
#[derive(Resource)]
pub struct FloodFillRng(
	/// Shared by every wandering agent
	StdRng,
);

impl FloodFillRng {
	/// Create a new instance of [FloodFillRng] from a seed
	pub fn new(seed: u64) -> Self {
		FloodFillRng(StdRng::seed_from_u64(seed))
	}
	/// Get a mutable reference to the generator
	pub fn get_mut(&mut self) -> &mut StdRng {
		&mut self.0
	}
}

impl Default for FloodFillRng {
	fn default() -> Self {
		FloodFillRng::new(0)
	}
}

/// Rebuilds the field of each [PathTarget] every frame and steers each
/// [PathAgent] from it. Systems run once a [SolidityGrid] resource exists
pub struct FloodFillPathsPlugin;

impl Plugin for FloodFillPathsPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.init_resource::<FloodFillRng>()
			.add_event::<solidity_layer::EventUpdateSolidity>()
			.configure_sets(Update, (FloodFillSet::Rebuild, FloodFillSet::Steer).chain())
			.add_systems(
				Update,
				(
					(
						solidity_layer::process_solidity_updates,
						solidity_layer::rebuild_flood_fills,
					)
						.chain()
						.run_if(resource_exists::<SolidityGrid>)
						.in_set(FloodFillSet::Rebuild),
					agent_layer::steer_agents.in_set(FloodFillSet::Steer),
				),
			);
	}
}
