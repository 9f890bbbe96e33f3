//! Logic for steering agents across the field of the [PathTarget] they follow
//!

use crate::prelude::*;
use bevy::prelude::*;

/// How an agent uses the field of its target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AgentBehaviour {
	/// Head toward the target
	#[default]
	Pursue,
	/// Drift away from the target along randomly chosen "no closer" cells
	Wander,
}

/// An agent steered by the field of the [PathTarget] entity `target`
#[derive(Component, Clone, Copy, Debug, PartialEq)]
#[require(Steering)]
pub struct PathAgent {
	/// Entity carrying the [PathTarget] and its [FloodFillPaths]
	target: Entity,
	/// Area occupied by the agent in world units
	footprint: Footprint,
	/// Length of the steering vector
	speed: f32,
	/// Whether to pursue or wander
	behaviour: AgentBehaviour,
}

impl PathAgent {
	/// Create a new instance of [PathAgent]
	pub fn new(target: Entity, footprint: Footprint, speed: f32, behaviour: AgentBehaviour) -> Self {
		PathAgent {
			target,
			footprint,
			speed,
			behaviour,
		}
	}
	/// Entity whose field steers the agent
	pub fn get_target(&self) -> Entity {
		self.target
	}
	/// Area occupied by the agent in world units
	pub fn get_footprint(&self) -> Footprint {
		self.footprint
	}
	/// Move the agent
	pub fn set_footprint(&mut self, footprint: Footprint) {
		self.footprint = footprint;
	}
	/// Length of the steering vector
	pub fn get_speed(&self) -> f32 {
		self.speed
	}
	/// Whether the agent pursues or wanders
	pub fn get_behaviour(&self) -> AgentBehaviour {
		self.behaviour
	}
	/// Switch between pursuing and wandering
	pub fn set_behaviour(&mut self, behaviour: AgentBehaviour) {
		self.behaviour = behaviour;
	}
}

/// Most recent steering vector of a [PathAgent], [Vec2::ZERO] when its field
/// has nothing to offer
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct Steering(
	/// Direction scaled to the speed of the agent
	Vec2,
);

impl Steering {
	/// Most recent steering vector
	pub fn get(&self) -> Vec2 {
		self.0
	}
}

/// Sample the field of each agent's target into its [Steering]
#[cfg(not(tarpaulin_include))]
pub fn steer_agents(
	mut rng: ResMut<FloodFillRng>,
	mut paths_q: Query<&mut FloodFillPaths>,
	mut agent_q: Query<(&PathAgent, &mut Steering)>,
) {
	for (agent, mut steering) in &mut agent_q {
		let Ok(mut paths) = paths_q.get_mut(agent.get_target()) else {
			warn!("Agent target {:?} has no FloodFillPaths", agent.get_target());
			steering.0 = Vec2::ZERO;
			continue;
		};
		let footprint = agent.get_footprint();
		// agents beyond the radius of their target get no direction
		if !paths.overlaps(&footprint) {
			steering.0 = Vec2::ZERO;
			continue;
		}
		steering.0 = match agent.get_behaviour() {
			AgentBehaviour::Pursue => {
				if paths.get_mode() == FieldMode::Randomized {
					// a wanderer disturbed the gradient this frame
					paths.local_min_direction(&footprint, agent.get_speed())
				} else {
					paths.interpolated_direction(&footprint, agent.get_speed(), false)
				}
			}
			AgentBehaviour::Wander => {
				paths.random_further_direction(&footprint, agent.get_speed(), rng.get_mut())
			}
		};
	}
}
