//! This is a plugin for Bevy game engine to steer crowds of agents toward (or
//! away from) a target across a tile grid using a flood-filled cost field
//!

pub mod floodfill;
pub mod plugin;

pub mod prelude;
