//! `use bevy_floodfill_paths::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::floodfill::{
	expansion::*,
	fields::{field_buffer::*, field_node::*, *},
	footprint::*,
	paths::*,
	solidity::*,
	utilities::*,
};

#[doc(hidden)]
pub use crate::plugin::{agent_layer::*, solidity_layer::*, *};
