//! Flood-fill pathfinding over a tile grid.
//!
//! A [paths::FloodFillPaths] engine expands outward from a single source tile
//! across a region of the world, recording in every reachable cell its cost
//! from the source and a back-vector pointing one step closer to it. Any
//! number of agents can then be steered from that one field:
//!
//! 1. [solidity::Solidity] describes which tiles are impassable
//! 2. [expansion::flood_fill] builds the cost field into a reusable
//!    [fields::field_buffer::FieldBuffer]
//! 3. [sampling] turns the back-vectors under an agent's
//!    [footprint::Footprint] into a steering vector, either toward the source
//!    or wandering away from it
//!

pub mod expansion;
pub mod fields;
pub mod footprint;
pub mod paths;
pub mod sampling;
pub mod solidity;
pub mod utilities;
