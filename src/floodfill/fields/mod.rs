//! The storage used by the algorithm: a per-cell [field_node::FieldNode]
//! record and the reusable [field_buffer::FieldBuffer] grid holding them
//!

pub mod field_buffer;
pub mod field_node;

/// Describes how the back-vectors of a [field_buffer::FieldBuffer] should be
/// read.
///
/// After a build every back-vector points along the gradient toward the
/// source. A wander pass overwrites some of them with randomly chosen
/// "no closer" neighbours, at which point the field no longer describes a
/// route to the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldMode {
	/// Every back-vector points toward the source
	#[default]
	Gradient,
	/// At least one back-vector was re-pointed by a wander pass
	Randomized,
}
