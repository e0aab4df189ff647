//! Plane collision geometry
//!
//! # Module Organization
//!
//! - [`primitives`] - Axis-aligned boxes and oriented quads
//! - [`sat`] - Separating Axis Theorem overlap with minimum translation vector
//!
//! Shapes are built per query from an entity's position, orientation and
//! collision size, and dropped once the test is done.

pub mod primitives;
pub mod sat;

pub use primitives::{Quad, AABB};
pub use sat::{overlap, overlap_aabb, Overlap};
