//! Math utilities and types
//!
//! Provides the `nalgebra` aliases used throughout the engine and helpers for
//! moving between 3D world space and the horizontal collision plane.

pub use nalgebra::{UnitQuaternion, Vector2, Vector3};

/// 2D vector type (horizontal plane: world X, world Z)
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Lengths below this are treated as zero when normalizing
pub const EPSILON: f32 = 1.0e-6;

/// Project a world-space vector onto the horizontal collision plane
///
/// World X maps to plane x and world Z maps to plane y; world Y (height) is dropped.
pub fn to_plane(v: &Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Lift a plane vector back into world space at the given height
pub fn from_plane(v: &Vec2, height: f32) -> Vec3 {
    Vec3::new(v.x, height, v.y)
}

/// Normalize a vector, or `None` if it is too short to have a direction
pub fn try_normalize(v: &Vec2) -> Option<Vec2> {
    v.try_normalize(EPSILON)
}

/// Math utility functions
pub mod utils {
    /// Rotation about the world up axis (Y)
    pub fn yaw(angle: f32) -> super::Quat {
        super::Quat::from_axis_angle(&super::Vec3::y_axis(), angle)
    }
}
