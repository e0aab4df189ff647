//! Plane collision primitives
//!
//! [`AABB`] is used for cheap pruning and for tiles; [`Quad`] carries an
//! entity's rotated footprint into the separating axis test.

use crate::foundation::math::{to_plane, Quat, Vec2, Vec3};

/// Axis-aligned bounding box in the play plane
///
/// Invariant: `min.x <= max.x` and `min.y <= max.y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec2,
    /// Maximum corner of the bounding box
    pub max: Vec2,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create a square AABB of edge length `size` centered at a point
    pub fn from_center_size(center: Vec2, size: f32) -> Self {
        let half = Vec2::repeat(size * 0.5);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest AABB enclosing `first` and every point in `rest`
    pub fn from_points(first: Vec2, rest: &[Vec2]) -> Self {
        rest.iter().fold(Self::new(first, first), |bounds, point| Self {
            min: bounds.min.inf(point),
            max: bounds.max.sup(point),
        })
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Check if this AABB intersects another AABB
    ///
    /// Boxes whose edges touch count as intersecting.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// The four corners as a quad
    ///
    /// Order: `(min.x, min.y)`, `(min.x, max.y)`, `(max.x, max.y)`, `(max.x, min.y)`.
    pub fn to_quad(&self) -> Quad {
        Quad::new([
            Vec2::new(self.min.x, self.min.y),
            Vec2::new(self.min.x, self.max.y),
            Vec2::new(self.max.x, self.max.y),
            Vec2::new(self.max.x, self.min.y),
        ])
    }
}

/// Convex four-point polygon in the play plane
///
/// Points are wound consistently with [`AABB::to_quad`]. Non-convex input is
/// not supported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// Corner points in winding order
    pub points: [Vec2; 4],
}

impl Quad {
    /// Create a quad from its corners
    pub fn new(points: [Vec2; 4]) -> Self {
        Self { points }
    }

    /// Footprint of a square entity of edge length `size`
    ///
    /// The unit square in the horizontal plane is scaled, rotated by
    /// `orientation` and moved to `position`, then projected onto X/Z.
    pub fn from_transform(position: Vec3, orientation: Quat, size: f32) -> Self {
        let half = size * 0.5;
        let corner = |x: f32, z: f32| to_plane(&(position + orientation * Vec3::new(x, 0.0, z)));

        Self::new([
            corner(-half, -half),
            corner(-half, half),
            corner(half, half),
            corner(half, -half),
        ])
    }

    /// Axis-aligned bounds of the four points
    pub fn bounds(&self) -> AABB {
        let [first, rest @ ..] = &self.points;
        AABB::from_points(*first, rest)
    }

    /// Average of the four points
    pub fn center(&self) -> Vec2 {
        self.points.iter().sum::<Vec2>() * 0.25
    }

    /// Edge vectors, each running from a point to the next in winding order
    pub fn edges(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..4).map(move |i| self.points[(i + 1) % 4] - self.points[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::utils::yaw;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_aabb_center() {
        let aabb = AABB::new(Vec2::new(-1.0, 2.0), Vec2::new(3.0, 4.0));
        assert_eq!(aabb.center(), Vec2::new(1.0, 3.0));
    }

    #[test]
    fn test_aabb_intersects_touching_edges() {
        let a = AABB::from_center_size(Vec2::zeros(), 1.0);
        let touching = AABB::from_center_size(Vec2::new(1.0, 0.0), 1.0);
        let apart = AABB::from_center_size(Vec2::new(1.5, 0.0), 1.0);

        assert!(a.intersects(&touching));
        assert!(touching.intersects(&a));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn test_aabb_to_quad_corner_order() {
        let quad = AABB::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 1.0)).to_quad();
        assert_eq!(
            quad.points,
            [
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(2.0, 1.0),
                Vec2::new(2.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_from_points() {
        let single = Vec2::new(0.5, 0.5);
        assert_eq!(AABB::from_points(single, &[]), AABB::new(single, single));

        let aabb = AABB::from_points(Vec2::new(1.0, -1.0), &[Vec2::new(-2.0, 3.0), Vec2::new(0.0, 0.0)]);
        assert_eq!(aabb, AABB::new(Vec2::new(-2.0, -1.0), Vec2::new(1.0, 3.0)));
    }

    #[test]
    fn test_unrotated_transform_matches_aabb_quad() {
        let position = Vec3::new(3.0, 7.0, -2.0);
        let quad = Quad::from_transform(position, Quat::identity(), 2.0);
        let expected = AABB::from_center_size(Vec2::new(3.0, -2.0), 2.0).to_quad();

        for (got, want) in quad.points.iter().zip(expected.points.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_rotated_quad_bounds_grow() {
        let quad = Quad::from_transform(Vec3::zeros(), yaw(FRAC_PI_4), 1.0);
        let bounds = quad.bounds();
        let half_diagonal = std::f32::consts::SQRT_2 * 0.5;

        assert_relative_eq!(bounds.max, Vec2::repeat(half_diagonal), epsilon = 1e-5);
        assert_relative_eq!(bounds.min, Vec2::repeat(-half_diagonal), epsilon = 1e-5);
        assert_relative_eq!(quad.center(), Vec2::zeros(), epsilon = 1e-6);
    }

    #[test]
    fn test_edges_close_the_loop() {
        let quad = AABB::from_center_size(Vec2::new(4.0, 4.0), 1.0).to_quad();
        let total: Vec2 = quad.edges().sum();
        assert_relative_eq!(total, Vec2::zeros(), epsilon = 1e-6);
    }
}
