//! Separating Axis Theorem for convex quads
//!
//! Two convex polygons are disjoint iff some edge normal of one of them
//! separates their projections. Every edge of both quads is tried; the first
//! separating axis ends the test. When no axis separates, the axis with the
//! least projected overlap gives the minimum translation vector.

use super::primitives::{Quad, AABB};
use crate::foundation::math::{try_normalize, Vec2};

/// Result of an overlapping SAT test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Unit axis of least penetration
    ///
    /// Its sign follows the winding of the edge it came from, not the
    /// relative placement of the shapes. See [`Overlap::oriented_from`].
    pub normal: Vec2,
    /// Penetration along `normal`, in world units
    pub depth: f32,
}

impl Overlap {
    /// Flip the normal if needed so it points from `from` toward `to`
    ///
    /// The normal is flipped whenever its dot product with `to - from` is not
    /// positive, so coincident centers always yield the flipped normal.
    pub fn oriented_from(self, from: Vec2, to: Vec2) -> Self {
        if self.normal.dot(&(to - from)) > 0.0 {
            self
        } else {
            Self { normal: -self.normal, ..self }
        }
    }

    /// Minimum translation vector: `normal * depth`
    pub fn translation(&self) -> Vec2 {
        self.normal * self.depth
    }
}

/// Interval covered by `points` projected onto `axis`
fn projected_extents(axis: &Vec2, points: &[Vec2]) -> (f32, f32) {
    points.iter().fold((f32::MAX, -f32::MAX), |(min, max), point| {
        let dot = point.dot(axis);
        (min.min(dot), max.max(dot))
    })
}

/// Test two convex quads for overlap
///
/// Returns `None` as soon as a separating axis is found. Intervals that only
/// touch still overlap, so shapes in exact contact report a depth of zero.
/// Among equally shallow axes the first tested wins: `lhs` edges come before
/// `rhs` edges. Zero-length edges contribute no axis; if no axis at all can be
/// built the quads are reported as not overlapping.
pub fn overlap(lhs: &Quad, rhs: &Quad) -> Option<Overlap> {
    let mut best: Option<Overlap> = None;

    for quad in [lhs, rhs] {
        for edge in quad.edges() {
            let Some(axis) = try_normalize(&Vec2::new(edge.y, -edge.x)) else {
                continue;
            };

            let (min_a, max_a) = projected_extents(&axis, &lhs.points);
            let (min_b, max_b) = projected_extents(&axis, &rhs.points);

            if max_a < min_b || max_b < min_a {
                return None;
            }

            let depth = (max_b - min_a).min(max_a - min_b);
            if best.map_or(true, |current| depth < current.depth) {
                best = Some(Overlap { normal: axis, depth });
            }
        }
    }

    best
}

/// Test an axis-aligned box against a quad
///
/// Equivalent to [`overlap`] with the box converted by [`AABB::to_quad`]
/// as the left-hand side.
pub fn overlap_aabb(aabb: &AABB, quad: &Quad) -> Option<Overlap> {
    overlap(&aabb.to_quad(), quad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{utils::yaw, Vec3, Quat};
    use approx::assert_relative_eq;

    fn unit_square(x: f32, y: f32) -> Quad {
        AABB::from_center_size(Vec2::new(x, y), 1.0).to_quad()
    }

    fn tank(x: f32, z: f32, angle: f32, size: f32) -> Quad {
        Quad::from_transform(Vec3::new(x, 0.0, z), yaw(angle), size)
    }

    #[test]
    fn test_offset_squares_match_brute_force() {
        for dx in [-1.5_f32, -0.75, -0.25, 0.0, 0.1, 0.5, 0.9, 1.25] {
            let result = overlap(&unit_square(0.0, 0.0), &unit_square(dx, 0.0));

            if dx.abs() < 1.0 {
                let hit = result.unwrap_or_else(|| panic!("expected overlap at dx = {dx}"));
                assert_relative_eq!(hit.depth, 1.0 - dx.abs(), epsilon = 1e-6);
                assert_relative_eq!(hit.normal.x.abs(), 1.0, epsilon = 1e-6);
                assert_relative_eq!(hit.normal.y, 0.0, epsilon = 1e-6);
            } else {
                assert!(result.is_none(), "unexpected overlap at dx = {dx}");
            }
        }
    }

    #[test]
    fn test_touching_squares_overlap_with_zero_depth() {
        for dx in [-1.0_f32, 1.0] {
            let hit = overlap(&unit_square(0.0, 0.0), &unit_square(dx, 0.0))
                .unwrap_or_else(|| panic!("expected contact at dx = {dx}"));
            assert_eq!(hit.depth, 0.0);
            assert_eq!(hit.normal.x.abs(), 1.0);
        }

        // Corner to corner contact
        let hit = overlap(&unit_square(0.0, 0.0), &unit_square(1.0, 1.0)).unwrap();
        assert_eq!(hit.depth, 0.0);

        // Any gap at all separates
        assert!(overlap(&unit_square(0.0, 0.0), &unit_square(1.001, 0.0)).is_none());
    }

    #[test]
    fn test_clear_separation() {
        assert!(overlap(&unit_square(0.0, 0.0), &unit_square(10.0, 10.0)).is_none());
    }

    #[test]
    fn test_symmetry_of_result() {
        let pairs = [
            (tank(0.0, 0.0, 0.3, 1.7), tank(1.2, 0.4, -0.8, 1.7)),
            (tank(0.0, 0.0, 0.0, 1.0), tank(0.5, 0.5, 0.785, 1.0)),
            (unit_square(0.0, 0.0), tank(0.9, -0.2, 1.1, 0.25)),
            (tank(0.0, 0.0, 0.2, 1.0), tank(3.0, 0.0, 0.2, 1.0)),
        ];

        for (a, b) in pairs {
            match (overlap(&a, &b), overlap(&b, &a)) {
                (Some(ab), Some(ba)) => {
                    assert_relative_eq!(ab.depth, ba.depth, epsilon = 1e-5);
                    assert_relative_eq!(ab.normal.dot(&ba.normal).abs(), 1.0, epsilon = 1e-5);
                }
                (None, None) => {}
                (ab, ba) => panic!("asymmetric result: {ab:?} vs {ba:?}"),
            }
        }
    }

    #[test]
    fn test_rotated_quad_corner_miss() {
        // A diamond whose corner would reach an AABB test but not the square itself
        let square = unit_square(0.0, 0.0);
        let diamond = tank(1.2, 1.2, std::f32::consts::FRAC_PI_4, 1.0);

        assert!(square.bounds().intersects(&diamond.bounds()));
        assert!(overlap(&square, &diamond).is_none());
    }

    #[test]
    fn test_minimum_axis_is_vertical_for_vertical_offset() {
        let hit = overlap(&unit_square(0.0, 0.0), &unit_square(0.1, 0.8)).unwrap();
        assert_relative_eq!(hit.depth, 0.2, epsilon = 1e-6);
        assert_relative_eq!(hit.normal.y.abs(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_depth_in_world_units_for_scaled_quads() {
        let hit = overlap(&tank(0.0, 0.0, 0.0, 4.0), &tank(3.5, 0.0, 0.0, 4.0)).unwrap();
        assert_relative_eq!(hit.depth, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_aabb_overlap_matches_quad_overlap() {
        let aabb = AABB::from_center_size(Vec2::new(0.0, 0.0), 1.0);
        let quad = tank(0.7, 0.3, 0.5, 1.0);

        assert_eq!(overlap_aabb(&aabb, &quad), overlap(&aabb.to_quad(), &quad));
        assert!(overlap_aabb(&aabb, &quad).is_some());
    }

    #[test]
    fn test_degenerate_quads_never_panic() {
        let point = Quad::from_transform(Vec3::zeros(), Quat::identity(), 0.0);

        // Only the square's axes are usable; the point lies strictly inside it
        let hit = overlap(&unit_square(0.0, 0.0), &point).unwrap();
        assert_relative_eq!(hit.depth, 0.5, epsilon = 1e-6);

        // No usable axis at all
        assert!(overlap(&point, &point).is_none());
    }

    #[test]
    fn test_oriented_from_points_from_b_to_a() {
        let hit = Overlap { normal: Vec2::new(1.0, 0.0), depth: 0.25 };

        let kept = hit.oriented_from(Vec2::new(-1.0, 0.0), Vec2::zeros());
        assert_eq!(kept.normal, Vec2::new(1.0, 0.0));

        let flipped = hit.oriented_from(Vec2::new(1.0, 0.0), Vec2::zeros());
        assert_eq!(flipped.normal, Vec2::new(-1.0, 0.0));
        assert_eq!(flipped.translation(), Vec2::new(-0.25, 0.0));

        let coincident = hit.oriented_from(Vec2::zeros(), Vec2::zeros());
        assert_eq!(coincident.normal, Vec2::new(-1.0, 0.0));
    }
}
