//! Per-tick collision resolution
//!
//! Runs after every entity has moved for the tick and before anything reads
//! the final transforms. Entities are handed over as [`CollisionBody`]
//! snapshots; corrected positions are written back into the snapshots and
//! touches are returned for the caller to dispatch.
//!
//! Pairs are visited in index order `(i, j)` with `i < j`, and each
//! correction is applied before the next pair is tested, so later pairs see
//! earlier corrections.

use crate::foundation::collections::EntityId;
use crate::foundation::math::{from_plane, to_plane, Quat, Vec2, Vec3};
use crate::physics::collision::{overlap, Quad, AABB};
use crate::physics::tile_map::TileMap;

/// Collision snapshot of one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBody {
    /// Entity this snapshot belongs to
    pub id: EntityId,
    /// World position; only X and Z take part in collision
    pub position: Vec3,
    /// World orientation used to build the footprint quad
    pub orientation: Quat,
    /// Edge length of the square footprint
    pub collision_size: f32,
    /// Entity that spawned this one, never collided with
    pub originator: Option<EntityId>,
    /// Rigid bodies are pushed apart from other rigid bodies
    pub rigid: bool,
}

impl CollisionBody {
    /// Create a non-rigid body without an originator
    pub fn new(id: EntityId, position: Vec3, orientation: Quat, collision_size: f32) -> Self {
        Self {
            id,
            position,
            orientation,
            collision_size,
            originator: None,
            rigid: false,
        }
    }

    /// Set the originator
    pub fn with_originator(mut self, originator: Option<EntityId>) -> Self {
        self.originator = originator;
        self
    }

    /// Set whether the body is rigid
    pub fn with_rigid(mut self, rigid: bool) -> Self {
        self.rigid = rigid;
        self
    }

    /// Unrotated square around the position, used for pruning
    pub fn aabb(&self) -> AABB {
        AABB::from_center_size(to_plane(&self.position), self.collision_size)
    }

    /// Rotated footprint
    pub fn quad(&self) -> Quad {
        Quad::from_transform(self.position, self.orientation, self.collision_size)
    }

    /// True when one body spawned the other
    pub fn is_related_to(&self, other: &CollisionBody) -> bool {
        self.originator == Some(other.id) || other.originator == Some(self.id)
    }
}

/// Two entities that touched this tick
///
/// Both entities must be notified, each with the other as argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchPair {
    /// First entity, earlier in the body slice
    pub a: EntityId,
    /// Second entity
    pub b: EntityId,
}

impl TouchPair {
    /// `(entity, other)` for both notification directions
    pub fn directions(&self) -> [(EntityId, EntityId); 2] {
        [(self.a, self.b), (self.b, self.a)]
    }
}

/// A body pushed out of solid tiles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileContact {
    /// Entity that was moved
    pub id: EntityId,
    /// Displacement applied in the play plane
    pub ejection: Vec2,
}

/// Push every body out of the solid tiles it overlaps
///
/// Bodies are independent of each other here; each one is tested against the
/// map alone and moved by its summed ejection vector.
pub fn eject_from_tiles(tile_map: &TileMap, bodies: &mut [CollisionBody]) -> Vec<TileContact> {
    bodies
        .iter_mut()
        .filter_map(|body| {
            let ejection = tile_map.check_collision(&body.quad())?;
            body.position += from_plane(&ejection, 0.0);
            Some(TileContact { id: body.id, ejection })
        })
        .collect()
}

/// Test every unordered pair of bodies once and separate rigid pairs
///
/// For each pair: skip it if either body spawned the other; skip it if the
/// AABBs don't intersect; if both are rigid, require a SAT overlap and move
/// each body half the penetration depth apart along the normal. Every pair
/// that got this far is returned as a touch.
pub fn resolve_pairs(bodies: &mut [CollisionBody]) -> Vec<TouchPair> {
    let mut touches = Vec::new();

    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];

        for b in tail.iter_mut() {
            if a.is_related_to(b) {
                log::trace!("Skipping pair {:?}/{:?}: originator relation", a.id, b.id);
                continue;
            }

            if !a.aabb().intersects(&b.aabb()) {
                continue;
            }

            if a.rigid && b.rigid && !separate(a, b) {
                continue;
            }

            touches.push(TouchPair { a: a.id, b: b.id });
        }
    }

    touches
}

/// Push two rigid bodies apart; false if their quads don't actually overlap
///
/// Bodies in exact contact overlap with zero depth and stay where they are.
fn separate(a: &mut CollisionBody, b: &mut CollisionBody) -> bool {
    let (quad_a, quad_b) = (a.quad(), b.quad());
    let Some(hit) = overlap(&quad_a, &quad_b) else {
        return false;
    };

    let hit = hit.oriented_from(quad_b.center(), quad_a.center());
    let half = from_plane(&(hit.translation() * 0.5), 0.0);
    a.position += half;
    b.position -= half;

    log::debug!(
        "Separated {:?} and {:?} by {:.4} along ({:.3}, {:.3})",
        a.id,
        b.id,
        hit.depth,
        hit.normal.x,
        hit.normal.y
    );
    true
}
