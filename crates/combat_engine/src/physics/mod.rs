//! Physics module for collision detection and response
//!
//! All collision shapes live in the horizontal play plane: world X and Z
//! become plane x and y. Height and vertical motion are handled by the
//! entities themselves.
//!
//! - [`collision`] - Plane primitives and the separating axis test
//! - [`tile_map`] - Static level geometry and its broad-phase query
//! - [`collision_system`] - Per-tick entity resolution against the map and each other

pub mod collision;
pub mod collision_system;
pub mod tile_map;

pub use collision::{overlap, overlap_aabb, Overlap, Quad, AABB};
pub use collision_system::{eject_from_tiles, resolve_pairs, CollisionBody, TileContact, TouchPair};
pub use tile_map::{PlayfieldError, Tile, TileCoord, TileMap, TileRange};
