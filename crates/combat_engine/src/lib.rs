//! # Combat Engine
//!
//! Engine core for a small real-time tank-combat game.
//!
//! ## Features
//!
//! - **Math Foundation**: `nalgebra` aliases plus helpers for the horizontal play plane
//! - **2D Collision**: AABB pruning and oriented-quad SAT with minimum translation vectors
//! - **Tile Maps**: Static level geometry parsed from text playfields
//! - **Pair Resolution**: Per-tick entity pair tests with originator exclusion
//!
//! ## Quick Start
//!
//! ```rust
//! use combat_engine::prelude::*;
//!
//! let map = TileMap::from_playfield("***\n* *\n***", 1.0).unwrap();
//! let tank = Quad::from_transform(Vec3::zeros(), Quat::identity(), 0.5);
//!
//! // The open centre cell holds the quad clear of every wall.
//! assert!(map.check_collision(&tank).is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::{
            collections::EntityId,
            math::{from_plane, to_plane, Quat, Vec2, Vec3},
        },
        physics::{
            collision::{overlap, overlap_aabb, Overlap, Quad, AABB},
            collision_system::{resolve_pairs, CollisionBody, TouchPair},
            tile_map::{PlayfieldError, Tile, TileCoord, TileMap, TileRange},
        },
    };
}
