//! # Tank Combat
//!
//! Two-player tank duel on a tile-map arena, built on `combat_engine`.
//! Tanks drive, turn and fire shells; a shell that hits another tank sends it
//! spinning, and any touch destroys the shell. Walls come from a text
//! playfield and push everything back out.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod controls;
pub mod entities;
pub mod game;
pub mod world;

use combat_engine::config::ConfigError;
use combat_engine::physics::PlayfieldError;
use thiserror::Error;

pub use config::GameConfig;
pub use game::{Match, MatchSummary};

/// Errors setting up a game
#[derive(Error, Debug)]
pub enum GameError {
    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The arena playfield is unusable
    #[error("invalid arena: {0}")]
    Playfield(#[from] PlayfieldError),
}
