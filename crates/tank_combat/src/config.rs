//! Game configuration

use crate::controls::ControllerKind;
use combat_engine::config::Config;
use serde::{Deserialize, Serialize};

/// Default arena: a walled field with cover near each spawn and a central block
pub const DEFAULT_PLAYFIELD: &str = "\
********************
*                  *
*   **        **   *
*   *          *   *
*        **        *
*        **        *
*   *          *   *
*   **        **   *
*                  *
********************";

/// Top-level game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Gameplay settings
    pub gameplay: GameplayConfig,

    /// Arena settings
    pub arena: ArenaConfig,

    /// Controls settings
    pub controls: ControlsConfig,
}

impl Config for GameConfig {}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Simulation time step (seconds)
    pub timestep: f32,

    /// Number of ticks in a match
    pub match_ticks: u32,

    /// Tank forward speed (units per second)
    pub tank_speed: f32,

    /// Tank turn rate (radians per second)
    pub tank_turn_speed: f32,

    /// Tank footprint edge length
    pub tank_collision_size: f32,

    /// Muzzle speed of fired shells
    pub shell_speed: f32,

    /// Shell lifetime (ticks)
    pub shell_lifetime_ticks: u32,

    /// Shell footprint edge length
    pub shell_collision_size: f32,

    /// Duration of a spin-out after being hit (seconds)
    pub spin_out_duration: f32,

    /// Speed a hit tank is knocked along the shell's path
    pub spin_out_speed: f32,

    /// Spin rate factor; spin speed is `factor * remaining^2`
    pub spin_out_rate: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            match_ticks: 1800,
            tank_speed: 6.0,
            tank_turn_speed: 4.0,
            tank_collision_size: 1.7,
            shell_speed: 20.0,
            shell_lifetime_ticks: 1000,
            shell_collision_size: 0.25,
            spin_out_duration: 1.0,
            spin_out_speed: 20.0,
            spin_out_rate: 40.0,
        }
    }
}

/// Arena configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// World units per tile
    pub tile_size: f32,

    /// Playfield text, `*` for walls
    pub playfield: String,

    /// Spawn points as `[x, z, heading]`, heading in radians about +Y
    pub spawns: Vec<[f32; 3]>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            tile_size: 2.0,
            playfield: DEFAULT_PLAYFIELD.to_string(),
            spawns: vec![
                [-14.0, 0.0, -std::f32::consts::FRAC_PI_2],
                [14.0, 0.0, std::f32::consts::FRAC_PI_2],
            ],
        }
    }
}

/// Controls configuration, one controller per spawned tank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Controller for each player, in spawn order
    pub players: Vec<ControllerKind>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            players: vec![
                ControllerKind::Wander { seed: 1 },
                ControllerKind::Wander { seed: 2 },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{Controls, ScriptStep};

    #[test]
    fn test_default_arena_parses() {
        let config = GameConfig::default();
        let map = combat_engine::physics::TileMap::from_playfield(
            &config.arena.playfield,
            config.arena.tile_size,
        )
        .unwrap();

        assert_eq!(map.columns(), 20);
        assert_eq!(map.rows(), 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml(
            r#"
            [gameplay]
            match_ticks = 120

            [controls]
            players = [
                { kind = "idle" },
                { kind = "scripted", steps = [{ ticks = 10, controls = { forward = true } }] },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(config.gameplay.match_ticks, 120);
        assert_eq!(config.gameplay.tank_speed, 6.0);
        assert_eq!(config.arena, ArenaConfig::default());
        assert_eq!(
            config.controls.players,
            vec![
                ControllerKind::Idle,
                ControllerKind::Scripted {
                    steps: vec![ScriptStep {
                        ticks: 10,
                        controls: Controls { forward: true, ..Controls::default() },
                    }],
                },
            ]
        );
    }

    #[test]
    fn test_bundled_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/arena.toml");
        let config = GameConfig::load_from_file(path).unwrap();

        assert_eq!(config.arena.spawns.len(), config.controls.players.len());
        assert!(config.arena.tile_size > 0.0);
    }
}
