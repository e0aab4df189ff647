//! Match setup and the fixed-step game loop

use crate::config::GameConfig;
use crate::controls::{Controller, Controls, Idle};
use crate::entities::GameEntity;
use crate::world::{TickReport, World};
use crate::GameError;
use combat_engine::foundation::math::{utils::yaw, Vec3};
use combat_engine::physics::TileMap;
use combat_engine::prelude::EntityId;

/// Totals over a whole match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSummary {
    /// Ticks simulated
    pub ticks: u64,
    /// Shells fired
    pub shells_fired: usize,
    /// Shells that hit a tank
    pub tank_hits: usize,
    /// Times anything was pushed out of a wall
    pub wall_contacts: usize,
    /// Hits scored by each player
    pub hits_by_player: Vec<usize>,
}

/// A running match: the world, its tanks and their controllers
pub struct Match {
    world: World,
    tanks: Vec<EntityId>,
    controllers: Vec<Box<dyn Controller>>,
    timestep: f32,
    match_ticks: u32,
    summary: MatchSummary,
}

impl Match {
    /// Build the arena and spawn one tank per configured spawn point
    ///
    /// Players without a configured controller stay idle.
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        let tile_map = TileMap::from_playfield(&config.arena.playfield, config.arena.tile_size)?;
        let mut world = World::new(tile_map, config.gameplay.clone());

        let tanks: Vec<EntityId> = config
            .arena
            .spawns
            .iter()
            .enumerate()
            .map(|(player, &[x, z, heading])| {
                let tank = GameEntity::tank(player, Vec3::new(x, 0.0, z), yaw(heading), &config.gameplay);
                world.spawn(tank)
            })
            .collect();

        let controllers = (0..tanks.len())
            .map(|player| match config.controls.players.get(player) {
                Some(kind) => kind.build(),
                None => {
                    log::warn!("No controller configured for player {}, leaving it idle", player);
                    Box::new(Idle) as Box<dyn Controller>
                }
            })
            .collect();

        log::info!(
            "Arena {}x{} ready with {} tanks",
            world.tile_map().columns(),
            world.tile_map().rows(),
            tanks.len()
        );

        Ok(Self {
            world,
            summary: MatchSummary {
                hits_by_player: vec![0; tanks.len()],
                ..MatchSummary::default()
            },
            tanks,
            controllers,
            timestep: config.gameplay.timestep,
            match_ticks: config.gameplay.match_ticks,
        })
    }

    /// The world being simulated
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Tank of each player
    pub fn tanks(&self) -> &[EntityId] {
        &self.tanks
    }

    /// Totals so far
    pub fn summary(&self) -> &MatchSummary {
        &self.summary
    }

    /// Run a single fixed step
    pub fn step(&mut self) -> TickReport {
        let tick = self.world.tick_count();
        let controls: Vec<Controls> = self.controllers.iter_mut().map(|c| c.next(tick)).collect();

        let report = self.world.tick(self.timestep, &controls);
        self.record(&report);
        report
    }

    /// Run the configured number of ticks
    pub fn run(&mut self) -> &MatchSummary {
        for _ in 0..self.match_ticks {
            self.step();
        }

        log::info!(
            "Match over after {} ticks: {} shells fired, {} hits {:?}",
            self.summary.ticks,
            self.summary.shells_fired,
            self.summary.tank_hits,
            self.summary.hits_by_player
        );
        &self.summary
    }

    fn record(&mut self, report: &TickReport) {
        self.summary.ticks += 1;
        self.summary.shells_fired += report.spawned.len();
        self.summary.wall_contacts += report.tile_contacts.len();
        self.summary.tank_hits += report.hits.len();

        for hit in &report.hits {
            if let Some(player) = self.tanks.iter().position(|&tank| tank == hit.shooter) {
                self.summary.hits_by_player[player] += 1;
                log::info!("Player {} scored a hit on tick {}", player, report.tick);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{ControllerKind, ScriptStep};
    use std::f32::consts::FRAC_PI_2;

    fn duel(players: Vec<ControllerKind>) -> GameConfig {
        let mut config = GameConfig::default();
        config.gameplay.match_ticks = 60;
        config.arena.playfield = "**********\n*        *\n*        *\n*        *\n**********".to_string();
        config.arena.spawns = vec![[-6.0, 0.0, -FRAC_PI_2], [4.0, 0.0, FRAC_PI_2]];
        config.controls.players = players;
        config
    }

    #[test]
    fn test_default_match_spawns_tanks() {
        let game = Match::new(&GameConfig::default()).unwrap();

        assert_eq!(game.tanks().len(), 2);
        assert_eq!(game.world().len(), 2);
        assert_eq!(game.summary().hits_by_player, vec![0, 0]);
    }

    #[test]
    fn test_invalid_arena_rejected() {
        let mut config = GameConfig::default();
        config.arena.playfield = String::new();

        assert!(matches!(Match::new(&config), Err(GameError::Playfield(_))));
    }

    #[test]
    fn test_missing_controllers_stay_idle() {
        let mut game = Match::new(&duel(Vec::new())).unwrap();
        let summary = game.run().clone();

        assert_eq!(summary.ticks, 60);
        assert_eq!(summary.shells_fired, 0);
        assert_eq!(game.world().get(game.tanks()[1]).unwrap().position.x, 4.0);
    }

    #[test]
    fn test_hit_credited_to_shooter() {
        let fire_once = ControllerKind::Scripted {
            steps: vec![
                ScriptStep {
                    ticks: 1,
                    controls: Controls { shoot: true, ..Controls::default() },
                },
                ScriptStep {
                    ticks: 1000,
                    controls: Controls::default(),
                },
            ],
        };
        let mut game = Match::new(&duel(vec![fire_once, ControllerKind::Idle])).unwrap();
        let summary = game.run();

        assert_eq!(summary.shells_fired, 1);
        assert_eq!(summary.tank_hits, 1);
        assert_eq!(summary.hits_by_player, vec![1, 0]);
    }

    #[test]
    fn test_wander_match_is_deterministic() {
        let config = GameConfig {
            gameplay: crate::config::GameplayConfig {
                match_ticks: 300,
                ..Default::default()
            },
            ..GameConfig::default()
        };

        let first = Match::new(&config).unwrap().run().clone();
        let second = Match::new(&config).unwrap().run().clone();
        assert_eq!(first, second);
        assert_eq!(first.ticks, 300);
    }
}
