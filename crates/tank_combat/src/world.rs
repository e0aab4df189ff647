//! Arena world and the per-tick pipeline
//!
//! Each tick runs, in order:
//! 1. entity updates (shells fired this tick are spawned right after),
//! 2. tile-map ejection with a generic touch for every entity pushed out,
//! 3. pairwise resolution with a directed touch in both directions,
//! 4. removal of everything marked for destruction.

use crate::config::GameplayConfig;
use crate::controls::Controls;
use crate::entities::{EntityKind, GameEntity, TouchInfo};
use combat_engine::foundation::collections::EntityMap;
use combat_engine::physics::{eject_from_tiles, resolve_pairs, CollisionBody, TileContact, TileMap, TouchPair};
use combat_engine::prelude::EntityId;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Tick number, starting at zero
    pub tick: u64,
    /// Entities spawned during the update pass
    pub spawned: Vec<EntityId>,
    /// Entities pushed out of the level geometry
    pub tile_contacts: Vec<TileContact>,
    /// Entity pairs that touched
    pub touches: Vec<TouchPair>,
    /// Tanks struck by something fired from another entity
    pub hits: Vec<Hit>,
    /// Entities removed at the end of the tick
    pub destroyed: Vec<EntityId>,
}

/// A tank struck by a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Tank that was struck
    pub target: EntityId,
    /// The projectile
    pub projectile: EntityId,
    /// Entity that fired the projectile, possibly already gone
    pub shooter: EntityId,
}

/// All entities in the arena plus the level they collide with
pub struct World {
    entities: EntityMap<GameEntity>,
    tile_map: TileMap,
    gameplay: GameplayConfig,
    tick: u64,
}

impl World {
    /// Create an empty world
    pub fn new(tile_map: TileMap, gameplay: GameplayConfig) -> Self {
        Self {
            entities: EntityMap::with_key(),
            tile_map,
            gameplay,
            tick: 0,
        }
    }

    /// Add an entity
    pub fn spawn(&mut self, entity: GameEntity) -> EntityId {
        self.entities.insert(entity)
    }

    /// Look up an entity
    pub fn get(&self, id: EntityId) -> Option<&GameEntity> {
        self.entities.get(id)
    }

    /// All live entities
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &GameEntity)> {
        self.entities.iter()
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when no entities are left
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The level geometry
    pub fn tile_map(&self) -> &TileMap {
        &self.tile_map
    }

    /// Gameplay settings in use
    pub fn gameplay(&self) -> &GameplayConfig {
        &self.gameplay
    }

    /// Ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Advance the world by `dt` seconds
    ///
    /// `controls[player]` drives the tank of that player; missing entries
    /// leave a tank idle.
    pub fn tick(&mut self, dt: f32, controls: &[Controls]) -> TickReport {
        let mut report = TickReport { tick: self.tick, ..TickReport::default() };

        report.spawned = self.update_entities(dt, controls);
        report.tile_contacts = self.resolve_tiles();
        (report.touches, report.hits) = self.resolve_entities();
        report.destroyed = self.sweep();

        self.tick += 1;
        report
    }

    fn update_entities(&mut self, dt: f32, controls: &[Controls]) -> Vec<EntityId> {
        let idle = Controls::default();
        let mut spawned = Vec::new();

        for (id, entity) in &mut self.entities {
            let input = match &entity.kind {
                EntityKind::Tank(tank) => controls.get(tank.player).unwrap_or(&idle),
                EntityKind::Shell(_) => &idle,
            };
            if let Some(child) = entity.update(id, dt, input, &self.gameplay) {
                spawned.push(child);
            }
        }

        spawned
            .into_iter()
            .map(|child| {
                let id = self.entities.insert(child);
                log::debug!("Spawned {:?} on tick {}", id, self.tick);
                id
            })
            .collect()
    }

    /// Snapshots of live, collidable entities in storage order
    fn collision_bodies(&self) -> Vec<CollisionBody> {
        self.entities
            .iter()
            .filter(|(_, entity)| entity.collidable && !entity.pending_destruction)
            .map(|(id, entity)| entity.collision_body(id))
            .collect()
    }

    fn write_back(&mut self, bodies: &[CollisionBody]) {
        for body in bodies {
            if let Some(entity) = self.entities.get_mut(body.id) {
                entity.position = body.position;
            }
        }
    }

    fn resolve_tiles(&mut self) -> Vec<TileContact> {
        let mut bodies = self.collision_bodies();
        let contacts = eject_from_tiles(&self.tile_map, &mut bodies);
        self.write_back(&bodies);

        for contact in &contacts {
            if let Some(entity) = self.entities.get_mut(contact.id) {
                entity.on_touch();
            }
        }
        contacts
    }

    fn resolve_entities(&mut self) -> (Vec<TouchPair>, Vec<Hit>) {
        let mut bodies = self.collision_bodies();
        let touches = resolve_pairs(&mut bodies);
        self.write_back(&bodies);

        // Every touch sees the other entity as it was before any handler ran
        let infos: Vec<(EntityId, TouchInfo)> = touches
            .iter()
            .flat_map(TouchPair::directions)
            .filter_map(|(target, other)| Some((target, self.entities.get(other)?.touch_info(other))))
            .collect();

        let mut hits = Vec::new();
        for (target, info) in infos {
            let Some(entity) = self.entities.get_mut(target) else {
                continue;
            };
            if let (EntityKind::Tank(_), Some(shooter)) = (&entity.kind, info.originator) {
                hits.push(Hit { target, projectile: info.id, shooter });
            }
            entity.on_touch_with(&info, &self.gameplay);
        }
        (touches, hits)
    }

    fn sweep(&mut self) -> Vec<EntityId> {
        let doomed: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|(_, entity)| entity.pending_destruction)
            .map(|(id, _)| id)
            .collect();

        for id in &doomed {
            self.entities.remove(*id);
            log::debug!("Destroyed {:?} on tick {}", id, self.tick);
        }
        doomed
    }
}
