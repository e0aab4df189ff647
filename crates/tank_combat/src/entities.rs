//! Game entities: tanks and the shells they fire
//!
//! Entities own all gameplay state (velocities, timers, destruction flags).
//! The engine only ever sees their [`CollisionBody`] snapshots and reports
//! touches back through [`GameEntity::on_touch`] and
//! [`GameEntity::on_touch_with`].

use crate::config::GameplayConfig;
use crate::controls::{Controls, Trigger};
use combat_engine::foundation::math::{utils::yaw, Quat, Vec3};
use combat_engine::prelude::{CollisionBody, EntityId};

/// Shells below this height bounce
pub const GROUND_CONTACT_HEIGHT: f32 = 0.125;

/// Local forward direction of every entity
fn forward_axis() -> Vec3 {
    Vec3::new(0.0, 0.0, -1.0)
}

/// Muzzle position relative to the tank origin
fn barrel_exit() -> Vec3 {
    Vec3::new(8.881_791e-6, 0.917_303_56, -0.666_830_04)
}

/// What an entity learns about whatever touched it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchInfo {
    /// The other entity
    pub id: EntityId,
    /// Its velocity at the time of the touch
    pub velocity: Vec3,
    /// Its originator, set for projectiles
    pub originator: Option<EntityId>,
}

/// Player-driven tank
#[derive(Debug, Clone, Default)]
pub struct Tank {
    /// Index into the per-tick controls
    pub player: usize,
    /// Seconds of spin-out left after a hit
    pub spin_out_timer: f32,
    trigger: Trigger,
}

/// Projectile fired by a tank
#[derive(Debug, Clone)]
pub struct Shell {
    /// Ticks until the shell expires
    pub ticks_remaining: u32,
}

/// Entity-specific state
#[derive(Debug, Clone)]
pub enum EntityKind {
    /// A tank
    Tank(Tank),
    /// A shell
    Shell(Shell),
}

/// An entity in the arena
#[derive(Debug, Clone)]
pub struct GameEntity {
    /// World position
    pub position: Vec3,
    /// World orientation
    pub orientation: Quat,
    /// World velocity (units per second)
    pub velocity: Vec3,
    /// Whether the entity takes part in collision
    pub collidable: bool,
    /// Edge length of the square footprint
    pub collision_size: f32,
    /// Entity that spawned this one
    pub originator: Option<EntityId>,
    /// Removed at the end of the tick
    pub pending_destruction: bool,
    /// Kind-specific state
    pub kind: EntityKind,
}

impl GameEntity {
    /// A tank for the given player
    pub fn tank(player: usize, position: Vec3, orientation: Quat, gameplay: &GameplayConfig) -> Self {
        Self {
            position,
            orientation,
            velocity: Vec3::zeros(),
            collidable: true,
            collision_size: gameplay.tank_collision_size,
            originator: None,
            pending_destruction: false,
            kind: EntityKind::Tank(Tank { player, ..Tank::default() }),
        }
    }

    /// A shell flying with `velocity`, fired by `originator`
    pub fn shell(position: Vec3, velocity: Vec3, originator: Option<EntityId>, gameplay: &GameplayConfig) -> Self {
        Self {
            position,
            orientation: Quat::identity(),
            velocity,
            collidable: true,
            collision_size: gameplay.shell_collision_size,
            originator,
            pending_destruction: false,
            kind: EntityKind::Shell(Shell { ticks_remaining: gameplay.shell_lifetime_ticks }),
        }
    }

    /// Tanks push each other apart; shells don't
    pub fn is_rigid(&self) -> bool {
        matches!(self.kind, EntityKind::Tank(_))
    }

    /// Mark for removal at the end of the tick
    pub fn destroy(&mut self) {
        self.pending_destruction = true;
    }

    /// Direction the entity faces
    pub fn forward(&self) -> Vec3 {
        self.orientation * forward_axis()
    }

    /// Collision snapshot for the engine
    pub fn collision_body(&self, id: EntityId) -> CollisionBody {
        CollisionBody::new(id, self.position, self.orientation, self.collision_size)
            .with_originator(self.originator)
            .with_rigid(self.is_rigid())
    }

    /// What others see when this entity touches them
    pub fn touch_info(&self, id: EntityId) -> TouchInfo {
        TouchInfo {
            id,
            velocity: self.velocity,
            originator: self.originator,
        }
    }

    /// Advance one tick; returns a shell if a tank fired this tick
    ///
    /// `id` is this entity's own handle, recorded as the originator of any
    /// shell it fires.
    pub fn update(
        &mut self,
        id: EntityId,
        dt: f32,
        controls: &Controls,
        gameplay: &GameplayConfig,
    ) -> Option<GameEntity> {
        match &mut self.kind {
            EntityKind::Tank(tank) => {
                let mut spin_speed = 0.0;
                if tank.spin_out_timer > 0.0 {
                    spin_speed = gameplay.spin_out_rate * tank.spin_out_timer * tank.spin_out_timer;
                    tank.spin_out_timer -= dt;
                } else {
                    self.velocity = Vec3::zeros();
                    if controls.left {
                        spin_speed = gameplay.tank_turn_speed;
                    }
                    if controls.right {
                        spin_speed = -gameplay.tank_turn_speed;
                    }
                    if controls.forward {
                        self.velocity = self.orientation * forward_axis() * gameplay.tank_speed;
                    }
                }

                let fired = tank.trigger.just_pressed(controls.shoot).then(|| {
                    let muzzle = self.orientation * barrel_exit() + self.position;
                    let velocity = self.orientation * forward_axis() * gameplay.shell_speed;
                    GameEntity::shell(muzzle, velocity, Some(id), gameplay)
                });

                self.position += self.velocity * dt;
                self.orientation *= yaw(spin_speed * dt);
                fired
            }
            EntityKind::Shell(shell) => {
                if shell.ticks_remaining == 0 {
                    self.pending_destruction = true;
                }
                self.position += self.velocity * dt;

                if self.position.y < GROUND_CONTACT_HEIGHT {
                    self.position.y = GROUND_CONTACT_HEIGHT + 0.001;
                    self.velocity.y *= -0.5;
                    self.velocity.x *= 0.9;
                    self.velocity.z *= 0.9;
                }
                shell.ticks_remaining = shell.ticks_remaining.saturating_sub(1);
                None
            }
        }
    }

    /// Touched level geometry
    pub fn on_touch(&mut self) {
        match &self.kind {
            EntityKind::Tank(tank) => {
                if tank.spin_out_timer > 0.0 {
                    self.velocity = Vec3::zeros();
                }
            }
            EntityKind::Shell(_) => self.destroy(),
        }
    }

    /// Touched another entity
    pub fn on_touch_with(&mut self, other: &TouchInfo, gameplay: &GameplayConfig) {
        match &mut self.kind {
            EntityKind::Tank(tank) => {
                // Anything with an originator is a projectile
                if other.originator.is_none() {
                    return;
                }
                if let Some(direction) = other.velocity.try_normalize(f32::EPSILON) {
                    self.velocity = direction * gameplay.spin_out_speed;
                }
                tank.spin_out_timer = gameplay.spin_out_duration;
                log::debug!("Tank {} hit by {:?}, spinning out", tank.player, other.id);
            }
            EntityKind::Shell(_) => self.destroy(),
        }
    }
}
