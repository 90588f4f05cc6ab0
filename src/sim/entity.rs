//! Entity model
//!
//! Every entity is a [`Body`] (position, velocity, bounding radius) plus a
//! variant tag. Ships carry a heading and a [`Pilot`]; only enemy pilots own
//! an AI brain. Shooting returns a [`Projectile`] value and the caller decides
//! which collection it joins.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ai::EnemyBrain;
use super::arena::{Arena, EdgePolicy};
use crate::settings::Settings;
use crate::{UP, rotate_degrees};

/// Variant tag handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Projectile,
    Wreck,
}

/// Turn direction for a single rotate call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// Player thrust intent for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Thrust {
    Forward,
    Reverse,
    #[default]
    Idle,
}

/// Position, per-tick velocity and bounding circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Bounding circles overlap. Tangent circles do not collide.
    #[inline]
    pub fn collides_with(&self, other: &Body) -> bool {
        self.pos.distance(other.pos) < self.radius + other.radius
    }
}

/// Shared movement/collision capability of all entity variants
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
    fn kind(&self) -> EntityKind;
    fn edge_policy(&self) -> EdgePolicy;

    /// Facing direction for directional sprites
    fn heading(&self) -> Option<Vec2> {
        None
    }

    fn position(&self) -> Vec2 {
        self.body().pos
    }

    fn radius(&self) -> f32 {
        self.body().radius
    }

    fn collides_with(&self, other: &dyn Entity) -> bool {
        self.body().collides_with(other.body())
    }

    /// Apply one tick of velocity, then the edge policy.
    ///
    /// Clipped entities may end up outside the arena; removing them is the
    /// resolver's job.
    fn advance(&mut self, arena: &Arena) {
        let policy = self.edge_policy();
        let body = self.body_mut();
        match policy {
            EdgePolicy::Static => {}
            EdgePolicy::Wrap => body.pos = arena.wrap(body.pos + body.vel),
            EdgePolicy::Clip => body.pos += body.vel,
        }
    }
}

/// Per-ship handling constants, copied from [`Settings`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Handling {
    pub maneuverability_deg: f32,
    pub acceleration: f32,
    pub bullet_speed: f32,
    pub projectile_radius: f32,
}

impl Handling {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            maneuverability_deg: settings.maneuverability_deg,
            acceleration: settings.acceleration,
            bullet_speed: settings.bullet_speed,
            projectile_radius: settings.projectile_radius,
        }
    }
}

impl Default for Handling {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Who flies a ship
#[derive(Debug, Clone)]
pub enum Pilot {
    /// Driven by input intents
    Player,
    /// Driven by an AI brain every tick
    Enemy(EnemyBrain),
}

/// A directional, shooting ship (player or enemy)
#[derive(Debug, Clone)]
pub struct Ship {
    pub body: Body,
    /// Unit vector, rotated but never assigned after construction
    heading: Vec2,
    health: u8,
    pub handling: Handling,
    pub pilot: Pilot,
}

impl Ship {
    pub fn new(pos: Vec2, radius: f32, health: u8, handling: Handling, pilot: Pilot) -> Self {
        Self {
            body: Body::new(pos, Vec2::ZERO, radius),
            heading: UP,
            health,
            handling,
            pilot,
        }
    }

    pub fn player(pos: Vec2, settings: &Settings) -> Self {
        Self::new(
            pos,
            settings.ship_radius,
            settings.player_health,
            Handling::from_settings(settings),
            Pilot::Player,
        )
    }

    pub fn enemy(pos: Vec2, settings: &Settings) -> Self {
        Self::new(
            pos,
            settings.ship_radius,
            settings.enemy_health,
            Handling::from_settings(settings),
            Pilot::Enemy(EnemyBrain::from_settings(settings)),
        )
    }

    pub fn heading(&self) -> Vec2 {
        self.heading
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self.pilot, Pilot::Enemy(_))
    }

    /// Turn the heading by the ship's maneuverability
    pub fn rotate(&mut self, rotation: Rotation) {
        let sign = match rotation {
            Rotation::Clockwise => 1.0,
            Rotation::CounterClockwise => -1.0,
        };
        self.heading = rotate_degrees(self.heading, sign * self.handling.maneuverability_deg);
    }

    pub fn accelerate(&mut self, factor: f32) {
        self.body.vel += self.heading * self.handling.acceleration * factor;
    }

    /// Symmetric with [`Ship::accelerate`]; may leave the ship moving backwards
    pub fn decelerate(&mut self, factor: f32) {
        self.body.vel -= self.heading * self.handling.acceleration * factor;
    }

    pub fn apply_thrust(&mut self, thrust: Thrust, factor: f32) {
        match thrust {
            Thrust::Forward => self.accelerate(factor),
            Thrust::Reverse => self.decelerate(factor),
            Thrust::Idle => {}
        }
    }

    /// A projectile leaving the ship's position along its heading,
    /// inheriting the ship's velocity
    pub fn shoot(&self) -> Projectile {
        let vel = self.heading * self.handling.bullet_speed + self.body.vel;
        Projectile::new(self.body.pos, vel, self.handling.projectile_radius)
    }

    /// Lose one hit point, saturating at zero. Returns the remaining health.
    pub fn reduce_health(&mut self) -> u8 {
        self.health = self.health.saturating_sub(1);
        self.health
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }

    /// Let an enemy brain steer toward `target` for one tick.
    ///
    /// Returns the shot fired this tick, if any. Player ships are untouched.
    pub fn pilot_toward(&mut self, target: Vec2) -> Option<Projectile> {
        let Pilot::Enemy(brain) = &mut self.pilot else {
            return None;
        };
        let command = brain.decide(self.body.pos, self.heading, target);

        if let Some(rotation) = command.turn {
            self.rotate(rotation);
        }
        // Shots leave from a stationary ship
        self.body.vel = Vec2::ZERO;
        let shot = command.fire.then(|| self.shoot());
        self.body.vel = command.velocity;
        shot
    }
}

impl Entity for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> EntityKind {
        match self.pilot {
            Pilot::Player => EntityKind::Player,
            Pilot::Enemy(_) => EntityKind::Enemy,
        }
    }

    fn edge_policy(&self) -> EdgePolicy {
        EdgePolicy::Wrap
    }

    fn heading(&self) -> Option<Vec2> {
        Some(self.heading)
    }
}

/// A bullet; clipped at the arena edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            body: Body::new(pos, vel, radius),
        }
    }
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Projectile
    }

    fn edge_policy(&self) -> EdgePolicy {
        EdgePolicy::Clip
    }
}

/// Inert marker left where a ship was destroyed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wreck {
    pub body: Body,
}

impl Wreck {
    pub fn at(pos: Vec2, radius: f32) -> Self {
        Self {
            body: Body::new(pos, Vec2::ZERO, radius),
        }
    }
}

impl Entity for Wreck {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Wreck
    }

    fn edge_policy(&self) -> EdgePolicy {
        EdgePolicy::Static
    }
}
