//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only (spawn placement)
//! - Stable iteration order (collection order)
//! - No rendering, input or platform dependencies

pub mod ai;
pub mod arena;
pub mod collision;
pub mod entity;
pub mod spawn;
pub mod state;
pub mod tick;

pub use ai::{EnemyBrain, EngagementBand, FireControl, SteeringCommand};
pub use arena::{Arena, EdgePolicy};
pub use collision::{
    PlayerDamage, enemy_rams_player, prune_out_of_bounds, resolve_enemy_fire, resolve_player_fire,
};
pub use entity::{
    Body, Entity, EntityKind, Handling, Pilot, Projectile, Rotation, Ship, Thrust, Wreck,
};
pub use spawn::SpawnDirector;
pub use state::{EntityView, Frame, GamePhase, GameState, Outcome, PlayerSlot};
pub use tick::{TickInput, tick};
