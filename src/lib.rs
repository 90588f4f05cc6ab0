//! Void Skirmish - A wrapping-arena ship dogfight
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, enemy AI, combat, spawning)
//! - `settings`: Recognized game options with validation
//! - `error`: Construction-time configuration errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1000.0;
    pub const ARENA_HEIGHT: f32 = 800.0;

    /// Where the player ship starts each session
    pub const PLAYER_START: (f32, f32) = (400.0, 400.0);

    /// Enemy population
    pub const INITIAL_ENEMIES: usize = 3;
    pub const MAX_ENEMIES: usize = 8;
    /// Enemies must spawn farther than this from the player
    pub const ENEMY_SPAWN_DISTANCE: f32 = 400.0;
    /// Spawn pacing: counter step per tick, and threshold per live enemy
    pub const SPAWN_COUNTER_STEP: u32 = 5;
    pub const SPAWN_COUNTER_SCALE: u32 = 125;
    /// Rejection-sampling budget for a single spawn position
    pub const MAX_SPAWN_ATTEMPTS: u32 = 10_000;

    /// Ship handling
    pub const MANEUVERABILITY_DEG: f32 = 3.0;
    pub const ACCELERATION: f32 = 0.20;
    /// Factor applied to a thrust intent
    pub const THRUST_FACTOR: f32 = 0.5;
    pub const BULLET_SPEED: f32 = 9.0;

    /// Enemy engagement
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const AIM_TOLERANCE_DEG: f32 = 3.0;
    pub const RETREAT_DISTANCE: f32 = 150.0;
    pub const APPROACH_DISTANCE: f32 = 300.0;
    /// Enemy fire control: counter step per aligned tick, fires above threshold
    pub const ENEMY_FIRE_STEP: f32 = 9.0;
    pub const BULLET_DELAY: f32 = 1.0;
    pub const ENEMY_FIRE_THRESHOLD: f32 = 1000.0 * BULLET_DELAY;

    /// Hit points
    pub const PLAYER_HEALTH: u8 = 3;
    pub const ENEMY_HEALTH: u8 = 2;

    /// Bounding radii (half the sprite extent)
    pub const SHIP_RADIUS: f32 = 25.0;
    pub const PROJECTILE_RADIUS: f32 = 4.0;
    pub const WRECK_RADIUS: f32 = 50.0;

    /// Ticks between removals of the oldest wreck
    pub const WRECK_EXPIRY_INTERVAL: u32 = 50;
}

/// Screen-space "up" (y grows downward)
pub const UP: Vec2 = Vec2::new(0.0, -1.0);

/// Rotate a vector by `degrees`.
///
/// Positive angles turn clockwise on screen because the y axis points down.
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Signed angle in degrees that rotates `from` onto `to`, in (-180, 180]
///
/// Positive means a clockwise (screen-space) turn. Zero when either input is
/// the zero vector.
#[inline]
pub fn signed_angle_degrees(from: Vec2, to: Vec2) -> f32 {
    if from == Vec2::ZERO || to == Vec2::ZERO {
        return 0.0;
    }
    from.perp_dot(to).atan2(from.dot(to)).to_degrees()
}

/// Toroidal remap of `pos` into `[0, width) x [0, height)`
#[inline]
pub fn wrap_position(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, width), wrap_axis(pos.y, height))
}

#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}
