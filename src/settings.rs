//! Game settings
//!
//! Fixed for the lifetime of a session. A restart reuses the same values.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Recognized game options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Player spawn point (top-left origin)
    pub player_start: Vec2,

    // === Population ===
    /// Enemies placed when a session starts
    pub initial_enemies: usize,
    /// Replacement spawns stop at this many live enemies
    pub max_enemies: usize,
    /// Enemies spawn strictly farther than this from the player
    pub spawn_exclusion_distance: f32,
    /// Pacing counter increment per tick while below `max_enemies`
    pub spawn_counter_step: u32,
    /// Counter must exceed `live enemies * spawn_counter_scale` to spawn
    pub spawn_counter_scale: u32,

    // === Ship handling ===
    /// Degrees turned per rotate call
    pub maneuverability_deg: f32,
    pub acceleration: f32,
    /// Factor a thrust intent hands to accelerate/decelerate
    pub thrust_factor: f32,
    pub bullet_speed: f32,

    // === Enemy engagement ===
    pub enemy_speed: f32,
    /// Heading error below which an enemy counts as aimed
    pub aim_tolerance_deg: f32,
    /// Closer than this the enemy backs off
    pub retreat_distance: f32,
    /// Farther than this the enemy closes in
    pub approach_distance: f32,
    pub enemy_fire_step: f32,
    pub enemy_fire_threshold: f32,

    // === Hit points ===
    pub player_health: u8,
    pub enemy_health: u8,

    // === Bounding radii ===
    pub ship_radius: f32,
    pub projectile_radius: f32,
    pub wreck_radius: f32,

    /// Ticks between removals of the oldest enemy wreck
    pub wreck_expiry_interval: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            player_start: Vec2::new(PLAYER_START.0, PLAYER_START.1),

            initial_enemies: INITIAL_ENEMIES,
            max_enemies: MAX_ENEMIES,
            spawn_exclusion_distance: ENEMY_SPAWN_DISTANCE,
            spawn_counter_step: SPAWN_COUNTER_STEP,
            spawn_counter_scale: SPAWN_COUNTER_SCALE,

            maneuverability_deg: MANEUVERABILITY_DEG,
            acceleration: ACCELERATION,
            thrust_factor: THRUST_FACTOR,
            bullet_speed: BULLET_SPEED,

            enemy_speed: ENEMY_SPEED,
            aim_tolerance_deg: AIM_TOLERANCE_DEG,
            retreat_distance: RETREAT_DISTANCE,
            approach_distance: APPROACH_DISTANCE,
            enemy_fire_step: ENEMY_FIRE_STEP,
            enemy_fire_threshold: ENEMY_FIRE_THRESHOLD,

            player_health: PLAYER_HEALTH,
            enemy_health: ENEMY_HEALTH,

            ship_radius: SHIP_RADIUS,
            projectile_radius: PROJECTILE_RADIUS,
            wreck_radius: WRECK_RADIUS,

            wreck_expiry_interval: WRECK_EXPIRY_INTERVAL,
        }
    }
}

impl Settings {
    /// Default settings on a custom arena
    pub fn with_arena(width: f32, height: f32) -> Self {
        Self {
            arena_width: width,
            arena_height: height,
            ..Self::default()
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings: arena {}x{}, {} initial enemies",
            settings.arena_width,
            settings.arena_height,
            settings.initial_enemies
        );
        Ok(settings)
    }

    /// Check every option; see [`ConfigError`] for what is refused
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (w, h) = (self.arena_width, self.arena_height);
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(ConfigError::InvalidArena { width: w, height: h });
        }

        for (name, value) in [
            ("ship_radius", self.ship_radius),
            ("projectile_radius", self.projectile_radius),
            ("wreck_radius", self.wreck_radius),
            ("enemy_fire_step", self.enemy_fire_step),
            ("enemy_fire_threshold", self.enemy_fire_threshold),
        ] {
            positive(name, value)?;
        }

        for (name, value) in [
            ("maneuverability_deg", self.maneuverability_deg),
            ("acceleration", self.acceleration),
            ("thrust_factor", self.thrust_factor),
            ("bullet_speed", self.bullet_speed),
            ("enemy_speed", self.enemy_speed),
            ("aim_tolerance_deg", self.aim_tolerance_deg),
            ("retreat_distance", self.retreat_distance),
            ("approach_distance", self.approach_distance),
            ("spawn_exclusion_distance", self.spawn_exclusion_distance),
        ] {
            non_negative(name, value)?;
        }

        if self.max_enemies == 0 {
            return Err(ConfigError::ZeroCount { name: "max_enemies" });
        }
        for (name, value) in [
            ("player_health", u32::from(self.player_health)),
            ("enemy_health", u32::from(self.enemy_health)),
            ("spawn_counter_step", self.spawn_counter_step),
            ("wreck_expiry_interval", self.wreck_expiry_interval),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroCount { name });
            }
        }

        if self.initial_enemies > self.max_enemies {
            return Err(ConfigError::TooManyInitialEnemies {
                initial: self.initial_enemies,
                max: self.max_enemies,
            });
        }

        if self.retreat_distance >= self.approach_distance {
            return Err(ConfigError::InvertedBands {
                retreat: self.retreat_distance,
                approach: self.approach_distance,
            });
        }

        let start = self.player_start;
        if !(start.x >= 0.0 && start.x < w && start.y >= 0.0 && start.y < h) {
            return Err(ConfigError::PlayerOutsideArena { x: start.x, y: start.y });
        }

        // The farthest arena point from the start is one of the corners
        let farthest = [Vec2::ZERO, Vec2::new(w, 0.0), Vec2::new(0.0, h), Vec2::new(w, h)]
            .into_iter()
            .map(|corner| corner.distance(start))
            .fold(0.0_f32, f32::max);
        if farthest <= self.spawn_exclusion_distance {
            return Err(ConfigError::SpawnExclusionTooLarge {
                distance: self.spawn_exclusion_distance,
            });
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}
