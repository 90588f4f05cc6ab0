//! Enemy AI
//!
//! Each enemy re-evaluates every tick: if its heading is off target it turns
//! in place; once aimed it tries to fire and then closes in, holds, or backs
//! off depending on range. The result is an orbit-and-snipe pattern.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Rotation;
use crate::settings::Settings;
use crate::signed_angle_degrees;

/// Cooldown-gated auto fire.
///
/// The counter grows by `step` on every aimed tick and releases a shot,
/// resetting to zero, once it exceeds `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireControl {
    delay: f32,
    step: f32,
    threshold: f32,
}

impl FireControl {
    pub fn new(step: f32, threshold: f32) -> Self {
        Self {
            delay: 0.0,
            step,
            threshold,
        }
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Advance the cooldown; true when a shot is released
    pub fn trigger(&mut self) -> bool {
        self.delay += self.step;
        if self.delay > self.threshold {
            self.delay = 0.0;
            true
        } else {
            false
        }
    }
}

/// Range band relative to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementBand {
    /// Too far: close the distance
    Approach,
    /// In range: stay put and keep firing
    Hold,
    /// Too close: back off
    Retreat,
}

impl EngagementBand {
    pub fn classify(distance: f32, retreat_distance: f32, approach_distance: f32) -> Self {
        if distance > approach_distance {
            EngagementBand::Approach
        } else if distance < retreat_distance {
            EngagementBand::Retreat
        } else {
            EngagementBand::Hold
        }
    }
}

/// What an enemy does this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringCommand {
    /// Heading correction, when not yet aimed
    pub turn: Option<Rotation>,
    /// Replaces the ship's velocity
    pub velocity: Vec2,
    /// Fire control released a shot
    pub fire: bool,
    /// Range band, only once aimed
    pub band: Option<EngagementBand>,
}

impl SteeringCommand {
    fn stop() -> Self {
        Self {
            turn: None,
            velocity: Vec2::ZERO,
            fire: false,
            band: None,
        }
    }
}

/// Steering and fire-control strategy owned by each enemy ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyBrain {
    pub fire_control: FireControl,
    pub aim_tolerance_deg: f32,
    pub retreat_distance: f32,
    pub approach_distance: f32,
    pub speed: f32,
}

impl EnemyBrain {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            fire_control: FireControl::new(settings.enemy_fire_step, settings.enemy_fire_threshold),
            aim_tolerance_deg: settings.aim_tolerance_deg,
            retreat_distance: settings.retreat_distance,
            approach_distance: settings.approach_distance,
            speed: settings.enemy_speed,
        }
    }

    /// Decide this tick's maneuver for a ship at `pos` facing `heading`
    pub fn decide(&mut self, pos: Vec2, heading: Vec2, target: Vec2) -> SteeringCommand {
        let to_target = target - pos;
        // Sitting on the target: no usable direction
        let Some(direction) = to_target.try_normalize() else {
            return SteeringCommand::stop();
        };

        let error = signed_angle_degrees(heading, to_target);
        if error.abs() > self.aim_tolerance_deg {
            let rotation = if error > 0.0 {
                Rotation::Clockwise
            } else {
                Rotation::CounterClockwise
            };
            return SteeringCommand {
                turn: Some(rotation),
                ..SteeringCommand::stop()
            };
        }

        let fire = self.fire_control.trigger();
        let band = EngagementBand::classify(
            to_target.length(),
            self.retreat_distance,
            self.approach_distance,
        );
        let velocity = match band {
            EngagementBand::Approach => direction * self.speed,
            EngagementBand::Retreat => direction * -self.speed,
            EngagementBand::Hold => Vec2::ZERO,
        };

        SteeringCommand {
            turn: None,
            velocity,
            fire,
            band: Some(band),
        }
    }
}

impl Default for EnemyBrain {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
