//! Arena bounds
//!
//! Ships wrap toroidally at the edges. Projectiles are clipped: once they
//! leave the rectangle they are removed instead of wrapping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::wrap_position;

/// How an entity reacts to the arena edge after moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgePolicy {
    /// Re-enter from the opposite edge
    Wrap,
    /// Leave the arena and get removed
    Clip,
    /// Never moves
    Static,
}

/// The playfield rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Toroidal remap into `[0, width) x [0, height)`
    #[inline]
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        wrap_position(pos, self.width, self.height)
    }

    /// Whether `pos` lies inside `[0, width) x [0, height)`
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x < self.width && pos.y >= 0.0 && pos.y < self.height
    }

    /// Whether a clipped entity at `pos` must be removed
    #[inline]
    pub fn is_clipped(&self, pos: Vec2) -> bool {
        !self.contains(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_both_directions() {
        let arena = Arena::new(800.0, 600.0);
        assert_eq!(arena.wrap(Vec2::new(-50.0, -50.0)), Vec2::new(750.0, 550.0));
        assert_eq!(arena.wrap(Vec2::new(850.0, 300.0)), Vec2::new(50.0, 300.0));
        assert_eq!(arena.wrap(Vec2::new(400.0, 650.0)), Vec2::new(400.0, 50.0));
        assert_eq!(arena.wrap(Vec2::new(800.0, 600.0)), Vec2::ZERO);
    }

    #[test]
    fn test_clip_edges() {
        let arena = Arena::new(800.0, 600.0);
        assert!(!arena.is_clipped(Vec2::ZERO));
        assert!(!arena.is_clipped(Vec2::new(799.5, 599.5)));
        assert!(arena.is_clipped(Vec2::new(800.0, 10.0)));
        assert!(arena.is_clipped(Vec2::new(10.0, 600.0)));
        assert!(arena.is_clipped(Vec2::new(-0.1, 10.0)));
        assert!(arena.is_clipped(Vec2::new(10.0, -0.1)));
    }
}
