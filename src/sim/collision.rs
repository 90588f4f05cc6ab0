//! Collision and combat resolution
//!
//! Pairwise bounding-circle checks between the entity collections. Every
//! pass that removes entries decides removals against the collection as it
//! stood when the pass began, then drops the marked entries in one sweep,
//! so no entry is skipped, hit twice, or touched after removal.

use glam::Vec2;

use super::arena::Arena;
use super::entity::{Entity, Projectile, Ship};

/// Result of enemy fire against the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerDamage {
    /// Projectiles that hit and were consumed
    pub hits: u32,
    /// Health reached zero
    pub destroyed: bool,
}

/// Index of the first enemy ramming the player, if any
pub fn enemy_rams_player(enemies: &[Ship], player: &Ship) -> Option<usize> {
    enemies.iter().position(|enemy| enemy.collides_with(player))
}

/// Drop projectiles that have left the arena. Returns how many were removed.
pub fn prune_out_of_bounds(projectiles: &mut Vec<Projectile>, arena: &Arena) -> usize {
    let before = projectiles.len();
    projectiles.retain(|shot| !arena.is_clipped(shot.position()));
    before - projectiles.len()
}

/// Player fire against enemies.
///
/// Each projectile destroys at most the first live enemy it overlaps and is
/// consumed by it. Destroyed enemies are removed and their positions
/// returned in kill order.
pub fn resolve_player_fire(
    projectiles: &mut Vec<Projectile>,
    enemies: &mut Vec<Ship>,
) -> Vec<Vec2> {
    let mut destroyed = vec![false; enemies.len()];
    let mut kills = Vec::new();

    projectiles.retain(|shot| {
        let hit = enemies
            .iter()
            .enumerate()
            .find(|(i, enemy)| !destroyed[*i] && enemy.collides_with(shot));
        match hit {
            Some((i, enemy)) => {
                destroyed[i] = true;
                kills.push(enemy.position());
                false
            }
            None => true,
        }
    });

    if !kills.is_empty() {
        let mut flags = destroyed.into_iter();
        enemies.retain(|_| !flags.next().unwrap_or(false));
    }
    kills
}

/// Enemy fire against the player.
///
/// Each overlapping projectile is consumed and costs one hit point. Once the
/// player is destroyed the remaining projectiles are left alone.
pub fn resolve_enemy_fire(projectiles: &mut Vec<Projectile>, player: &mut Ship) -> PlayerDamage {
    let mut damage = PlayerDamage::default();

    projectiles.retain(|shot| {
        if damage.destroyed || !player.collides_with(shot) {
            return true;
        }
        damage.hits += 1;
        if player.reduce_health() == 0 {
            damage.destroyed = true;
        }
        false
    });

    damage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn enemy_at(x: f32, y: f32) -> Ship {
        Ship::enemy(Vec2::new(x, y), &Settings::default())
    }

    fn shot_at(x: f32, y: f32) -> Projectile {
        Projectile::new(Vec2::new(x, y), Vec2::ZERO, 4.0)
    }

    #[test]
    fn test_enemy_rams_player() {
        let settings = Settings::default();
        let player = Ship::player(Vec2::new(400.0, 400.0), &settings);
        let enemies = vec![enemy_at(100.0, 100.0), enemy_at(420.0, 400.0)];
        assert_eq!(enemy_rams_player(&enemies, &player), Some(1));
        // Radii 25 + 25: exactly 50 apart is a miss
        let enemies = vec![enemy_at(450.0, 400.0)];
        assert_eq!(enemy_rams_player(&enemies, &player), None);
    }

    #[test]
    fn test_prune_out_of_bounds() {
        let arena = Arena::new(800.0, 600.0);
        let mut shots = vec![
            shot_at(10.0, 10.0),
            shot_at(-1.0, 10.0),
            shot_at(10.0, 700.0),
            shot_at(800.0, 0.0),
            shot_at(799.0, 599.0),
        ];
        assert_eq!(prune_out_of_bounds(&mut shots, &arena), 3);
        let left: Vec<_> = shots.iter().map(|s| s.position()).collect();
        assert_eq!(left, vec![Vec2::new(10.0, 10.0), Vec2::new(799.0, 599.0)]);
    }

    #[test]
    fn test_projectile_kills_first_enemy_only() {
        // Two overlapping enemies, one projectile on both
        let mut enemies = vec![enemy_at(100.0, 100.0), enemy_at(105.0, 100.0)];
        let mut shots = vec![shot_at(102.0, 100.0)];
        let kills = resolve_player_fire(&mut shots, &mut enemies);
        assert_eq!(kills, vec![Vec2::new(100.0, 100.0)]);
        assert!(shots.is_empty());
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].body.pos, Vec2::new(105.0, 100.0));
    }

    #[test]
    fn test_no_double_removal() {
        // Two projectiles on the same lone enemy: one kill, one projectile survives
        let mut enemies = vec![enemy_at(100.0, 100.0), enemy_at(500.0, 500.0)];
        let mut shots = vec![shot_at(100.0, 100.0), shot_at(101.0, 100.0)];
        let kills = resolve_player_fire(&mut shots, &mut enemies);
        assert_eq!(kills.len(), 1);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].position(), Vec2::new(101.0, 100.0));
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].body.pos, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_adjacent_kills_in_one_pass() {
        let mut enemies = vec![
            enemy_at(100.0, 100.0),
            enemy_at(300.0, 100.0),
            enemy_at(500.0, 100.0),
        ];
        let mut shots = vec![shot_at(500.0, 100.0), shot_at(700.0, 700.0), shot_at(100.0, 100.0)];
        let kills = resolve_player_fire(&mut shots, &mut enemies);
        assert_eq!(kills, vec![Vec2::new(500.0, 100.0), Vec2::new(100.0, 100.0)]);
        assert_eq!(shots.len(), 1);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].body.pos, Vec2::new(300.0, 100.0));
    }

    #[test]
    fn test_enemy_fire_damages_player() {
        let mut player = Ship::player(Vec2::new(400.0, 400.0), &Settings::default());
        let mut shots = vec![shot_at(400.0, 400.0), shot_at(0.0, 0.0)];
        let damage = resolve_enemy_fire(&mut shots, &mut player);
        assert_eq!(damage, PlayerDamage { hits: 1, destroyed: false });
        assert_eq!(player.health(), 2);
        assert_eq!(shots.len(), 1);
    }

    #[test]
    fn test_enemy_fire_stops_after_destruction() {
        let mut player = Ship::player(Vec2::new(400.0, 400.0), &Settings::default());
        let mut shots: Vec<_> = (0..5).map(|i| shot_at(400.0 + i as f32, 400.0)).collect();
        let damage = resolve_enemy_fire(&mut shots, &mut player);
        assert_eq!(damage, PlayerDamage { hits: 3, destroyed: true });
        assert!(player.is_destroyed());
        assert_eq!(shots.len(), 2);
    }
}
