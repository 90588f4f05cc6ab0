//! Enemy population control
//!
//! Enemies are placed by rejection sampling: uniform arena positions are
//! drawn until one lies strictly farther than the exclusion distance from the
//! player. Replacements trickle in through a pacing counter whose threshold
//! scales with the live enemy count, so a thin field refills faster.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::entity::Ship;
use crate::consts::MAX_SPAWN_ATTEMPTS;
use crate::settings::Settings;

/// Spawn pacing and placement, driven by an injected random source
#[derive(Debug, Clone)]
pub struct SpawnDirector<R = Pcg32> {
    rng: R,
    counter: u32,
}

impl SpawnDirector<Pcg32> {
    /// Director backed by a PCG stream seeded from `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> SpawnDirector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, counter: 0 }
    }

    /// Current pacing counter
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn reset_counter(&mut self) {
        self.counter = 0;
    }

    /// A uniform arena position strictly farther than `exclusion` from `avoid`.
    ///
    /// Gives up after [`MAX_SPAWN_ATTEMPTS`] draws.
    pub fn sample_position(&mut self, arena: &Arena, avoid: Vec2, exclusion: f32) -> Option<Vec2> {
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let candidate = Vec2::new(
                self.rng.random_range(0.0..arena.width),
                self.rng.random_range(0.0..arena.height),
            );
            if candidate.distance(avoid) > exclusion {
                return Some(candidate);
            }
        }
        log::warn!(
            "No spawn position farther than {} from ({}, {}) after {} attempts",
            exclusion,
            avoid.x,
            avoid.y,
            MAX_SPAWN_ATTEMPTS
        );
        None
    }

    /// A fresh enemy placed away from `avoid`
    pub fn spawn_enemy(&mut self, settings: &Settings, arena: &Arena, avoid: Vec2) -> Option<Ship> {
        let pos = self.sample_position(arena, avoid, settings.spawn_exclusion_distance)?;
        log::debug!("Spawning enemy at ({:.1}, {:.1})", pos.x, pos.y);
        Some(Ship::enemy(pos, settings))
    }

    /// The session's opening wave
    pub fn populate(&mut self, settings: &Settings, arena: &Arena, avoid: Vec2) -> Vec<Ship> {
        (0..settings.initial_enemies)
            .filter_map(|_| self.spawn_enemy(settings, arena, avoid))
            .collect()
    }

    /// Advance the pacing counter for one tick with `live` enemies.
    ///
    /// Returns true when a replacement is due; the counter resets then.
    pub fn pace(&mut self, live: usize, settings: &Settings) -> bool {
        if live >= settings.max_enemies {
            return false;
        }
        // Saturate so huge step/scale settings stall spawning instead of overflowing
        self.counter = self.counter.saturating_add(settings.spawn_counter_step);
        let threshold = u32::try_from(live)
            .unwrap_or(u32::MAX)
            .saturating_mul(settings.spawn_counter_scale);
        if self.counter > threshold {
            self.counter = 0;
            true
        } else {
            false
        }
    }

    /// Run one tick of population control, pushing a replacement when due
    pub fn replenish(
        &mut self,
        enemies: &mut Vec<Ship>,
        settings: &Settings,
        arena: &Arena,
        avoid: Vec2,
    ) -> bool {
        if !self.pace(enemies.len(), settings) {
            return false;
        }
        match self.spawn_enemy(settings, arena, avoid) {
            Some(enemy) => {
                enemies.push(enemy);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arena() -> Arena {
        Arena::new(1000.0, 800.0)
    }

    #[test]
    fn test_populate_respects_count_and_distance() {
        let settings = Settings::default();
        let mut director = SpawnDirector::seeded(7);
        let enemies = director.populate(&settings, &arena(), settings.player_start);
        assert_eq!(enemies.len(), 3);
        for enemy in &enemies {
            assert!(enemy.body.pos.distance(settings.player_start) > 400.0);
            assert!(arena().contains(enemy.body.pos));
            assert!(enemy.is_enemy());
        }
    }

    #[test]
    fn test_same_seed_same_positions() {
        let settings = Settings::default();
        let a = SpawnDirector::seeded(42).populate(&settings, &arena(), settings.player_start);
        let b = SpawnDirector::seeded(42).populate(&settings, &arena(), settings.player_start);
        let pa: Vec<_> = a.iter().map(|e| e.body.pos).collect();
        let pb: Vec<_> = b.iter().map(|e| e.body.pos).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_pacing_scales_with_population() {
        let settings = Settings::default();
        let mut director = SpawnDirector::seeded(1);

        // Empty field: first tick already exceeds 0
        assert!(director.pace(0, &settings));
        assert_eq!(director.counter(), 0);

        // One enemy: counter must pass 125, i.e. 26 ticks of +5
        let due = (1..=100).find(|_| director.pace(1, &settings));
        assert_eq!(due, Some(26));

        // Three enemies: must pass 375, i.e. 76 ticks
        let due = (1..=200).find(|_| director.pace(3, &settings));
        assert_eq!(due, Some(76));
    }

    #[test]
    fn test_pacing_stops_at_cap() {
        let settings = Settings::default();
        let mut director = SpawnDirector::seeded(1);
        for _ in 0..1000 {
            assert!(!director.pace(8, &settings));
        }
        assert_eq!(director.counter(), 0);
    }

    #[test]
    fn test_pacing_saturates_on_huge_settings() {
        let settings = Settings {
            spawn_counter_scale: u32::MAX,
            ..Settings::default()
        };
        let mut director = SpawnDirector::seeded(1);
        for _ in 0..1000 {
            assert!(!director.pace(3, &settings));
        }

        let settings = Settings {
            spawn_counter_step: u32::MAX,
            ..Settings::default()
        };
        let mut director = SpawnDirector::seeded(1);
        // Every tick lands on u32::MAX, which clears any live-count threshold below it
        assert!(director.pace(3, &settings));
        assert!(director.pace(3, &settings));
        assert_eq!(director.counter(), 0);
    }

    #[test]
    fn test_replenish_pushes_enemy() {
        let settings = Settings::default();
        let mut director = SpawnDirector::seeded(3);
        let mut enemies = Vec::new();
        assert!(director.replenish(&mut enemies, &settings, &arena(), settings.player_start));
        assert_eq!(enemies.len(), 1);
        assert!(!director.replenish(&mut enemies, &settings, &arena(), settings.player_start));
        assert_eq!(enemies.len(), 1);
    }

    #[test]
    fn test_unsatisfiable_sample_gives_up() {
        let mut director = SpawnDirector::seeded(9);
        let small = Arena::new(100.0, 100.0);
        assert!(director.sample_position(&small, Vec2::new(50.0, 50.0), 500.0).is_none());
    }

    proptest! {
        #[test]
        fn prop_spawns_clear_exclusion_zone(
            seed in any::<u64>(),
            px in 0.0f32..1000.0,
            py in 0.0f32..800.0,
        ) {
            let settings = Settings::default();
            let avoid = Vec2::new(px, py);
            let mut director = SpawnDirector::seeded(seed);
            for _ in 0..8 {
                if let Some(enemy) = director.spawn_enemy(&settings, &arena(), avoid) {
                    let distance = enemy.body.pos.distance(avoid);
                    prop_assert!(distance > settings.spawn_exclusion_distance);
                    prop_assert!(arena().contains(enemy.body.pos));
                }
            }
        }
    }
}
