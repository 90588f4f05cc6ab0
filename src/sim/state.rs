//! Game state and core simulation types
//!
//! One `GameState` per session. It exclusively owns every entity collection;
//! entities hold no reference back into it.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::entity::{Entity, EntityKind, Projectile, Ship, Wreck};
use super::spawn::SpawnDirector;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Collections being (re)built
    Initializing,
    /// Combat, movement and spawning all active
    Running,
    /// Every enemy destroyed
    Won,
    /// Player destroyed
    Lost,
}

/// Terminal outcome flag seen by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Still playing
    Pending,
    Won,
    Lost,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Pending => "pending",
            Outcome::Won => "won",
            Outcome::Lost => "lost",
        }
    }
}

/// The single player slot: a live ship, or the wreck it left behind
#[derive(Debug, Clone)]
pub enum PlayerSlot {
    Ship(Ship),
    Wreck(Wreck),
}

impl PlayerSlot {
    pub fn ship(&self) -> Option<&Ship> {
        match self {
            PlayerSlot::Ship(ship) => Some(ship),
            PlayerSlot::Wreck(_) => None,
        }
    }

    pub fn ship_mut(&mut self) -> Option<&mut Ship> {
        match self {
            PlayerSlot::Ship(ship) => Some(ship),
            PlayerSlot::Wreck(_) => None,
        }
    }

    pub fn is_wreck(&self) -> bool {
        matches!(self, PlayerSlot::Wreck(_))
    }

    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            PlayerSlot::Ship(ship) => ship,
            PlayerSlot::Wreck(wreck) => wreck,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.as_entity().position()
    }
}

/// Draw-ready view of one live entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub position: Vec2,
    pub radius: f32,
    /// Present for directional sprites (ships)
    pub heading: Option<Vec2>,
}

impl EntityView {
    pub fn of<E: Entity + ?Sized>(entity: &E) -> Self {
        Self {
            kind: entity.kind(),
            position: entity.position(),
            radius: entity.radius(),
            heading: entity.heading(),
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub entities: Vec<EntityView>,
    pub outcome: Outcome,
    pub message: Option<String>,
}

/// Complete game session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Options fixed at construction
    pub settings: Settings,
    pub arena: Arena,
    /// Current phase
    pub phase: GamePhase,
    pub player: PlayerSlot,
    /// Live enemies, in spawn order
    pub enemies: Vec<Ship>,
    pub player_projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    /// Enemy wrecks, oldest first
    pub wrecks: Vec<Wreck>,
    /// Population control and its random stream
    pub spawner: SpawnDirector<Pcg32>,
    /// Simulation tick counter since (re)start
    pub(crate) time_ticks: u64,
    /// Ticks since the last wreck expired
    pub(crate) wreck_clock: u32,
}

impl GameState {
    /// Start a session with spawn sampling seeded from `seed`
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        Self::with_spawner(settings, SpawnDirector::seeded(seed))
    }

    /// Start a session with an injected spawn director
    pub fn with_spawner(
        settings: Settings,
        spawner: SpawnDirector<Pcg32>,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let arena = Arena::new(settings.arena_width, settings.arena_height);
        let player = PlayerSlot::Ship(Ship::player(settings.player_start, &settings));

        let mut state = Self {
            settings,
            arena,
            phase: GamePhase::Initializing,
            player,
            enemies: Vec::new(),
            player_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            wrecks: Vec::new(),
            spawner,
            time_ticks: 0,
            wreck_clock: 0,
        };
        state.reset();
        log::info!(
            "New session: arena {}x{}, {} enemies",
            state.arena.width,
            state.arena.height,
            state.enemies.len()
        );
        Ok(state)
    }

    /// Throw away the session and rebuild it with the same settings.
    ///
    /// The spawn random stream carries on, so the new layout differs.
    pub fn restart(&mut self) {
        self.reset();
        log::info!("Session restarted with {} enemies", self.enemies.len());
    }

    fn reset(&mut self) {
        self.phase = GamePhase::Initializing;
        self.player = PlayerSlot::Ship(Ship::player(self.settings.player_start, &self.settings));
        self.player_projectiles.clear();
        self.enemy_projectiles.clear();
        self.wrecks.clear();
        self.spawner.reset_counter();
        self.time_ticks = 0;
        self.wreck_clock = 0;
        self.enemies = self
            .spawner
            .populate(&self.settings, &self.arena, self.settings.player_start);
        self.phase = GamePhase::Running;
    }

    pub fn outcome(&self) -> Outcome {
        match self.phase {
            GamePhase::Won => Outcome::Won,
            GamePhase::Lost => Outcome::Lost,
            GamePhase::Initializing | GamePhase::Running => Outcome::Pending,
        }
    }

    /// Player alive and no outcome yet
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running && !self.player.is_wreck()
    }

    pub fn ticks(&self) -> u64 {
        self.time_ticks
    }

    /// End-of-game text, once an outcome is set
    pub fn message(&self) -> Option<String> {
        match self.outcome() {
            Outcome::Pending => None,
            outcome => Some(format!(
                "You {}! \n To exit, press escape \n To start a new game, press enter",
                outcome.as_str()
            )),
        }
    }

    /// Record the session result
    pub(crate) fn finish(&mut self, outcome: Outcome) {
        self.phase = match outcome {
            Outcome::Won => GamePhase::Won,
            Outcome::Lost => GamePhase::Lost,
            Outcome::Pending => return,
        };
        log::info!("Game over after {} ticks: player {}", self.time_ticks, outcome.as_str());
    }

    /// Replace the player ship with a wreck at its last position
    pub(crate) fn wreck_player(&mut self) {
        let pos = self.player.position();
        self.player = PlayerSlot::Wreck(Wreck::at(pos, self.settings.wreck_radius));
    }

    /// All live entities: enemies, player projectiles, enemy projectiles,
    /// wrecks, then the player slot
    pub fn entities(&self) -> impl Iterator<Item = EntityView> + '_ {
        self.enemies
            .iter()
            .map(EntityView::of)
            .chain(self.player_projectiles.iter().map(EntityView::of))
            .chain(self.enemy_projectiles.iter().map(EntityView::of))
            .chain(self.wrecks.iter().map(EntityView::of))
            .chain(std::iter::once(EntityView::of(self.player.as_entity())))
    }

    /// Snapshot for the renderer
    pub fn frame(&self) -> Frame {
        Frame {
            tick: self.time_ticks,
            entities: self.entities().collect(),
            outcome: self.outcome(),
            message: self.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(Settings::default(), 12345).unwrap();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.outcome(), Outcome::Pending);
        assert!(state.is_running());
        assert!(state.message().is_none());
        assert_eq!(state.enemies.len(), 3);
        assert_eq!(state.spawner.counter(), 0);
        assert_eq!(state.ticks(), 0);
        assert_eq!(state.player.position(), Vec2::new(400.0, 400.0));
        assert_eq!(state.player.ship().map(|s| s.health()), Some(3));
        for enemy in &state.enemies {
            assert!(enemy.body.pos.distance(state.player.position()) > 400.0);
        }
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let result = GameState::new(Settings::with_arena(0.0, 600.0), 1);
        assert!(matches!(result, Err(ConfigError::InvalidArena { .. })));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(Settings::default(), 5).unwrap();
        state.wreck_player();
        state.finish(Outcome::Lost);
        state.wrecks.push(Wreck::at(Vec2::new(10.0, 10.0), 50.0));
        state.enemies.clear();
        state.time_ticks = 99;

        state.restart();
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.player.ship().is_some());
        assert!(state.wrecks.is_empty());
        assert!(state.player_projectiles.is_empty());
        assert!(state.enemy_projectiles.is_empty());
        assert_eq!(state.enemies.len(), 3);
        assert_eq!(state.ticks(), 0);
    }

    #[test]
    fn test_messages() {
        let mut state = GameState::new(Settings::default(), 5).unwrap();
        state.finish(Outcome::Won);
        assert_eq!(
            state.message().as_deref(),
            Some("You won! \n To exit, press escape \n To start a new game, press enter")
        );
        state.finish(Outcome::Lost);
        assert!(state.message().unwrap().starts_with("You lost!"));
        assert!(!state.is_running());
    }

    #[test]
    fn test_entity_listing_order() {
        let mut state = GameState::new(Settings::default(), 5).unwrap();
        state
            .player_projectiles
            .push(Projectile::new(Vec2::new(1.0, 1.0), Vec2::ZERO, 4.0));
        state.wrecks.push(Wreck::at(Vec2::new(2.0, 2.0), 50.0));

        let kinds: Vec<_> = state.entities().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Enemy,
                EntityKind::Enemy,
                EntityKind::Enemy,
                EntityKind::Projectile,
                EntityKind::Wreck,
                EntityKind::Player,
            ]
        );
        let player = state.entities().last().unwrap();
        assert_eq!(player.heading, Some(crate::UP));
        assert_eq!(player.radius, 25.0);
    }

    #[test]
    fn test_frame_serializes() {
        let state = GameState::new(Settings::default(), 5).unwrap();
        let frame = state.frame();
        assert_eq!(frame.entities.len(), 4);
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"outcome\":\"Pending\""));
        assert!(json.contains("\"kind\":\"Player\""));
    }
}
