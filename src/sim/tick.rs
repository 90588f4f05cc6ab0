//! Per-frame simulation step
//!
//! Advances the game state by one tick. Given the same state and input the
//! result is always the same; the only randomness is spawn placement, drawn
//! from the state's seeded stream.

use serde::{Deserialize, Serialize};

use super::collision::{
    enemy_rams_player, prune_out_of_bounds, resolve_enemy_fire, resolve_player_fire,
};
use super::entity::{Entity, Rotation, Thrust, Wreck};
use super::state::{GameState, Outcome};

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Turn the player ship one step
    pub rotate: Option<Rotation>,
    /// Thrust forward or back along the heading
    pub thrust: Thrust,
    /// Fire the player weapon. One shot per tick it is set, so the driver
    /// should only raise it on the key-press edge.
    pub fire: bool,
    /// Rebuild the session
    pub restart: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.restart();
        return;
    }

    state.time_ticks += 1;
    expire_wrecks(state);

    if !state.is_running() {
        // Game decided: leftover projectiles fly off and get cleaned up
        drift_projectiles(state);
        return;
    }

    apply_player_input(state, input);

    // 1. Movement
    move_entities(state);

    // 2. Ramming ends the game on the spot
    if let Some(player) = state.player.ship() {
        if let Some(index) = enemy_rams_player(&state.enemies, player) {
            log::debug!("Enemy {} rammed the player", index);
            state.wreck_player();
            state.finish(Outcome::Lost);
            return;
        }
    }

    // 3. Projectiles that left the arena
    prune_out_of_bounds(&mut state.player_projectiles, &state.arena);
    prune_out_of_bounds(&mut state.enemy_projectiles, &state.arena);

    // 4. Player fire
    let kills = resolve_player_fire(&mut state.player_projectiles, &mut state.enemies);
    for pos in kills {
        log::debug!("Enemy destroyed at ({:.1}, {:.1})", pos.x, pos.y);
        state.wrecks.push(Wreck::at(pos, state.settings.wreck_radius));
    }

    // 5. Enemy fire
    if let Some(player) = state.player.ship_mut() {
        let damage = resolve_enemy_fire(&mut state.enemy_projectiles, player);
        if damage.hits > 0 {
            log::debug!("Player hit {} time(s), health {}", damage.hits, player.health());
        }
        if damage.destroyed {
            state.wreck_player();
            state.finish(Outcome::Lost);
            return;
        }
    }

    // 6. Terminal check
    if state.enemies.is_empty() {
        state.finish(Outcome::Won);
        return;
    }

    // Population control
    let avoid = state.player.position();
    state
        .spawner
        .replenish(&mut state.enemies, &state.settings, &state.arena, avoid);
}

/// Rotate, thrust and fire the player ship
fn apply_player_input(state: &mut GameState, input: &TickInput) {
    let Some(player) = state.player.ship_mut() else {
        return;
    };
    if let Some(rotation) = input.rotate {
        player.rotate(rotation);
    }
    player.apply_thrust(input.thrust, state.settings.thrust_factor);
    if input.fire {
        state.player_projectiles.push(player.shoot());
    }
}

/// Enemies steer toward where the player was at the start of the tick.
/// Their shots join the collection after existing projectiles have moved.
fn move_entities(state: &mut GameState) {
    let target = state.player.position();

    let mut new_shots = Vec::new();
    for enemy in &mut state.enemies {
        if let Some(shot) = enemy.pilot_toward(target) {
            new_shots.push(shot);
        }
        enemy.advance(&state.arena);
    }

    for shot in state
        .player_projectiles
        .iter_mut()
        .chain(state.enemy_projectiles.iter_mut())
    {
        shot.advance(&state.arena);
    }
    state.enemy_projectiles.extend(new_shots);

    if let Some(player) = state.player.ship_mut() {
        player.advance(&state.arena);
    }
}

fn drift_projectiles(state: &mut GameState) {
    for shot in state
        .player_projectiles
        .iter_mut()
        .chain(state.enemy_projectiles.iter_mut())
    {
        shot.advance(&state.arena);
    }
    prune_out_of_bounds(&mut state.player_projectiles, &state.arena);
    prune_out_of_bounds(&mut state.enemy_projectiles, &state.arena);
}

/// Every `wreck_expiry_interval` ticks the oldest enemy wreck disappears
fn expire_wrecks(state: &mut GameState) {
    state.wreck_clock += 1;
    if state.wreck_clock >= state.settings.wreck_expiry_interval {
        state.wreck_clock = 0;
        if !state.wrecks.is_empty() {
            state.wrecks.remove(0);
        }
    }
}
