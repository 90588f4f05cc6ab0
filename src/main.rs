//! Void Skirmish headless driver
//!
//! Stands in for the render/input loop: feeds autopilot intents into the
//! simulation one tick at a time and logs how the session ends.
//!
//! Usage: `void-skirmish [settings.json] [seed] [max_ticks]`

use std::error::Error;

use void_skirmish::Settings;
use void_skirmish::sim::{GameState, Outcome, Rotation, Thrust, TickInput, tick};
use void_skirmish::signed_angle_degrees;

/// Stop after this many ticks if nobody has won (about 5 minutes at 60 Hz)
const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 5;

/// Game instance holding the session and the driver-side input latch
struct Game {
    state: GameState,
    /// Fire held last tick; shots only go out on the press edge
    fire_held: bool,
}

impl Game {
    fn new(settings: Settings, seed: u64) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            state: GameState::new(settings, seed)?,
            fire_held: false,
        })
    }

    /// Steer at the nearest enemy, keep some distance, and tap fire when aimed
    fn autopilot(&mut self) -> TickInput {
        let Some(player) = self.state.player.ship() else {
            return TickInput::default();
        };
        let pos = player.body.pos;
        let Some(target) = self
            .state
            .enemies
            .iter()
            .map(|e| e.body.pos)
            .min_by(|a, b| a.distance(pos).total_cmp(&b.distance(pos)))
        else {
            return TickInput::default();
        };

        let to_target = target - pos;
        let error = signed_angle_degrees(player.heading(), to_target);
        let rotate = if error.abs() <= self.state.settings.maneuverability_deg {
            None
        } else if error > 0.0 {
            Some(Rotation::Clockwise)
        } else {
            Some(Rotation::CounterClockwise)
        };

        let speed = player.body.vel.length();
        let thrust = if to_target.length() > 250.0 && speed < 3.0 {
            Thrust::Forward
        } else if speed > 0.5 && player.body.vel.dot(player.heading()) > 0.0 {
            Thrust::Reverse
        } else {
            Thrust::Idle
        };

        let want_fire = rotate.is_none();
        let fire = want_fire && !self.fire_held;
        self.fire_held = want_fire && !fire;

        TickInput {
            rotate,
            thrust,
            fire,
            restart: false,
        }
    }

    /// Run until an outcome is set or `max_ticks` elapse
    fn run(&mut self, max_ticks: u64) -> Outcome {
        while self.state.ticks() < max_ticks {
            let input = self.autopilot();
            tick(&mut self.state, &input);

            if self.state.ticks() % 600 == 0 {
                log::debug!(
                    "tick {}: {} enemies, {} wrecks",
                    self.state.ticks(),
                    self.state.enemies.len(),
                    self.state.wrecks.len()
                );
            }

            if self.state.outcome() != Outcome::Pending {
                break;
            }
        }
        self.state.outcome()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
        None => Settings::default(),
    };
    let seed = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(0x5EED);
    let max_ticks = args
        .next()
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or(DEFAULT_MAX_TICKS);

    let mut game = Game::new(settings, seed)?;
    log::info!("Void Skirmish starting (seed {seed})");

    let outcome = game.run(max_ticks);
    match game.state.message() {
        Some(message) => log::info!("{}", message.replace(" \n ", " / ")),
        None => log::info!("No result after {} ticks", game.state.ticks()),
    }

    let frame = game.state.frame();
    let survivors = frame.entities.len();
    println!("{}", serde_json::to_string_pretty(&frame)?);
    log::info!("Final outcome: {} ({} entities on screen)", outcome.as_str(), survivors);

    Ok(())
}
