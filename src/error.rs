//! Construction-time configuration errors

/// Rejected [`Settings`](crate::Settings) values.
///
/// The simulation never clamps these: each one changes wrap or collision
/// behavior, so a bad value is refused before a session starts.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("arena dimensions must be positive and finite, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must be non-negative and finite, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("{name} must be at least 1")]
    ZeroCount { name: &'static str },
    #[error("initial enemy count {initial} exceeds the maximum of {max}")]
    TooManyInitialEnemies { initial: usize, max: usize },
    #[error("retreat distance {retreat} must be below approach distance {approach}")]
    InvertedBands { retreat: f32, approach: f32 },
    #[error("player start ({x}, {y}) lies outside the arena")]
    PlayerOutsideArena { x: f32, y: f32 },
    #[error("no arena point lies farther than {distance} from the player start")]
    SpawnExclusionTooLarge { distance: f32 },
    #[error("Unable to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
