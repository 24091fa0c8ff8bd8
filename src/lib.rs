//! Catchy - a falling-object catch game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, game state)
//! - `render`: Canvas2D render pass (wasm only)
//! - `audio`: Procedural Web Audio sound effects (wasm only)
//! - `settings`: User preferences persisted to LocalStorage
//! - `highscores`: Local top-10 leaderboard

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Play area dimensions (logical pixels)
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 600.0;

    /// Paddle defaults - fixed height near the bottom of the play area
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_Y: f32 = PLAY_HEIGHT - 140.0;
    /// Keyboard paddle speed (px/s)
    pub const KEYBOARD_SPEED: f32 = 450.0;

    /// Objects cross this line to count as a miss
    pub const GROUND_LEVEL: f32 = PLAY_HEIGHT - 10.0;
    /// Vertical position where new objects appear
    pub const SPAWN_Y: f32 = 10.0;

    /// Base fall speed (px/s) before category multipliers
    pub const FALL_SPEED: f32 = 100.0;
    /// Floor for the difficulty-adjusted spawn interval (seconds).
    /// Level intensity grows without bound, so the raw `1 - intensity`
    /// interval would eventually go negative.
    pub const MIN_SPAWN_INTERVAL: f32 = 0.12;

    /// Starting lives
    pub const START_LIVES: i32 = 5;
    /// Every this many points grants an extra life
    pub const BONUS_LIFE_EVERY: u32 = 10;

    /// Paddle flash reverts to the base tint after this long (seconds)
    pub const FLASH_DURATION: f32 = 0.1;
    /// Tween progress per second at rate 1 (0.1 per frame at 60 Hz)
    pub const TWEEN_UNIT_RATE: f32 = 6.0;
    /// Camera shake duration on a penalty hit (seconds)
    pub const SHAKE_DURATION: f32 = 0.2;

    /// Palette
    pub const RED: &str = "#F35F61";
    pub const YELLOW: &str = "#F2E641";
    pub const BLUE: &str = "#00AAF3";
    pub const GREEN: &str = "#41F28D";
    pub const WHITE: &str = "#FFFFFF";
    pub const BACKGROUND: &str = "#0c0a16";
}

/// Linear interpolation between `a` and `b` by `t`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
