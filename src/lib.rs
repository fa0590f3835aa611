//! Needed Climb - an endless vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tower generation, platform behavior, player physics)
//! - `screen`: Screen flow state machine driven by the UI layer
//! - `highscores`: Top-5 height leaderboard
//! - `settings`: Player preferences (climb mode, width profile, music)
//!
//! World coordinates are integer pixels with y growing downward, so climbing
//! the tower means y decreasing.

pub mod highscores;
pub mod screen;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Visible window dimensions (pixels)
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Vertical pixels per meter of climbed height
    pub const PIXELS_PER_METER: f64 = 40.0;

    /// Regular platform thickness
    pub const PLATFORM_HEIGHT: i32 = 20;
    /// Ground platform thickness
    pub const GROUND_HEIGHT: i32 = 40;

    /// Extra distance past one screen below the window before platforms are culled
    pub const CULL_BUFFER: i32 = 200;
    /// Generation keeps the frontier at least this far above the camera top
    pub const FRONTIER_MARGIN: i32 = 100;

    /// Player body size
    pub const PLAYER_WIDTH: i32 = 37;
    pub const PLAYER_HEIGHT: i32 = 40;

    /// Falling this far below the best height reached ends the run
    pub const DEATH_FALL_DISTANCE: i32 = 1000;
}

/// Height in meters climbed from `start_y` to `y`
///
/// Negative when the player is below the starting point.
#[inline]
pub fn score_meters(start_y: i32, y: i32) -> f64 {
    f64::from(start_y - y) / consts::PIXELS_PER_METER
}

/// Convert a pixel distance to meters-equivalent
#[inline]
pub fn pixels_to_meters(pixels: i32) -> f64 {
    f64::from(pixels) / consts::PIXELS_PER_METER
}
