//! Jelly Lasso - A lasso-throwing arcade game
//!
//! Core modules:
//! - `sim`: Session controller (lasso, spawner, cutscenes, scoring)
//! - `audio`: Injected sound-effect service
//! - `persistence`: Score storage and the background flusher
//! - `highscores`: Leaderboard view over the score store
//! - `settings`: JSON-backed preferences

pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, AudioService, SoundEffect};
pub use error::{SettingsError, StoreError};
pub use highscores::Leaderboard;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::IVec2;

    /// Nominal tick rate
    pub const TICK_HZ: u32 = 60;

    /// Furthest top-left corner the player can reach
    pub const PLAYER_MAX_X: i32 = 720;
    pub const PLAYER_MAX_Y: i32 = 520;
    pub const PLAYER_SIZE: IVec2 = IVec2::new(150, 150);
    pub const PLAYER_SPEED: i32 = 5;
    pub const PLAYER_ORIGIN: IVec2 = IVec2::new(400, 250);

    /// Hand anchor as a fraction of the player box (x: 75%, y: 60%)
    pub const HAND_FRACTION_X: f32 = 0.75;
    pub const HAND_FRACTION_Y: f32 = 0.6;

    pub const MAX_LIVES: u8 = 4;

    /// Target defaults
    pub const TARGET_SIZE: IVec2 = IVec2::new(50, 50);
    pub const TARGET_SPEED: i32 = 2;
    /// Targets are pruned once x leaves (TARGET_MIN_X, TARGET_MAX_X)
    pub const TARGET_MIN_X: i32 = -50;
    pub const TARGET_MAX_X: i32 = 850;
    pub const SPAWN_INTERVAL_MS: u64 = 1200;

    /// Lasso sampling and timing
    pub const LASSO_STEP: i32 = 2;
    pub const LASSO_REACH_TOLERANCE: f32 = 20.0;
    pub const LASSO_TIMEOUT_MS: u64 = 1000;
    pub const BOUNCE_BACK_MS: u64 = 300;
    /// Throw clicks are clamped into this box
    pub const THROW_MIN: IVec2 = IVec2::new(-50, 0);
    pub const THROW_MAX: IVec2 = IVec2::new(850, 600);

    /// Catch animations
    pub const BASKET_ANCHOR: IVec2 = IVec2::new(730, 60);
    pub const CUTSCENE_MS: u64 = 1000;
    pub const CAUGHT_MARKER_MS: u64 = 600;
}

/// Fraction of `duration_ms` covered by `elapsed_ms`, clamped to [0, 1]
#[inline]
pub fn progress(elapsed_ms: u64, duration_ms: u64) -> f32 {
    if duration_ms == 0 {
        return 1.0;
    }
    (elapsed_ms as f32 / duration_ms as f32).min(1.0)
}

/// Quadratic ease-out: fast start, gentle landing
#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}
