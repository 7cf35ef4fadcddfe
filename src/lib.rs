//! Ember Climb - gameplay core of a vertical torch-carrying platformer
//!
//! Core modules:
//! - `sim`: Per-tick simulation (player controller, level loop, tile generation)
//! - `input`: Action oracle consumed by the controller
//! - `tuning`: Data-driven controller and entity balance
//! - `settings`: Level list and tuning loaded from JSON
//! - `game`: Session layer (level progression, restart, fixed timestep)

pub mod game;
pub mod input;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use input::{Action, InputOracle, InputState};
pub use settings::{GameSettings, SettingsError};
pub use tuning::{EntityTuning, PlayerTuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the session will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Simulated time scale while the slow-motion timer is running
    pub const SLOW_MO_SCALE: f32 = 0.3;

    /// Side length of one tile in world units
    pub const TILE_SIZE: f32 = 1.0;
    /// Downward acceleration (units/s²), y grows downward
    pub const GRAVITY: f32 = 50.0;
    /// Terminal fall speed
    pub const MAX_FALL_SPEED: f32 = 40.0;

    /// Map widths per archetype (tiles)
    pub const PROCEDURAL_WIDTH: usize = 32;
    pub const OPENING_WIDTH: usize = 20;
    pub const VICTORY_WIDTH: usize = 16;

    /// Forced full-width start row, counted up from the bottom of the map
    pub const START_ROW_FROM_BOTTOM: usize = 20;

    /// Water starts this far up from the bottom of the map
    pub const DEFAULT_WATER_LEVEL: f32 = 14.0;
    /// Default finish line (world Y)
    pub const DEFAULT_FINISH_HEIGHT: f32 = 16.5;
    /// Seconds submerged before an entity is put out
    pub const WATER_PUT_OUT_TIME: f32 = 1.0;

    /// Wind channel layout
    pub const WIND_SPACING: f32 = 20.0;
    pub const WIND_OFFSET: f32 = 3.0;
    pub const WIND_JITTER: f32 = 4.0;
    pub const WIND_HALF_HEIGHT: f32 = 4.0;
    pub const WIND_FORCE: f32 = 10.0;
}

/// Sign of `x` as -1.0 / 1.0, treating zero as negative
#[inline]
pub fn facing_sign(x: f32) -> f32 {
    if x > 0.0 { 1.0 } else { -1.0 }
}

/// Move `value` toward zero by `amount`, never crossing it
#[inline]
pub fn decay(value: f32, amount: f32) -> f32 {
    (value - amount).max(0.0)
}

/// Horizontal direction from a pair of held left/right actions
#[inline]
pub fn horizontal_axis(left: bool, right: bool) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if right {
        dir.x += 1.0;
    }
    if left {
        dir.x -= 1.0;
    }
    dir
}
