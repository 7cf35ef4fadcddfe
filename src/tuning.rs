//! Data-driven balance for the player controller and entity presets
//!
//! Defaults are the shipped values; a settings file may override any field.

use serde::{Deserialize, Serialize};

/// Player controller constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    // === Movement ===
    /// Horizontal run speed (units/s)
    pub movement_speed: f32,
    /// Move speed multiplier while floating on water
    pub submerged_speed_modifier: f32,

    // === Jump ===
    /// Total upward impulse of a fully held jump
    pub jump_impulse: f32,
    /// Window over which the jump impulse is spread (seconds)
    pub jump_time: f32,
    /// Jump budget restored on landing
    pub max_jumps: u32,
    /// Coyote time after leaving the ground (seconds)
    pub grace_period: f32,

    // === Dash ===
    pub dash_speed: f32,
    pub dash_time: f32,
    pub dash_cooldown: f32,
    /// Horizontal impulse given to the torch by a bump
    pub dash_h_impulse: f32,
    /// Upward impulse given to the torch by a bump
    pub dash_impulse: f32,
    pub bump_slow_mo: f32,

    // === Kick ===
    /// Upward impulse given to the torch by a kick
    pub kick_impulse: f32,
    /// Horizontal impulse per unit of torch-player offset
    pub kick_h_multiplier: f32,
    /// Max center distance for kicks and bumps to connect
    pub kick_distance: f32,
    pub kick_time: f32,
    pub kick_slow_mo: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            movement_speed: 9.4,
            submerged_speed_modifier: 0.5,

            jump_impulse: 20.0,
            jump_time: 0.1,
            max_jumps: 2,
            grace_period: 0.1,

            dash_speed: 50.0,
            dash_time: 0.1,
            dash_cooldown: 0.25,
            dash_h_impulse: 7.5,
            dash_impulse: 18.8,
            bump_slow_mo: 0.15,

            kick_impulse: 18.8,
            kick_h_multiplier: 12.0,
            kick_distance: 1.5,
            kick_time: 0.3,
            kick_slow_mo: 0.2,
        }
    }
}

impl PlayerTuning {
    /// Share of the jump impulse to apply this tick.
    ///
    /// `elapsed` is how long the jump has been held so far; the remaining
    /// window is capped by the frame delta so the impulse ramps smoothly.
    pub fn jump_impulse_step(&self, elapsed: f32, dt: f32) -> f32 {
        if self.jump_time <= 0.0 {
            return 0.0;
        }
        let remaining = (self.jump_time - elapsed).max(0.0);
        self.jump_impulse * remaining.min(dt) / self.jump_time
    }
}

/// Physical tuning carried by each entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityTuning {
    /// Speed above which steering is disabled and danger friction applies
    pub danger_speed: f32,
    pub danger_friction: f32,
    pub ground_friction: f32,
    pub air_friction: f32,
    /// Rotate freely with horizontal velocity
    pub can_rotate: bool,
    /// Pushed around by wind channels
    pub is_blowable: bool,
}

impl EntityTuning {
    pub fn player() -> Self {
        Self {
            danger_speed: 20.0,
            danger_friction: 8.0,
            ground_friction: 0.0,
            air_friction: 3.0,
            can_rotate: false,
            is_blowable: false,
        }
    }

    pub fn torch() -> Self {
        Self {
            danger_speed: 12.0,
            danger_friction: 3.0,
            ground_friction: 12.0,
            air_friction: 0.4,
            can_rotate: true,
            is_blowable: true,
        }
    }
}
