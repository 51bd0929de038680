//! Minion Mania - a two-level lane runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world generation, physics, collisions, level state)
//! - `game`: Fixed-rate frame driver wiring the simulation to its collaborators
//! - `renderer`: Scene snapshot for an external renderer
//! - `audio`: Sound cue playback capability
//! - `settings`: Player preferences and run options

pub mod audio;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, RunSummary};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (~60 Hz)
    pub const SIM_DT: f32 = 0.016;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Countdown start value, in seconds
    pub const TIMER_START: f32 = 30.0;
    /// Amount the countdown drops every tick, independent of frame delta
    pub const TIMER_STEP: f32 = 0.016;

    /// Score needed at the portal to enter level 2
    pub const LEVEL1_THRESHOLD: u32 = 10;
    /// Cumulative score needed at the finish line to win
    pub const LEVEL2_THRESHOLD: u32 = 18;

    /// Glitch lasts this many timer units
    pub const GLITCH_DURATION: f32 = 1.0;

    /// Sandbag rebound launch speed (units/s, toward +Z)
    pub const REBOUND_VELOCITY: f32 = 12.0;
    /// Sandbag rebound deceleration (units/s²)
    pub const REBOUND_DECEL: f32 = 24.0;
    /// Seconds taken off the countdown when a rebound settles
    pub const REBOUND_PENALTY: f32 = 2.0;

    /// Player depth at the start of each level
    pub const PLAYER_START_Z: f32 = 60.0;
    /// Simulation camera sits this far behind the player
    pub const CAMERA_OFFSET_Z: f32 = 4.0;
    /// Distance along Z at which a goal marker counts as reached
    pub const GOAL_REACH: f32 = 1.0;

    /// Camera dolly limits (view-only)
    pub const MIN_ZOOM: f32 = -6.0;
    pub const MAX_ZOOM: f32 = 6.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
