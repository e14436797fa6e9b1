//! Pillar Flap - a single-screen flap-through-the-pillars arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, run state machine)
//! - `tuning`: Data-driven game balance
//! - `settings`: Cosmetic preferences (never affect the simulation)
//! - `persistence`: Key/value storage backends for settings
//! - `audio`: Beep descriptors for simulation events

pub mod audio;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::Settings;
pub use sim::{Game, GameEvent, RunState, Snapshot};
pub use tuning::{GravityMode, SimulationConfig};

/// Game configuration constants
pub mod consts {
    /// Viewport dimensions (16:9)
    pub const VIEWPORT_WIDTH: f32 = 1280.0;
    pub const VIEWPORT_HEIGHT: f32 = 720.0;

    /// Avatar defaults
    pub const AVATAR_X: f32 = 320.0;
    pub const AVATAR_RADIUS: f32 = 18.0;
    /// Downward acceleration added to velocity every tick
    pub const GRAVITY: f32 = 0.45;
    /// Upward velocity set by a flap (negative = up)
    pub const IMPULSE_VELOCITY: f32 = -8.5;

    /// Obstacle defaults
    pub const GAP_HEIGHT: f32 = 160.0;
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    pub const OBSTACLE_SPEED: f32 = 3.2;
    pub const SPAWN_INTERVAL_MS: f32 = 1600.0;
    /// Gap centre keeps this distance from the top and bottom edges
    pub const SPAWN_MARGIN: f32 = 160.0;
    /// Obstacles appear this far past the right edge
    pub const SPAWN_OFFSET: f32 = 40.0;
    /// Obstacles are dropped once their right edge is this far past the left edge
    pub const DESPAWN_MARGIN: f32 = 20.0;

    /// Converts milliseconds into 60 Hz frame units (60 / 1000)
    pub const FRAME_NORMALIZATION: f32 = 0.06;

    pub const MAX_SCORE: u32 = 999;

    /// Countdown before a run
    pub const COUNTDOWN_FROM: u8 = 3;
    pub const COUNTDOWN_STEP_MS: f32 = 1000.0;
}
