//! Data-driven game balance
//!
//! A `SimulationConfig` is fixed for the duration of a run. Hosts may load
//! overrides from JSON; any field left out keeps its default.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How gravity and vertical motion relate to frame time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GravityMode {
    /// Gravity is added once per tick and position moves by velocity once per
    /// tick, whatever the frame time. Matches the classic feel at 60 Hz.
    #[default]
    PerTick,
    /// Gravity and position updates are scaled by elapsed time
    /// (`dt * frame_normalization` frames).
    Scaled,
}

/// Immutable per-run simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub gravity: f32,
    pub impulse_velocity: f32,
    pub gap_height: f32,
    pub obstacle_width: f32,
    pub obstacle_speed: f32,
    pub spawn_interval_ms: f32,
    pub avatar_radius: f32,
    pub avatar_x: f32,
    pub max_score: u32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub spawn_margin: f32,
    pub spawn_offset: f32,
    pub despawn_margin: f32,
    pub frame_normalization: f32,
    pub countdown_from: u8,
    pub countdown_step_ms: f32,
    pub gravity_mode: GravityMode,
    /// Fixed RNG seed for reproducible runs (random per session when `None`)
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            impulse_velocity: IMPULSE_VELOCITY,
            gap_height: GAP_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            avatar_radius: AVATAR_RADIUS,
            avatar_x: AVATAR_X,
            max_score: MAX_SCORE,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            spawn_margin: SPAWN_MARGIN,
            spawn_offset: SPAWN_OFFSET,
            despawn_margin: DESPAWN_MARGIN,
            frame_normalization: FRAME_NORMALIZATION,
            countdown_from: COUNTDOWN_FROM,
            countdown_step_ms: COUNTDOWN_STEP_MS,
            gravity_mode: GravityMode::PerTick,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Config with a fixed seed (deterministic obstacle placement)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Viewport size, for hosts and spawn placement
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Replace nonsensical values so the simulation has no reachable fault states
    pub fn sanitized(self) -> Self {
        let d = Self::default();

        fn positive(v: f32, fallback: f32) -> f32 {
            if v.is_finite() && v > 0.0 { v } else { fallback }
        }
        fn non_negative(v: f32, fallback: f32) -> f32 {
            if v.is_finite() && v >= 0.0 { v } else { fallback }
        }

        let viewport_width = positive(self.viewport_width, d.viewport_width);
        let viewport_height = positive(self.viewport_height, d.viewport_height);

        // Flap must push upward
        let impulse_velocity = if self.impulse_velocity.is_finite() && self.impulse_velocity < 0.0 {
            self.impulse_velocity
        } else {
            d.impulse_velocity
        };

        // Gap can't be taller than the screen
        let gap_height = positive(self.gap_height, d.gap_height).min(viewport_height);
        let spawn_margin =
            non_negative(self.spawn_margin, d.spawn_margin).min(viewport_height / 2.0);

        let sanitized = Self {
            gravity: non_negative(self.gravity, d.gravity),
            impulse_velocity,
            gap_height,
            obstacle_width: positive(self.obstacle_width, d.obstacle_width),
            obstacle_speed: positive(self.obstacle_speed, d.obstacle_speed),
            spawn_interval_ms: positive(self.spawn_interval_ms, d.spawn_interval_ms),
            avatar_radius: positive(self.avatar_radius, d.avatar_radius)
                .min(viewport_height / 2.0),
            avatar_x: non_negative(self.avatar_x, d.avatar_x).min(viewport_width),
            max_score: self.max_score,
            viewport_width,
            viewport_height,
            spawn_margin,
            spawn_offset: non_negative(self.spawn_offset, d.spawn_offset),
            despawn_margin: non_negative(self.despawn_margin, d.despawn_margin),
            frame_normalization: positive(self.frame_normalization, d.frame_normalization),
            countdown_from: self.countdown_from,
            countdown_step_ms: positive(self.countdown_step_ms, d.countdown_step_ms),
            gravity_mode: self.gravity_mode,
            seed: self.seed,
        };

        if sanitized != self {
            log::warn!("Simulation config contained out-of-range values; clamped");
        }
        sanitized
    }
}
