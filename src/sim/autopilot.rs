//! Demo-mode controller
//!
//! Decides when to flap by chasing the centre of the next gap. Used by the
//! native demo binary and for attract-mode hosts; it only reads state.

use super::state::{GameState, RunState};
use crate::tuning::SimulationConfig;

/// Aim slightly below the gap centre; a flap from here peaks inside the gap
const TARGET_BIAS: f32 = 25.0;

/// Y the autopilot steers toward: next gap still ahead of the avatar's back
/// edge, or mid-screen when no obstacle is ahead.
pub fn target_y(state: &GameState, config: &SimulationConfig) -> f32 {
    let avatar = &state.avatar;
    state
        .obstacles
        .as_slice()
        .iter()
        .find(|o| o.right() + avatar.radius > avatar.pos.x)
        .map(|o| o.gap_center() + TARGET_BIAS)
        .unwrap_or(config.viewport_height / 2.0)
}

/// True when the avatar is falling below its target
pub fn should_flap(state: &GameState, config: &SimulationConfig) -> bool {
    if state.run_state != RunState::Playing {
        return false;
    }
    let avatar = &state.avatar;
    avatar.vel_y >= 0.0 && avatar.pos.y > target_y(state, config)
}
