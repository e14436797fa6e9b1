//! Per-frame simulation step and countdown advance
//!
//! Both functions are driven by the host's frame callback through
//! `Game::tick`; there is no scheduling in here, only state stepping.

use rand::Rng;

use super::collision::is_colliding;
use super::state::{GameEvent, GameState, RunState};
use crate::tuning::SimulationConfig;

/// Result of one frame loop step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Nothing happened (not playing)
    Skipped,
    /// Frame simulated, run continues
    Continue,
    /// Avatar hit an obstacle or the bounds; the run must end
    Collided,
}

/// Advance a playing run by one frame.
///
/// Order: physics, spawn timer, scroll/evict, scoring, collision, frame-ready.
/// A no-op unless `state.run_state` is `Playing`.
pub fn step_frame<R: Rng>(
    state: &mut GameState,
    config: &SimulationConfig,
    rng: &mut R,
    dt_ms: f32,
    events: &mut Vec<GameEvent>,
) -> FrameOutcome {
    if state.run_state != RunState::Playing {
        return FrameOutcome::Skipped;
    }

    state.time_ticks += 1;

    state.avatar.integrate(
        dt_ms,
        config.gravity,
        config.gravity_mode,
        config.frame_normalization,
    );

    state.obstacles.update_spawn_timer(dt_ms, rng, config);

    state.obstacles.advance(
        dt_ms,
        config.obstacle_speed,
        config.frame_normalization,
        config.despawn_margin,
    );

    for obstacle_id in state.obstacles.score_crossings(state.avatar.pos.x) {
        events.push(GameEvent::ObstaclePassed { obstacle_id });
        if state.award_point(config.max_score) {
            events.push(GameEvent::ScoreIncreased { score: state.score });
        }
    }

    if is_colliding(
        state.avatar.pos,
        state.avatar.radius,
        state.obstacles.as_slice(),
        config.viewport_height,
    ) {
        return FrameOutcome::Collided;
    }

    events.push(GameEvent::FrameReady(state.snapshot()));
    FrameOutcome::Continue
}

/// Advance the pre-run countdown. One decrement per `countdown_step_ms`;
/// each new value is announced. Returns true once it reaches zero.
pub fn advance_countdown(
    state: &mut GameState,
    config: &SimulationConfig,
    dt_ms: f32,
    events: &mut Vec<GameEvent>,
) -> bool {
    if state.run_state != RunState::Counting {
        return false;
    }
    let Some(countdown) = state.countdown.as_mut() else {
        return true;
    };
    if countdown.remaining == 0 {
        return true;
    }

    countdown.elapsed_ms += dt_ms;
    while countdown.elapsed_ms >= config.countdown_step_ms {
        countdown.elapsed_ms -= config.countdown_step_ms;
        countdown.remaining -= 1;
        events.push(GameEvent::CountdownTick {
            remaining: countdown.remaining,
        });
        if countdown.remaining == 0 {
            return true;
        }
    }
    false
}
