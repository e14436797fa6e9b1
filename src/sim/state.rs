//! Run state and core simulation types
//!
//! `GameState` is the explicitly owned context for one session. It holds the
//! single `RunState` plus everything a run mutates.

use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::obstacles::ObstacleField;
use crate::tuning::SimulationConfig;

/// Lifecycle of a session: menu, countdown, run, result screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Menu shown, no run data
    #[default]
    Idle,
    /// Countdown before the run starts
    Counting,
    /// Active gameplay
    Playing,
    /// Run ended, final score frozen
    Over,
}

/// A pillar pair with a passable gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Spawn order (monotonic within a session)
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Height of the top segment (the gap starts here)
    pub gap_top: f32,
    /// Y where the bottom segment starts
    pub gap_bottom: f32,
    /// Height of the bottom segment
    pub bottom_height: f32,
    /// Set once when the avatar clears the trailing edge
    pub passed: bool,
}

impl Obstacle {
    pub fn new(
        id: u32,
        x: f32,
        width: f32,
        gap_top: f32,
        gap_bottom: f32,
        viewport_height: f32,
    ) -> Self {
        Self {
            id,
            x,
            width,
            gap_top,
            gap_bottom,
            bottom_height: (viewport_height - gap_bottom).max(0.0),
            passed: false,
        }
    }

    /// Trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_center(&self) -> f32 {
        (self.gap_top + self.gap_bottom) * 0.5
    }
}

/// Countdown before a run, driven by the same tick as the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    pub remaining: u8,
    /// Time since the last decrement
    pub elapsed_ms: f32,
}

impl Countdown {
    pub fn new(from: u8) -> Self {
        Self {
            remaining: from,
            elapsed_ms: 0.0,
        }
    }
}

/// Read-only view of the simulation for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub run_state: RunState,
    pub score: u32,
    pub avatar: Avatar,
    pub obstacles: Vec<Obstacle>,
    pub countdown: Option<u8>,
}

/// Events raised for the host (display, audio)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Countdown shows a new value (3, 2, 1, 0)
    CountdownTick { remaining: u8 },
    /// Countdown finished, frame loop is live
    RunStarted,
    /// Avatar cleared an obstacle (one per crossing)
    ObstaclePassed { obstacle_id: u32 },
    /// Score changed
    ScoreIncreased { score: u32 },
    /// Terminal collision
    GameOver { final_score: u32 },
    /// Host should ask the player to confirm quitting
    QuitRequested,
    /// End of a simulated frame
    FrameReady(Snapshot),
}

/// Complete per-session simulation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub run_state: RunState,
    pub score: u32,
    pub avatar: Avatar,
    pub obstacles: ObstacleField,
    /// Present only while counting down
    pub countdown: Option<Countdown>,
    /// Frames simulated in the current run
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            run_state: RunState::Idle,
            score: 0,
            avatar: Avatar::new(
                config.avatar_x,
                config.viewport_height / 2.0,
                config.avatar_radius,
            ),
            obstacles: ObstacleField::new(),
            countdown: None,
            time_ticks: 0,
        }
    }

    /// Clear all run data: score, avatar, obstacles, pending timers.
    /// `run_state` is left to the caller.
    pub fn reset_run(&mut self, config: &SimulationConfig) {
        self.score = 0;
        self.avatar.pos.x = config.avatar_x;
        self.avatar.radius = config.avatar_radius;
        self.avatar.reset(config.viewport_height / 2.0);
        self.obstacles.clear();
        self.countdown = None;
        self.time_ticks = 0;
    }

    /// Add one point per cleared obstacle, capped at `max_score`.
    /// Returns true if the score changed.
    pub fn award_point(&mut self, max_score: u32) -> bool {
        if self.score < max_score {
            self.score += 1;
            true
        } else {
            false
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            run_state: self.run_state,
            score: self.score,
            avatar: self.avatar,
            obstacles: self.obstacles.as_slice().to_vec(),
            countdown: self.countdown.map(|c| c.remaining),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_and_centered() {
        let config = SimulationConfig::default();
        let state = GameState::new(&config);
        assert_eq!(state.run_state, RunState::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.avatar.pos.y, config.viewport_height / 2.0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_award_point_caps() {
        let config = SimulationConfig::default();
        let mut state = GameState::new(&config);
        state.score = 998;
        assert!(state.award_point(999));
        assert_eq!(state.score, 999);
        assert!(!state.award_point(999));
        assert_eq!(state.score, 999);
    }

    #[test]
    fn test_obstacle_geometry() {
        let o = Obstacle::new(1, 100.0, 80.0, 200.0, 360.0, 720.0);
        assert_eq!(o.right(), 180.0);
        assert_eq!(o.bottom_height, 360.0);
        assert_eq!(o.gap_center(), 280.0);
        assert!(!o.passed);
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_string(&GameEvent::GameOver { final_score: 12 }).unwrap();
        assert_eq!(json, r#"{"type":"GameOver","final_score":12}"#);
    }
}
