//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only enters through `Game::tick(dt_ms)`
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod avatar;
pub mod collision;
pub mod machine;
pub mod obstacles;
pub mod state;
pub mod tick;

pub use avatar::Avatar;
pub use collision::{circle_hits_obstacle, circle_out_of_bounds, is_colliding};
pub use machine::Game;
pub use obstacles::ObstacleField;
pub use state::{Countdown, GameEvent, GameState, Obstacle, RunState, Snapshot};
pub use tick::{FrameOutcome, advance_countdown, step_frame};
