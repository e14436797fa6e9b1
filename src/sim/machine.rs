//! Session context and run state machine
//!
//! `Game` is constructed once per session and held by the host. Every input
//! the host forwards is an explicit transition over the owned `GameState`:
//!
//! ```text
//! Idle --start--> Counting --countdown hits 0--> Playing --collision--> Over
//! Over --retry--> Counting          Over --menu--> Idle
//! any --quit confirmed--> Idle
//! ```
//!
//! Inputs that don't apply to the current state are ignored.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::avatar::Avatar;
use super::state::{Countdown, GameEvent, GameState, Obstacle, RunState, Snapshot};
use super::tick::{FrameOutcome, advance_countdown, step_frame};
use crate::tuning::SimulationConfig;

/// One game session
#[derive(Debug, Clone)]
pub struct Game {
    config: SimulationConfig,
    state: GameState,
    rng: Pcg32,
    /// Seed the RNG stream was started from
    seed: u64,
    events: Vec<GameEvent>,
    best_score: u32,
}

impl Game {
    /// New session in the `Idle` state
    pub fn new(config: SimulationConfig) -> Self {
        let config = config.sanitized();
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        log::info!("New session (seed {})", seed);
        Self {
            state: GameState::new(&config),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            config,
            events: Vec::new(),
            best_score: 0,
        }
    }

    // === Host entry points ===

    /// Menu "start": Idle -> Counting
    pub fn on_start(&mut self) {
        if self.state.run_state == RunState::Idle {
            self.enter_countdown();
        }
    }

    /// Flap input. Only acts while playing.
    pub fn on_flap_input(&mut self) {
        if self.state.run_state == RunState::Playing {
            self.state.avatar.impulse(self.config.impulse_velocity);
        }
    }

    /// Ask the host to confirm quitting. Changes nothing by itself.
    pub fn on_quit_requested(&mut self) {
        self.events.push(GameEvent::QuitRequested);
    }

    /// Confirmed quit: back to the menu from any state, discarding the run
    /// and any pending countdown or spawn timer.
    pub fn on_quit_confirmed(&mut self) {
        log::info!("Quit confirmed from {:?}", self.state.run_state);
        self.enter_idle();
    }

    /// Result screen "retry": Over -> Counting with fresh run data
    pub fn on_retry(&mut self) {
        if self.state.run_state == RunState::Over {
            self.enter_countdown();
        }
    }

    /// Result screen "menu": Over -> Idle
    pub fn on_back_to_menu(&mut self) {
        if self.state.run_state == RunState::Over {
            self.enter_idle();
        }
    }

    /// Advance by one host frame. Drives the countdown while counting and
    /// the frame loop while playing; does nothing otherwise.
    pub fn tick(&mut self, dt_ms: f32) {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };

        match self.state.run_state {
            RunState::Counting => {
                if advance_countdown(&mut self.state, &self.config, dt_ms, &mut self.events) {
                    self.begin_run();
                }
            }
            RunState::Playing => {
                let outcome = step_frame(
                    &mut self.state,
                    &self.config,
                    &mut self.rng,
                    dt_ms,
                    &mut self.events,
                );
                if outcome == FrameOutcome::Collided {
                    self.end_run();
                }
            }
            RunState::Idle | RunState::Over => {}
        }
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Read-only accessors ===

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Frozen score of the finished run
    pub fn final_score(&self) -> Option<u32> {
        (self.state.run_state == RunState::Over).then_some(self.state.score)
    }

    /// Highest final score this session
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn avatar(&self) -> &Avatar {
        &self.state.avatar
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.state.obstacles.as_slice()
    }

    pub fn countdown(&self) -> Option<u8> {
        self.state.countdown.map(|c| c.remaining)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Mutable access for staging test scenarios. Not part of the host API.
    #[cfg(any(test, feature = "test-support"))]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    // === Transitions ===

    fn enter_idle(&mut self) {
        self.state.reset_run(&self.config);
        self.state.run_state = RunState::Idle;
    }

    fn enter_countdown(&mut self) {
        self.state.reset_run(&self.config);
        self.state.run_state = RunState::Counting;

        let from = self.config.countdown_from;
        if from == 0 {
            self.begin_run();
            return;
        }
        self.state.countdown = Some(Countdown::new(from));
        self.events.push(GameEvent::CountdownTick { remaining: from });
    }

    fn begin_run(&mut self) {
        self.state.reset_run(&self.config);
        self.state.run_state = RunState::Playing;
        self.events.push(GameEvent::RunStarted);
        log::info!("Run started");
    }

    fn end_run(&mut self) {
        self.state.run_state = RunState::Over;
        let final_score = self.state.score;
        self.best_score = self.best_score.max(final_score);
        self.events.push(GameEvent::GameOver { final_score });
        log::info!("Game over, score {} (best {})", final_score, self.best_score);
    }
}
