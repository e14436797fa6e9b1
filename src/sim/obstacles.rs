//! Obstacle spawning, scrolling, eviction and pass detection

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;
use crate::tuning::SimulationConfig;

/// Live obstacles in spawn (FIFO) order, plus the spawn timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    /// Time since the last spawn (or since the run started)
    since_spawn_ms: f32,
    next_id: u32,
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleField {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            since_spawn_ms: 0.0,
            next_id: 1,
        }
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn since_spawn_ms(&self) -> f32 {
        self.since_spawn_ms
    }

    /// Drop every obstacle and restart the spawn timer
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.since_spawn_ms = 0.0;
    }

    /// Insert an obstacle built by the caller (keeps FIFO order by id)
    pub fn push(&mut self, mut obstacle: Obstacle) -> u32 {
        obstacle.id = self.next_id;
        self.next_id += 1;
        let id = obstacle.id;
        self.obstacles.push(obstacle);
        id
    }

    /// Spawn a new obstacle just past the right edge with a random gap
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, config: &SimulationConfig) -> u32 {
        let height = config.viewport_height;
        let lo = config.spawn_margin;
        let hi = height - config.spawn_margin;
        let gap_center = if hi > lo {
            rng.random_range(lo..=hi)
        } else {
            height / 2.0
        };

        let half_gap = config.gap_height / 2.0;
        let obstacle = Obstacle::new(
            0,
            config.viewport_width + config.spawn_offset,
            config.obstacle_width,
            gap_center - half_gap,
            gap_center + half_gap,
            height,
        );
        let id = self.push(obstacle);
        log::debug!("Spawned obstacle {} with gap centre {:.1}", id, gap_center);
        id
    }

    /// Run the spawn timer; spawns once the interval is exceeded.
    /// Returns the new obstacle's id, if any.
    pub fn update_spawn_timer<R: Rng>(
        &mut self,
        dt_ms: f32,
        rng: &mut R,
        config: &SimulationConfig,
    ) -> Option<u32> {
        self.since_spawn_ms += dt_ms;
        if self.since_spawn_ms > config.spawn_interval_ms {
            self.since_spawn_ms = 0.0;
            Some(self.spawn(rng, config))
        } else {
            None
        }
    }

    /// Scroll every obstacle left and evict the ones fully off screen.
    /// Returns how many were evicted.
    pub fn advance(
        &mut self,
        dt_ms: f32,
        speed: f32,
        frame_normalization: f32,
        despawn_margin: f32,
    ) -> usize {
        let dx = speed * dt_ms * frame_normalization;
        for obstacle in &mut self.obstacles {
            obstacle.x -= dx;
        }

        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.right() > -despawn_margin);
        let evicted = before - self.obstacles.len();
        if evicted > 0 {
            log::debug!("Evicted {} obstacle(s)", evicted);
        }
        evicted
    }

    /// Mark every not-yet-passed obstacle whose trailing edge is behind
    /// `avatar_x` as passed. Returns the ids of newly passed obstacles in
    /// spawn order (usually zero or one, more on a long frame).
    pub fn score_crossings(&mut self, avatar_x: f32) -> Vec<u32> {
        self.obstacles
            .iter_mut()
            .filter(|o| !o.passed && avatar_x > o.right())
            .map(|o| {
                o.passed = true;
                o.id
            })
            .collect()
    }

    /// First obstacle the avatar hasn't cleared yet
    pub fn next_unpassed(&self) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| !o.passed)
    }
}
