//! The player avatar and its vertical physics

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::GravityMode;

/// The player's avatar. Only the vertical axis moves; `pos.x` stays fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    /// Vertical velocity (positive = down, screen coordinates)
    pub vel_y: f32,
    pub radius: f32,
}

impl Avatar {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel_y: 0.0,
            radius,
        }
    }

    /// Advance one tick.
    ///
    /// In `PerTick` mode gravity and motion ignore `dt_ms` entirely;
    /// in `Scaled` mode both are multiplied by the number of 60 Hz frames
    /// that `dt_ms` represents.
    pub fn integrate(
        &mut self,
        dt_ms: f32,
        gravity: f32,
        mode: GravityMode,
        frame_normalization: f32,
    ) {
        match mode {
            GravityMode::PerTick => {
                self.vel_y += gravity;
                self.pos.y += self.vel_y;
            }
            GravityMode::Scaled => {
                let frames = dt_ms * frame_normalization;
                self.vel_y += gravity * frames;
                self.pos.y += self.vel_y * frames;
            }
        }
    }

    /// Flap: overwrite velocity with the upward impulse (not additive)
    #[inline]
    pub fn impulse(&mut self, impulse_velocity: f32) {
        self.vel_y = impulse_velocity;
    }

    /// Back to the start position, at rest
    pub fn reset(&mut self, start_y: f32) {
        self.pos.y = start_y;
        self.vel_y = 0.0;
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_per_tick_ignores_dt() {
        let mut a = Avatar::new(320.0, 360.0, 18.0);
        let mut b = a;
        a.integrate(16.0, 0.45, GravityMode::PerTick, 0.06);
        b.integrate(100.0, 0.45, GravityMode::PerTick, 0.06);
        assert_eq!(a, b);
        assert!((a.vel_y - 0.45).abs() < 1e-6);
        assert!((a.pos.y - 360.45).abs() < 1e-4);
    }

    #[test]
    fn test_integrate_scaled_uses_dt() {
        let mut a = Avatar::new(320.0, 360.0, 18.0);
        // 1000 / 60 ms is one frame at 60 Hz
        a.integrate(1000.0 / 60.0, 0.45, GravityMode::Scaled, 0.06);
        assert!((a.vel_y - 0.45).abs() < 1e-4);

        let mut b = Avatar::new(320.0, 360.0, 18.0);
        b.integrate(2000.0 / 60.0, 0.45, GravityMode::Scaled, 0.06);
        assert!((b.vel_y - 0.9).abs() < 1e-4);
    }

    #[test]
    fn test_repeated_impulse_is_not_cumulative() {
        let mut a = Avatar::new(320.0, 360.0, 18.0);
        a.vel_y = 4.0;
        a.impulse(-8.5);
        a.impulse(-8.5);
        a.impulse(-8.5);
        assert_eq!(a.vel_y, -8.5);
    }

    #[test]
    fn test_reset() {
        let mut a = Avatar::new(320.0, 100.0, 18.0);
        a.vel_y = 7.0;
        a.reset(360.0);
        assert_eq!(a.pos, Vec2::new(320.0, 360.0));
        assert_eq!(a.vel_y, 0.0);
    }
}
