//! Collision predicates between the avatar circle, the screen bounds and the
//! pillar obstacles.
//!
//! The pillar test is deliberately coarse: the avatar is treated as its
//! bounding box against each pillar. Everything here is pure.

use glam::Vec2;

use super::state::Obstacle;

/// Avatar touches or crosses the top or bottom edge of the viewport.
/// Inclusive at the limit: `y - r == 0` collides.
#[inline]
pub fn circle_out_of_bounds(center: Vec2, radius: f32, viewport_height: f32) -> bool {
    center.y - radius <= 0.0 || center.y + radius >= viewport_height
}

/// Avatar horizontal span overlaps the obstacle's horizontal span (strict)
#[inline]
pub fn overlaps_horizontally(center: Vec2, radius: f32, obstacle: &Obstacle) -> bool {
    center.x + radius > obstacle.x && center.x - radius < obstacle.right()
}

/// Avatar hits the top or bottom segment of a single obstacle
pub fn circle_hits_obstacle(center: Vec2, radius: f32, obstacle: &Obstacle) -> bool {
    if !overlaps_horizontally(center, radius, obstacle) {
        return false;
    }
    let above_gap = center.y - radius < obstacle.gap_top;
    let below_gap = center.y + radius > obstacle.gap_bottom;
    above_gap || below_gap
}

/// Terminal collision check run every tick while playing.
/// All obstacles are checked; order doesn't matter.
pub fn is_colliding(
    center: Vec2,
    radius: f32,
    obstacles: &[Obstacle],
    viewport_height: f32,
) -> bool {
    circle_out_of_bounds(center, radius, viewport_height)
        || obstacles
            .iter()
            .any(|o| circle_hits_obstacle(center, radius, o))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEIGHT: f32 = 720.0;

    fn pillar(x: f32, width: f32, gap_top: f32, gap_bottom: f32) -> Obstacle {
        Obstacle::new(1, x, width, gap_top, gap_bottom, HEIGHT)
    }

    #[test]
    fn test_top_bound_is_inclusive() {
        // y - r == 0 collides, y - r == 1 doesn't
        assert!(circle_out_of_bounds(Vec2::new(100.0, 5.0), 5.0, HEIGHT));
        assert!(!circle_out_of_bounds(Vec2::new(100.0, 6.0), 5.0, HEIGHT));
    }

    #[test]
    fn test_bottom_bound_is_inclusive() {
        assert!(circle_out_of_bounds(Vec2::new(100.0, HEIGHT - 5.0), 5.0, HEIGHT));
        assert!(!circle_out_of_bounds(Vec2::new(100.0, HEIGHT - 6.0), 5.0, HEIGHT));
    }

    #[test]
    fn test_obstacle_above_gap() {
        // Obstacle spans [X-5, X+5]
        let x = 320.0;
        let obstacles = [pillar(x - 5.0, 10.0, 100.0, 300.0)];

        // Top edge 85 < 100
        assert!(is_colliding(Vec2::new(x, 90.0), 5.0, &obstacles, HEIGHT));
        // Inside the gap
        assert!(!is_colliding(Vec2::new(x, 200.0), 5.0, &obstacles, HEIGHT));
    }

    #[test]
    fn test_obstacle_below_gap() {
        let obstacles = [pillar(300.0, 80.0, 100.0, 300.0)];
        assert!(is_colliding(Vec2::new(320.0, 298.0), 5.0, &obstacles, HEIGHT));
        assert!(!is_colliding(Vec2::new(320.0, 295.0), 5.0, &obstacles, HEIGHT));
    }

    #[test]
    fn test_no_horizontal_overlap_is_safe() {
        let obstacles = [pillar(400.0, 80.0, 100.0, 300.0)];
        // Touching the leading edge exactly is not an overlap
        assert!(!is_colliding(Vec2::new(395.0, 50.0), 5.0, &obstacles, HEIGHT));
        assert!(is_colliding(Vec2::new(396.0, 50.0), 5.0, &obstacles, HEIGHT));
        // Past the trailing edge
        assert!(!is_colliding(Vec2::new(485.0, 50.0), 5.0, &obstacles, HEIGHT));
    }

    #[test]
    fn test_checks_every_obstacle() {
        let obstacles = [
            pillar(900.0, 80.0, 100.0, 300.0),
            pillar(300.0, 80.0, 400.0, 600.0),
        ];
        assert!(is_colliding(Vec2::new(320.0, 200.0), 5.0, &obstacles, HEIGHT));
    }
}
