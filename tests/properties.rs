//! Property tests for the simulation invariants

use std::collections::HashSet;

use glam::Vec2;
use proptest::prelude::*;

use pillar_flap::sim::{Avatar, Obstacle, autopilot, is_colliding};
use pillar_flap::{Game, GameEvent, GravityMode, RunState, SimulationConfig};

fn playing_game(seed: u64, config: SimulationConfig) -> Game {
    let mut game = Game::new(config.with_seed(seed));
    game.on_start();
    let steps = game.config().countdown_from;
    let step_ms = game.config().countdown_step_ms;
    for _ in 0..steps {
        game.tick(step_ms);
    }
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_ticks_outside_playing_change_nothing(
        seed in any::<u64>(),
        dts in prop::collection::vec(0.0f32..200.0, 1..50),
    ) {
        // Idle
        let mut game = Game::new(SimulationConfig::default().with_seed(seed));
        let before = game.snapshot();
        for &dt in &dts {
            game.tick(dt);
        }
        prop_assert_eq!(game.snapshot(), before);

        // Counting: only the countdown moves
        game.on_start();
        let before = game.snapshot();
        for &dt in dts.iter().take(2) {
            game.tick(dt.min(999.0) / 2.0);
        }
        let after = game.snapshot();
        prop_assert_eq!(after.avatar, before.avatar);
        prop_assert_eq!(after.obstacles, before.obstacles);
        prop_assert_eq!(after.score, before.score);

        // Over
        let mut game = playing_game(seed, SimulationConfig::default());
        let height = game.config().viewport_height;
        game.state_mut().avatar.pos.y = height;
        game.tick(16.0);
        prop_assert_eq!(game.run_state(), RunState::Over);
        let before = game.snapshot();
        for &dt in &dts {
            game.on_flap_input();
            game.tick(dt);
        }
        prop_assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn prop_score_monotonic_capped_and_passes_stick(
        seed in any::<u64>(),
        max_score in 0u32..6,
        behind in prop::collection::vec(0.0f32..140.0, 0..10),
        steps in prop::collection::vec((1.0f32..50.0, any::<bool>()), 1..300),
        scaled in any::<bool>(),
    ) {
        let config = SimulationConfig {
            max_score,
            gravity_mode: if scaled { GravityMode::Scaled } else { GravityMode::PerTick },
            ..SimulationConfig::default()
        };
        let mut game = playing_game(seed, config);
        let height = game.config().viewport_height;
        let width = game.config().obstacle_width;
        for x in behind {
            game.state_mut().obstacles.push(Obstacle::new(0, x, width, 0.0, height, height));
        }

        let mut last_score = game.score();
        let mut passed_ids: HashSet<u32> = HashSet::new();
        let mut pass_events = 0u32;

        for (dt, jitter) in steps {
            let low = jitter && game.avatar().pos.y > 600.0;
            if autopilot::should_flap(game.state(), game.config()) || low {
                game.on_flap_input();
            }
            game.tick(dt);

            for event in game.drain_events() {
                if let GameEvent::ObstaclePassed { obstacle_id } = event {
                    prop_assert!(
                        passed_ids.insert(obstacle_id),
                        "obstacle {} passed twice",
                        obstacle_id
                    );
                    pass_events += 1;
                }
            }

            let score = game.score();
            prop_assert!(score >= last_score);
            prop_assert!(score <= max_score);
            prop_assert_eq!(score, pass_events.min(max_score));
            last_score = score;

            for o in game.obstacles() {
                prop_assert_eq!(o.passed, passed_ids.contains(&o.id));
            }
            if game.run_state() == RunState::Over {
                break;
            }
        }
    }

    #[test]
    fn prop_obstacles_stay_in_spawn_order(
        seed in any::<u64>(),
        steps in prop::collection::vec(10.0f32..120.0, 1..400),
    ) {
        let mut game = playing_game(seed, SimulationConfig::default());
        for dt in steps {
            if autopilot::should_flap(game.state(), game.config()) {
                game.on_flap_input();
            }
            game.tick(dt);
            let ids: Vec<u32> = game.obstacles().iter().map(|o| o.id).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
            let xs: Vec<f32> = game.obstacles().iter().map(|o| o.x).collect();
            prop_assert!(xs.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn prop_inside_gap_never_collides(
        gap_top in 40.0f32..400.0,
        gap in 40.0f32..200.0,
        radius in 1.0f32..18.0,
        t in 0.0f32..0.99,
        dx in -60.0f32..60.0,
    ) {
        let height = 720.0;
        let gap_bottom = gap_top + gap;
        prop_assume!(gap > 2.0 * radius + 1.0);
        // Centre anywhere that keeps the whole circle inside the gap
        let y = gap_top + radius + t * (gap - 2.0 * radius);
        let obstacle = Obstacle::new(1, 300.0 + dx, 80.0, gap_top, gap_bottom, height);
        prop_assert!(!is_colliding(Vec2::new(320.0, y), radius, &[obstacle], height));
    }

    #[test]
    fn prop_out_of_span_only_bounds_matter(
        y in 0.0f32..720.0,
        radius in 1.0f32..30.0,
    ) {
        let height = 720.0;
        // Obstacle far to the right, solid top to bottom
        let obstacle = Obstacle::new(1, 1000.0, 80.0, 0.0, 0.0, height);
        let colliding = is_colliding(Vec2::new(320.0, y), radius, &[obstacle], height);
        prop_assert_eq!(colliding, y - radius <= 0.0 || y + radius >= height);
    }

    #[test]
    fn prop_impulse_overwrites(
        start_vel in -20.0f32..20.0,
        flaps in 1usize..10,
    ) {
        let mut avatar = Avatar::new(320.0, 360.0, 18.0);
        avatar.vel_y = start_vel;
        for _ in 0..flaps {
            avatar.impulse(-8.5);
        }
        prop_assert_eq!(avatar.vel_y, -8.5);
    }
}
