//! Pillar Flap entry point
//!
//! The browser build is driven from JavaScript through `pillar_flap::web`.
//! Natively this runs a headless demo: the autopilot plays a few runs at
//! 60 Hz and the results are logged.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pillar_flap::sim::autopilot;
    use pillar_flap::{Game, GameEvent, RunState, Settings, SimulationConfig};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pillar Flap (native demo) starting...");

    // Optional: first arg = seed, second = number of runs
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());
    let runs = args.next().and_then(|s| s.parse::<u32>().ok()).unwrap_or(3);

    let settings = Settings::load();
    log::info!(
        "Cosmetics: colour {}, eye size {}, volume {:.0}%{}",
        settings.avatar_color,
        settings.eye_size,
        settings.volume * 100.0,
        if settings.muted { " (muted)" } else { "" }
    );

    let mut game = Game::new(SimulationConfig {
        seed,
        ..SimulationConfig::default()
    });

    const FRAME_MS: f32 = 1000.0 / 60.0;
    // Two minutes of play per run at most
    const MAX_FRAMES: u32 = 60 * 120;

    for run in 1..=runs {
        match game.run_state() {
            RunState::Over => game.on_retry(),
            _ => game.on_start(),
        }

        let mut frames = 0;
        while game.run_state() != RunState::Over && frames < MAX_FRAMES {
            if autopilot::should_flap(game.state(), game.config()) {
                game.on_flap_input();
            }
            game.tick(FRAME_MS);
            if game.run_state() == RunState::Playing {
                frames += 1;
            }

            for event in game.drain_events() {
                match event {
                    GameEvent::CountdownTick { remaining } => {
                        log::debug!("Countdown {}", remaining)
                    }
                    GameEvent::ScoreIncreased { score } => log::debug!("Score {}", score),
                    _ => {}
                }
            }
        }

        match game.final_score() {
            Some(score) => println!("Run {run}: score {score} after {frames} frames"),
            None => {
                println!("Run {run}: still alive after {frames} frames, score {}", game.score());
                game.on_quit_confirmed();
            }
        }
    }

    println!("Best score this session: {}", game.best_score());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is pillar_flap::web::wasm_start
}
