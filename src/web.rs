//! Browser host bindings
//!
//! Exposes the session entry points to JavaScript. The page owns rendering,
//! the frame scheduler (`requestAnimationFrame`) and the quit confirmation
//! dialog; it forwards inputs here and reads snapshots/events back as JSON.

use wasm_bindgen::prelude::*;

use crate::audio::{AudioManager, sound_for};
use crate::persistence::LocalStorageStore;
use crate::settings::Settings;
use crate::sim::{Game, GameEvent};
use crate::tuning::SimulationConfig;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Pillar Flap starting...");
}

/// Game instance held by the page
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    settings: Settings,
    audio: AudioManager,
    /// Events drained from the core but not yet collected by the page
    pending: Vec<GameEvent>,
}

#[wasm_bindgen]
impl WebGame {
    /// New session sized to the canvas. `config_json` may hold tuning overrides.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, config_json: Option<String>) -> WebGame {
        let config = config_json
            .and_then(|json| match SimulationConfig::from_json(&json) {
                Ok(config) => Some(config),
                Err(e) => {
                    log::warn!("Ignoring invalid tuning override: {}", e);
                    None
                }
            })
            .unwrap_or_default()
            .with_viewport(width, height);

        WebGame {
            game: Game::new(config),
            settings: Settings::load_from(&LocalStorageStore),
            audio: AudioManager::new(),
            pending: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        self.audio.resume();
        self.game.on_start();
        self.collect();
    }

    pub fn flap(&mut self) {
        self.game.on_flap_input();
    }

    pub fn request_quit(&mut self) {
        self.game.on_quit_requested();
        self.collect();
    }

    pub fn confirm_quit(&mut self) {
        self.game.on_quit_confirmed();
        self.collect();
    }

    pub fn retry(&mut self) {
        self.audio.resume();
        self.game.on_retry();
        self.collect();
    }

    pub fn back_to_menu(&mut self) {
        self.game.on_back_to_menu();
        self.collect();
    }

    /// Advance by one animation frame
    pub fn tick(&mut self, dt_ms: f32) {
        self.game.tick(dt_ms);
        self.collect();
    }

    /// Current run state, score, avatar, obstacles and countdown as JSON
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_default()
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events_json(&mut self) -> String {
        let events = std::mem::take(&mut self.pending);
        serde_json::to_string(&events).unwrap_or_default()
    }

    pub fn best_score(&self) -> u32 {
        self.game.best_score()
    }

    pub fn settings_json(&self) -> String {
        self.settings.to_json()
    }

    /// Apply and persist settings from the settings panel
    pub fn save_settings(
        &mut self,
        avatar_color: String,
        eye_size: u32,
        volume_percent: i32,
        muted: bool,
    ) {
        let mut settings = Settings {
            avatar_color,
            eye_size,
            muted,
            ..Settings::default()
        };
        settings.set_volume_percent(volume_percent);
        self.settings = settings.sanitized();

        let mut store = LocalStorageStore;
        if let Err(e) = self.settings.save_to(&mut store) {
            log::warn!("Failed to save settings: {}", e);
        }
    }
}

impl WebGame {
    /// Pull events out of the core, play their sounds, queue them for the page
    fn collect(&mut self) {
        for event in self.game.drain_events() {
            if let Some(effect) = sound_for(&event) {
                self.audio.play(effect, &self.settings);
            }
            // Per-frame snapshots are read through snapshot_json instead
            if !matches!(event, GameEvent::FrameReady(_)) {
                self.pending.push(event);
            }
        }
    }
}
