//! Cosmetic preferences
//!
//! Read by rendering and audio only; nothing here can change how a run
//! plays out. Persisted separately from anything gameplay related.

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::persistence::KeyValueStore;

/// Default avatar body colour
pub const DEFAULT_AVATAR_COLOR: &str = "#2ecc71";
pub const DEFAULT_EYE_SIZE: u32 = 10;
pub const MIN_EYE_SIZE: u32 = 4;
pub const MAX_EYE_SIZE: u32 = 20;
pub const DEFAULT_VOLUME: f32 = 0.7;

/// Cosmetic settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Avatar body colour as `#rrggbb`
    pub avatar_color: String,
    /// Eye radius in pixels
    pub eye_size: u32,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            avatar_color: DEFAULT_AVATAR_COLOR.to_string(),
            eye_size: DEFAULT_EYE_SIZE,
            volume: DEFAULT_VOLUME,
            muted: false,
        }
    }
}

/// True for `#rrggbb`
pub fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Parse `#rrggbb` into RGB bytes
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    if !is_hex_color(s) {
        return None;
    }
    let v = u32::from_str_radix(&s[1..], 16).ok()?;
    Some([(v >> 16) as u8, (v >> 8) as u8, v as u8])
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "pillar_flap_settings_v1";

    /// Clamp every field into range. Never fails.
    pub fn sanitized(mut self) -> Self {
        if !is_hex_color(&self.avatar_color) {
            log::warn!("Invalid avatar colour {:?}, using default", self.avatar_color);
            self.avatar_color = DEFAULT_AVATAR_COLOR.to_string();
        }
        self.avatar_color.make_ascii_lowercase();

        let clamped = self.out_of_range_fields();
        if !clamped.is_empty() {
            log::warn!(
                "Settings out of range (eye_size {}, volume {}), clamping: {:?}",
                self.eye_size,
                self.volume,
                clamped
            );
        }
        self.eye_size = self.eye_size.clamp(MIN_EYE_SIZE, MAX_EYE_SIZE);
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            DEFAULT_VOLUME
        };
        self
    }

    /// Numeric fields that `sanitized` would change
    pub(crate) fn out_of_range_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if !(MIN_EYE_SIZE..=MAX_EYE_SIZE).contains(&self.eye_size) {
            fields.push("eye_size");
        }
        if !(0.0..=1.0).contains(&self.volume) {
            fields.push("volume");
        }
        fields
    }

    /// Set volume from a 0-100 slider value
    pub fn set_volume_percent(&mut self, percent: i32) {
        self.volume = (percent as f32 / 100.0).clamp(0.0, 1.0);
    }

    /// Volume applied to sound, zero when muted
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Avatar colour as RGB
    pub fn avatar_rgb(&self) -> [u8; 3] {
        parse_hex_color(&self.avatar_color)
            .or_else(|| parse_hex_color(DEFAULT_AVATAR_COLOR))
            .unwrap_or([0, 0, 0])
    }

    /// Lenient parse: each field is taken on its own when present and of the
    /// right type, otherwise the default stays. Out-of-range values are clamped.
    pub fn from_json_lenient(json: &str) -> Self {
        let mut settings = Self::default();
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(json) else {
            log::warn!("Stored settings unreadable, using defaults");
            return settings;
        };

        if let Some(color) = map.get("avatar_color").and_then(Value::as_str) {
            settings.avatar_color = color.to_string();
        }
        if let Some(eye) = map.get("eye_size").and_then(Value::as_f64) {
            settings.eye_size = eye.round().clamp(0.0, u32::MAX as f64) as u32;
        }
        if let Some(volume) = map.get("volume").and_then(Value::as_f64) {
            settings.volume = volume as f32;
        }
        if let Some(muted) = map.get("muted").and_then(Value::as_bool) {
            settings.muted = muted;
        }
        settings.sanitized()
    }

    pub fn to_json(&self) -> String {
        // Plain struct of strings/numbers/bools; serialization can't fail
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Load from a store, defaults for anything missing
    pub fn load_from<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.read(Self::STORAGE_KEY) {
            Some(json) => {
                log::info!("Loaded settings");
                Self::from_json_lenient(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save (sanitized) to a store
    pub fn save_to<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> io::Result<()> {
        let json = self.clone().sanitized().to_json();
        store.write(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load from the platform store (config dir natively, LocalStorage on web)
    pub fn load() -> Self {
        match crate::persistence::platform_store() {
            Ok(store) => Self::load_from(&store),
            Err(e) => {
                log::warn!("No settings store available: {}", e);
                Self::default()
            }
        }
    }

    /// Save to the platform store, logging failures
    pub fn save(&self) {
        let result =
            crate::persistence::platform_store().and_then(|mut store| self.save_to(&mut store));
        if let Err(e) = result {
            log::warn!("Failed to save settings: {}", e);
        }
    }
}
