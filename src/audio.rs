//! Sound effects for simulation events
//!
//! Effects are simple synthesized beeps described by `Tone`. The mapping from
//! events to tones is platform independent; playback through the Web Audio
//! API only exists on wasm32.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Square,
    Sawtooth,
}

/// A single beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_secs: f32,
    pub waveform: Waveform,
    /// Gain before volume is applied
    pub gain: f32,
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Avatar cleared an obstacle
    Pass,
    /// Avatar hit an obstacle or the bounds
    Hit,
}

impl SoundEffect {
    pub fn tone(self) -> Tone {
        match self {
            SoundEffect::Pass => Tone {
                frequency_hz: 880.0,
                duration_secs: 0.06,
                waveform: Waveform::Square,
                gain: 0.22,
            },
            SoundEffect::Hit => Tone {
                frequency_hz: 220.0,
                duration_secs: 0.18,
                waveform: Waveform::Sawtooth,
                gain: 0.35,
            },
        }
    }
}

/// Sound to play for an event, if any
pub fn sound_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::ObstaclePassed { .. } => Some(SoundEffect::Pass),
        GameEvent::GameOver { .. } => Some(SoundEffect::Hit),
        _ => None,
    }
}

/// Output gain for an effect under the current settings (0 when muted)
pub fn output_gain(effect: SoundEffect, settings: &Settings) -> f32 {
    effect.tone().gain * settings.effective_volume()
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Waveform, output_gain};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect, settings: &Settings) {
            let vol = output_gain(effect, settings);
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let tone = effect.tone();
            let Some((osc, gain)) = create_osc(ctx, tone.frequency_hz, tone.waveform) else {
                return;
            };
            let t = ctx.current_time();
            gain.gain().set_value_at_time(vol, t).ok();
            osc.start().ok();
            osc.stop_with_when(t + tone.duration_secs as f64).ok();
        }
    }

    fn oscillator_type(waveform: Waveform) -> OscillatorType {
        match waveform {
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
        }
    }

    /// Create an oscillator routed through a gain node
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        waveform: Waveform,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(oscillator_type(waveform));
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            sound_for(&GameEvent::ObstaclePassed { obstacle_id: 1 }),
            Some(SoundEffect::Pass)
        );
        assert_eq!(sound_for(&GameEvent::ScoreIncreased { score: 1 }), None);
        assert_eq!(
            sound_for(&GameEvent::GameOver { final_score: 3 }),
            Some(SoundEffect::Hit)
        );
        assert_eq!(sound_for(&GameEvent::RunStarted), None);
        assert_eq!(sound_for(&GameEvent::CountdownTick { remaining: 2 }), None);
    }

    #[test]
    fn test_output_gain_follows_settings() {
        let mut settings = Settings {
            volume: 0.5,
            ..Settings::default()
        };
        assert!((output_gain(SoundEffect::Pass, &settings) - 0.11).abs() < 1e-6);

        settings.muted = true;
        assert_eq!(output_gain(SoundEffect::Hit, &settings), 0.0);
    }

    #[test]
    fn test_tones() {
        let pass = SoundEffect::Pass.tone();
        assert_eq!(pass.frequency_hz, 880.0);
        assert_eq!(pass.waveform, Waveform::Square);
        let hit = SoundEffect::Hit.tone();
        assert_eq!(hit.frequency_hz, 220.0);
        assert_eq!(hit.waveform, Waveform::Sawtooth);
    }
}
