//! Audio system using Web Audio API

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{SoundEffect, Tone, Waveform};
use crate::Settings;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Pick up volume or mute changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        self.play_tone(ctx, &effect.tone());
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_tone(&self, ctx: &AudioContext, tone: &Tone) {
        let osc_type = match tone.wave {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Triangle => OscillatorType::Triangle,
            Waveform::Square => OscillatorType::Square,
        };
        let Some((osc, gain)) = self.create_osc(ctx, tone.start_hz, osc_type) else {
            return;
        };
        let t = ctx.current_time();
        let end = t + tone.duration as f64;

        gain.gain()
            .set_value_at_time(tone.gain * self.volume, t)
            .ok();
        gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
        osc.frequency().set_value_at_time(tone.start_hz, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(tone.end_hz, end)
            .ok();

        osc.start().ok();
        osc.stop_with_when(end + 0.02).ok();
    }
}
