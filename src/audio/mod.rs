//! Sound effects
//!
//! Effects are described once as tones; each platform backend turns them into
//! sound its own way (rodio sample buffers on desktop, Web Audio oscillators
//! in the browser).

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use native::AudioManager;
#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

use crate::sim::GameEvent;

/// Sample rate for generated tones
pub const SAMPLE_RATE: u32 = 44_100;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Launch or flap
    Flap,
    /// Passed a building
    Score,
    /// Hit a building edge
    Crash,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Launched | GameEvent::Flapped => Some(SoundEffect::Flap),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::Crashed => Some(SoundEffect::Crash),
            GameEvent::Restarted => None,
        }
    }

    /// Synthesized voice for this effect
    pub fn tone(&self) -> Tone {
        match self {
            SoundEffect::Flap => Tone {
                wave: Waveform::Triangle,
                start_hz: 300.0,
                end_hz: 700.0,
                duration: 0.09,
                gain: 0.35,
            },
            SoundEffect::Score => Tone {
                wave: Waveform::Sine,
                start_hz: 880.0,
                end_hz: 1320.0,
                duration: 0.15,
                gain: 0.3,
            },
            SoundEffect::Crash => Tone {
                wave: Waveform::Square,
                start_hz: 180.0,
                end_hz: 50.0,
                duration: 0.3,
                gain: 0.25,
            },
        }
    }
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
}

impl Waveform {
    /// Value at `phase` in cycles
    fn sample(&self, phase: f32) -> f32 {
        let p = phase.fract();
        match self {
            Waveform::Sine => (p * std::f32::consts::TAU).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// Exponential pitch sweep with an exponential decay envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    /// Seconds
    pub duration: f32,
    /// Peak amplitude before volume
    pub gain: f32,
}

/// Envelope floor the decay ramps down to
const ENVELOPE_FLOOR: f32 = 0.01;

impl Tone {
    /// Mono samples at `sample_rate`, scaled by `volume`
    pub fn samples(&self, sample_rate: u32, volume: f32) -> Vec<f32> {
        let count = (self.duration * sample_rate as f32) as usize;
        let ratio = self.end_hz / self.start_hz;
        let mut phase = 0.0f32;

        (0..count)
            .map(|i| {
                let progress = i as f32 / count as f32;
                let freq = self.start_hz * ratio.powf(progress);
                let envelope = ENVELOPE_FLOOR.powf(progress);
                let value = self.wave.sample(phase) * envelope * self.gain * volume;
                phase += freq / sample_rate as f32;
                value
            })
            .collect()
    }
}
