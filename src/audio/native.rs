//! Desktop audio through rodio

use std::io::Cursor;

use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use super::{SAMPLE_RATE, SoundEffect};
use crate::Settings;

struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

/// Audio manager for the game
pub struct AudioManager {
    /// `None` when no output device could be opened
    output: Option<Output>,
    /// Encoded flap clip; decoded fresh for every play
    flap_clip: Vec<u8>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings, flap_clip: Vec<u8>) -> Self {
        let output = match OutputStream::try_default() {
            Ok((stream, handle)) => Some(Output {
                _stream: stream,
                handle,
            }),
            Err(e) => {
                log::warn!("No audio output ({e}) - audio disabled");
                None
            }
        };
        Self {
            output,
            flap_clip,
            volume: settings.effective_volume(),
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
        let Some(output) = &self.output else { return };
        let Ok(sink) = Sink::try_new(&output.handle) else {
            return;
        };

        match effect {
            SoundEffect::Flap => match Decoder::new(Cursor::new(self.flap_clip.clone())) {
                Ok(clip) => {
                    sink.set_volume(self.volume);
                    sink.append(clip);
                }
                Err(e) => {
                    log::warn!("Flap clip unplayable ({e}), using tone");
                    sink.append(tone_source(effect, self.volume));
                }
            },
            SoundEffect::Score | SoundEffect::Crash => {
                sink.append(tone_source(effect, self.volume));
            }
        }
        sink.detach();
    }
}

fn tone_source(effect: SoundEffect, volume: f32) -> SamplesBuffer<f32> {
    SamplesBuffer::new(1, SAMPLE_RATE, effect.tone().samples(SAMPLE_RATE, volume))
}
