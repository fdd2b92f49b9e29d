//! Speaker output for sound cues.
//!
//! Each [`Cue`] is a short run of sine notes synthesised on the fly, so the
//! crate ships no audio files. [`ToneSink`] plays them on the default output
//! device; [`Speaker`] falls back to logging when there is no device or audio
//! is switched off.

use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle};

use crate::error::SoundError;
use crate::sound::{Cue, CueSink, LogSink};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub frequency: f32,
    pub duration: Duration,
}

const fn note(frequency: f32, millis: u64) -> Note {
    Note {
        frequency,
        duration: Duration::from_millis(millis),
    }
}

const HOVER: [Note; 2] = [note(1318.5, 40), note(1760.0, 60)];
const CLICK: [Note; 1] = [note(1568.0, 30)];
const CHIME: [Note; 3] = [note(1046.5, 90), note(1318.5, 90), note(1568.0, 160)];
const WHOOSH: [Note; 4] = [note(392.0, 50), note(329.6, 50), note(261.6, 60), note(196.0, 80)];
const SURPRISE: [Note; 4] = [note(523.3, 80), note(659.3, 80), note(784.0, 80), note(1046.5, 200)];

/// The notes a cue is made of, in playing order.
pub fn notes(cue: Cue) -> &'static [Note] {
    match cue {
        Cue::Hover => &HOVER,
        Cue::Click => &CLICK,
        Cue::Chime => &CHIME,
        Cue::Whoosh => &WHOOSH,
        Cue::Surprise => &SURPRISE,
    }
}

/// One playable source for `cue`, peaking at `volume`.
pub fn tone(cue: Cue, volume: f32) -> impl Source<Item = f32> + Send + 'static {
    rodio::source::from_iter(notes(cue).iter().map(move |n| {
        SineWave::new(n.frequency)
            .take_duration(n.duration)
            .amplify(volume)
    }))
}

/// Plays cues on the default output device.
pub struct ToneSink {
    // Dropping the stream silences the handle.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl ToneSink {
    pub fn open() -> Result<Self, SoundError> {
        let (stream, handle) = OutputStream::try_default()?;
        log::debug!("opened default audio output");
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

impl CueSink for ToneSink {
    fn play(&mut self, cue: Cue, volume: f32) {
        if let Err(e) = self.handle.play_raw(tone(cue, volume)) {
            log::warn!("failed to play {cue}: {e}");
        }
    }
}

/// The sink the windowed storybook plays through.
pub enum Speaker {
    Tone(ToneSink),
    Log(LogSink),
}

impl Speaker {
    /// Open the output device when `enabled`, logging cues otherwise.
    ///
    /// A missing device is not an error; the storybook just stays quiet.
    pub fn open(enabled: bool) -> Self {
        if !enabled {
            return Speaker::Log(LogSink);
        }
        match ToneSink::open() {
            Ok(sink) => Speaker::Tone(sink),
            Err(e) => {
                log::warn!("{e}; sound cues will only be logged");
                Speaker::Log(LogSink)
            }
        }
    }

    pub fn is_audible(&self) -> bool {
        matches!(self, Speaker::Tone(_))
    }
}

impl CueSink for Speaker {
    fn play(&mut self, cue: Cue, volume: f32) {
        match self {
            Speaker::Tone(sink) => sink.play(cue, volume),
            Speaker::Log(sink) => sink.play(cue, volume),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn test_tone_peaks_at_cue_volume() {
        for cue in Cue::ALL {
            let volume = cue.volume();
            let source = tone(cue, volume);
            assert_eq!(source.channels(), 1);

            let samples: Vec<f32> = source.collect();
            let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
            assert!(peak <= volume + 1e-4, "{cue} peaks at {peak}");
            assert!(peak > volume * 0.95, "{cue} peaks at {peak}");
        }
    }

    #[test]
    fn test_tone_plays_every_note_once() {
        for cue in Cue::ALL {
            let notes = notes(cue);
            assert!(!notes.is_empty());

            let expected: f32 = notes
                .iter()
                .map(|n| n.duration.as_secs_f32() * SAMPLE_RATE)
                .sum();
            let count = tone(cue, 1.0).count() as f32;
            let slack = 2.0 * notes.len() as f32;
            assert!(
                (count - expected).abs() <= slack,
                "{cue}: {count} samples, expected {expected}"
            );
        }
    }

    #[test]
    fn test_cues_sound_different() {
        for (i, a) in Cue::ALL.iter().enumerate() {
            for b in &Cue::ALL[i + 1..] {
                assert_ne!(notes(*a), notes(*b));
            }
        }
    }

    #[test]
    fn test_disabled_speaker_only_logs() {
        let mut speaker = Speaker::open(false);
        assert!(!speaker.is_audible());
        speaker.play(Cue::Chime, Cue::Chime.volume());
    }
}
