//! Named sound cues and where they go.
//!
//! The storybook never touches an audio device directly. Views emit [`Cue`]s,
//! the [`SoundBoard`] applies the mute switch and each cue's volume, and a
//! [`CueSink`] does the actual playing: [`crate::audio::Speaker`] in the
//! window, [`LogSink`] when running silent.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    /// Card hovered.
    Hover,
    /// Any button-like tap.
    Click,
    /// A section becomes active, or a secret is toggled.
    Chime,
    /// Navigation and the hug squeeze.
    Whoosh,
    /// An easter egg fired.
    Surprise,
}

impl Cue {
    pub const ALL: [Cue; 5] = [Cue::Hover, Cue::Click, Cue::Chime, Cue::Whoosh, Cue::Surprise];

    /// Playback volume in `[0, 1]`. Kept low on purpose.
    pub fn volume(self) -> f32 {
        match self {
            Cue::Hover => 0.15,
            Cue::Click => 0.3,
            Cue::Chime => 0.2,
            Cue::Whoosh => 0.1,
            Cue::Surprise => 0.25,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Cue::Hover => "hover",
            Cue::Click => "click",
            Cue::Chime => "chime",
            Cue::Whoosh => "whoosh",
            Cue::Surprise => "surprise",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Something that can play a cue. Playback failures are swallowed by the sink.
pub trait CueSink {
    fn play(&mut self, cue: Cue, volume: f32);
}

/// Sink that writes every cue to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl CueSink for LogSink {
    fn play(&mut self, cue: Cue, volume: f32) {
        log::info!("cue {cue} at volume {volume:.2}");
    }
}

/// Sink that remembers what was played.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub played: Vec<Cue>,
}

impl CueSink for RecordingSink {
    fn play(&mut self, cue: Cue, _volume: f32) {
        self.played.push(cue);
    }
}

/// Mute switch in front of a sink.
#[derive(Debug, Default)]
pub struct SoundBoard<S> {
    sink: S,
    muted: bool,
}

impl<S: CueSink> SoundBoard<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, muted: false }
    }

    /// Play `cue` unless muted. Returns whether it reached the sink.
    pub fn play(&mut self, cue: Cue) -> bool {
        if self.muted {
            log::trace!("muted, dropping cue {cue}");
            return false;
        }
        self.sink.play(cue, cue.volume());
        true
    }

    /// Flip the mute switch and return the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        log::debug!("sound {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
