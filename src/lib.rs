//! # Petalfield
//!
//! Pointer-reactive particle fields for an eight-day storybook, Rose Day
//! through Valentine's Day.
//!
//! Every day is a full-window section. Its background is a field of slowly
//! falling particles that scatter away from the pointer, and hovering the
//! card sets off a confetti burst that decays back into the ambient drift.
//! Each day also hides a small easter egg: tap counters, rapid-hover
//! streaks, secret titles and emoji showers.
//!
//! ## Quick Start
//!
//! ```ignore
//! use petalfield::prelude::*;
//!
//! let mut field = ParticleField::seeded(FieldParams::default(), 7);
//! let mut canvas = Canvas::new(800, 600);
//! field.resize(800.0, 600.0, true);
//!
//! let pointer = PointerCell::new();
//! pointer.set(Vec2::new(400.0, 300.0));
//! field.burst_default(Vec2::new(400.0, 300.0), Rgba::CONFETTI);
//! field.tick(pointer.get(), &mut canvas);
//! ```
//!
//! ## Layers
//!
//! - [`ParticleField`] is the simulation: an ordered list of [`Particle`]s
//!   stepped once per frame and drawn onto a [`Canvas`].
//! - [`FrameLoop`] is the cooperative frame scheduler. It owns at most one
//!   pending frame and never queues a backlog.
//! - [`SectionView`] hosts one day: its field, frame loop, layout and the
//!   easter-egg state machines from [`interaction`]. Gestures return the
//!   [`Cue`]s to play instead of playing them.
//! - [`Navigator`] decides which day is active and runs the curtain
//!   transition for jumps.
//! - [`window`] presents the active section through wgpu, with the card
//!   text, drawer and modal drawn by egui in [`overlay`]; [`export`] renders
//!   a day to PNG frames without a window.
//! - [`audio`] turns cues into short synthesised tones through rodio.
//!
//! ## Configuration
//!
//! [`AppConfig`] is plain JSON. Missing keys fall back to the defaults, so
//! a config containing only `{"start_day": "kiss"}` is valid.

pub mod audio;
pub mod canvas;
pub mod color;
pub mod config;
pub mod day;
pub mod error;
pub mod export;
pub mod field;
pub mod frame_loop;
pub mod gpu;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod navigation;
pub mod overlay;
pub mod params;
pub mod particle;
pub mod pointer;
pub mod section;
pub mod sound;
pub mod spawn;
pub mod window;

pub use canvas::Canvas;
pub use color::Rgba;
pub use config::AppConfig;
pub use day::{Day, DayConfig};
pub use audio::Speaker;
pub use error::{AppError, ConfigError, ExportError, GpuError, SoundError};
pub use export::{render_frames, RenderOptions, RenderReport};
pub use field::ParticleField;
pub use frame_loop::{Frame, FrameHandle, FrameLoop};
pub use glam::Vec2;
pub use navigation::{NavEvent, NavPhase, Navigator};
pub use overlay::OverlayAction;
pub use params::{FieldParams, Span};
pub use particle::{MotionMode, Particle};
pub use pointer::PointerCell;
pub use section::SectionView;
pub use sound::{Cue, CueSink, SoundBoard};
pub use spawn::SpawnContext;
pub use window::{run, Storybook};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use petalfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::Canvas;
    pub use crate::color::Rgba;
    pub use crate::config::AppConfig;
    pub use crate::day::{Day, DayConfig};
    pub use crate::field::ParticleField;
    pub use crate::frame_loop::FrameLoop;
    pub use crate::input::{Gesture, Input, KeyCode, MouseButton};
    pub use crate::navigation::Navigator;
    pub use crate::params::FieldParams;
    pub use crate::particle::{MotionMode, Particle};
    pub use crate::pointer::PointerCell;
    pub use crate::section::SectionView;
    pub use crate::sound::{Cue, CueSink, SoundBoard};
    pub use crate::Vec2;
}
