//! Headless rendering of a day to numbered PNG files.
//!
//! The exporter drives a [`SectionView`] with a synthetic clock through a
//! fixed script: the pointer sweeps across the middle of the frame, entering
//! the card on the way, and a confetti burst goes off at the pointer every
//! `burst_every` frames. Frames are composited over the day's backdrop unless
//! a transparent particle layer is requested.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use glam::Vec2;

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::config::AppConfig;
use crate::day::Day;
use crate::error::ExportError;
use crate::input::RegionTracker;
use crate::layout::Region;
use crate::section::SectionView;
use crate::sound::{Cue, RecordingSink, SoundBoard};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub day: Day,
    pub frames: u32,
    pub width: u32,
    pub height: u32,
    pub seed: Option<u64>,
    /// Frames between scripted bursts; 0 disables them.
    pub burst_every: u32,
    /// Write the bare particle layer instead of the composited frame.
    pub transparent: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            day: Day::Rose,
            frames: 60,
            width: 640,
            height: 400,
            seed: Some(1),
            burst_every: 20,
            transparent: false,
        }
    }
}

/// What a render produced.
#[derive(Debug, Default)]
pub struct RenderReport {
    pub frames: Vec<PathBuf>,
    /// Cues the script triggered, in order.
    pub cues: Vec<Cue>,
}

/// Render `options.frames` frames of one day into `out_dir`.
pub fn render_frames(
    config: &AppConfig,
    options: &RenderOptions,
    out_dir: &Path,
) -> Result<RenderReport, ExportError> {
    fs::create_dir_all(out_dir).map_err(|source| ExportError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let day_config = config.day(options.day).clone();
    let backdrop = day_config.backdrop();
    let seed = options.seed.or(config.seed);
    let mut section = SectionView::new(day_config, config.params.clone(), config.fps, seed);
    section.set_emoji_markers(true);
    section.resize(options.width, options.height);

    let mut board = SoundBoard::new(RecordingSink::default());
    let mut tracker = RegionTracker::default();
    let interval = Duration::from_secs_f32(1.0 / config.fps);
    let t0 = Instant::now();

    for cue in section.set_active(true, t0) {
        board.play(cue);
    }

    let size = Vec2::new(options.width as f32, options.height as f32);
    let mut report = RenderReport::default();
    for i in 0..options.frames {
        let now = t0 + interval * i;
        let pointer = sweep(size, i, options.frames);

        let change = tracker.update(Some(section.layout().hit(pointer)));
        if change.entered_card {
            for cue in section.card_entered(now) {
                board.play(cue);
            }
        }
        if change.entered == Some(Region::Icon) {
            for cue in section.icon_entered(pointer, now) {
                board.play(cue);
            }
        }
        if options.burst_every > 0 && i > 0 && i % options.burst_every == 0 {
            section.field_mut().burst_default(pointer, Rgba::CONFETTI);
        }

        if section.frame(now, Some(pointer)).is_none() {
            section.render(now, Some(pointer));
        }

        let path = out_dir.join(format!("frame_{i:04}.png"));
        if options.transparent {
            section.canvas().save_png(&path)?;
        } else {
            compose(section.canvas(), backdrop).save(&path)?;
        }
        report.frames.push(path);
    }

    report.cues = board.sink().played.clone();
    log::info!(
        "rendered {} frames of {} to {}",
        report.frames.len(),
        options.day,
        out_dir.display()
    );
    Ok(report)
}

/// Pointer position for frame `i`: left to right along the vertical middle.
fn sweep(size: Vec2, i: u32, frames: u32) -> Vec2 {
    let t = if frames > 1 {
        i as f32 / (frames - 1) as f32
    } else {
        0.5
    };
    Vec2::new(size.x * t, size.y * 0.5)
}

/// Flatten the particle layer over an opaque backdrop.
pub fn compose(canvas: &Canvas, backdrop: Rgba) -> image::RgbaImage {
    let back = backdrop.to_vec4();
    image::RgbaImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let [r, g, b, a] = canvas.pixel(x, y).unwrap_or([0; 4]);
        let alpha = a as f32 / 255.0;
        let mix = |src: u8, dst: f32| {
            let v = src as f32 / 255.0 * alpha + dst * (1.0 - alpha);
            (v * 255.0).round().clamp(0.0, 255.0) as u8
        };
        image::Rgba([mix(r, back.x), mix(g, back.y), mix(b, back.z), 255])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_empty_canvas_is_backdrop() {
        let canvas = Canvas::new(2, 2);
        let img = compose(&canvas, Rgba::opaque(15, 23, 42));
        assert_eq!(img.get_pixel(1, 1).0, [15, 23, 42, 255]);
    }

    #[test]
    fn test_compose_opaque_particle_wins() {
        let mut canvas = Canvas::new(8, 8);
        canvas.fill_circle(Vec2::new(4.0, 4.0), 3.0, Rgba::opaque(255, 255, 255));
        let img = compose(&canvas, Rgba::opaque(255, 0, 0));
        assert_eq!(img.get_pixel(4, 4).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_sweep_ends() {
        let size = Vec2::new(100.0, 50.0);
        assert_eq!(sweep(size, 0, 11), Vec2::new(0.0, 25.0));
        assert_eq!(sweep(size, 10, 11), Vec2::new(100.0, 25.0));
        assert_eq!(sweep(size, 0, 1), Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_render_writes_frames() {
        let dir = tempfile::tempdir().unwrap();
        let options = RenderOptions {
            day: Day::Hug,
            frames: 5,
            width: 64,
            height: 48,
            burst_every: 2,
            ..RenderOptions::default()
        };
        let report = render_frames(&AppConfig::default(), &options, dir.path()).unwrap();
        assert_eq!(report.frames.len(), 5);
        for path in &report.frames {
            assert!(path.exists());
        }
        assert_eq!(report.cues.first(), Some(&Cue::Chime));
        assert!(report.cues.contains(&Cue::Hover));

        let first = image::open(&report.frames[0]).unwrap();
        assert_eq!((first.width(), first.height()), (64, 48));
    }

    #[test]
    fn test_transparent_layer() {
        let dir = tempfile::tempdir().unwrap();
        let options = RenderOptions {
            frames: 1,
            width: 64,
            height: 64,
            transparent: true,
            ..RenderOptions::default()
        };
        let report = render_frames(&AppConfig::default(), &options, dir.path()).unwrap();
        let img = image::open(&report.frames[0]).unwrap().to_rgba8();
        assert!(img.pixels().any(|p| p.0[3] < 255));
    }
}
