//! CPU pixel surface the particle field draws into.
//!
//! The canvas is a tightly packed RGBA8 buffer with straight alpha, cleared to
//! transparent every frame. Particles are filled circles composited with
//! source-over blending and a one-pixel anti-aliased rim. The same bytes are
//! uploaded to the GPU by the presenter and written to PNG by the exporter.

use std::path::Path;

use glam::{Vec2, Vec4};

use crate::color::Rgba;
use crate::error::ExportError;

/// One pixel, `[r, g, b, a]`.
pub type Pixel = [u8; 4];

/// A drawable RGBA8 surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Canvas {
    /// Create a transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size as a float vector, the bounds particles live in.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Reallocate to a new size. Contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, [0; 4]);
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.pixels.fill([0; 4]);
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Raw bytes, row-major, 4 bytes per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Fill a circle, blending over what is already there.
    ///
    /// Portions outside the canvas are clipped.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if self.is_empty() || radius <= 0.0 || color.a <= 0.0 {
            return;
        }
        let reach = radius + 0.5;
        let x0 = (center.x - reach).floor().max(0.0) as i64;
        let y0 = (center.y - reach).floor().max(0.0) as i64;
        let x1 = ((center.x + reach).ceil() as i64).min(self.width as i64 - 1);
        let y1 = ((center.y + reach).ceil() as i64).min(self.height as i64 - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }

        let src = color.to_vec4();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let pixel_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (reach - pixel_center.distance(center)).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let idx = y as usize * self.width as usize + x as usize;
                self.pixels[idx] = blend_over(self.pixels[idx], src, coverage);
            }
        }
    }

    /// Encode the canvas as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let image = image::RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec())
            .ok_or(ExportError::BufferSize {
                width: self.width,
                height: self.height,
            })?;
        image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

/// Source-over with straight alpha.
fn blend_over(dst: Pixel, src: Vec4, coverage: f32) -> Pixel {
    let sa = src.w * coverage;
    let d = Vec4::new(dst[0] as f32, dst[1] as f32, dst[2] as f32, dst[3] as f32) / 255.0;
    let out_a = sa + d.w * (1.0 - sa);
    if out_a <= 0.0 {
        return [0; 4];
    }
    let rgb = (src.truncate() * sa + d.truncate() * d.w * (1.0 - sa)) / out_a;
    let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [to_u8(rgb.x), to_u8(rgb.y), to_u8(rgb.z), to_u8(out_a)]
}
