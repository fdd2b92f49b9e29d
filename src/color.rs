//! RGBA colours for particles and backgrounds.
//!
//! Colours are written the way a stylesheet writes them: `rgba(255, 180, 180, 0.9)`,
//! `rgb(12, 10, 24)` or `#ff3366`. Channels are 8-bit, alpha is a float in `[0, 1]`.
//! The serde representation is the CSS string, so configs stay human-editable.

use std::fmt;
use std::str::FromStr;

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// An sRGB colour with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Ambient particles of the section the reader is looking at.
    pub const AMBIENT_ACTIVE: Rgba = Rgba::new(255, 255, 255, 0.6);
    /// Ambient particles of every other section.
    pub const AMBIENT_IDLE: Rgba = Rgba::new(255, 255, 255, 0.15);
    /// Confetti released when the card is hovered.
    pub const CONFETTI: Rgba = Rgba::new(255, 180, 180, 0.9);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same colour with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Channel-wise blend towards `other`, `t = 0` keeps `self`.
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Channels as `0..=1` floats, still in sRGB space.
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a,
        )
    }

    /// Channels converted to linear light, for GPU uniforms.
    pub fn to_linear(self) -> Vec4 {
        let c = self.to_vec4();
        Vec4::new(srgb_to_linear(c.x), srgb_to_linear(c.y), srgb_to_linear(c.z), c.w)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ConfigError::Color(s.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(err());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
            return Ok(Rgba::opaque(channel(0)?, channel(2)?, channel(4)?));
        }

        let (body, has_alpha) = if let Some(rest) = trimmed.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = trimmed.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(err());
        };
        let body = body.strip_suffix(')').ok_or_else(err)?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != if has_alpha { 4 } else { 3 } {
            return Err(err());
        }

        let channel = |p: &str| p.parse::<u8>().map_err(|_| err());
        let alpha = if has_alpha {
            let a: f32 = parts[3].parse().map_err(|_| err())?;
            if !(0.0..=1.0).contains(&a) {
                return Err(err());
            }
            a
        } else {
            1.0
        };

        Ok(Rgba::new(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }
}

impl TryFrom<String> for Rgba {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgba() {
        let c: Rgba = "rgba(255, 180, 180, 0.9)".parse().unwrap();
        assert_eq!(c, Rgba::CONFETTI);
    }

    #[test]
    fn test_parse_rgb_and_hex() {
        assert_eq!("rgb(1,2,3)".parse::<Rgba>().unwrap(), Rgba::opaque(1, 2, 3));
        assert_eq!("#ff3366".parse::<Rgba>().unwrap(), Rgba::opaque(255, 0x33, 0x66));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("hsl(0, 100%, 50%)".parse::<Rgba>().is_err());
        assert!("rgba(255, 255, 255)".parse::<Rgba>().is_err());
        assert!("rgba(300, 0, 0, 1)".parse::<Rgba>().is_err());
        assert!("rgba(0, 0, 0, 1.5)".parse::<Rgba>().is_err());
        assert!("#12345".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_serde_uses_css_string() {
        let json = serde_json::to_string(&Rgba::AMBIENT_IDLE).unwrap();
        assert_eq!(json, "\"rgba(255, 255, 255, 0.15)\"");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgba::AMBIENT_IDLE);
    }

    #[test]
    fn test_lerp() {
        let black = Rgba::opaque(0, 0, 0);
        let white = Rgba::opaque(255, 255, 255);
        assert_eq!(black.lerp(white, 0.0), black);
        assert_eq!(black.lerp(white, 1.0), white);
        assert_eq!(black.lerp(white, 0.5), Rgba::opaque(128, 128, 128));
    }

    #[test]
    fn test_linear_endpoints() {
        let white = Rgba::opaque(255, 255, 255).to_linear();
        assert!((white.x - 1.0).abs() < 1e-5);
        let black = Rgba::opaque(0, 0, 0).to_linear();
        assert_eq!(black.x, 0.0);
    }
}
