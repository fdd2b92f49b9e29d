//! Spawn context for particle initialization.
//!
//! Wraps the field's RNG with helpers for the distributions particles are
//! sampled from, so the motion code reads as physics rather than RNG plumbing.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::params::{FieldParams, Span};

/// Source of randomness for spawning and re-sampling particles.
///
/// ```ignore
/// let mut ctx = SpawnContext::seeded(7);
/// let position = ctx.random_in_rect(Vec2::new(800.0, 600.0));
/// let velocity = ctx.burst_velocity(&FieldParams::default());
/// ```
#[derive(Debug, Clone)]
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Context seeded from the wall clock, different every run.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::seeded(seed)
    }

    /// Context with a fixed seed, for reproducible runs and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the inclusive span.
    #[inline]
    pub fn sample(&mut self, span: Span) -> f32 {
        self.rng.gen_range(span.min..=span.max)
    }

    // ========== Position helpers ==========

    /// Uniform point in `[0, size.x) x [0, size.y)`.
    pub fn random_in_rect(&mut self, size: Vec2) -> Vec2 {
        let x = self.random() * size.x;
        let y = self.random() * size.y;
        // Products can round up onto the far edge.
        Vec2::new(
            if x < size.x { x } else { 0.0 },
            if y < size.y { y } else { 0.0 },
        )
    }

    /// Point uniformly jittered by up to `radius` on each axis.
    pub fn jitter(&mut self, center: Vec2, radius: f32) -> Vec2 {
        center
            + Vec2::new(
                (self.random() * 2.0 - 1.0) * radius,
                (self.random() * 2.0 - 1.0) * radius,
            )
    }

    // ========== Direction/velocity helpers ==========

    /// Uniform angle in `[0, 2π)`.
    pub fn random_angle(&mut self) -> f32 {
        self.random() * TAU
    }

    /// Unit vector with a uniformly distributed angle.
    pub fn random_direction(&mut self) -> Vec2 {
        Vec2::from_angle(self.random_angle())
    }

    /// Gentle falling velocity of an ambient particle.
    pub fn drift_velocity(&mut self, params: &FieldParams) -> Vec2 {
        Vec2::new(self.sample(params.drift_vx), self.sample(params.drift_vy))
    }

    /// Explosive outward velocity of a freshly burst particle.
    pub fn burst_velocity(&mut self, params: &FieldParams) -> Vec2 {
        self.random_direction() * self.sample(params.burst_speed)
    }
}

impl Default for SpawnContext {
    fn default() -> Self {
        Self::new()
    }
}
