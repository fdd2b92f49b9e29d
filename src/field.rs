//! The particle population of one storybook section.
//!
//! A [`ParticleField`] owns an ordered list of particles bound to the size of
//! its canvas. The host drives it once per frame; the field never schedules
//! itself.
//!
//! # Lifecycle
//!
//! - [`resize`](ParticleField::resize) discards everything and respawns the
//!   ambient drift population.
//! - [`burst`](ParticleField::burst) appends transient burst particles, then
//!   trims the oldest particles past the population cap. Ambient particles
//!   are trimmed like any other when they are the oldest.
//! - [`tick`](ParticleField::tick) steps and draws every particle.
//!
//! # Example
//!
//! ```ignore
//! let mut field = ParticleField::new(FieldParams::default());
//! let mut canvas = Canvas::new(800, 600);
//! field.resize(800.0, 600.0, true);
//!
//! // In your frame callback:
//! field.tick(pointer.get(), &mut canvas);
//!
//! // On hover:
//! field.burst(canvas.size() / 2.0, 30, Rgba::CONFETTI);
//! ```

use glam::Vec2;

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::params::FieldParams;
use crate::particle::Particle;
use crate::spawn::SpawnContext;

/// Driver for one section's particles.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    /// `None` while the field is inert (no usable dimensions yet).
    bounds: Option<Vec2>,
    active: bool,
    params: FieldParams,
    ctx: SpawnContext,
}

impl ParticleField {
    /// An empty, inert field. Call [`resize`](Self::resize) before ticking.
    pub fn new(params: FieldParams) -> Self {
        Self::with_context(params, SpawnContext::new())
    }

    /// An empty field drawing randomness from `ctx`.
    pub fn with_context(params: FieldParams, ctx: SpawnContext) -> Self {
        Self {
            particles: Vec::new(),
            bounds: None,
            active: false,
            params,
            ctx,
        }
    }

    /// An empty field with a fixed seed.
    pub fn seeded(params: FieldParams, seed: u64) -> Self {
        Self::with_context(params, SpawnContext::seeded(seed))
    }

    // ========== Queries ==========

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Current bounds, or `None` while inert.
    pub fn bounds(&self) -> Option<Vec2> {
        self.bounds
    }

    /// Whether the last resize marked this field as the reader's focus.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    /// Colour of the ambient population for an activity hint.
    pub fn ambient_color(is_active: bool) -> Rgba {
        if is_active {
            Rgba::AMBIENT_ACTIVE
        } else {
            Rgba::AMBIENT_IDLE
        }
    }

    // ========== Host calls ==========

    /// Rebind to a new size and respawn the ambient population.
    ///
    /// Non-positive or NaN dimensions leave the field empty and inert; a
    /// zero-sized layout during mount is expected and not an error.
    pub fn resize(&mut self, width: f32, height: f32, is_active: bool) {
        self.particles.clear();
        self.active = is_active;

        if !(width > 0.0 && height > 0.0) {
            log::debug!("particle field left inert at {}x{}", width, height);
            self.bounds = None;
            return;
        }

        let bounds = Vec2::new(width, height);
        self.bounds = Some(bounds);

        let color = Self::ambient_color(is_active);
        let params = &self.params;
        let ctx = &mut self.ctx;
        self.particles.extend(
            (0..params.ambient_count)
                .map(|_| Particle::spawn(ctx, params, bounds, color, None, false)),
        );
        log::trace!(
            "respawned {} ambient particles in {}x{}",
            self.particles.len(),
            width,
            height
        );
    }

    /// Clear `canvas`, then step and draw every particle in list order.
    pub fn tick(&mut self, pointer: Option<Vec2>, canvas: &mut Canvas) {
        canvas.clear();
        let Some(bounds) = self.bounds else {
            return;
        };
        for particle in &mut self.particles {
            particle.step(&mut self.ctx, &self.params, pointer, bounds);
            particle.draw(canvas);
        }
    }

    /// Advance every particle one tick without drawing.
    pub fn step(&mut self, pointer: Option<Vec2>) {
        let Some(bounds) = self.bounds else {
            return;
        };
        for particle in &mut self.particles {
            particle.step(&mut self.ctx, &self.params, pointer, bounds);
        }
    }

    /// Draw every particle in list order onto `canvas` without clearing it.
    pub fn draw(&self, canvas: &mut Canvas) {
        for particle in &self.particles {
            particle.draw(canvas);
        }
    }

    /// Release `count` burst particles at `origin`, then enforce the cap.
    ///
    /// Ignored while the field is inert.
    pub fn burst(&mut self, origin: Vec2, count: usize, color: Rgba) {
        let Some(bounds) = self.bounds else {
            log::debug!("burst ignored on inert particle field");
            return;
        };

        let params = &self.params;
        let ctx = &mut self.ctx;
        self.particles.extend(
            (0..count).map(|_| Particle::spawn(ctx, params, bounds, color, Some(origin), true)),
        );

        let cap = self.params.max_particles;
        if self.particles.len() > cap {
            let excess = self.particles.len() - cap;
            self.particles.drain(..excess);
            log::trace!("trimmed {} oldest particles", excess);
        }
    }

    /// Burst with the configured default count.
    pub fn burst_default(&mut self, origin: Vec2, color: Rgba) {
        let count = self.params.burst_count;
        self.burst(origin, count, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::MotionMode;

    fn field() -> ParticleField {
        ParticleField::seeded(FieldParams::default(), 99)
    }

    #[test]
    fn test_resize_spawns_ambient() {
        let mut f = field();
        f.resize(400.0, 300.0, true);
        assert_eq!(f.len(), 80);
        assert!(f.is_active());
        assert!(f
            .particles()
            .iter()
            .all(|p| p.mode() == MotionMode::Drift && p.color() == Rgba::AMBIENT_ACTIVE));
    }

    #[test]
    fn test_idle_alpha_tier() {
        let mut f = field();
        f.resize(400.0, 300.0, false);
        assert!(f.particles().iter().all(|p| p.color() == Rgba::AMBIENT_IDLE));
    }

    #[test]
    fn test_resize_discards_bursts() {
        let mut f = field();
        f.resize(400.0, 300.0, true);
        f.burst(Vec2::new(10.0, 10.0), 30, Rgba::CONFETTI);
        assert_eq!(f.len(), 110);
        f.resize(640.0, 480.0, true);
        assert_eq!(f.len(), 80);
        assert!(f.particles().iter().all(|p| !p.mode().is_burst()));
    }

    #[test]
    fn test_zero_size_is_inert() {
        let mut f = field();
        f.resize(0.0, 300.0, true);
        assert!(f.is_empty());
        assert_eq!(f.bounds(), None);

        f.burst(Vec2::ZERO, 30, Rgba::CONFETTI);
        assert!(f.is_empty());

        let mut canvas = Canvas::new(4, 4);
        f.tick(Some(Vec2::ONE), &mut canvas);
        assert!(f.is_empty());

        f.resize(-5.0, f32::NAN, false);
        assert!(f.is_empty());
    }

    #[test]
    fn test_cap_trims_oldest_first() {
        let mut f = field();
        f.resize(400.0, 300.0, true);
        for _ in 0..4 {
            f.burst(Vec2::new(200.0, 150.0), 30, Rgba::CONFETTI);
        }
        // 80 + 120 = 200, exactly at the cap.
        assert_eq!(f.len(), 200);
        assert_eq!(f.particles()[0].color(), Rgba::AMBIENT_ACTIVE);

        f.burst(Vec2::new(200.0, 150.0), 30, Rgba::CONFETTI);
        assert_eq!(f.len(), 200);
        // The first thirty ambient particles were dropped.
        let ambient = f
            .particles()
            .iter()
            .filter(|p| p.color() == Rgba::AMBIENT_ACTIVE)
            .count();
        assert_eq!(ambient, 50);
        assert!(f.particles()[199].mode().is_burst());
    }

    #[test]
    fn test_tick_draws_onto_cleared_canvas() {
        let mut f = field();
        f.resize(64.0, 64.0, true);
        let mut canvas = Canvas::new(64, 64);
        canvas.fill_circle(Vec2::new(1.0, 1.0), 60.0, Rgba::opaque(9, 9, 9));
        f.tick(None, &mut canvas);
        // Old content is gone; some particle pixels exist.
        assert!(canvas.as_bytes().chunks(4).any(|px| px[3] > 0));
        assert!(canvas.as_bytes().chunks(4).all(|px| px[0] != 9 || px[3] == 0));
    }

    #[test]
    fn test_step_then_draw_matches_tick() {
        let mut a = field();
        let mut b = field();
        a.resize(100.0, 80.0, true);
        b.resize(100.0, 80.0, true);

        let mut canvas_a = Canvas::new(100, 80);
        let mut canvas_b = Canvas::new(100, 80);
        let pointer = Some(Vec2::new(50.0, 40.0));
        a.tick(pointer, &mut canvas_a);
        b.step(pointer);
        canvas_b.clear();
        b.draw(&mut canvas_b);

        assert_eq!(a.particles(), b.particles());
        assert_eq!(canvas_a.as_bytes(), canvas_b.as_bytes());
    }

    #[test]
    fn test_burst_default_uses_params() {
        let mut f = field();
        f.resize(400.0, 300.0, true);
        f.burst_default(Vec2::new(1.0, 1.0), Rgba::CONFETTI);
        assert_eq!(f.len(), 110);
    }
}
