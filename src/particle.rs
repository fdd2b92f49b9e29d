//! A single simulated point and its motion rule.
//!
//! # Motion modes
//!
//! | Mode | Friction | Gravity | Spawned by |
//! |------|----------|---------|------------|
//! | [`MotionMode::Drift`] | 1.0 | 0.0 | resize (ambient population) |
//! | [`MotionMode::Burst`] | < 1.0 | > 0.0 | [`ParticleField::burst`](crate::ParticleField::burst) |
//!
//! A burst particle decays under friction and settles back into drift, in
//! place, once it has slowed down on both axes.
//!
//! # Step order
//!
//! Integrate, gravity, phase, friction and settle, wrap, then pointer
//! repulsion. Repulsion runs last so the push of this tick is not damped by
//! this tick's friction.

use glam::Vec2;

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::params::FieldParams;
use crate::spawn::SpawnContext;

/// How a particle is currently moving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionMode {
    /// Ambient fall with no decay.
    Drift,
    /// Explosive outward flight that decays under friction and gravity.
    Burst { friction: f32, gravity: f32 },
}

impl MotionMode {
    /// Velocity multiplier applied each step.
    #[inline]
    pub fn friction(&self) -> f32 {
        match self {
            MotionMode::Drift => 1.0,
            MotionMode::Burst { friction, .. } => *friction,
        }
    }

    /// Downward acceleration applied each step.
    #[inline]
    pub fn gravity(&self) -> f32 {
        match self {
            MotionMode::Drift => 0.0,
            MotionMode::Burst { gravity, .. } => *gravity,
        }
    }

    #[inline]
    pub fn is_burst(&self) -> bool {
        matches!(self, MotionMode::Burst { .. })
    }
}

/// One point of a [`ParticleField`](crate::ParticleField).
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    radius: f32,
    color: Rgba,
    mode: MotionMode,
    phase: f32,
    phase_speed: f32,
}

impl Particle {
    /// Spawn a particle inside `bounds`.
    ///
    /// Without an explicit `origin` the position is uniform within the bounds.
    pub fn spawn(
        ctx: &mut SpawnContext,
        params: &FieldParams,
        bounds: Vec2,
        color: Rgba,
        origin: Option<Vec2>,
        burst: bool,
    ) -> Self {
        let position = origin.unwrap_or_else(|| ctx.random_in_rect(bounds));
        let radius = ctx.sample(params.radius);
        let phase = ctx.random_angle();
        let phase_speed = ctx.random() * params.max_phase_speed;

        let (velocity, mode) = if burst {
            (
                ctx.burst_velocity(params),
                MotionMode::Burst {
                    friction: params.burst_friction,
                    gravity: params.burst_gravity,
                },
            )
        } else {
            (ctx.drift_velocity(params), MotionMode::Drift)
        };

        Self {
            position,
            velocity,
            radius,
            color,
            mode,
            phase,
            phase_speed,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn color(&self) -> Rgba {
        self.color
    }

    #[inline]
    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Advance one tick.
    ///
    /// `pointer` is the latest pointer position in field coordinates, or
    /// `None` when no pointer is over the section.
    pub fn step(
        &mut self,
        ctx: &mut SpawnContext,
        params: &FieldParams,
        pointer: Option<Vec2>,
        bounds: Vec2,
    ) {
        self.position.x += self.velocity.x + self.phase.sin() * params.sway;
        self.position.y += self.velocity.y;
        self.velocity.y += self.mode.gravity();
        self.phase += self.phase_speed;

        if let MotionMode::Burst { friction, .. } = self.mode {
            self.velocity *= friction;
            let settled = self.velocity.x.abs() < params.settle_threshold
                && self.velocity.y.abs() < params.settle_threshold;
            if settled {
                self.mode = MotionMode::Drift;
                self.velocity = ctx.drift_velocity(params);
            }
        }

        self.position = wrap(self.position, bounds);

        if let Some(pointer) = pointer {
            self.repel_from(pointer, params);
        }
    }

    /// Push away from the pointer, stronger the closer it is.
    fn repel_from(&mut self, pointer: Vec2, params: &FieldParams) {
        let to_pointer = pointer - self.position;
        let distance = to_pointer.length();
        if distance < params.influence_radius {
            let force = (params.influence_radius - distance) / params.influence_radius;
            let push = force * params.push_strength;
            let angle = to_pointer.y.atan2(to_pointer.x);
            self.velocity -= Vec2::from_angle(angle) * push;
        }
    }

    /// Render as a filled circle.
    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.fill_circle(self.position, self.radius, self.color);
    }
}

/// Wrap a position into `[0, bounds.x) x [0, bounds.y)`.
///
/// Overshoot carries over to the opposite edge, so a particle leaving at
/// speed re-enters at the same speed.
pub fn wrap(position: Vec2, bounds: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(position.x, bounds.x), wrap_axis(position.y, bounds.y))
}

fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value >= 0.0 && value < extent {
        return value;
    }
    let wrapped = value.rem_euclid(extent);
    // Tiny negatives round up to `extent`.
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}
