//! Behavioural properties of the particle field, driven through the public API.

use petalfield::{
    Canvas, FieldParams, MotionMode, Particle, ParticleField, PointerCell, Rgba, SpawnContext,
    Vec2,
};

const BOUNDS: Vec2 = Vec2::new(400.0, 300.0);

fn field(seed: u64) -> ParticleField {
    let mut field = ParticleField::seeded(FieldParams::default(), seed);
    field.resize(BOUNDS.x, BOUNDS.y, true);
    field
}

fn in_bounds(p: &Particle, bounds: Vec2) -> bool {
    (0.0..bounds.x).contains(&p.position.x) && (0.0..bounds.y).contains(&p.position.y)
}

fn mode_is_consistent(mode: MotionMode) -> bool {
    let (friction, gravity) = (mode.friction(), mode.gravity());
    match mode {
        MotionMode::Drift => friction == 1.0 && gravity == 0.0,
        MotionMode::Burst { .. } => friction < 1.0 && gravity > 0.0,
    }
}

#[test]
fn positions_stay_wrapped() {
    let mut field = field(1);
    let mut canvas = Canvas::new(400, 300);
    let pointers = [
        Some(Vec2::new(200.0, 150.0)),
        Some(Vec2::new(0.0, 0.0)),
        None,
        Some(Vec2::new(399.0, 299.0)),
    ];

    for step in 0..400 {
        if step % 50 == 0 {
            field.burst(Vec2::new(5.0, 295.0), 30, Rgba::CONFETTI);
        }
        field.tick(pointers[step % pointers.len()], &mut canvas);
        assert!(
            field.particles().iter().all(|p| in_bounds(p, BOUNDS)),
            "particle escaped at step {step}"
        );
    }
}

#[test]
fn motion_modes_are_exclusive() {
    let mut field = field(2);
    field.burst(Vec2::new(200.0, 150.0), 60, Rgba::CONFETTI);
    for _ in 0..150 {
        field.step(Some(Vec2::new(100.0, 100.0)));
        assert!(field.particles().iter().all(|p| mode_is_consistent(p.mode())));
    }
}

#[test]
fn bursts_settle_into_drift() {
    // Terminal fall speed under burst is gravity * friction / (1 - friction);
    // keep it under the settle threshold so every particle can settle.
    let params = FieldParams {
        burst_gravity: 0.02,
        ..FieldParams::default()
    };
    let mut field = ParticleField::seeded(params, 3);
    field.resize(BOUNDS.x, BOUNDS.y, true);
    field.burst(Vec2::new(200.0, 150.0), 30, Rgba::CONFETTI);

    for _ in 0..100 {
        field.step(None);
    }
    assert!(field
        .particles()
        .iter()
        .all(|p| p.mode() == MotionMode::Drift && p.mode().friction() == 1.0));
}

#[test]
fn population_never_exceeds_cap() {
    let mut field = field(4);
    for i in 0..20 {
        field.burst(Vec2::new(10.0 * i as f32, 100.0), 30 + i, Rgba::CONFETTI);
        assert!(field.len() <= 200);
    }
    assert_eq!(field.len(), 200);
}

#[test]
fn resize_resets_to_ambient_drift() {
    let mut field = field(5);
    field.burst(Vec2::new(200.0, 150.0), 30, Rgba::CONFETTI);
    field.resize(400.0, 300.0, true);

    assert_eq!(field.len(), 80);
    assert!(field
        .particles()
        .iter()
        .all(|p| p.mode() == MotionMode::Drift && in_bounds(p, BOUNDS)));
}

#[test]
fn pointer_pushes_particle_away() {
    let params = FieldParams::default();
    let mut ctx = SpawnContext::seeded(6);
    let mut near = Particle::spawn(
        &mut ctx,
        &params,
        BOUNDS,
        Rgba::AMBIENT_ACTIVE,
        Some(Vec2::new(100.0, 100.0)),
        false,
    );
    let mut far = near.clone();
    let before = near.velocity;

    near.step(&mut ctx, &params, Some(Vec2::new(150.0, 100.0)), BOUNDS);
    far.step(&mut ctx, &params, Some(Vec2::new(1000.0, 1000.0)), BOUNDS);

    assert!(near.velocity.x < before.x);
    assert_eq!(far.velocity, before);
}

#[test]
fn offscreen_pointer_matches_no_pointer() {
    let mut absent = field(7);
    let mut offscreen = field(7);
    absent.burst(Vec2::new(200.0, 150.0), 30, Rgba::CONFETTI);
    offscreen.burst(Vec2::new(200.0, 150.0), 30, Rgba::CONFETTI);

    let cell = PointerCell::new();
    assert_eq!(cell.get(), None);

    for _ in 0..60 {
        absent.step(cell.get());
        offscreen.step(Some(PointerCell::OFFSCREEN));
    }
    for (a, b) in absent.particles().iter().zip(offscreen.particles()) {
        assert!((a.position - b.position).length() < 1e-4);
        assert!((a.velocity - b.velocity).length() < 1e-4);
    }
}

#[test]
fn burst_on_empty_field_spawns_moving_particles() {
    let params = FieldParams {
        ambient_count: 0,
        ..FieldParams::default()
    };
    let mut field = ParticleField::seeded(params, 8);
    field.resize(BOUNDS.x, BOUNDS.y, true);
    assert!(field.is_empty());

    field.burst(Vec2::new(200.0, 150.0), 30, Rgba::CONFETTI);

    assert_eq!(field.len(), 30);
    assert!(field
        .particles()
        .iter()
        .all(|p| p.mode().is_burst() && p.velocity.length() > 0.0));
}

#[test]
fn default_bursts_fall_at_terminal_speed() {
    // With the stock constants the fall speed converges on
    // gravity * friction / (1 - friction), above the settle threshold, so a
    // burst that has not settled on its way through zero keeps falling.
    let params = FieldParams {
        ambient_count: 0,
        ..FieldParams::default()
    };
    let terminal = params.burst_gravity * params.burst_friction / (1.0 - params.burst_friction);
    assert!(terminal > params.settle_threshold);

    let mut field = ParticleField::seeded(params, 3);
    field.resize(BOUNDS.x, BOUNDS.y, true);
    field.burst(Vec2::new(200.0, 150.0), 30, Rgba::CONFETTI);
    for _ in 0..300 {
        field.step(None);
    }

    let falling: Vec<&Particle> = field
        .particles()
        .iter()
        .filter(|p| p.mode().is_burst())
        .collect();
    assert!(!falling.is_empty());
    for p in falling {
        assert!((p.velocity.y - terminal).abs() < 0.01, "vy = {}", p.velocity.y);
        assert!(p.velocity.x.abs() < 0.01, "vx = {}", p.velocity.x);
    }
}
