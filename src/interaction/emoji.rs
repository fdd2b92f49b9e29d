use std::time::{Duration, Instant};

use glam::Vec2;

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::spawn::SpawnContext;

/// An emoji floating up from where it was spawned.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingEmoji {
    pub id: u64,
    pub glyph: char,
    pub position: Vec2,
    pub appear_at: Instant,
    pub expires_at: Instant,
}

impl FloatingEmoji {
    /// Distance travelled upwards over a full lifetime, in pixels.
    pub const RISE: f32 = 100.0;

    pub fn is_visible(&self, now: Instant) -> bool {
        now >= self.appear_at && now < self.expires_at
    }

    /// Fraction of the lifetime elapsed at `now`, in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        let life = self.expires_at.saturating_duration_since(self.appear_at);
        if life.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.appear_at);
        (elapsed.as_secs_f32() / life.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Where the emoji is drawn at `now`.
    pub fn current_position(&self, now: Instant) -> Vec2 {
        self.position - Vec2::Y * Self::RISE * self.progress(now)
    }
}

/// Stand-in colour for a glyph when drawn as a disc.
pub fn glyph_color(glyph: char) -> Rgba {
    match glyph {
        '🌹' => Rgba::opaque(220, 20, 60),
        '🍫' => Rgba::opaque(123, 63, 0),
        '💋' => Rgba::opaque(255, 20, 147),
        _ => Rgba::opaque(255, 105, 180),
    }
}

/// The set of emoji currently scheduled or on screen.
#[derive(Debug, Clone)]
pub struct EmojiShower {
    emojis: Vec<FloatingEmoji>,
    next_id: u64,
    lifetime: Duration,
}

impl Default for EmojiShower {
    fn default() -> Self {
        Self::new(Self::LIFETIME)
    }
}

impl EmojiShower {
    pub const LIFETIME: Duration = Duration::from_millis(1500);

    pub fn new(lifetime: Duration) -> Self {
        Self {
            emojis: Vec::new(),
            next_id: 0,
            lifetime,
        }
    }

    /// Spawn one emoji appearing at `now`.
    pub fn spawn(&mut self, glyph: char, position: Vec2, now: Instant) -> u64 {
        self.spawn_at(glyph, position, now)
    }

    /// Spawn `count` emoji around `center`, the i-th appearing `i * stagger`
    /// after `now` and offset by up to `jitter` on each axis.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn_staggered(
        &mut self,
        ctx: &mut SpawnContext,
        glyph: char,
        center: Vec2,
        count: usize,
        stagger: Duration,
        jitter: f32,
        now: Instant,
    ) {
        for i in 0..count {
            let position = ctx.jitter(center, jitter);
            self.spawn_at(glyph, position, now + stagger * i as u32);
        }
    }

    fn spawn_at(&mut self, glyph: char, position: Vec2, appear_at: Instant) -> u64 {
        self.next_id += 1;
        self.emojis.push(FloatingEmoji {
            id: self.next_id,
            glyph,
            position,
            appear_at,
            expires_at: appear_at + self.lifetime,
        });
        self.next_id
    }

    /// Emoji on screen at `now`.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &FloatingEmoji> {
        self.emojis.iter().filter(move |e| e.is_visible(now))
    }

    /// Drop every emoji whose lifetime has ended.
    pub fn prune(&mut self, now: Instant) {
        self.emojis.retain(|e| now < e.expires_at);
    }

    /// Scheduled plus visible emoji.
    pub fn len(&self) -> usize {
        self.emojis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }

    pub fn clear(&mut self) {
        self.emojis.clear();
    }

    /// Draw the visible emoji as fading discs.
    pub fn draw(&self, canvas: &mut Canvas, now: Instant) {
        for emoji in self.visible(now) {
            let fade = 1.0 - emoji.progress(now);
            let color = glyph_color(emoji.glyph).with_alpha(fade);
            canvas.fill_circle(emoji.current_position(now), 14.0, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_single_emoji_lifetime() {
        let t0 = Instant::now();
        let mut shower = EmojiShower::default();
        let id = shower.spawn('💋', Vec2::new(10.0, 20.0), t0);

        let visible: Vec<_> = shower.visible(t0).map(|e| e.id).collect();
        assert_eq!(visible, vec![id]);
        assert_eq!(shower.visible(t0 + ms(1500)).count(), 0);

        shower.prune(t0 + ms(1499));
        assert_eq!(shower.len(), 1);
        shower.prune(t0 + ms(1500));
        assert!(shower.is_empty());
    }

    #[test]
    fn test_staggered_spawn() {
        let t0 = Instant::now();
        let mut ctx = SpawnContext::seeded(1);
        let mut shower = EmojiShower::default();
        let center = Vec2::new(200.0, 200.0);
        shower.spawn_staggered(&mut ctx, '🍫', center, 5, ms(100), 50.0, t0);

        assert_eq!(shower.len(), 5);
        assert_eq!(shower.visible(t0).count(), 1);
        assert_eq!(shower.visible(t0 + ms(250)).count(), 3);
        assert_eq!(shower.visible(t0 + ms(400)).count(), 5);
        // First one gone, last one still up.
        assert_eq!(shower.visible(t0 + ms(1550)).count(), 4);

        for emoji in shower.visible(t0 + ms(400)) {
            let offset = (emoji.position - center).abs();
            assert!(offset.x <= 50.0 && offset.y <= 50.0);
        }
    }

    #[test]
    fn test_rises_while_alive() {
        let t0 = Instant::now();
        let mut shower = EmojiShower::default();
        shower.spawn('🌹', Vec2::new(0.0, 300.0), t0);
        let emoji = shower.visible(t0).next().unwrap().clone();
        assert_eq!(emoji.current_position(t0).y, 300.0);
        assert!((emoji.current_position(t0 + ms(750)).y - 250.0).abs() < 1e-3);
        assert!((emoji.progress(t0 + ms(3000)) - 1.0).abs() < f32::EPSILON);
    }
}
