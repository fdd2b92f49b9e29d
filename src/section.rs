//! One day of the storybook: its particle field plus its easter eggs.
//!
//! A [`SectionView`] owns everything a day needs on screen: the particle
//! field and the canvas it draws into, the frame loop that drives them, and
//! the interaction state machines. Gesture handlers apply their visual
//! effects in place and return the sound [`Cue`]s the host should play.
//!
//! | Day | Gesture | Effect |
//! |-----|---------|--------|
//! | all | card entered | `hover`, confetti burst at the centre |
//! | Valentine | 3 rapid card hovers | `surprise`, card glows, unlock message |
//! | Chocolate | 3 rapid icon hovers | `surprise`, five 🍫 |
//! | Valentine | icon tapped 5 times | `surprise`, surprise modal |
//! | Rose | icon tap | eight 🌹 |
//! | Teddy | icon tap | shake |
//! | Propose, Valentine | title tap | secret title, `chime` |
//! | Promise | description tap | lock, `click` |
//! | Hug | card tap | squeeze, `whoosh` |
//! | Kiss | double click | 💋, `chime` |

use std::time::{Duration, Instant};

use glam::Vec2;

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::day::{Day, DayConfig};
use crate::field::ParticleField;
use crate::frame_loop::{Frame, FrameLoop};
use crate::interaction::{
    ClickCounter, CounterEvent, EmojiShower, HoverEvent, HoverTimer, Latch, RapidHover,
    TimedFlag, Toggle, Typewriter,
};
use crate::layout::{Region, SectionLayout};
use crate::params::FieldParams;
use crate::sound::Cue;
use crate::spawn::SpawnContext;

pub const SHAKE: Duration = Duration::from_millis(500);
pub const SQUEEZE: Duration = Duration::from_millis(300);
pub const UNLOCK_MESSAGE: Duration = Duration::from_secs(3);
pub const EMOJI_STAGGER: Duration = Duration::from_millis(100);
pub const EMOJI_JITTER: f32 = 50.0;

pub const UNLOCK_TEXT: &str = "You unlocked a secret!";
pub const GLOW_DESCRIPTION: &str = "You found the hidden glow of eternal love! ✨";
pub const MODAL_TITLE: &str = "I Love You!";
pub const MODAL_BODY: &str = "Every moment with you is a treasure. Thank you for making my life beautiful. Will you be my Valentine, today and forever?";
pub const MODAL_CONFIRM: &str = "Yes, Forever! 💖";

const VALENTINE_TAPS: u32 = 5;
const ROSE_PETALS: usize = 8;
const CHOCOLATES: usize = 5;

pub struct SectionView {
    config: DayConfig,
    active: bool,
    field: ParticleField,
    canvas: Canvas,
    frames: FrameLoop,
    layout: SectionLayout,
    ctx: SpawnContext,

    typewriter: Typewriter,
    taps: ClickCounter,
    card_timer: HoverTimer,
    icon_timer: HoverTimer,
    glow: RapidHover,
    chocolate: RapidHover,
    secret_title: Toggle,
    promise: Latch,
    shake: TimedFlag,
    squeeze: TimedFlag,
    unlock_message: TimedFlag,
    emojis: EmojiShower,
    /// Draw emoji as coloured markers into the canvas, for hosts without text.
    emoji_markers: bool,
    modal_open: bool,
}

impl SectionView {
    /// A section with an empty canvas; call [`resize`](Self::resize) before use.
    ///
    /// With a `seed`, particle and emoji placement is reproducible.
    pub fn new(config: DayConfig, params: FieldParams, fps: f32, seed: Option<u64>) -> Self {
        let (field, ctx) = match seed {
            Some(seed) => (
                ParticleField::seeded(params, seed),
                SpawnContext::seeded(seed.wrapping_add(1)),
            ),
            None => (ParticleField::new(params), SpawnContext::new()),
        };
        Self {
            typewriter: Typewriter::new(config.title.clone()),
            config,
            active: false,
            field,
            canvas: Canvas::new(0, 0),
            frames: FrameLoop::with_fps(fps),
            layout: SectionLayout::new(Vec2::ZERO),
            ctx,
            taps: ClickCounter::new(VALENTINE_TAPS),
            card_timer: HoverTimer::new(),
            icon_timer: HoverTimer::new(),
            glow: RapidHover::glow(),
            chocolate: RapidHover::chocolate(),
            secret_title: Toggle::default(),
            promise: Latch::default(),
            shake: TimedFlag::new(),
            squeeze: TimedFlag::new(),
            unlock_message: TimedFlag::new(),
            emojis: EmojiShower::default(),
            emoji_markers: false,
            modal_open: false,
        }
    }

    // ========== Lifecycle ==========

    /// Match the canvas to the viewport and respawn the ambient particles.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.resize(width, height);
        self.layout = SectionLayout::new(self.canvas.size());
        self.field
            .resize(width as f32, height as f32, self.active);
    }

    /// Mark this section as the one being read, or not.
    ///
    /// Activation respawns the field with the bright ambient colour, starts
    /// the frame loop, restarts the typewriter and chimes. Deactivation stops
    /// the frame loop and dims the field.
    pub fn set_active(&mut self, active: bool, now: Instant) -> Vec<Cue> {
        if active == self.active {
            return Vec::new();
        }
        self.active = active;
        let size = self.canvas.size();
        self.field.resize(size.x, size.y, active);

        if active {
            self.frames.start(now);
            self.typewriter.restart(now);
            log::debug!("{} active", self.config.day);
            vec![Cue::Chime]
        } else {
            self.frames.stop();
            log::debug!("{} inactive", self.config.day);
            Vec::new()
        }
    }

    pub fn set_emoji_markers(&mut self, on: bool) {
        self.emoji_markers = on;
    }

    /// Run a frame if one is due: tick the field, then draw the emoji.
    pub fn frame(&mut self, now: Instant, pointer: Option<Vec2>) -> Option<Frame> {
        let frame = self.frames.poll(now)?;
        self.render(now, pointer);
        Some(frame)
    }

    /// Render unconditionally, bypassing the frame loop.
    pub fn render(&mut self, now: Instant, pointer: Option<Vec2>) {
        self.field.tick(pointer, &mut self.canvas);
        self.emojis.prune(now);
        if self.emoji_markers {
            self.emojis.draw(&mut self.canvas, now);
        }
    }

    // ========== Gestures ==========

    /// The pointer moved onto the card from outside it.
    pub fn card_entered(&mut self, now: Instant) -> Vec<Cue> {
        let mut cues = vec![Cue::Hover];
        if let Some(bounds) = self.field.bounds() {
            self.field.burst_default(bounds * 0.5, Rgba::CONFETTI);
        }

        if self.day() == Day::Valentine
            && self.glow.on_hover(&mut self.card_timer, now) == HoverEvent::Triggered
        {
            self.unlock_message.trigger(now, UNLOCK_MESSAGE);
            log::info!("valentine glow unlocked");
            cues.push(Cue::Surprise);
        }
        cues
    }

    /// The pointer moved onto the icon.
    pub fn icon_entered(&mut self, at: Vec2, now: Instant) -> Vec<Cue> {
        if self.day() != Day::Chocolate {
            return Vec::new();
        }
        match self.chocolate.on_hover(&mut self.icon_timer, now) {
            HoverEvent::Triggered => {
                self.emojis.spawn_staggered(
                    &mut self.ctx,
                    '🍫',
                    at,
                    CHOCOLATES,
                    EMOJI_STAGGER,
                    EMOJI_JITTER,
                    now,
                );
                vec![Cue::Surprise]
            }
            _ => Vec::new(),
        }
    }

    pub fn icon_clicked(&mut self, at: Vec2, now: Instant) -> Vec<Cue> {
        let mut cues = vec![Cue::Click];
        match self.day() {
            Day::Valentine => {
                self.shake.trigger(now, SHAKE);
                if self.taps.click() == CounterEvent::Unlocked {
                    self.modal_open = true;
                    cues.push(Cue::Surprise);
                }
            }
            Day::Rose => self.emojis.spawn_staggered(
                &mut self.ctx,
                '🌹',
                at,
                ROSE_PETALS,
                EMOJI_STAGGER,
                EMOJI_JITTER,
                now,
            ),
            Day::Teddy => self.shake.trigger(now, SHAKE),
            _ => {}
        }
        cues
    }

    pub fn title_clicked(&mut self) -> Vec<Cue> {
        if self.day().secret_title().is_none() {
            return Vec::new();
        }
        self.secret_title.flip();
        vec![Cue::Chime]
    }

    pub fn description_clicked(&mut self) -> Vec<Cue> {
        if self.day() != Day::Promise {
            return Vec::new();
        }
        if self.promise.engage() {
            log::debug!("promise locked");
        }
        vec![Cue::Click]
    }

    pub fn card_clicked(&mut self, now: Instant) -> Vec<Cue> {
        if self.day() != Day::Hug {
            return Vec::new();
        }
        self.squeeze.trigger(now, SQUEEZE);
        vec![Cue::Whoosh]
    }

    /// A double click anywhere in the section.
    pub fn double_clicked(&mut self, at: Vec2, now: Instant) -> Vec<Cue> {
        if self.day() != Day::Kiss {
            return Vec::new();
        }
        self.emojis.spawn('💋', at, now);
        vec![Cue::Chime]
    }

    /// Route a click to the handler of the region under it.
    ///
    /// The surprise modal is closed only through its own buttons, so clicks
    /// behind it do nothing.
    pub fn click(&mut self, at: Vec2, now: Instant) -> Vec<Cue> {
        if self.modal_open {
            return Vec::new();
        }
        match self.layout.hit(at) {
            Region::Icon => self.icon_clicked(at, now),
            Region::Title => self.title_clicked(),
            Region::Description => self.description_clicked(),
            Region::Card => self.card_clicked(now),
            Region::Background => Vec::new(),
        }
    }

    /// Close the surprise modal. Confirming plays a click.
    pub fn dismiss_modal(&mut self, confirm: bool) -> Vec<Cue> {
        if !std::mem::take(&mut self.modal_open) {
            return Vec::new();
        }
        if confirm {
            vec![Cue::Click]
        } else {
            Vec::new()
        }
    }

    // ========== Display state ==========

    pub fn day(&self) -> Day {
        self.config.day
    }

    pub fn config(&self) -> &DayConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn layout(&self) -> &SectionLayout {
        &self.layout
    }

    pub fn frames(&self) -> &FrameLoop {
        &self.frames
    }

    pub fn emojis(&self) -> &EmojiShower {
        &self.emojis
    }

    pub fn title_text(&self, now: Instant) -> &str {
        if self.secret_title.is_on() {
            if let Some(secret) = self.day().secret_title() {
                return secret;
            }
        }
        if self.active {
            self.typewriter.visible(now)
        } else {
            &self.config.title
        }
    }

    pub fn description_text(&self) -> &str {
        if self.is_glowing() {
            GLOW_DESCRIPTION
        } else {
            &self.config.description
        }
    }

    pub fn footer_text(&self) -> &'static str {
        match self.day() {
            Day::Valentine if self.is_glowing() => "Secret Unlocked!",
            Day::Valentine if self.taps.count() == 0 => "Tap Heart... Hover Fast... Tap Title",
            Day::Valentine => "Keep Tapping...",
            Day::Kiss => "Double-Click Background",
            Day::Hug => "Click Card to Hug",
            _ => "Explore the Card",
        }
    }

    /// Badge on the Valentine heart: taps still needed.
    pub fn taps_remaining(&self) -> Option<u32> {
        (self.day() == Day::Valentine)
            .then(|| self.taps.remaining())
            .flatten()
    }

    pub fn is_glowing(&self) -> bool {
        self.glow.is_latched()
    }

    pub fn is_promise_locked(&self) -> bool {
        self.promise.is_engaged()
    }

    pub fn is_secret_title(&self) -> bool {
        self.secret_title.is_on()
    }

    pub fn is_shaking(&self, now: Instant) -> bool {
        self.shake.is_on(now)
    }

    pub fn is_squeezing(&self, now: Instant) -> bool {
        self.squeeze.is_on(now)
    }

    pub fn unlock_message(&self, now: Instant) -> Option<&'static str> {
        self.unlock_message.is_on(now).then_some(UNLOCK_TEXT)
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(day: Day) -> SectionView {
        let config = DayConfig::storybook().remove(day.index());
        let mut view = SectionView::new(config, FieldParams::default(), 60.0, Some(9));
        view.resize(800, 600);
        view
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_activation_starts_loop_and_chimes() {
        let t0 = Instant::now();
        let mut view = section(Day::Rose);
        assert!(!view.frames().is_running());
        assert!(!view.field().is_active());

        assert_eq!(view.set_active(true, t0), vec![Cue::Chime]);
        assert!(view.frames().is_running());
        assert!(view.field().is_active());
        assert_eq!(view.field().len(), 80);
        assert_eq!(view.title_text(t0), "");
        assert_eq!(view.title_text(t0 + ms(320)), "Rose");

        // Already active: nothing new.
        assert!(view.set_active(true, t0).is_empty());
        assert!(view.set_active(false, t0).is_empty());
        assert!(!view.frames().is_running());
        assert_eq!(view.title_text(t0), "Rose Day");
    }

    #[test]
    fn test_card_hover_bursts_confetti() {
        let t0 = Instant::now();
        let mut view = section(Day::Teddy);
        assert_eq!(view.card_entered(t0), vec![Cue::Hover]);
        assert_eq!(view.field().len(), 110);
        let confetti = view
            .field()
            .particles()
            .iter()
            .filter(|p| p.color() == Rgba::CONFETTI)
            .count();
        assert_eq!(confetti, 30);
    }

    #[test]
    fn test_valentine_glow() {
        let t0 = Instant::now();
        let mut view = section(Day::Valentine);
        view.card_entered(t0);
        view.card_entered(t0 + ms(500));
        let cues = view.card_entered(t0 + ms(900));
        assert_eq!(cues, vec![Cue::Hover, Cue::Surprise]);
        assert!(view.is_glowing());
        assert_eq!(view.description_text(), GLOW_DESCRIPTION);
        assert_eq!(view.footer_text(), "Secret Unlocked!");
        assert_eq!(view.unlock_message(t0 + ms(1000)), Some(UNLOCK_TEXT));
        assert_eq!(view.unlock_message(t0 + ms(3900)), None);

        // Still confetti, never a second surprise.
        assert_eq!(view.card_entered(t0 + ms(1000)), vec![Cue::Hover]);
    }

    #[test]
    fn test_valentine_taps_open_modal() {
        let t0 = Instant::now();
        let mut view = section(Day::Valentine);
        let icon = view.layout().icon;
        assert_eq!(view.footer_text(), "Tap Heart... Hover Fast... Tap Title");

        for i in 0..4 {
            assert_eq!(view.click(icon, t0 + ms(i * 100)), vec![Cue::Click]);
        }
        assert_eq!(view.taps_remaining(), Some(1));
        assert_eq!(view.footer_text(), "Keep Tapping...");
        assert!(view.is_shaking(t0 + ms(400)));

        assert_eq!(view.click(icon, t0 + ms(500)), vec![Cue::Click, Cue::Surprise]);
        assert!(view.is_modal_open());
        assert_eq!(view.taps_remaining(), None);

        // Clicks behind the modal are swallowed; only its buttons close it.
        assert!(view.click(Vec2::ZERO, t0 + ms(600)).is_empty());
        assert!(view.click(icon, t0 + ms(700)).is_empty());
        assert!(view.is_modal_open());
        assert_eq!(view.dismiss_modal(true), vec![Cue::Click]);
        assert!(!view.is_modal_open());
        assert!(view.dismiss_modal(true).is_empty());
    }

    #[test]
    fn test_modal_escape_is_silent() {
        let t0 = Instant::now();
        let mut view = section(Day::Valentine);
        let icon = view.layout().icon;
        for i in 0..5 {
            view.click(icon, t0 + ms(i));
        }
        assert!(view.dismiss_modal(false).is_empty());
        assert!(!view.is_modal_open());
    }

    #[test]
    fn test_chocolate_rapid_hover() {
        let t0 = Instant::now();
        let mut view = section(Day::Chocolate);
        let at = Vec2::new(400.0, 200.0);
        assert!(view.icon_entered(at, t0).is_empty());
        assert!(view.icon_entered(at, t0 + ms(300)).is_empty());
        assert_eq!(view.icon_entered(at, t0 + ms(600)), vec![Cue::Surprise]);
        assert_eq!(view.emojis().len(), 5);

        // Other days ignore icon hovers.
        let mut rose = section(Day::Rose);
        for i in 0..3 {
            assert!(rose.icon_entered(at, t0 + ms(i * 100)).is_empty());
        }
        assert!(rose.emojis().is_empty());
    }

    #[test]
    fn test_rose_petals_and_teddy_shake() {
        let t0 = Instant::now();
        let mut rose = section(Day::Rose);
        let icon = rose.layout().icon;
        assert_eq!(rose.click(icon, t0), vec![Cue::Click]);
        assert_eq!(rose.emojis().len(), 8);
        assert!(!rose.is_shaking(t0));

        let mut teddy = section(Day::Teddy);
        teddy.click(icon, t0);
        assert!(teddy.is_shaking(t0 + ms(499)));
        assert!(!teddy.is_shaking(t0 + ms(500)));
    }

    #[test]
    fn test_secret_titles() {
        let t0 = Instant::now();
        let mut propose = section(Day::Propose);
        let title = propose.layout().title.center();
        assert_eq!(propose.click(title, t0), vec![Cue::Chime]);
        assert_eq!(propose.title_text(t0), "Will You Marry Me?");
        propose.click(title, t0);
        assert_eq!(propose.title_text(t0), "Propose Day");

        let mut kiss = section(Day::Kiss);
        assert!(kiss.click(title, t0).is_empty());
        assert!(!kiss.is_secret_title());
    }

    #[test]
    fn test_promise_lock_and_hug_squeeze() {
        let t0 = Instant::now();
        let mut promise = section(Day::Promise);
        let description = promise.layout().description.center();
        assert_eq!(promise.click(description, t0), vec![Cue::Click]);
        assert!(promise.is_promise_locked());
        assert_eq!(promise.click(description, t0), vec![Cue::Click]);

        let mut hug = section(Day::Hug);
        let card = hug.layout().card.min + Vec2::splat(4.0);
        assert_eq!(hug.click(card, t0), vec![Cue::Whoosh]);
        assert!(hug.is_squeezing(t0 + ms(299)));
        assert!(!hug.is_squeezing(t0 + ms(300)));
        assert_eq!(hug.footer_text(), "Click Card to Hug");
    }

    #[test]
    fn test_kiss_double_click() {
        let t0 = Instant::now();
        let mut kiss = section(Day::Kiss);
        let at = Vec2::new(10.0, 10.0);
        assert_eq!(kiss.double_clicked(at, t0), vec![Cue::Chime]);
        let emoji: Vec<_> = kiss.emojis().visible(t0).collect();
        assert_eq!(emoji.len(), 1);
        assert_eq!(emoji[0].position, at);
        assert_eq!(emoji[0].glyph, '💋');

        let mut hug = section(Day::Hug);
        assert!(hug.double_clicked(at, t0).is_empty());
    }

    #[test]
    fn test_frame_draws_only_when_active() {
        let t0 = Instant::now();
        let mut view = section(Day::Rose);
        assert!(view.frame(t0, None).is_none());
        view.set_active(true, t0);
        assert!(view.frame(t0, None).is_some());
        assert!(view.frame(t0, None).is_none());
    }
}
