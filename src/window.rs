//! The windowed storybook.
//!
//! [`Storybook`] is the whole interactive state: one [`SectionView`] per
//! day, the navigator, the sound board and pointer tracking. It consumes
//! [`Gesture`]s and produces frames, without touching a window, so it can be
//! driven from tests. [`App`] is the winit host around it: it owns the window
//! and the [`Presenter`], offers every window event to the egui overlay
//! first, feeds the rest through [`Input`], and sleeps until the active
//! section's next frame is due.
//!
//! | Input | Action |
//! |-------|--------|
//! | wheel, arrows, PageUp/PageDown, Home/End | scroll to a neighbouring day |
//! | `1`..`8` | jump to a day through the curtain |
//! | `Tab` | open / close the day menu |
//! | `M` | mute / unmute |
//! | `Esc` | close the modal, then the drawer, then quit |

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::audio::Speaker;
use crate::config::AppConfig;
use crate::day::Day;
use crate::error::{AppError, GpuError};
use crate::gpu::{Presenter, SceneState};
use crate::input::{Gesture, Input, KeyCode, RegionTracker};
use crate::layout::Region;
use crate::navigation::{NavEvent, NavPhase, Navigator, JUMP_DELAY};
use crate::overlay::{self, OverlayAction};
use crate::pointer::PointerCell;
use crate::section::SectionView;
use crate::sound::{Cue, CueSink, SoundBoard};

/// All eight sections and the state shared between them.
pub struct Storybook<S> {
    sections: Vec<SectionView>,
    navigator: Navigator,
    sound: SoundBoard<S>,
    regions: RegionTracker,
    pointer: PointerCell,
    started: Instant,
    exit_requested: bool,
}

impl<S: CueSink> Storybook<S> {
    /// Build every section and activate the configured start day.
    pub fn new(config: &AppConfig, sink: S, now: Instant) -> Self {
        let sections = config
            .days
            .iter()
            .map(|day| {
                let seed = config.seed.map(|s| s.wrapping_add(day.day.index() as u64 * 97));
                SectionView::new(day.clone(), config.params.clone(), config.fps, seed)
            })
            .collect();
        let mut sound = SoundBoard::new(sink);
        if config.muted {
            sound.toggle_mute();
        }

        let mut story = Self {
            sections,
            navigator: Navigator::new(config.start_day),
            sound,
            regions: RegionTracker::default(),
            pointer: PointerCell::new(),
            started: now,
            exit_requested: false,
        };
        story.sync_active(now);
        story
    }

    // ========== Queries ==========

    pub fn active_day(&self) -> Day {
        self.navigator.active()
    }

    pub fn active_section(&self) -> &SectionView {
        &self.sections[self.navigator.active().index()]
    }

    pub fn section(&self, day: Day) -> &SectionView {
        &self.sections[day.index()]
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn sound(&self) -> &SoundBoard<S> {
        &self.sound
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Layout region under the pointer on the active section.
    pub fn hovered_region(&self) -> Option<Region> {
        self.regions.current()
    }

    /// Seconds since the storybook was built.
    pub fn elapsed(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.started).as_secs_f32()
    }

    /// When the host should wake up next.
    pub fn next_wake(&self, now: Instant) -> Instant {
        let frame = self.active_section().frames().next_due();
        let nav = match self.navigator.phase() {
            NavPhase::Idle => None,
            NavPhase::Covering { jump_at, .. } => Some(jump_at),
            NavPhase::Revealing { lift_at } => Some(lift_at),
        };
        [frame, nav]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(now + Duration::from_millis(100))
            .max(now)
    }

    /// Curtain opacity: fades in until the jump, then stays up until the lift.
    pub fn curtain(&self, now: Instant) -> f32 {
        match self.navigator.phase() {
            NavPhase::Idle => 0.0,
            NavPhase::Covering { jump_at, .. } => {
                let remaining = jump_at.saturating_duration_since(now);
                1.0 - remaining.as_secs_f32() / JUMP_DELAY.as_secs_f32()
            }
            NavPhase::Revealing { .. } => 1.0,
        }
    }

    pub fn scene(&self, now: Instant) -> SceneState {
        let section = self.active_section();
        SceneState {
            background: section.config().backdrop(),
            accent: section.config().accent,
            card: section.layout().card,
            glow: section.is_glowing(),
            squeeze: section.is_squeezing(now),
            shake: section.is_shaking(now),
            curtain: self.curtain(now).clamp(0.0, 1.0),
            time: self.elapsed(now),
        }
    }

    /// What the window title should read. Card copy lives in the overlay.
    pub fn title(&self) -> String {
        let config = self.active_section().config();
        let mut title = format!("{} · {}", config.title, config.date);
        if self.sound.is_muted() {
            title.push_str(" (muted)");
        }
        title
    }

    // ========== Driving ==========

    pub fn resize(&mut self, width: u32, height: u32) {
        for section in &mut self.sections {
            section.resize(width, height);
        }
        self.regions.reset();
    }

    /// Advance navigation and run the active section's frame if due.
    ///
    /// Returns whether the active canvas changed.
    pub fn update(&mut self, now: Instant) -> bool {
        match self.navigator.update(now) {
            Some(NavEvent::Jumped(day)) => {
                log::debug!("jumped to {day}");
                self.sync_active(now);
            }
            Some(NavEvent::Lifted) => log::trace!("curtain lifted"),
            None => {}
        }
        let pointer = self.pointer.get();
        let index = self.navigator.active().index();
        self.sections[index].frame(now, pointer).is_some()
    }

    pub fn handle(&mut self, gesture: Gesture, now: Instant) {
        let index = self.navigator.active().index();
        let cues = match gesture {
            Gesture::PointerMoved(at) => {
                self.pointer.set(at);
                let section = &mut self.sections[index];
                let change = self.regions.update(Some(section.layout().hit(at)));
                let mut cues = Vec::new();
                if change.entered_card {
                    cues.extend(section.card_entered(now));
                }
                if change.entered == Some(Region::Icon) {
                    cues.extend(section.icon_entered(at, now));
                }
                cues
            }
            Gesture::PointerLeft => {
                self.pointer.clear();
                self.regions.update(None);
                Vec::new()
            }
            // A click that reaches the storybook with the drawer open landed
            // outside it.
            Gesture::Click(_) | Gesture::DoubleClick(_) if self.navigator.is_drawer_open() => {
                self.navigator.close_drawer();
                Vec::new()
            }
            Gesture::Click(at) if !self.navigator.is_navigating() => {
                self.sections[index].click(at, now)
            }
            Gesture::DoubleClick(at) if !self.navigator.is_navigating() => {
                self.sections[index].double_clicked(at, now)
            }
            Gesture::Click(_) | Gesture::DoubleClick(_) => Vec::new(),
            Gesture::Wheel(delta) if delta < 0.0 => self.scroll_by(1, now),
            Gesture::Wheel(_) => self.scroll_by(-1, now),
            Gesture::Key(key) => self.key(key, now),
            Gesture::Resized { width, height } => {
                self.resize(width, height);
                Vec::new()
            }
        };
        self.play(cues);
    }

    /// Carry out a button pressed in the overlay.
    pub fn apply(&mut self, action: OverlayAction, now: Instant) {
        let cues = match action {
            OverlayAction::ToggleMute => {
                self.sound.toggle_mute();
                Vec::new()
            }
            OverlayAction::ToggleDrawer => self.navigator.toggle_drawer(),
            OverlayAction::SelectDay(day) => self.navigator.navigate(day, true, now),
            OverlayAction::HoverEntry(day) => self.navigator.hover_entry(day),
            OverlayAction::ConfirmModal => self.active_section_mut().dismiss_modal(true),
            OverlayAction::CloseModal => self.active_section_mut().dismiss_modal(false),
        };
        self.play(cues);
    }

    fn active_section_mut(&mut self) -> &mut SectionView {
        &mut self.sections[self.navigator.active().index()]
    }

    fn key(&mut self, key: KeyCode, now: Instant) -> Vec<Cue> {
        match key {
            KeyCode::Down | KeyCode::Right | KeyCode::PageDown => self.scroll_by(1, now),
            KeyCode::Up | KeyCode::Left | KeyCode::PageUp => self.scroll_by(-1, now),
            KeyCode::Home => self.scroll_to(Day::Rose, now),
            KeyCode::End => self.scroll_to(Day::Valentine, now),
            KeyCode::Digit(n @ 1..=8) => match Day::from_index(n as usize - 1) {
                Some(day) => self.navigator.navigate(day, true, now),
                None => Vec::new(),
            },
            KeyCode::M => {
                self.sound.toggle_mute();
                Vec::new()
            }
            KeyCode::Tab => self.navigator.toggle_drawer(),
            KeyCode::Escape => {
                let section = &mut self.sections[self.navigator.active().index()];
                if section.is_modal_open() {
                    section.dismiss_modal(false)
                } else if self.navigator.is_drawer_open() {
                    self.navigator.close_drawer();
                    Vec::new()
                } else {
                    self.exit_requested = true;
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    fn scroll_by(&mut self, step: isize, now: Instant) -> Vec<Cue> {
        let current = self.navigator.active();
        let target = if step > 0 { current.next() } else { current.prev() };
        match target {
            Some(day) => self.scroll_to(day, now),
            None => Vec::new(),
        }
    }

    /// Scrolling brought `day` into view.
    fn scroll_to(&mut self, day: Day, now: Instant) -> Vec<Cue> {
        if self.navigator.observe_visible(day) {
            self.sync_active(now);
        }
        Vec::new()
    }

    /// Activate the navigator's day and deactivate every other section.
    fn sync_active(&mut self, now: Instant) {
        let active = self.navigator.active();
        let mut cues = Vec::new();
        for section in &mut self.sections {
            cues.extend(section.set_active(section.day() == active, now));
        }
        self.regions.reset();
        self.play(cues);
    }

    fn play(&mut self, cues: Vec<Cue>) {
        for cue in cues {
            self.sound.play(cue);
        }
    }
}

/// winit host for a [`Storybook`].
pub struct App {
    config: AppConfig,
    story: Storybook<Speaker>,
    input: Input,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    title: String,
    error: Option<AppError>,
}

impl App {
    /// Opens the default audio output unless `config.audio` is off.
    pub fn new(config: AppConfig) -> Self {
        let speaker = Speaker::open(config.audio);
        let story = Storybook::new(&config, speaker, Instant::now());
        Self {
            config,
            story,
            input: Input::new(),
            window: None,
            presenter: None,
            title: String::new(),
            error: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<AppError> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attrs = Window::default_attributes()
            .with_title(self.story.title())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        let window = Arc::new(event_loop.create_window(attrs)?);
        let presenter = pollster::block_on(Presenter::new(window.clone())).map_err(AppError::from)?;

        let size = window.inner_size();
        self.story.resize(size.width, size.height);
        self.presenter = Some(presenter);
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(presenter), Some(window)) = (&mut self.presenter, &self.window) else {
            return;
        };
        let now = Instant::now();

        let mut actions = Vec::new();
        let story = &self.story;
        let frame = presenter.run_overlay(window, |ctx| actions = overlay::show(ctx, story, now));
        for action in actions {
            self.story.apply(action, now);
        }

        let scene = self.story.scene(now);
        match presenter.render(self.story.active_section().canvas(), &scene, &frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => presenter.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, AppError::Gpu(GpuError::OutOfMemory));
            }
            Err(e) => log::warn!("render error: {e:?}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let now = Instant::now();
        match &event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                return;
            }
            WindowEvent::Resized(size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(size.width, size.height);
                }
            }
            _ => {}
        }

        // Events over a modal or drawer button belong to the overlay.
        if let (Some(presenter), Some(window)) = (&mut self.presenter, &self.window) {
            let response = presenter.on_window_event(window, &event);
            if response.repaint {
                window.request_redraw();
            }
            if response.consumed {
                return;
            }
        }

        self.input.handle_event(&event, now);
        for gesture in self.input.drain() {
            self.story.handle(gesture, now);
        }
        if self.story.exit_requested() {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let Some(window) = &self.window else {
            return;
        };
        if self.story.update(now) {
            window.request_redraw();
        }

        let title = self.story.title();
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.story.next_wake(now)));
    }
}

/// Open the window and run until it closes.
pub fn run(config: AppConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    match app.take_error() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::LIFT_DELAY;
    use crate::sound::RecordingSink;
    use glam::Vec2;

    fn story(now: Instant) -> Storybook<RecordingSink> {
        let config = AppConfig {
            seed: Some(5),
            ..AppConfig::default()
        };
        let mut story = Storybook::new(&config, RecordingSink::default(), now);
        story.resize(800, 600);
        story
    }

    #[test]
    fn test_start_day_is_only_active_section() {
        let t0 = Instant::now();
        let story = story(t0);
        assert_eq!(story.active_day(), Day::Rose);
        assert_eq!(story.sound().sink().played, vec![Cue::Chime]);
        for day in Day::ALL {
            let section = story.section(day);
            assert_eq!(section.is_active(), day == Day::Rose);
            assert_eq!(section.frames().is_running(), day == Day::Rose);
        }
    }

    #[test]
    fn test_scroll_switches_active() {
        let t0 = Instant::now();
        let mut story = story(t0);
        story.handle(Gesture::Wheel(-1.0), t0);
        assert_eq!(story.active_day(), Day::Propose);
        assert!(!story.section(Day::Rose).frames().is_running());
        story.handle(Gesture::Key(KeyCode::Up), t0);
        assert_eq!(story.active_day(), Day::Rose);
        // Nothing above the first day.
        story.handle(Gesture::Wheel(1.0), t0);
        assert_eq!(story.active_day(), Day::Rose);
    }

    #[test]
    fn test_digit_navigates_through_curtain() {
        let t0 = Instant::now();
        let mut story = story(t0);
        story.handle(Gesture::Key(KeyCode::Digit(8)), t0);
        assert_eq!(story.active_day(), Day::Rose);
        assert!(story.curtain(t0) < 0.01);
        assert!(story.navigator().is_curtain_visible());

        // Scrolling is ignored behind the curtain.
        story.handle(Gesture::Wheel(-1.0), t0 + Duration::from_millis(100));
        assert_eq!(story.active_day(), Day::Rose);

        story.update(t0 + JUMP_DELAY);
        assert_eq!(story.active_day(), Day::Valentine);
        assert!(story.section(Day::Valentine).frames().is_running());
        assert_eq!(story.curtain(t0 + JUMP_DELAY), 1.0);

        story.update(t0 + JUMP_DELAY + LIFT_DELAY);
        assert_eq!(story.curtain(t0 + JUMP_DELAY + LIFT_DELAY), 0.0);
        assert_eq!(
            story.sound().sink().played,
            vec![Cue::Chime, Cue::Click, Cue::Whoosh, Cue::Chime]
        );
    }

    #[test]
    fn test_pointer_enter_card_bursts() {
        let t0 = Instant::now();
        let mut story = story(t0);
        story.handle(Gesture::PointerMoved(Vec2::new(2.0, 2.0)), t0);
        let card = story.active_section().layout().card.center();
        story.handle(Gesture::PointerMoved(card), t0);
        assert_eq!(story.active_section().field().len(), 110);
        assert_eq!(story.sound().sink().played.last(), Some(&Cue::Hover));

        // Moving inside the card does not re-burst.
        story.handle(Gesture::PointerMoved(card + Vec2::X), t0);
        assert_eq!(story.active_section().field().len(), 110);
    }

    #[test]
    fn test_mute_and_escape() {
        let t0 = Instant::now();
        let mut story = story(t0);
        story.handle(Gesture::Key(KeyCode::M), t0);
        assert!(story.sound().is_muted());
        assert_eq!(story.title(), "Rose Day · February 7 (muted)");
        story.handle(Gesture::Wheel(-1.0), t0);
        // Activation chime was swallowed.
        assert_eq!(story.sound().sink().played, vec![Cue::Chime]);

        story.handle(Gesture::Key(KeyCode::Escape), t0);
        assert!(story.exit_requested());
    }

    #[test]
    fn test_drawer_menu() {
        let t0 = Instant::now();
        let mut story = story(t0);
        story.handle(Gesture::Key(KeyCode::Tab), t0);
        assert!(story.navigator().is_drawer_open());

        // Escape closes the drawer before it quits.
        story.handle(Gesture::Key(KeyCode::Escape), t0);
        assert!(!story.navigator().is_drawer_open());
        assert!(!story.exit_requested());
        assert_eq!(story.sound().sink().played, vec![Cue::Chime, Cue::Click]);
    }

    #[test]
    fn test_update_runs_active_frame() {
        let t0 = Instant::now();
        let mut story = story(t0);
        assert!(story.update(t0));
        assert!(!story.update(t0));
        assert!(story.next_wake(t0) > t0);
    }

    #[test]
    fn test_drawer_buttons() {
        let t0 = Instant::now();
        let mut story = story(t0);
        story.apply(OverlayAction::ToggleDrawer, t0);
        story.apply(OverlayAction::HoverEntry(Some(Day::Teddy)), t0);
        story.apply(OverlayAction::HoverEntry(Some(Day::Teddy)), t0);
        story.apply(OverlayAction::HoverEntry(Some(Day::Kiss)), t0);
        story.apply(OverlayAction::SelectDay(Day::Kiss), t0);
        assert!(!story.navigator().is_drawer_open());
        assert_eq!(
            story.sound().sink().played,
            vec![
                Cue::Chime,
                Cue::Click,
                Cue::Hover,
                Cue::Hover,
                Cue::Click,
                Cue::Whoosh
            ]
        );
        story.update(t0 + JUMP_DELAY);
        assert_eq!(story.active_day(), Day::Kiss);
    }

    #[test]
    fn test_click_outside_drawer_closes_it() {
        let t0 = Instant::now();
        let mut story = story(t0);
        story.apply(OverlayAction::ToggleDrawer, t0);
        let card = story.active_section().layout().card.center();
        story.handle(Gesture::Click(card), t0);
        assert!(!story.navigator().is_drawer_open());
        // The click closed the drawer and went no further.
        assert_eq!(story.sound().sink().played, vec![Cue::Chime, Cue::Click]);
    }

    #[test]
    fn test_modal_closes_only_through_its_buttons() {
        let t0 = Instant::now();
        let mut story = story(t0);
        story.handle(Gesture::Key(KeyCode::End), t0);
        let icon = story.active_section().layout().icon;
        for i in 0..5 {
            story.handle(Gesture::Click(icon), t0 + Duration::from_millis(i * 100));
        }
        assert!(story.active_section().is_modal_open());

        story.handle(Gesture::Click(Vec2::ZERO), t0 + Duration::from_secs(1));
        assert!(story.active_section().is_modal_open());

        let before = story.sound().sink().played.len();
        story.apply(OverlayAction::ConfirmModal, t0 + Duration::from_secs(1));
        assert!(!story.active_section().is_modal_open());
        assert_eq!(&story.sound().sink().played[before..], &[Cue::Click]);
    }

    #[test]
    fn test_mute_button() {
        let t0 = Instant::now();
        let mut story = story(t0);
        story.apply(OverlayAction::ToggleMute, t0);
        assert!(story.sound().is_muted());
        story.apply(OverlayAction::ToggleMute, t0);
        assert!(!story.sound().is_muted());
        assert_eq!(story.sound().sink().played, vec![Cue::Chime]);
    }
}
