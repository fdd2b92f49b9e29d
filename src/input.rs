//! Input handling for the storybook window.
//!
//! [`Input`] turns raw winit window events into [`Gesture`]s the host can
//! route: pointer movement, clicks and double clicks, keys and wheel steps.
//! The typed entry points (`pointer_moved`, `button`, `key_down`, ...) are
//! public so hosts and tests can feed input without constructing winit
//! events.
//!
//! ```ignore
//! input.handle_event(&event, Instant::now());
//! for gesture in input.drain() {
//!     match gesture {
//!         Gesture::Click(at) => cues.extend(section.click(at, now)),
//!         Gesture::Key(KeyCode::M) => { board.toggle_mute(); }
//!         _ => {}
//!     }
//! }
//! ```

use std::collections::HashSet;
use std::time::{Duration, Instant};

use glam::Vec2;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::layout::{Region, SectionLayout};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Left,
        }
    }
}

/// The keys the storybook reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    /// Top-row digit `0..=9`.
    Digit(u8),
    M,
    Tab,
    Escape,
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::ArrowUp => KeyCode::Up,
            WinitKeyCode::ArrowDown => KeyCode::Down,
            WinitKeyCode::ArrowLeft => KeyCode::Left,
            WinitKeyCode::ArrowRight => KeyCode::Right,
            WinitKeyCode::PageUp => KeyCode::PageUp,
            WinitKeyCode::PageDown => KeyCode::PageDown,
            WinitKeyCode::Home => KeyCode::Home,
            WinitKeyCode::End => KeyCode::End,
            WinitKeyCode::Digit0 => KeyCode::Digit(0),
            WinitKeyCode::Digit1 => KeyCode::Digit(1),
            WinitKeyCode::Digit2 => KeyCode::Digit(2),
            WinitKeyCode::Digit3 => KeyCode::Digit(3),
            WinitKeyCode::Digit4 => KeyCode::Digit(4),
            WinitKeyCode::Digit5 => KeyCode::Digit(5),
            WinitKeyCode::Digit6 => KeyCode::Digit(6),
            WinitKeyCode::Digit7 => KeyCode::Digit(7),
            WinitKeyCode::Digit8 => KeyCode::Digit(8),
            WinitKeyCode::Digit9 => KeyCode::Digit(9),
            WinitKeyCode::KeyM => KeyCode::M,
            WinitKeyCode::Tab => KeyCode::Tab,
            WinitKeyCode::Escape => KeyCode::Escape,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// A user action, in window pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    PointerMoved(Vec2),
    PointerLeft,
    /// Left button released over the window.
    Click(Vec2),
    /// Second click close enough in time and space to the first.
    DoubleClick(Vec2),
    /// Key went down (repeats are filtered).
    Key(KeyCode),
    /// Wheel step, positive is up/back.
    Wheel(f32),
    Resized { width: u32, height: u32 },
}

/// Pairs clicks into double clicks.
#[derive(Debug, Clone, Copy)]
pub struct ClickTimer {
    last: Option<(Instant, Vec2)>,
    window: Duration,
    slop: f32,
}

impl Default for ClickTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(400), 6.0)
    }
}

impl ClickTimer {
    pub fn new(window: Duration, slop: f32) -> Self {
        Self {
            last: None,
            window,
            slop,
        }
    }

    /// Record a click; returns whether it completes a double click.
    ///
    /// A completed pair is forgotten, so a third click starts a new pair.
    pub fn register(&mut self, at: Vec2, now: Instant) -> bool {
        let double = self.last.is_some_and(|(when, pos)| {
            now.saturating_duration_since(when) < self.window && pos.distance(at) <= self.slop
        });
        self.last = if double { None } else { Some((now, at)) };
        double
    }
}

/// What a pointer move entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionChange {
    /// Crossed from the background onto the card (or anything on it).
    pub entered_card: bool,
    /// The innermost region, if it differs from the previous one.
    pub entered: Option<Region>,
}

/// Tracks the region under the pointer to detect enter transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionTracker {
    current: Option<Region>,
}

impl RegionTracker {
    pub fn current(&self) -> Option<Region> {
        self.current
    }

    /// Pointer now over `region`, or `None` when it left the window.
    pub fn update(&mut self, region: Option<Region>) -> RegionChange {
        let was_on_card = self.current.is_some_and(SectionLayout::is_within_card);
        let on_card = region.is_some_and(SectionLayout::is_within_card);
        let entered = if region != self.current { region } else { None };
        self.current = region;
        RegionChange {
            entered_card: on_card && !was_on_card,
            entered,
        }
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}

/// Input state and the queue of gestures since the last drain.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    buttons_held: HashSet<MouseButton>,
    pointer: Option<Vec2>,
    clicks: ClickTimer,
    gestures: Vec<Gesture>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Queries ==========

    /// Latest pointer position, `None` once it left the window.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn button_held(&self, button: MouseButton) -> bool {
        self.buttons_held.contains(&button)
    }

    /// Take every gesture queued since the last call.
    pub fn drain(&mut self) -> Vec<Gesture> {
        std::mem::take(&mut self.gestures)
    }

    // ========== Feeding ==========

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer = Some(position);
        self.gestures.push(Gesture::PointerMoved(position));
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
        self.gestures.push(Gesture::PointerLeft);
    }

    pub fn button(&mut self, button: MouseButton, pressed: bool, now: Instant) {
        if pressed {
            self.buttons_held.insert(button);
            return;
        }
        let was_held = self.buttons_held.remove(&button);
        if button != MouseButton::Left || !was_held {
            return;
        }
        if let Some(at) = self.pointer {
            self.gestures.push(Gesture::Click(at));
            if self.clicks.register(at, now) {
                self.gestures.push(Gesture::DoubleClick(at));
            }
        }
    }

    pub fn key_down(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.gestures.push(Gesture::Key(key));
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    pub fn wheel(&mut self, delta: f32) {
        if delta != 0.0 {
            self.gestures.push(Gesture::Wheel(delta));
        }
    }

    pub fn resized(&mut self, width: u32, height: u32) {
        self.gestures.push(Gesture::Resized { width, height });
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent, now: Instant) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let key = KeyCode::from(code);
                    match event.state {
                        ElementState::Pressed => self.key_down(key),
                        ElementState::Released => self.key_up(key),
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.button(MouseButton::from(*button), state.is_pressed(), now);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => self.pointer_left(),
            WindowEvent::MouseWheel { delta, .. } => {
                let step = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.wheel(step);
            }
            WindowEvent::Resized(size) => self.resized(size.width, size.height),
            _ => {}
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
    fn test_key_repeat_filtered() {
        let mut input = Input::new();
        input.key_down(KeyCode::M);
        input.key_down(KeyCode::M);
        assert!(input.key_held(KeyCode::M));
        assert_eq!(input.drain(), vec![Gesture::Key(KeyCode::M)]);

        input.key_up(KeyCode::M);
        input.key_down(KeyCode::M);
        assert_eq!(input.drain(), vec![Gesture::Key(KeyCode::M)]);
    }

    #[test]
    fn test_click_on_release() {
        let t0 = Instant::now();
        let mut input = Input::new();
        let at = Vec2::new(50.0, 60.0);
        input.pointer_moved(at);
        input.button(MouseButton::Left, true, t0);
        assert_eq!(input.drain(), vec![Gesture::PointerMoved(at)]);
        input.button(MouseButton::Left, false, t0);
        assert_eq!(input.drain(), vec![Gesture::Click(at)]);

        // Right button never clicks.
        input.button(MouseButton::Right, true, t0);
        input.button(MouseButton::Right, false, t0);
        assert!(input.drain().is_empty());
    }

    #[test]
    fn test_double_click() {
        let t0 = Instant::now();
        let mut input = Input::new();
        let at = Vec2::new(5.0, 5.0);
        input.pointer_moved(at);
        input.drain();

        for t in [t0, t0 + ms(200)] {
            input.button(MouseButton::Left, true, t);
            input.button(MouseButton::Left, false, t);
        }
        assert_eq!(
            input.drain(),
            vec![Gesture::Click(at), Gesture::Click(at), Gesture::DoubleClick(at)]
        );
    }

    #[test]
    fn test_click_timer_rules() {
        let t0 = Instant::now();
        let mut timer = ClickTimer::default();
        let at = Vec2::ZERO;
        assert!(!timer.register(at, t0));
        assert!(!timer.register(at, t0 + ms(500)));
        assert!(!timer.register(Vec2::new(20.0, 0.0), t0 + ms(600)));
        assert!(timer.register(Vec2::new(22.0, 1.0), t0 + ms(700)));
        // Third click starts over.
        assert!(!timer.register(Vec2::new(22.0, 1.0), t0 + ms(750)));
    }

    #[test]
    fn test_pointer_leave_clears() {
        let mut input = Input::new();
        input.pointer_moved(Vec2::ONE);
        input.pointer_left();
        assert_eq!(input.pointer(), None);
        let t0 = Instant::now();
        input.button(MouseButton::Left, true, t0);
        input.button(MouseButton::Left, false, t0);
        assert_eq!(input.drain(), vec![Gesture::PointerMoved(Vec2::ONE), Gesture::PointerLeft]);
    }

    #[test]
    fn test_region_tracker() {
        let mut tracker = RegionTracker::default();
        let change = tracker.update(Some(Region::Background));
        assert!(!change.entered_card);

        let change = tracker.update(Some(Region::Icon));
        assert!(change.entered_card);
        assert_eq!(change.entered, Some(Region::Icon));

        // Moving within the card does not re-enter it.
        let change = tracker.update(Some(Region::Card));
        assert!(!change.entered_card);
        assert_eq!(change.entered, Some(Region::Card));
        assert_eq!(tracker.update(Some(Region::Card)), RegionChange::default());

        tracker.update(None);
        assert!(tracker.update(Some(Region::Title)).entered_card);
    }
}
