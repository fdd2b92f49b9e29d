use std::time::{Duration, Instant};

/// Remembers when the previous hover happened.
///
/// Passed explicitly into [`RapidHover::on_hover`] so the detector itself
/// holds no hidden clock state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverTimer {
    last: Option<Instant>,
}

impl HoverTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hover at `now`; returns whether it followed the previous one
    /// within `window`.
    pub fn register(&mut self, now: Instant, window: Duration) -> bool {
        let rapid = self
            .last
            .is_some_and(|last| now.saturating_duration_since(last) < window);
        self.last = Some(now);
        rapid
    }

    pub fn last(&self) -> Option<Instant> {
        self.last
    }
}

/// What happens after the detector fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RapidHoverMode {
    /// Reset the streak and allow firing again.
    Repeat,
    /// Stay fired; later hovers are ignored.
    Latch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    /// Streak length after this hover.
    Counted(u32),
    /// The streak reached the target on this hover.
    Triggered,
    /// Already latched; the hover was ignored.
    Ignored,
}

/// Detects a streak of hovers, each within `window` of the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RapidHover {
    window: Duration,
    target: u32,
    mode: RapidHoverMode,
    streak: u32,
    latched: bool,
}

impl RapidHover {
    pub fn new(window: Duration, target: u32, mode: RapidHoverMode) -> Self {
        Self {
            window,
            target: target.max(1),
            mode,
            streak: 0,
            latched: false,
        }
    }

    /// Three hovers, each within half a second of the last; fires repeatedly.
    pub fn chocolate() -> Self {
        Self::new(Duration::from_millis(500), 3, RapidHoverMode::Repeat)
    }

    /// Three hovers, each within a second of the last; latches.
    pub fn glow() -> Self {
        Self::new(Duration::from_millis(1000), 3, RapidHoverMode::Latch)
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    pub fn on_hover(&mut self, timer: &mut HoverTimer, now: Instant) -> HoverEvent {
        if self.latched {
            return HoverEvent::Ignored;
        }

        self.streak = if timer.register(now, self.window) {
            self.streak + 1
        } else {
            1
        };

        if self.streak < self.target {
            return HoverEvent::Counted(self.streak);
        }

        match self.mode {
            RapidHoverMode::Repeat => self.streak = 0,
            RapidHoverMode::Latch => self.latched = true,
        }
        HoverEvent::Triggered
    }
}
