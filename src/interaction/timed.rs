use std::time::{Duration, Instant};

/// A flag that switches itself off after a duration.
///
/// Retriggering while on extends the pulse from the new trigger time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimedFlag {
    until: Option<Instant>,
}

impl TimedFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&mut self, now: Instant, duration: Duration) {
        self.until = Some(now + duration);
    }

    pub fn is_on(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    pub fn reset(&mut self) {
        self.until = None;
    }
}

/// Two-state switch flipped on every activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggle {
    on: bool,
}

impl Toggle {
    /// Flip and return the new state.
    pub fn flip(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

/// One-way switch: once engaged it stays engaged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latch {
    engaged: bool,
}

impl Latch {
    /// Engage; returns `true` only on the first call.
    pub fn engage(&mut self) -> bool {
        let first = !self.engaged;
        self.engaged = true;
        first
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }
}
