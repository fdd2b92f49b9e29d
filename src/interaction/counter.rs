use std::num::NonZeroU32;

/// Where a [`ClickCounter`] stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterState {
    Idle,
    Counting(NonZeroU32),
    Unlocked,
}

/// Result of one click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterEvent {
    /// Still counting; `remaining` taps to go.
    Counted { remaining: u32 },
    /// This click reached the target.
    Unlocked,
    /// Clicked after unlocking; nothing new happens.
    AlreadyUnlocked,
}

/// Counts taps towards a target and unlocks exactly once.
///
/// `idle → counting → unlocked`, with `unlocked` terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickCounter {
    target: u32,
    state: CounterState,
}

impl ClickCounter {
    /// A counter unlocking on the `target`-th click. A target of 0 is treated as 1.
    pub fn new(target: u32) -> Self {
        Self {
            target: target.max(1),
            state: CounterState::Idle,
        }
    }

    pub fn state(&self) -> CounterState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == CounterState::Unlocked
    }

    pub fn count(&self) -> u32 {
        match self.state {
            CounterState::Idle => 0,
            CounterState::Counting(n) => n.get(),
            CounterState::Unlocked => self.target,
        }
    }

    /// Taps left while counting; `None` before the first tap and after unlocking.
    pub fn remaining(&self) -> Option<u32> {
        match self.state {
            CounterState::Counting(n) => Some(self.target - n.get()),
            _ => None,
        }
    }

    pub fn click(&mut self) -> CounterEvent {
        let next = match self.state {
            CounterState::Unlocked => return CounterEvent::AlreadyUnlocked,
            CounterState::Idle => 1,
            CounterState::Counting(n) => n.get() + 1,
        };
        if next >= self.target {
            self.state = CounterState::Unlocked;
            return CounterEvent::Unlocked;
        }
        // `next` is at least 1 here.
        self.state = NonZeroU32::new(next)
            .map(CounterState::Counting)
            .unwrap_or(CounterState::Idle);
        CounterEvent::Counted {
            remaining: self.target - next,
        }
    }
}
