//! Which day is on screen, and the curtain transition between days.
//!
//! Scrolling reports the visible day through [`Navigator::observe_visible`].
//! Jumping to a day through the menu goes through [`Navigator::navigate`]: a
//! curtain drops, the active day switches behind it after
//! [`JUMP_DELAY`], and the curtain lifts [`LIFT_DELAY`] later. Scroll
//! observations are ignored while the curtain is down so the sections passed
//! on the way do not flash active.

use std::time::{Duration, Instant};

use crate::day::Day;
use crate::sound::Cue;

pub const JUMP_DELAY: Duration = Duration::from_millis(400);
pub const LIFT_DELAY: Duration = Duration::from_millis(600);
pub const CURTAIN_TEXT: &str = "Traveling to your moment...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    Idle,
    /// Curtain falling; the jump happens at `jump_at`.
    Covering { target: Day, jump_at: Instant },
    /// Jumped; the curtain lifts at `lift_at`.
    Revealing { lift_at: Instant },
}

/// Transitions reported by [`Navigator::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Jumped(Day),
    Lifted,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    active: Day,
    phase: NavPhase,
    drawer_open: bool,
    /// Drawer entry under the pointer.
    hovered: Option<Day>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Day::Rose)
    }
}

impl Navigator {
    pub fn new(start: Day) -> Self {
        Self {
            active: start,
            phase: NavPhase::Idle,
            drawer_open: false,
            hovered: None,
        }
    }

    pub fn active(&self) -> Day {
        self.active
    }

    pub fn phase(&self) -> NavPhase {
        self.phase
    }

    pub fn is_navigating(&self) -> bool {
        self.phase != NavPhase::Idle
    }

    /// The curtain is shown for the whole transition.
    pub fn is_curtain_visible(&self) -> bool {
        self.is_navigating()
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Start a curtain transition to `target`.
    ///
    /// Picking from the menu also clicks and closes the drawer. Navigating
    /// mid-transition retargets and restarts the curtain.
    pub fn navigate(&mut self, target: Day, from_menu: bool, now: Instant) -> Vec<Cue> {
        let mut cues = Vec::with_capacity(2);
        if from_menu {
            cues.push(Cue::Click);
            self.close_drawer();
        }
        cues.push(Cue::Whoosh);
        self.phase = NavPhase::Covering {
            target,
            jump_at: now + JUMP_DELAY,
        };
        log::debug!("navigating from {} to {}", self.active, target);
        cues
    }

    /// Advance the transition. Returns at most one event per call.
    pub fn update(&mut self, now: Instant) -> Option<NavEvent> {
        match self.phase {
            NavPhase::Idle => None,
            NavPhase::Covering { target, jump_at } if now >= jump_at => {
                self.active = target;
                self.phase = NavPhase::Revealing {
                    lift_at: jump_at + LIFT_DELAY,
                };
                Some(NavEvent::Jumped(target))
            }
            NavPhase::Revealing { lift_at } if now >= lift_at => {
                self.phase = NavPhase::Idle;
                Some(NavEvent::Lifted)
            }
            _ => None,
        }
    }

    /// Scrolling brought `day` into view. Returns whether the active day changed.
    pub fn observe_visible(&mut self, day: Day) -> bool {
        if self.is_navigating() {
            log::trace!("ignoring {day} while navigating");
            return false;
        }
        let changed = self.active != day;
        self.active = day;
        changed
    }

    pub fn toggle_drawer(&mut self) -> Vec<Cue> {
        self.drawer_open = !self.drawer_open;
        self.hovered = None;
        vec![Cue::Click]
    }

    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
        self.hovered = None;
    }

    pub fn hovered_entry(&self) -> Option<Day> {
        self.hovered
    }

    /// The pointer is over drawer entry `day`, or over none of them.
    ///
    /// Entering an entry plays a hover cue once; staying on it does not.
    pub fn hover_entry(&mut self, day: Option<Day>) -> Vec<Cue> {
        if !self.drawer_open {
            self.hovered = None;
            return Vec::new();
        }
        let entered = day.is_some() && day != self.hovered;
        self.hovered = day;
        if entered {
            vec![Cue::Hover]
        } else {
            Vec::new()
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
    fn test_curtain_timeline() {
        let t0 = Instant::now();
        let mut nav = Navigator::default();
        assert_eq!(nav.navigate(Day::Hug, false, t0), vec![Cue::Whoosh]);
        assert!(nav.is_curtain_visible());

        assert_eq!(nav.update(t0 + ms(399)), None);
        assert_eq!(nav.active(), Day::Rose);
        assert_eq!(nav.update(t0 + ms(400)), Some(NavEvent::Jumped(Day::Hug)));
        assert_eq!(nav.active(), Day::Hug);
        assert!(nav.is_curtain_visible());

        assert_eq!(nav.update(t0 + ms(999)), None);
        assert_eq!(nav.update(t0 + ms(1000)), Some(NavEvent::Lifted));
        assert!(!nav.is_navigating());
        assert_eq!(nav.update(t0 + ms(2000)), None);
    }

    #[test]
    fn test_scroll_ignored_while_navigating() {
        let t0 = Instant::now();
        let mut nav = Navigator::default();
        assert!(nav.observe_visible(Day::Propose));
        assert!(!nav.observe_visible(Day::Propose));

        nav.navigate(Day::Kiss, false, t0);
        assert!(!nav.observe_visible(Day::Teddy));
        nav.update(t0 + ms(400));
        assert!(!nav.observe_visible(Day::Teddy));
        assert_eq!(nav.active(), Day::Kiss);
        nav.update(t0 + ms(1000));
        assert!(nav.observe_visible(Day::Teddy));
    }

    #[test]
    fn test_stall_jumps_then_lifts() {
        let t0 = Instant::now();
        let mut nav = Navigator::default();
        nav.navigate(Day::Valentine, false, t0);
        let late = t0 + Duration::from_secs(5);
        assert_eq!(nav.update(late), Some(NavEvent::Jumped(Day::Valentine)));
        assert_eq!(nav.update(late), Some(NavEvent::Lifted));
    }

    #[test]
    fn test_menu_navigation_closes_drawer() {
        let t0 = Instant::now();
        let mut nav = Navigator::default();
        assert_eq!(nav.toggle_drawer(), vec![Cue::Click]);
        assert!(nav.is_drawer_open());
        assert_eq!(
            nav.navigate(Day::Promise, true, t0),
            vec![Cue::Click, Cue::Whoosh]
        );
        assert!(!nav.is_drawer_open());
    }

    #[test]
    fn test_drawer_entry_hover_plays_once_per_entry() {
        let mut nav = Navigator::default();
        assert!(nav.hover_entry(Some(Day::Teddy)).is_empty());

        nav.toggle_drawer();
        assert_eq!(nav.hover_entry(Some(Day::Teddy)), vec![Cue::Hover]);
        assert!(nav.hover_entry(Some(Day::Teddy)).is_empty());
        assert_eq!(nav.hover_entry(Some(Day::Hug)), vec![Cue::Hover]);
        assert!(nav.hover_entry(None).is_empty());
        assert_eq!(nav.hovered_entry(), None);
        assert_eq!(nav.hover_entry(Some(Day::Hug)), vec![Cue::Hover]);

        nav.close_drawer();
        assert_eq!(nav.hovered_entry(), None);
        nav.toggle_drawer();
        assert_eq!(nav.hover_entry(Some(Day::Hug)), vec![Cue::Hover]);
    }
}
