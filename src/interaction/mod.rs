//! Finite state machines behind the per-section easter eggs.
//!
//! Each affordance is a small value type owned by the section view. None of
//! them read a clock: every transition takes `now` as an argument, so the
//! machines are pure and can be driven from tests with synthetic instants.
//!
//! | Machine | Used for |
//! |---------|----------|
//! | [`ClickCounter`] | Valentine heart: tap five times |
//! | [`RapidHover`] + [`HoverTimer`] | Chocolate shower, Valentine glow |
//! | [`Toggle`] | Secret titles |
//! | [`Latch`] | Promise lock |
//! | [`TimedFlag`] | Shake, squeeze and unlock-message pulses |
//! | [`Typewriter`] | Title reveal on activation |
//! | [`EmojiShower`] | Floating emoji with staggered spawn and expiry |

mod counter;
mod emoji;
mod hover;
mod timed;
mod typewriter;

pub use counter::{ClickCounter, CounterEvent, CounterState};
pub use emoji::{EmojiShower, FloatingEmoji};
pub use hover::{HoverEvent, HoverTimer, RapidHover, RapidHoverMode};
pub use timed::{Latch, TimedFlag, Toggle};
pub use typewriter::Typewriter;
