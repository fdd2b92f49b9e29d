//! The eight days of the storybook and what each one displays.
//!
//! [`Day`] is the identity of a section and decides which easter eggs it
//! carries. [`DayConfig`] holds the editable presentation: title, date,
//! description and colours. The default storybook is [`DayConfig::storybook`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Rose,
    Propose,
    Chocolate,
    Teddy,
    Promise,
    Hug,
    Kiss,
    Valentine,
}

impl Day {
    /// Every day in storybook order.
    pub const ALL: [Day; 8] = [
        Day::Rose,
        Day::Propose,
        Day::Chocolate,
        Day::Teddy,
        Day::Promise,
        Day::Hug,
        Day::Kiss,
        Day::Valentine,
    ];

    /// Lowercase identifier used in configs and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Day::Rose => "rose",
            Day::Propose => "propose",
            Day::Chocolate => "chocolate",
            Day::Teddy => "teddy",
            Day::Promise => "promise",
            Day::Hug => "hug",
            Day::Kiss => "kiss",
            Day::Valentine => "valentine",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Day> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Option<Day> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Day> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Glyph drawn inside the card icon.
    pub fn icon_glyph(self) -> char {
        match self {
            Day::Rose => '🌹',
            Day::Propose => '💍',
            Day::Chocolate => '🍫',
            Day::Teddy => '🧸',
            Day::Promise => '🤝',
            Day::Hug => '🤗',
            Day::Kiss => '💋',
            Day::Valentine => '❤',
        }
    }

    /// Hint shown next to the icon, if the icon does anything.
    pub fn icon_hint(self) -> Option<&'static str> {
        match self {
            Day::Rose => Some("Tap for Petals"),
            Day::Chocolate => Some("Hover Fast!"),
            Day::Teddy => Some("Tickle Me"),
            Day::Valentine => Some("Tap 5 Times"),
            _ => None,
        }
    }

    pub fn title_hint(self) -> Option<&'static str> {
        self.secret_title().map(|_| "Tap for Secret")
    }

    pub fn description_hint(self) -> Option<&'static str> {
        (self == Day::Promise).then_some("Tap to Lock")
    }

    /// Title revealed by tapping the heading.
    pub fn secret_title(self) -> Option<&'static str> {
        match self {
            Day::Propose => Some("Will You Marry Me?"),
            Day::Valentine => Some("Happy Valentine's Day My Love!"),
            _ => None,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Day {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Day::ALL
            .into_iter()
            .find(|day| day.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ConfigError::UnknownDay(s.to_string()))
    }
}

/// Colour behind every section before the day tint is applied.
pub const BACKDROP: Rgba = Rgba::opaque(15, 23, 42);
/// How strongly the day tint shows through the backdrop.
pub const TINT_STRENGTH: f32 = 0.35;

/// Presentation of one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayConfig {
    pub day: Day,
    pub title: String,
    pub date: String,
    pub description: String,
    /// Tint blended over the dark backdrop.
    pub background: Rgba,
    /// Colour of the card glow and the date badge.
    pub accent: Rgba,
}

impl DayConfig {
    fn new(
        day: Day,
        title: &str,
        date: &str,
        description: &str,
        background: Rgba,
        accent: Rgba,
    ) -> Self {
        Self {
            day,
            title: title.to_string(),
            date: date.to_string(),
            description: description.to_string(),
            background,
            accent,
        }
    }

    /// The dark backdrop tinted with this day's colour.
    pub fn backdrop(&self) -> Rgba {
        BACKDROP.lerp(self.background, TINT_STRENGTH)
    }

    /// The built-in eight days, February 7 through 14.
    pub fn storybook() -> Vec<DayConfig> {
        vec![
            Self::new(
                Day::Rose,
                "Rose Day",
                "February 7",
                "Begin the week of love by expressing your feelings with a beautiful rose. A red rose for love, yellow for friendship, and pink for affection.",
                Rgba::opaque(255, 228, 230),
                Rgba::opaque(244, 63, 94),
            ),
            Self::new(
                Day::Propose,
                "Propose Day",
                "February 8",
                "The perfect day to confess your feelings. Whether it's a ring or just heartfelt words, make a promise of a lifetime today.",
                Rgba::opaque(255, 251, 235),
                Rgba::opaque(245, 158, 11),
            ),
            Self::new(
                Day::Chocolate,
                "Chocolate Day",
                "February 9",
                "Sweeten the bond with chocolates. Because nothing says 'I love you' quite like sharing a sweet treat with your favorite person.",
                Rgba::opaque(255, 247, 237),
                Rgba::opaque(133, 77, 14),
            ),
            Self::new(
                Day::Teddy,
                "Teddy Day",
                "February 10",
                "Gifting a soft teddy bear brings back childhood comfort and represents the warm, cozy feelings of love and care.",
                Rgba::opaque(253, 242, 248),
                Rgba::opaque(236, 72, 153),
            ),
            Self::new(
                Day::Promise,
                "Promise Day",
                "February 11",
                "Love is about commitment. Make a promise to stay together through thick and thin, and to cherish every moment.",
                Rgba::opaque(238, 242, 255),
                Rgba::opaque(59, 130, 246),
            ),
            Self::new(
                Day::Hug,
                "Hug Day",
                "February 12",
                "A warm hug can speak a thousand words. It reassures your partner that you are always there for them, no matter what.",
                Rgba::opaque(236, 253, 245),
                Rgba::opaque(20, 184, 166),
            ),
            Self::new(
                Day::Kiss,
                "Kiss Day",
                "February 13",
                "Seal your promise with a kiss. An expression of love that transcends words and connects souls.",
                Rgba::opaque(254, 242, 242),
                Rgba::opaque(239, 68, 68),
            ),
            Self::new(
                Day::Valentine,
                "Valentine's Day",
                "February 14",
                "The grand finale. A day to celebrate love in all its forms. Cherish your partner and create memories that last forever.",
                Rgba::opaque(252, 231, 243),
                Rgba::opaque(225, 29, 72),
            ),
        ]
    }
}
