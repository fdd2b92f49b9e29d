use std::time::{Duration, Instant};

/// Reveals a title one character at a time.
///
/// The first character appears one interval after [`restart`](Self::restart).
/// Before any restart the full text is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    text: String,
    interval: Duration,
    started: Option<Instant>,
}

impl Typewriter {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(80);

    pub fn new(text: impl Into<String>) -> Self {
        Self::with_interval(text, Self::DEFAULT_INTERVAL)
    }

    pub fn with_interval(text: impl Into<String>, interval: Duration) -> Self {
        Self {
            text: text.into(),
            interval: interval.max(Duration::from_millis(1)),
            started: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Begin typing again from an empty string.
    pub fn restart(&mut self, now: Instant) {
        self.started = Some(now);
    }

    /// Characters revealed at `now`.
    pub fn revealed_chars(&self, now: Instant) -> usize {
        let total = self.text.chars().count();
        match self.started {
            None => total,
            Some(start) => {
                let elapsed = now.saturating_duration_since(start);
                let ticks = elapsed.as_millis() / self.interval.as_millis().max(1);
                (ticks as usize).min(total)
            }
        }
    }

    /// Visible prefix at `now`, cut on a character boundary.
    pub fn visible(&self, now: Instant) -> &str {
        let n = self.revealed_chars(now);
        match self.text.char_indices().nth(n) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.revealed_chars(now) == self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_full_text_before_restart() {
        let tw = Typewriter::new("Rose Day");
        assert_eq!(tw.visible(Instant::now()), "Rose Day");
    }

    #[test]
    fn test_reveals_per_interval() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new("Hug Day");
        tw.restart(t0);
        assert_eq!(tw.visible(t0), "");
        assert_eq!(tw.visible(t0 + ms(80)), "H");
        assert_eq!(tw.visible(t0 + ms(245)), "Hug");
        assert!(!tw.is_finished(t0 + ms(500)));
        assert_eq!(tw.visible(t0 + ms(10_000)), "Hug Day");
        assert!(tw.is_finished(t0 + ms(560)));
    }

    #[test]
    fn test_multibyte_boundaries() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new("Valentine’s 💖");
        tw.restart(t0);
        assert_eq!(tw.visible(t0 + ms(80 * 10)), "Valentine’");
        assert_eq!(tw.visible(t0 + ms(80 * 13)), "Valentine’s 💖");
    }
}
