//! Leading-edge debouncing for change signals.
//!
//! Editors often emit several filesystem events for a single save. The
//! debouncer forwards the first signal of a burst and drops every signal that
//! arrives within the window after it. It never flushes a trailing signal.

use std::time::{Duration, Instant};

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Leading-edge debouncer.
///
/// Tracks the instant of the last forwarded signal only; dropped signals do
/// not extend the window.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last_forwarded: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_forwarded: None,
        }
    }

    /// Decide whether a signal observed at `now` should be forwarded.
    ///
    /// Returns `true` and records `now` when more than the window has elapsed
    /// since the last forwarded signal (or nothing was forwarded yet).
    pub fn should_forward(&mut self, now: Instant) -> bool {
        let forward = match self.last_forwarded {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.window,
        };

        if forward {
            self.last_forwarded = Some(now);
        }
        forward
    }

    /// Get the configured window.
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_first_signal_is_forwarded() {
        let mut debouncer = Debouncer::new(ms(100));
        assert!(debouncer.should_forward(Instant::now()));
    }

    #[test]
    fn test_signal_inside_window_is_dropped() {
        let mut debouncer = Debouncer::new(ms(100));
        let start = Instant::now();

        assert!(debouncer.should_forward(start));
        assert!(!debouncer.should_forward(start + ms(40)));
        assert!(debouncer.should_forward(start + ms(150)));
    }

    #[test]
    fn test_dropped_signals_do_not_extend_window() {
        let mut debouncer = Debouncer::new(ms(100));
        let start = Instant::now();

        assert!(debouncer.should_forward(start));
        assert!(!debouncer.should_forward(start + ms(60)));
        assert!(!debouncer.should_forward(start + ms(95)));
        // 101ms after the forwarded one, even though only 6ms after the last drop
        assert!(debouncer.should_forward(start + ms(101)));
    }

    #[test]
    fn test_signal_exactly_at_window_is_dropped() {
        let mut debouncer = Debouncer::new(ms(100));
        let start = Instant::now();

        assert!(debouncer.should_forward(start));
        assert!(!debouncer.should_forward(start + ms(100)));
    }

    #[test]
    fn test_trailing_signal_of_burst_is_not_flushed() {
        let mut debouncer = Debouncer::new(ms(100));
        let start = Instant::now();

        let forwarded: Vec<bool> = [0, 10, 20, 30, 90]
            .iter()
            .map(|offset| debouncer.should_forward(start + ms(*offset)))
            .collect();

        assert_eq!(forwarded, vec![true, false, false, false, false]);
    }

    #[test]
    fn test_default_window() {
        assert_eq!(Debouncer::default().window(), ms(DEFAULT_DEBOUNCE_MS));
    }
}
