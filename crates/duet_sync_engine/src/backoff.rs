//! Exponential backoff.

use crate::config::BackoffConfig;
use std::time::Duration;

/// Smallest wait the backoff hands out, so a zero poll interval cannot spin.
pub(crate) const MIN_DELAY: Duration = Duration::from_millis(10);

/// Growing wait between attempts after failures.
///
/// Starts at `base` (at least 10 ms), is multiplied after every failure up to the ceiling,
/// and returns to `base` on [`reset`](Backoff::reset).
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    current: Duration,
    multiplier: f64,
    max_delay: Duration,
}

impl Backoff {
    /// Creates a backoff starting at `base`.
    pub fn new(base: Duration, config: &BackoffConfig) -> Self {
        let base = base.max(MIN_DELAY);
        Self {
            base,
            current: base,
            multiplier: config.multiplier.max(1.0),
            max_delay: config.max_delay.max(base),
        }
    }

    /// Returns the wait the next failure would use.
    pub fn current(&self) -> Duration {
        self.current
    }

    /// Returns the wait for this failure and grows the next one.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.grow();
        delay
    }

    /// Like [`next_delay`](Backoff::next_delay) but never shorter than `floor`.
    pub fn next_delay_at_least(&mut self, floor: Duration) -> Duration {
        let delay = self.current.max(floor);
        self.grow();
        delay
    }

    /// Returns to the base wait.
    pub fn reset(&mut self) {
        self.current = self.base;
    }

    fn grow(&mut self) {
        let next = self.current.as_secs_f64() * self.multiplier;
        self.current = Duration::try_from_secs_f64(next.min(self.max_delay.as_secs_f64()))
            .unwrap_or(self.max_delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backoff(base_ms: u64, max_ms: u64) -> Backoff {
        Backoff::new(
            Duration::from_millis(base_ms),
            &BackoffConfig::new(2.0, Duration::from_millis(max_ms)),
        )
    }

    #[test]
    fn grows_geometrically() {
        let mut b = backoff(100, 10_000);
        assert_eq!(b.next_delay(), Duration::from_millis(100));
        assert_eq!(b.next_delay(), Duration::from_millis(200));
        assert_eq!(b.next_delay(), Duration::from_millis(400));
        assert_eq!(b.current(), Duration::from_millis(800));
    }

    #[test]
    fn respects_ceiling() {
        let mut b = backoff(2_000, 30_000);
        let delays: Vec<_> = (0..6).map(|_| b.next_delay()).collect();
        assert_eq!(
            delays,
            vec![2, 4, 8, 16, 30, 30]
                .into_iter()
                .map(Duration::from_secs)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn reset_returns_to_base() {
        let mut b = backoff(100, 10_000);
        b.next_delay();
        b.next_delay();
        b.reset();
        assert_eq!(b.next_delay(), Duration::from_millis(100));
    }

    #[test]
    fn floor_applies_but_growth_continues() {
        let mut b = backoff(100, 10_000);
        assert_eq!(b.next_delay_at_least(Duration::from_secs(1)), Duration::from_secs(1));
        assert_eq!(b.current(), Duration::from_millis(200));
    }

    #[test]
    fn degenerate_config() {
        let mut b = Backoff::new(
            Duration::from_secs(5),
            &BackoffConfig::new(0.5, Duration::from_secs(1)),
        );
        assert_eq!(b.next_delay(), Duration::from_secs(5));
        assert_eq!(b.next_delay(), Duration::from_secs(5));
    }

    #[test]
    fn zero_base_still_waits() {
        let mut b = backoff(0, 10_000);
        assert_eq!(b.next_delay(), MIN_DELAY);
        assert_eq!(b.next_delay(), MIN_DELAY * 2);
        assert_eq!(b.next_delay(), MIN_DELAY * 4);
    }

    #[test]
    fn huge_durations_saturate() {
        let mut b = Backoff::new(
            Duration::MAX,
            &BackoffConfig::new(2.0, Duration::MAX),
        );
        assert_eq!(b.next_delay(), Duration::MAX);
        assert_eq!(b.next_delay(), Duration::MAX);

        let mut b = Backoff::new(
            Duration::from_secs(u64::MAX / 2),
            &BackoffConfig::new(4.0, Duration::MAX),
        );
        b.next_delay();
        assert!(b.next_delay() >= Duration::from_secs(u64::MAX / 2));
    }
}
