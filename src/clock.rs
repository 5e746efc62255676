//! Frame clock: turns wall-clock instants into per-frame deltas.

use std::time::Instant;

/// Measures the time between consecutive laps.
///
/// Every lap re-bases the reference point, so a long gap (a paused game, a
/// suspended terminal) becomes one delta that the session decides whether to
/// use, never a backlog.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Milliseconds since the previous lap; 0 on the first lap
    pub fn lap(&mut self, now: Instant) -> u32 {
        let elapsed = match self.last {
            Some(last) => now.saturating_duration_since(last).as_millis(),
            None => 0,
        };
        self.last = Some(now);
        u32::try_from(elapsed).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_first_lap_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.lap(Instant::now()), 0);
    }

    #[test]
    fn test_laps_rebase() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.lap(start);

        assert_eq!(clock.lap(start + Duration::from_millis(16)), 16);
        assert_eq!(clock.lap(start + Duration::from_millis(50)), 34);
    }

    #[test]
    fn test_backwards_instant_saturates() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::new();
        clock.lap(start);
        assert_eq!(clock.lap(start - Duration::from_millis(500)), 0);
    }
}
