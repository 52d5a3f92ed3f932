//! Clock abstraction for deterministic timers.

use chrono::{DateTime, TimeDelta, Utc};

/// Abstraction over system time so that delayed reveals can be driven
/// deterministically in tests.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the instant `delay` from now.
    fn deadline_after(&self, delay: TimeDelta) -> DateTime<Utc> {
        self.now() + delay
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Frozen(DateTime<Utc>);

    impl Clock for Frozen {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn test_deadline_after_adds_delay_to_now() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let clock = Frozen(now);

        let deadline = clock.deadline_after(TimeDelta::milliseconds(1200));

        assert_eq!(deadline - now, TimeDelta::milliseconds(1200));
    }
}
