use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, TimeDelta, Utc};

/// Wall-clock time source.
///
/// The timed state never reads the system clock directly; the host injects a
/// `Clock` so tests can simulate time instead of sleeping real seconds.
pub trait Clock {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock for deterministic tests and simulations.
///
/// Clones share the same underlying instant, so a test can keep one handle
/// while the state under test owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    /// Advance the clock by a (possibly fractional) number of seconds.
    ///
    /// Resolution is one millisecond; finer fractions are rounded.
    pub fn advance_secs(&self, secs: f64) {
        let delta = TimeDelta::milliseconds((secs * 1000.0).round() as i64);
        let next = self
            .now
            .get()
            .checked_add_signed(delta)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.now.set(next);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_at(DateTime::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::default();
        let start = clock.now();
        clock.advance_secs(1.5);
        assert_eq!(clock.now() - start, TimeDelta::milliseconds(1500));
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::default();
        let handle = clock.clone();
        handle.advance_secs(10.0);
        assert_eq!(clock.now(), handle.now());
    }
}
