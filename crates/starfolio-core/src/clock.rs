//! Time sources.
//!
//! Views never call `Utc::now()` directly. They hold a [`Clock`] so tests can
//! drive time with a [`ManualClock`], and displayed clocks go through a
//! [`SampledClock`] that only re-reads its source once per interval.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeDelta, Utc};

/// A source of the current instant.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// The operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        if let Ok(mut now) = self.now.lock() {
            *now += delta;
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        if let Ok(mut now) = self.now.lock() {
            *now = at;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
            .lock()
            .map(|now| *now)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Samples a clock on a fixed interval.
///
/// `tick` is called from the render loop; the sample only changes once
/// `interval` has passed since the previous sample.
#[derive(Debug, Clone)]
pub struct SampledClock {
    source: Arc<dyn Clock>,
    interval: TimeDelta,
    sample: DateTime<Utc>,
}

impl SampledClock {
    pub fn new(source: Arc<dyn Clock>, interval: TimeDelta) -> Self {
        let sample = source.now();
        Self {
            source,
            interval,
            sample,
        }
    }

    /// Re-sample if the interval has elapsed. Returns true when the sample changed.
    pub fn tick(&mut self) -> bool {
        let now = self.source.now();
        if now - self.sample >= self.interval || now < self.sample {
            self.sample = now;
            return true;
        }
        false
    }

    /// The last sampled instant.
    pub fn sample(&self) -> DateTime<Utc> {
        self.sample
    }

    /// The underlying clock, for readouts that need the live time.
    pub fn source(&self) -> &Arc<dyn Clock> {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(start());
        clock.advance(TimeDelta::seconds(90));
        assert_eq!(clock.now(), start() + TimeDelta::seconds(90));
    }

    #[test]
    fn test_sampled_clock_holds_until_interval() {
        let clock = Arc::new(ManualClock::new(start()));
        let mut sampled = SampledClock::new(clock.clone(), TimeDelta::minutes(1));

        clock.advance(TimeDelta::seconds(59));
        assert!(!sampled.tick());
        assert_eq!(sampled.sample(), start());

        clock.advance(TimeDelta::seconds(1));
        assert!(sampled.tick());
        assert_eq!(sampled.sample(), start() + TimeDelta::minutes(1));
    }

    #[test]
    fn test_sampled_clock_follows_backwards_jump() {
        let clock = Arc::new(ManualClock::new(start()));
        let mut sampled = SampledClock::new(clock.clone(), TimeDelta::minutes(1));

        clock.set(start() - TimeDelta::hours(1));
        assert!(sampled.tick());
        assert_eq!(sampled.sample(), start() - TimeDelta::hours(1));
    }
}
