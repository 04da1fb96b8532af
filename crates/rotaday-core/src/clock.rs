//! Wall-clock source.
//!
//! Everything that needs "now" takes it as an argument; the [`Clock`] trait
//! is only how the front end obtains it, so tests can pin the date.

use chrono::{DateTime, FixedOffset, Local};

pub trait Clock {
    /// Current local time, carrying the offset that defines "today".
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        now.with_timezone(now.offset())
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
