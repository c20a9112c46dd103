//! Wall-clock access and timestamp-derived identifiers.

use chrono::{DateTime, Utc};

/// Source of the current time. Injected so tests can pin timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// The system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Issues strictly increasing millisecond stamps.
///
/// When the clock has not moved past the last stamp (same millisecond, or a
/// clock that went backwards) the next stamp is `last + 1`.
#[derive(Debug, Default, Clone)]
pub struct TimestampIds {
    last_ms: Option<i64>,
}

impl TimestampIds {
    pub fn next(&mut self, now_ms: i64) -> i64 {
        let stamp = match self.last_ms {
            Some(last) if now_ms <= last => last + 1,
            _ => now_ms,
        };
        self.last_ms = Some(stamp);
        stamp
    }
}
