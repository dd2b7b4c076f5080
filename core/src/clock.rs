//! Time sources used to map sensor timestamps onto wall-clock milliseconds.
//!
//! Sensors stamp readings with a monotonic clock that starts at boot. The
//! magnitude stage converts those stamps by adding the current difference
//! between the wall clock and the monotonic clock, read fresh for every
//! sample so that drift between the two clocks is followed over long sessions.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Source of wall-clock and monotonic readings, both in milliseconds.
pub trait TimeBase {
    fn wall_clock_ms(&self) -> i64;
    fn monotonic_ms(&self) -> i64;

    /// Offset that turns a monotonic reading into wall-clock time.
    fn offset_ms(&self) -> i64 {
        self.wall_clock_ms().saturating_sub(self.monotonic_ms())
    }
}

/// Host clocks. The monotonic origin is the moment the time base was created;
/// callers stamp samples with [`SystemTimeBase::timestamp_ns`] so both sides
/// share it.
#[derive(Debug, Clone)]
pub struct SystemTimeBase {
    origin: Instant,
}

impl SystemTimeBase {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Monotonic nanoseconds since the origin, saturating at `i64::MAX`.
    pub fn timestamp_ns(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(i64::MAX)
    }
}

impl Default for SystemTimeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeBase for SystemTimeBase {
    fn wall_clock_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }

    fn monotonic_ms(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_millis()).unwrap_or(i64::MAX)
    }
}

/// Frozen readings, for replaying recorded sessions deterministically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedTimeBase {
    pub wall_clock_ms: i64,
    pub monotonic_ms: i64,
}

impl FixedTimeBase {
    pub fn new(wall_clock_ms: i64, monotonic_ms: i64) -> Self {
        Self {
            wall_clock_ms,
            monotonic_ms,
        }
    }

    /// Sample timestamps map one-to-one onto milliseconds.
    pub fn identity() -> Self {
        Self::default()
    }
}

impl TimeBase for FixedTimeBase {
    fn wall_clock_ms(&self) -> i64 {
        self.wall_clock_ms
    }

    fn monotonic_ms(&self) -> i64 {
        self.monotonic_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_time_base_offset_is_difference() {
        let base = FixedTimeBase::new(1_700_000_000_000, 42_000);
        assert_eq!(base.offset_ms(), 1_700_000_000_000 - 42_000);
        assert_eq!(FixedTimeBase::identity().offset_ms(), 0);
    }

    #[test]
    fn offset_saturates_on_extreme_readings() {
        assert_eq!(FixedTimeBase::new(i64::MIN, 1).offset_ms(), i64::MIN);
        assert_eq!(FixedTimeBase::new(i64::MAX, -1).offset_ms(), i64::MAX);
    }

    #[test]
    fn system_time_base_is_monotonic_and_near_epoch_now() {
        let base = SystemTimeBase::new();
        let first = base.timestamp_ns();
        let second = base.timestamp_ns();
        assert!(second >= first);
        assert!(base.offset_ms() > 1_500_000_000_000);
    }
}
