//! NTP timestamps to and from Unix time.
//!
//! A 32-bit seconds field cannot say which 136-year era it belongs to, so
//! converting to Unix time needs a reference instant ("pivot"). The result is
//! the candidate within half an era of the pivot.

use crate::protocol::TimestampFormat;

/// Seconds from 1900-01-01T00:00:00Z to 1970-01-01T00:00:00Z.
pub const EPOCH_DELTA: i64 = 2_208_988_800;

/// Length of one NTP era (2^32 seconds). Era 0 ends 2036-02-07T06:28:16Z.
pub const ERA_SECONDS: i64 = 1 << 32;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// A point in time as whole seconds from the Unix epoch plus nanoseconds.
///
/// `secs` is floored, so `subsec_nanos` is always in `0..1_000_000_000` even
/// before 1970.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Instant {
    secs: i64,
    subsec_nanos: u32,
}

impl Instant {
    /// `None` if `subsec_nanos` is a second or more.
    pub fn new(secs: i64, subsec_nanos: u32) -> Option<Instant> {
        (u64::from(subsec_nanos) < NANOS_PER_SEC).then_some(Instant { secs, subsec_nanos })
    }

    /// The system clock, read through `std::time::SystemTime`.
    #[cfg(feature = "std")]
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(after) => Instant {
                secs: after.as_secs() as i64,
                subsec_nanos: after.subsec_nanos(),
            },
            Err(e) => {
                let before = e.duration();
                match before.subsec_nanos() {
                    0 => Instant {
                        secs: -(before.as_secs() as i64),
                        subsec_nanos: 0,
                    },
                    n => Instant {
                        secs: -(before.as_secs() as i64) - 1,
                        subsec_nanos: 1_000_000_000 - n,
                    },
                }
            }
        }
    }

    /// Whole seconds since the Unix epoch, rounded towards negative infinity.
    pub fn secs(&self) -> i64 {
        self.secs
    }

    /// Nanoseconds past [`secs`](Self::secs).
    pub fn subsec_nanos(&self) -> u32 {
        self.subsec_nanos
    }
}

/// Absolute NTP seconds for `raw`, choosing the era that puts it nearest `pivot`.
pub fn era_aware_ntp_seconds(raw: u32, pivot: &Instant) -> i64 {
    let pivot_ntp = pivot.secs + EPOCH_DELTA;
    let candidate = pivot_ntp.div_euclid(ERA_SECONDS) * ERA_SECONDS + i64::from(raw);
    let half = ERA_SECONDS / 2;
    match candidate - pivot_ntp {
        d if d > half => candidate - ERA_SECONDS,
        d if d < -half => candidate + ERA_SECONDS,
        _ => candidate,
    }
}

/// Convert `ts` to Unix time, resolving its era against `pivot`.
pub fn timestamp_to_instant(ts: TimestampFormat, pivot: &Instant) -> Instant {
    Instant {
        secs: era_aware_ntp_seconds(ts.seconds, pivot) - EPOCH_DELTA,
        subsec_nanos: ((u64::from(ts.fraction) * NANOS_PER_SEC) >> 32) as u32,
    }
}

/// Uses [`Instant::now`] as the pivot.
#[cfg(feature = "std")]
impl From<TimestampFormat> for Instant {
    fn from(ts: TimestampFormat) -> Self {
        timestamp_to_instant(ts, &Instant::now())
    }
}

/// Drops the era: the seconds wrap modulo 2^32.
impl From<Instant> for TimestampFormat {
    fn from(t: Instant) -> Self {
        TimestampFormat {
            seconds: (t.secs + EPOCH_DELTA).rem_euclid(ERA_SECONDS) as u32,
            fraction: ((u64::from(t.subsec_nanos) << 32) / NANOS_PER_SEC) as u32,
        }
    }
}
