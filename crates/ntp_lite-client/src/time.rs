// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

use crate::unix_time::EPOCH_DELTA;

/// A zone-adjusted time as returned by the client.
///
/// `ntp_seconds` is the server's transmit seconds (NTP epoch, era 0) with
/// `zone_hours * 3600` already added. The default value is zero, meaning
/// "no time".
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ZonedTime {
    ntp_seconds: i64,
    zone_hours: i8,
}

impl ZonedTime {
    /// Create a value from zone-adjusted NTP seconds and the offset they include.
    pub fn new(ntp_seconds: i64, zone_hours: i8) -> Self {
        ZonedTime {
            ntp_seconds,
            zone_hours,
        }
    }

    /// Zone-adjusted seconds since the NTP epoch.
    pub fn ntp_seconds(&self) -> i64 {
        self.ntp_seconds
    }

    /// The zone offset in hours.
    pub fn zone_hours(&self) -> i8 {
        self.zone_hours
    }

    /// Seconds since the NTP epoch with the zone offset removed.
    pub fn utc_ntp_seconds(&self) -> i64 {
        self.ntp_seconds - i64::from(self.zone_hours) * 3600
    }

    /// Seconds since the Unix epoch (UTC).
    pub fn unix_seconds(&self) -> i64 {
        self.utc_ntp_seconds() - EPOCH_DELTA
    }

    /// The instant as a UTC calendar time.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.unix_seconds(), 0).single()
    }

    /// The instant as a calendar time in the configured zone.
    ///
    /// Returns `None` if the offset lies outside ±24 hours.
    pub fn to_local(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(i32::from(self.zone_hours) * 3600)?;
        Some(self.to_utc()?.with_timezone(&offset))
    }
}

impl fmt::Display for ZonedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_local() {
            Some(local) => write!(f, "{}", local.to_rfc3339()),
            None => write!(f, "{} (NTP, {:+} h)", self.ntp_seconds, self.zone_hours),
        }
    }
}
