//! Calendar-aware durations.
//!
//! A [`Ttl`] keeps its calendar parts separate so that adding "one month" to
//! January 31st lands on the last day of February instead of drifting by a
//! fixed number of seconds. Second counts are split into parts using the
//! Gregorian averages below, which makes `Ttl::from_secs(n).as_secs() == n`.

use chrono::{DateTime, Days, Months, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
pub const SECONDS_PER_WEEK: u64 = 7 * SECONDS_PER_DAY;
/// Average Gregorian year (365.2425 days).
pub const SECONDS_PER_YEAR: u64 = 31_556_952;
/// One twelfth of the average Gregorian year.
pub const SECONDS_PER_MONTH: u64 = SECONDS_PER_YEAR / 12;

/// A duration expressed in calendar parts.
///
/// Serializes as its total number of seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct Ttl {
    pub years: u64,
    pub months: u64,
    pub weeks: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Ttl {
    /// Splits a second count into calendar parts, largest unit first.
    #[must_use]
    pub fn from_secs(secs: u64) -> Self {
        let mut rest = secs;
        let mut take = |unit: u64| {
            let n = rest / unit;
            rest %= unit;
            n
        };

        let years = take(SECONDS_PER_YEAR);
        let months = take(SECONDS_PER_MONTH);
        let weeks = take(SECONDS_PER_WEEK);
        let days = take(SECONDS_PER_DAY);
        let hours = take(SECONDS_PER_HOUR);
        let minutes = take(SECONDS_PER_MINUTE);

        Self {
            years,
            months,
            weeks,
            days,
            hours,
            minutes,
            seconds: rest,
        }
    }

    #[must_use]
    pub fn years(n: u64) -> Self {
        Self { years: n, ..Self::default() }
    }

    #[must_use]
    pub fn months(n: u64) -> Self {
        Self { months: n, ..Self::default() }
    }

    #[must_use]
    pub fn days(n: u64) -> Self {
        Self { days: n, ..Self::default() }
    }

    #[must_use]
    pub fn hours(n: u64) -> Self {
        Self { hours: n, ..Self::default() }
    }

    /// Total length in seconds, counting years and months at their
    /// Gregorian averages. Saturates instead of overflowing.
    #[must_use]
    pub fn as_secs(&self) -> u64 {
        [
            (self.years, SECONDS_PER_YEAR),
            (self.months, SECONDS_PER_MONTH),
            (self.weeks, SECONDS_PER_WEEK),
            (self.days, SECONDS_PER_DAY),
            (self.hours, SECONDS_PER_HOUR),
            (self.minutes, SECONDS_PER_MINUTE),
            (self.seconds, 1),
        ]
        .iter()
        .fold(0u64, |acc, (n, unit)| acc.saturating_add(n.saturating_mul(*unit)))
    }

    /// Returns true if every part is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Adds this duration to `instant`.
    ///
    /// Years and months are applied first as calendar months (clamping to the
    /// end of shorter months), then weeks and days as calendar days, then the
    /// clock parts.
    pub fn add_to(&self, instant: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let out_of_range = || Error::TtlOutOfRange(format!("{} seconds", self.as_secs()));

        let months = self
            .years
            .checked_mul(12)
            .and_then(|m| m.checked_add(self.months))
            .and_then(|m| u32::try_from(m).ok())
            .ok_or_else(out_of_range)?;
        let days = self
            .weeks
            .checked_mul(7)
            .and_then(|d| d.checked_add(self.days))
            .ok_or_else(out_of_range)?;
        let clock = self
            .hours
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(|s| s.checked_add(self.minutes.checked_mul(SECONDS_PER_MINUTE)?))
            .and_then(|s| s.checked_add(self.seconds))
            .and_then(|s| i64::try_from(s).ok())
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(out_of_range)?;

        instant
            .checked_add_months(Months::new(months))
            .and_then(|t| t.checked_add_days(Days::new(days)))
            .and_then(|t| t.checked_add_signed(clock))
            .ok_or_else(out_of_range)
    }
}

impl From<u64> for Ttl {
    fn from(secs: u64) -> Self {
        Self::from_secs(secs)
    }
}

impl From<Ttl> for u64 {
    fn from(ttl: Ttl) -> Self {
        ttl.as_secs()
    }
}
