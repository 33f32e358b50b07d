use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::consts::{
    DAYS_PER_ERA, EPOCH_SHIFT_DAYS, EPOCH_WEEKDAY, MAX_TIMESTAMP_MS, MONTHS_PER_YEAR, MS_PER_DAY,
    MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND,
};
use crate::prelude::*;
use crate::types::day_of_year;
use crate::{ParseOptions, parse};

/// Years further than this from the epoch can never produce a representable date
const MAX_YEAR_MAGNITUDE: i64 = 300_000;

/// A proleptic Gregorian date and wall-clock time with millisecond precision.
///
/// Dates carry no time zone: every value is a local wall-clock reading,
/// stored as milliseconds since `1970-01-01T00:00:00.000`. Values are limited
/// to [`MAX_TIMESTAMP_MS`] either side of the epoch, so a `Date` is always
/// valid. Operations that could leave that range return [`DateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    millis: i64,
}

/// Error type for constructing dates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// The date lies outside the representable range.
    #[error("Date out of range: must be within {MAX_TIMESTAMP_MS} ms of 1970-01-01")]
    OutOfRange,

    /// The text is not a date in `Display` form.
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),
}

/// Broken-down calendar fields of a [`Date`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Civil {
    pub(crate) year: i64,
    pub(crate) month: u8,
    pub(crate) day: u8,
    pub(crate) hours: u8,
    pub(crate) minutes: u8,
    pub(crate) seconds: u8,
    pub(crate) milliseconds: u16,
}

/// A date, or a raw millisecond timestamp still to be validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub enum DateInput {
    Date(Date),
    Timestamp(i64),
}

impl DateInput {
    /// Normalizes the input into a [`Date`].
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` for timestamps outside the supported range.
    pub fn to_date(self) -> Result<Date, DateError> {
        match self {
            Self::Date(date) => Ok(date),
            Self::Timestamp(ms) => Date::from_timestamp(ms),
        }
    }
}

impl Date {
    /// `1970-01-01T00:00:00.000`
    pub const EPOCH: Self = Self { millis: 0 };

    /// Creates a date from milliseconds since the epoch.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if `|ms|` exceeds [`MAX_TIMESTAMP_MS`].
    pub const fn from_timestamp(ms: i64) -> Result<Self, DateError> {
        if ms < -MAX_TIMESTAMP_MS || ms > MAX_TIMESTAMP_MS {
            return Err(DateError::OutOfRange);
        }
        Ok(Self { millis: ms })
    }

    /// Creates a date from calendar fields, rolling out-of-range fields over
    /// into the next larger unit.
    ///
    /// `month` is 0-based. Any field may be negative or exceed its usual
    /// bounds: day 31 of a 30-day month becomes the 1st of the next month,
    /// month 12 becomes January of the next year, hour -1 becomes 23:00 of
    /// the previous day.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result is not representable.
    pub fn new(
        year: i64,
        month: i64,
        day: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        milliseconds: i64,
    ) -> Result<Self, DateError> {
        let year = year
            .checked_add(month.div_euclid(MONTHS_PER_YEAR))
            .filter(|y| y.abs() <= MAX_YEAR_MAGNITUDE)
            .ok_or(DateError::OutOfRange)?;
        // rem_euclid(12) is always in 0..12
        let month = month.rem_euclid(MONTHS_PER_YEAR) as u8;

        let days = i128::from(days_from_civil(year, month, 1)) + i128::from(day) - 1;
        let total = days * i128::from(MS_PER_DAY)
            + i128::from(hours) * i128::from(MS_PER_HOUR)
            + i128::from(minutes) * i128::from(MS_PER_MINUTE)
            + i128::from(seconds) * i128::from(MS_PER_SECOND)
            + i128::from(milliseconds);

        let millis = i64::try_from(total).map_err(|_| DateError::OutOfRange)?;
        Self::from_timestamp(millis)
    }

    /// Creates midnight of the given calendar day (month 0-based), with rollover.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result is not representable.
    pub fn from_ymd(year: i64, month: i64, day: i64) -> Result<Self, DateError> {
        Self::new(year, month, day, 0, 0, 0, 0)
    }

    /// The current wall-clock instant, read from the system clock
    pub fn now() -> Self {
        let millis = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => i64::try_from(since.as_millis()).unwrap_or(MAX_TIMESTAMP_MS),
            Err(before) => i64::try_from(before.duration().as_millis())
                .map_or(-MAX_TIMESTAMP_MS, |ms| -ms),
        };
        Self {
            millis: millis.clamp(-MAX_TIMESTAMP_MS, MAX_TIMESTAMP_MS),
        }
    }

    /// Milliseconds since the epoch
    #[inline]
    pub const fn timestamp(self) -> i64 {
        self.millis
    }

    /// Astronomical year (1 BC is year 0)
    pub fn year(self) -> i64 {
        self.civil().year
    }

    /// Month, 0-based (January is 0)
    pub fn month(self) -> u8 {
        self.civil().month
    }

    /// Day of the month, 1-based
    pub fn day(self) -> u8 {
        self.civil().day
    }

    pub fn hours(self) -> u8 {
        self.civil().hours
    }

    pub fn minutes(self) -> u8 {
        self.civil().minutes
    }

    pub fn seconds(self) -> u8 {
        self.civil().seconds
    }

    pub fn milliseconds(self) -> u16 {
        self.civil().milliseconds
    }

    /// Day of the week, Sunday is 0
    pub fn weekday(self) -> u8 {
        // rem_euclid(7) is always in 0..7
        (self.epoch_day() + EPOCH_WEEKDAY).rem_euclid(7) as u8
    }

    /// 1-based ordinal day within the year (leap aware)
    pub fn day_of_year(self) -> u16 {
        let civil = self.civil();
        day_of_year(civil.year, civil.month, civil.day)
    }

    /// Whole days since the epoch, rounded towards negative infinity
    pub(crate) const fn epoch_day(self) -> i64 {
        self.millis.div_euclid(MS_PER_DAY)
    }

    /// Milliseconds elapsed since midnight
    pub(crate) const fn time_of_day(self) -> i64 {
        self.millis.rem_euclid(MS_PER_DAY)
    }

    pub(crate) fn civil(self) -> Civil {
        let (year, month, day) = civil_from_days(self.epoch_day());
        let time = self.time_of_day();
        // All casts below are bounded by the divisions
        Civil {
            year,
            month,
            day,
            hours: (time / MS_PER_HOUR) as u8,
            minutes: (time % MS_PER_HOUR / MS_PER_MINUTE) as u8,
            seconds: (time % MS_PER_MINUTE / MS_PER_SECOND) as u8,
            milliseconds: (time % MS_PER_SECOND) as u16,
        }
    }
}

/// Days since the epoch of `year`-`month`-`day` (month 0-based, day 1-based).
pub(crate) const fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let month = month as i64 + 1;
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year.rem_euclid(400);
    let shifted_month = (month + 9) % 12;
    let day_of_shifted_year = (153 * shifted_month + 2) / 5 + day as i64 - 1;
    let day_of_era =
        year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_shifted_year;
    era * DAYS_PER_ERA + day_of_era - EPOCH_SHIFT_DAYS
}

/// Inverse of [`days_from_civil`]: `(year, month 0-based, day 1-based)`.
pub(crate) const fn civil_from_days(epoch_day: i64) -> (i64, u8, u8) {
    let shifted = epoch_day + EPOCH_SHIFT_DAYS;
    let era = shifted.div_euclid(DAYS_PER_ERA);
    let day_of_era = shifted.rem_euclid(DAYS_PER_ERA);
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_shifted_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_shifted_year + 2) / 153;
    let day = day_of_shifted_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 2
    } else {
        shifted_month - 10
    };
    let year = year_of_era + era * 400 + if month <= 1 { 1 } else { 0 };
    (year, month as u8, day as u8)
}

impl fmt::Display for Date {
    /// `yyyy-MM-ddTHH:mm:ss.SSS` with a signed astronomical year
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.civil();
        if c.year < 0 {
            write!(f, "-{:04}", -c.year)?;
        } else {
            write!(f, "{:04}", c.year)?;
        }
        write!(
            f,
            "-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}",
            c.month + 1,
            c.day,
            c.hours,
            c.minutes,
            c.seconds,
            c.milliseconds
        )
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let options = ParseOptions::new().with_reference_date(Self::EPOCH);
        let date = parse(unsigned, "y-MM-dd'T'HH:mm:ss.SSS", &options)
            .map_err(|e| DateError::InvalidFormat(format!("{trimmed}: {e}")))?;
        if !negative {
            return Ok(date);
        }

        let c = date.civil();
        Self::new(
            -c.year,
            i64::from(c.month),
            i64::from(c.day),
            i64::from(c.hours),
            i64::from(c.minutes),
            i64::from(c.seconds),
            i64::from(c.milliseconds),
        )
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
