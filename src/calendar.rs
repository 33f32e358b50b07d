//! Calendar arithmetic on [`Date`].

use crate::consts::{MONTHS_PER_YEAR, MS_PER_DAY};
use crate::date::{Civil, Date, DateError};
use crate::types::{Unit, days_in_month};

impl Date {
    /// Moves the date by whole days, keeping the time of day.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result is not representable.
    pub fn add_days(self, days: i64) -> Result<Self, DateError> {
        days.checked_mul(MS_PER_DAY)
            .and_then(|ms| self.timestamp().checked_add(ms))
            .ok_or(DateError::OutOfRange)
            .and_then(Self::from_timestamp)
    }

    /// Moves the date by calendar months, keeping the time of day.
    ///
    /// The day is clamped to the length of the target month, so January 31st
    /// plus one month is the last day of February.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result is not representable.
    pub fn add_months(self, months: i64) -> Result<Self, DateError> {
        let c = self.civil();
        let total = c
            .year
            .checked_mul(MONTHS_PER_YEAR)
            .and_then(|m| m.checked_add(i64::from(c.month)))
            .and_then(|m| m.checked_add(months))
            .ok_or(DateError::OutOfRange)?;
        let year = total.div_euclid(MONTHS_PER_YEAR);
        // rem_euclid(12) is always in 0..12
        let month = total.rem_euclid(MONTHS_PER_YEAR) as u8;

        let last = days_in_month(year, month);
        if c.day > last {
            trace!("clamping day {} to {last} in {year}-{:02}", c.day, month + 1);
        }
        Self::at(Civil {
            year,
            month,
            day: c.day.min(last),
            ..c
        })
    }

    /// Moves the date by calendar years, clamping February 29th to the 28th
    /// in common years.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result is not representable.
    pub fn add_years(self, years: i64) -> Result<Self, DateError> {
        years
            .checked_mul(MONTHS_PER_YEAR)
            .ok_or(DateError::OutOfRange)
            .and_then(|months| self.add_months(months))
    }

    /// Calendar days from `other` to `self`; positive when `self` is later.
    ///
    /// Only the calendar day counts: 23:59 and 00:01 the next day are one
    /// day apart.
    pub const fn diff_days(self, other: Self) -> i64 {
        self.epoch_day() - other.epoch_day()
    }

    /// Start of the `unit` containing this date.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the start lies before the earliest
    /// representable date.
    pub fn truncate(self, unit: Unit) -> Result<Self, DateError> {
        Self::at(truncated(self.civil(), unit))
    }

    /// Whether both dates fall in the same `unit` (same year, same month of
    /// the same year, and so on).
    pub fn is_same(self, other: Self, unit: Unit) -> bool {
        truncated(self.civil(), unit) == truncated(other.civil(), unit)
    }

    fn at(c: Civil) -> Result<Self, DateError> {
        Self::new(
            c.year,
            i64::from(c.month),
            i64::from(c.day),
            i64::from(c.hours),
            i64::from(c.minutes),
            i64::from(c.seconds),
            i64::from(c.milliseconds),
        )
    }
}

/// Resets every field smaller than `unit` to its first value
const fn truncated(c: Civil, unit: Unit) -> Civil {
    let midnight = Civil {
        hours: 0,
        minutes: 0,
        seconds: 0,
        milliseconds: 0,
        ..c
    };
    match unit {
        Unit::Year => Civil {
            month: 0,
            day: 1,
            ..midnight
        },
        Unit::Month => Civil { day: 1, ..midnight },
        Unit::Day => midnight,
        Unit::Hour => Civil {
            minutes: 0,
            seconds: 0,
            milliseconds: 0,
            ..c
        },
        Unit::Minute => Civil {
            seconds: 0,
            milliseconds: 0,
            ..c
        },
        Unit::Second => Civil {
            milliseconds: 0,
            ..c
        },
    }
}
