use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_DAY_OF_YEAR,
};
use crate::prelude::*;

/// How verbose a localized name is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Width {
    /// Shortest form, often a single letter (`"J"`, `"B"`, `"a"`)
    #[display(fmt = "narrow")]
    Narrow,
    /// Short form (`"Jan"`, `"BC"`, `"AM"`)
    #[display(fmt = "abbreviated")]
    Abbreviated,
    /// Full form (`"January"`, `"Before Christ"`, `"A.M."`)
    #[display(fmt = "wide")]
    Wide,
}

impl Width {
    /// Every width, most verbose first
    pub const ALL: [Self; 3] = [Self::Wide, Self::Abbreviated, Self::Narrow];

    /// Width selected by the length of a text field token: 1-3 letters are
    /// abbreviated, 4 are wide and 5 are narrow.
    pub(crate) const fn from_token_len(len: usize) -> Option<Self> {
        match len {
            1..=3 => Some(Self::Abbreviated),
            4 => Some(Self::Wide),
            5 => Some(Self::Narrow),
            _ => None,
        }
    }
}

/// Gregorian era
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Era {
    /// Before Christ, astronomical years `<= 0`
    #[display(fmt = "BC")]
    Bc,
    /// Anno Domini, astronomical years `>= 1`
    #[display(fmt = "AD")]
    Ad,
}

impl Era {
    /// Both eras in locale index order
    pub const ALL: [Self; 2] = [Self::Bc, Self::Ad];

    pub const fn from_year(year: i64) -> Self {
        if year <= 0 { Self::Bc } else { Self::Ad }
    }

    /// Index used by locale tables (BC = 0, AD = 1)
    pub const fn index(self) -> usize {
        match self {
            Self::Bc => 0,
            Self::Ad => 1,
        }
    }
}

/// Half of the day on a 12-hour clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DayPeriod {
    #[display(fmt = "am")]
    Am,
    #[display(fmt = "pm")]
    Pm,
}

impl DayPeriod {
    /// Both periods in locale index order
    pub const ALL: [Self; 2] = [Self::Am, Self::Pm];

    pub const fn from_hours(hours: u8) -> Self {
        if hours < 12 { Self::Am } else { Self::Pm }
    }

    /// Index used by locale tables (AM = 0, PM = 1)
    pub const fn index(self) -> usize {
        match self {
            Self::Am => 0,
            Self::Pm => 1,
        }
    }
}

/// A calendar or clock field, as named in parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Field {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "day of year")]
    DayOfYear,
    #[display(fmt = "weekday")]
    Weekday,
    #[display(fmt = "era")]
    Era,
    #[display(fmt = "day period")]
    DayPeriod,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "hour (1-12)")]
    Hour12,
    #[display(fmt = "hour (0-11)")]
    Hour11,
    #[display(fmt = "hour (1-24)")]
    Hour24,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "millisecond")]
    Millisecond,
}

/// Granularity used by [`crate::Date::truncate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Unit {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
}

// Helper functions

/// Gregorian leap year rule, valid for astronomical years (year 0 is a leap year)
pub const fn is_leap_year(year: i64) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Days in `month` (0 = January) of `year`
pub const fn days_in_month(year: i64, month: u8) -> u8 {
    debug_assert!(month < 12);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

pub const fn days_in_year(year: i64) -> u16 {
    if is_leap_year(year) { MAX_DAY_OF_YEAR } else { MAX_DAY_OF_YEAR - 1 }
}

/// 1-based ordinal of `day` within `year`
pub fn day_of_year(year: i64, month: u8, day: u8) -> u16 {
    let preceding: u16 = (0..month).map(|m| u16::from(days_in_month(year, m))).sum();
    preceding + u16::from(day)
}

/// Converts a 1-based ordinal day into `(month, day)`, with month 0-based.
/// Returns `None` when the ordinal does not exist in `year`.
pub fn month_day_from_day_of_year(year: i64, ordinal: u16) -> Option<(u8, u8)> {
    if ordinal == 0 {
        return None;
    }
    let mut remaining = ordinal;
    for month in 0..12 {
        let len = u16::from(days_in_month(year, month));
        if remaining <= len {
            // remaining <= 31 here
            return Some((month, remaining as u8));
        }
        remaining -= len;
    }
    None
}
