use crate::{Date, ParseError};

/// Fields of a date under construction while a pattern is parsed.
///
/// Seeded from the reference date, then overwritten field by field as
/// tokens are parsed. [`DateComponents::finalize`] turns the result into a
/// [`Date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateComponents {
    /// Astronomical year (1 BC is year 0)
    pub year: i64,
    /// Month, 0-based
    pub month: u8,
    /// Day of month, 1-based
    pub day: u8,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub milliseconds: u16,
    /// Set by a day period token
    pub is_pm: Option<bool>,
    /// Hour on a 12-hour clock (1-12), resolved against `is_pm` when finalizing
    pub hours12: Option<u8>,
    initial_day: u8,
    reference_year: i64,
    supplied: Supplied,
}

/// Date fields written by a token rather than inherited from the reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Supplied {
    year: bool,
    month: bool,
    day: bool,
}

impl DateComponents {
    /// Takes the calendar day of `reference`; the time of day starts at midnight.
    pub fn from_reference(reference: Date) -> Self {
        Self {
            year: reference.year(),
            month: reference.month(),
            day: reference.day(),
            hours: 0,
            minutes: 0,
            seconds: 0,
            milliseconds: 0,
            is_pm: None,
            hours12: None,
            initial_day: reference.day(),
            reference_year: reference.year(),
            supplied: Supplied::default(),
        }
    }

    /// Year of the reference date, used to place two-digit years
    pub const fn reference_year(&self) -> i64 {
        self.reference_year
    }

    /// Day of the reference date, kept only while no date field is parsed
    pub const fn initial_day(&self) -> u8 {
        self.initial_day
    }

    pub(crate) const fn supply_year(&mut self, year: i64) {
        self.year = year;
        self.supplied.year = true;
    }

    pub(crate) const fn supply_month(&mut self, month: u8) {
        self.month = month;
        self.supplied.month = true;
    }

    pub(crate) const fn supply_day(&mut self, day: u8) {
        self.day = day;
        self.supplied.day = true;
    }

    /// Builds the final date.
    ///
    /// A date field left unset below one that was parsed falls back to its
    /// first value instead of the reference's: a parsed month without a day
    /// means the 1st, a parsed year without a month means January. The
    /// 12-hour clock is resolved with `is_pm`, an unset period meaning AM.
    /// Days past the end of the month roll over into the next one.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDate` if the date is not representable.
    pub fn finalize(mut self) -> Result<Date, ParseError> {
        if self.supplied.year && !self.supplied.month {
            self.month = 0;
        }
        if (self.supplied.year || self.supplied.month) && !self.supplied.day {
            trace!("no day parsed, using 1 instead of reference day {}", self.initial_day);
            self.day = 1;
        }
        if let Some(hours12) = self.hours12 {
            let half_day = hours12 % 12;
            self.hours = if self.is_pm == Some(true) {
                half_day + 12
            } else {
                half_day
            };
        }

        Date::new(
            self.year,
            i64::from(self.month),
            i64::from(self.day),
            i64::from(self.hours),
            i64::from(self.minutes),
            i64::from(self.seconds),
            i64::from(self.milliseconds),
        )
        .map_err(ParseError::from)
    }
}
