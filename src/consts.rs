/// Largest distance from the epoch, in milliseconds, that a `Date` may hold
/// (100,000,000 days either side of 1970-01-01).
pub const MAX_TIMESTAMP_MS: i64 = 8_640_000_000_000_000;

/// Text produced when formatting something that does not denote a valid date
pub const INVALID_DATE: &str = "Invalid Date";

/// Number of months in a year
pub const MONTHS_PER_YEAR: i64 = 12;

/// Last valid day-of-year in a leap year
pub const MAX_DAY_OF_YEAR: u16 = 366;

/// Maximum days in each month (index 0 is January, months are 0-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 12] = [
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Month index for February
pub const FEBRUARY: u8 = 1;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

pub(crate) const MS_PER_SECOND: i64 = 1_000;
pub(crate) const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub(crate) const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub(crate) const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Days between 0000-03-01 and 1970-01-01 in the proleptic Gregorian calendar
pub(crate) const EPOCH_SHIFT_DAYS: i64 = 719_468;
/// Days in one 400-year Gregorian era
pub(crate) const DAYS_PER_ERA: i64 = 146_097;

/// 1970-01-01 was a Thursday (Sunday = 0)
pub(crate) const EPOCH_WEEKDAY: i64 = 4;

/// Timestamp pattern matching `Date`'s `Display` output for years 0 to 9999
pub const ISO_PATTERN: &str = "yyyy-MM-dd'T'HH:mm:ss.SSS";
