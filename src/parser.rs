//! Token-level parsing.
//!
//! Each field parser reads from `input` at a byte position, records what it
//! read in the shared [`DateComponents`] and returns the position just past
//! the consumed text. Numeric fields come in two shapes: a single letter
//! reads a variable number of digits, a run of `N` letters reads exactly
//! `N` digits and rejects a following digit. Text fields try every known
//! name longest first.

use crate::ParseError;
use crate::components::DateComponents;
use crate::locale::{Locale, TextField, candidates};
use crate::token::{Symbol, Token, TokenKind};
use crate::types::{Era, Field, days_in_year, month_day_from_day_of_year};

/// How many digits a numeric field consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Digits {
    /// Exactly this many, not followed by another digit
    Exactly(usize),
    /// As many as present, up to this many
    AtMost(usize),
    /// As many as present
    Any,
}

impl Digits {
    const fn for_len(len: usize) -> Self {
        if len == 1 { Self::Any } else { Self::Exactly(len) }
    }
}

/// Parses one token of a pattern at `position` in `input`.
///
/// Returns the position after the consumed text. Literal tokens, and field
/// tokens of an unsupported length, must match their text exactly.
///
/// # Errors
/// Returns a `ParseError` describing why the input does not match the token.
pub fn parse_token(
    input: &str,
    position: usize,
    token: &Token<'_>,
    locale: Option<&dyn Locale>,
    components: &mut DateComponents,
) -> Result<usize, ParseError> {
    let &TokenKind::Field { symbol, len } = token.kind() else {
        return expect_literal(input, position, token.literal_text());
    };

    match (symbol, len) {
        (Symbol::Year, _) => parse_year(input, position, len, components),
        (Symbol::Month | Symbol::StandaloneMonth, 1 | 2) => {
            let (month, next) = number(input, position, Digits::for_len(len), Field::Month, 1, 12)?;
            components.supply_month(month as u8 - 1);
            Ok(next)
        }
        (Symbol::Month | Symbol::StandaloneMonth, 3..=5) => {
            let (month, next) = text(input, position, locale, TextField::Month, Field::Month)?;
            // month indices are 0..12
            components.supply_month(month as u8);
            Ok(next)
        }
        (Symbol::Day, 1 | 2) => {
            let (day, next) = number(input, position, Digits::for_len(len), Field::Day, 1, 31)?;
            components.supply_day(day as u8);
            Ok(next)
        }
        (Symbol::DayOfYear, 1..=3) => parse_day_of_year(input, position, len, components),
        (Symbol::Weekday | Symbol::StandaloneWeekday, 1..=5) => {
            // the weekday is checked against the known names but never
            // overrides the parsed date
            let (_, next) = text(input, position, locale, TextField::Weekday, Field::Weekday)?;
            Ok(next)
        }
        (Symbol::Era, 1..=5) => {
            let (era, next) = text(input, position, locale, TextField::Era, Field::Era)?;
            if era == Era::Bc.index() && components.year >= 1 {
                components.year = 1 - components.year;
            }
            Ok(next)
        }
        (Symbol::DayPeriod, 1..=5) => {
            let (period, next) =
                text(input, position, locale, TextField::DayPeriod, Field::DayPeriod)?;
            components.is_pm = Some(period == 1);
            Ok(next)
        }
        (Symbol::Hour12, 1 | 2) => {
            let (hour, next) = number(input, position, Digits::for_len(len), Field::Hour12, 1, 12)?;
            components.hours12 = Some(hour as u8);
            Ok(next)
        }
        (Symbol::Hour11, 1 | 2) => {
            let (hour, next) = number(input, position, Digits::for_len(len), Field::Hour11, 0, 11)?;
            components.hours12 = Some(if hour == 0 { 12 } else { hour as u8 });
            Ok(next)
        }
        (Symbol::Hour23, 1 | 2) => {
            let (hour, next) = number(input, position, Digits::for_len(len), Field::Hour, 0, 23)?;
            components.hours = hour as u8;
            Ok(next)
        }
        (Symbol::Hour24, 1 | 2) => {
            let (hour, next) = number(input, position, Digits::for_len(len), Field::Hour24, 1, 24)?;
            components.hours = (hour % 24) as u8;
            Ok(next)
        }
        (Symbol::Minute, 1 | 2) => {
            let (minute, next) = number(input, position, Digits::for_len(len), Field::Minute, 0, 59)?;
            components.minutes = minute as u8;
            Ok(next)
        }
        (Symbol::Second, 1 | 2) => {
            let (second, next) = number(input, position, Digits::for_len(len), Field::Second, 0, 59)?;
            components.seconds = second as u8;
            Ok(next)
        }
        (Symbol::FractionalSecond, 1..=3) => parse_fraction(input, position, len, components),
        _ => expect_literal(input, position, token.raw()),
    }
}

fn expect_literal(input: &str, position: usize, expected: &str) -> Result<usize, ParseError> {
    match input.get(position..) {
        Some(rest) if rest.starts_with(expected) => Ok(position + expected.len()),
        _ => Err(ParseError::LiteralMismatch {
            expected: expected.to_owned(),
            position,
        }),
    }
}

/// `y` reads any number of digits; `yy` reads two and places them in the
/// century closest to the reference year; longer runs read exactly that
/// many digits as the year itself.
fn parse_year(
    input: &str,
    position: usize,
    len: usize,
    components: &mut DateComponents,
) -> Result<usize, ParseError> {
    let (year, next) = read_digits(input, position, Digits::for_len(len), Field::Year)?;
    let year = if len == 2 {
        closest_century(year, components.reference_year())
    } else {
        year
    };
    components.supply_year(year);
    Ok(next)
}

/// Places a two-digit year within 50 years of `reference`.
fn closest_century(two_digits: i64, reference: i64) -> i64 {
    let candidate = reference.div_euclid(100) * 100 + two_digits;
    if candidate > reference + 50 {
        candidate - 100
    } else if candidate <= reference - 50 {
        candidate + 100
    } else {
        candidate
    }
}

fn parse_day_of_year(
    input: &str,
    position: usize,
    len: usize,
    components: &mut DateComponents,
) -> Result<usize, ParseError> {
    let max = i64::from(days_in_year(components.year));
    let (ordinal, next) = number(input, position, Digits::for_len(len), Field::DayOfYear, 1, max)?;
    // 1 <= ordinal <= 366
    let (month, day) = month_day_from_day_of_year(components.year, ordinal as u16).ok_or(
        ParseError::OutOfRange {
            field: Field::DayOfYear,
            value: ordinal,
            min: 1,
            max,
        },
    )?;
    components.supply_month(month);
    components.supply_day(day);
    Ok(next)
}

/// `S` reads one digit of tenths, `SS` hundredths, `SSS` milliseconds.
fn parse_fraction(
    input: &str,
    position: usize,
    len: usize,
    components: &mut DateComponents,
) -> Result<usize, ParseError> {
    let digits = if len == 1 {
        Digits::AtMost(1)
    } else {
        Digits::Exactly(len)
    };
    let (fraction, next) = read_digits(input, position, digits, Field::Millisecond)?;
    let scale = match len {
        1 => 100,
        2 => 10,
        _ => 1,
    };
    // at most three digits, so below 1000
    components.milliseconds = (fraction * scale) as u16;
    Ok(next)
}

/// Reads digits and checks the value lies in `min..=max`.
fn number(
    input: &str,
    position: usize,
    digits: Digits,
    field: Field,
    min: i64,
    max: i64,
) -> Result<(i64, usize), ParseError> {
    let (value, next) = read_digits(input, position, digits, field)?;
    if !(min..=max).contains(&value) {
        return Err(ParseError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok((value, next))
}

fn read_digits(
    input: &str,
    position: usize,
    digits: Digits,
    field: Field,
) -> Result<(i64, usize), ParseError> {
    let rest = input.get(position..).unwrap_or_default();
    if rest.is_empty() {
        return Err(ParseError::InputExhausted { field, position });
    }

    let run = rest.bytes().take_while(u8::is_ascii_digit).count();
    let take = match digits {
        Digits::Exactly(expected) if run != expected => {
            return Err(ParseError::DigitCount {
                field,
                expected,
                found: run,
                position,
            });
        }
        Digits::Exactly(expected) => expected,
        Digits::AtMost(limit) => run.min(limit),
        Digits::Any => run,
    };
    if take == 0 {
        return Err(ParseError::MissingDigits { field, position });
    }

    let value = rest.as_bytes()[..take]
        .iter()
        .try_fold(0_i64, |acc, &b| {
            acc.checked_mul(10)?.checked_add(i64::from(b - b'0'))
        })
        .ok_or(ParseError::NumberTooLarge { field, position })?;
    Ok((value, position + take))
}

/// Matches the longest known name of `names` at `position`, falling back
/// to a single initial letter. Returns the matched index.
fn text(
    input: &str,
    position: usize,
    locale: Option<&dyn Locale>,
    names: TextField,
    field: Field,
) -> Result<(usize, usize), ParseError> {
    let rest = input.get(position..).unwrap_or_default();
    let Some(first) = rest.chars().next() else {
        return Err(ParseError::InputExhausted { field, position });
    };

    for candidate in candidates(locale, names) {
        if let Some(consumed) = prefix_len(rest, candidate.text) {
            return Ok((candidate.value, position + consumed));
        }
    }

    names
        .initials()
        .iter()
        .find(|&&(initial, _)| same_letter(first, initial))
        .map(|&(_, value)| (value, position + first.len_utf8()))
        .ok_or(ParseError::UnmatchedText { field, position })
}

/// Length in bytes of the prefix of `rest` equal to `candidate`, ignoring case.
fn prefix_len(rest: &str, candidate: &str) -> Option<usize> {
    let mut chars = rest.chars();
    let mut consumed = 0;
    for expected in candidate.chars() {
        let actual = chars.next()?;
        if !same_letter(actual, expected) {
            return None;
        }
        consumed += actual.len_utf8();
    }
    Some(consumed)
}

fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Date;
    use crate::locale::GERMAN;
    use crate::token::tokenize;

    fn components(year: i64) -> DateComponents {
        DateComponents::from_reference(Date::from_ymd(year, 5, 15).unwrap())
    }

    /// Parses `input` against a single-token pattern
    fn one(
        input: &str,
        pattern: &str,
        c: &mut DateComponents,
    ) -> Result<usize, ParseError> {
        let tokens = tokenize(pattern);
        assert_eq!(tokens.len(), 1, "pattern {pattern:?} should be one token");
        parse_token(input, 0, &tokens[0], None, c)
    }

    #[test]
    fn test_fixed_width_requires_exact_digits() {
        let mut c = components(2024);
        assert_eq!(
            one("1", "dd", &mut c),
            Err(ParseError::DigitCount {
                field: Field::Day,
                expected: 2,
                found: 1,
                position: 0
            })
        );
        assert!(matches!(
            one("123", "dd", &mut c),
            Err(ParseError::DigitCount { found: 3, .. })
        ));
        assert_eq!(one("01", "dd", &mut c), Ok(2));
        assert_eq!(c.day, 1);
    }

    #[test]
    fn test_variable_width_is_greedy() {
        let mut c = components(2024);
        assert_eq!(one("7", "d", &mut c), Ok(1));
        assert_eq!(c.day, 7);
        assert_eq!(one("27x", "d", &mut c), Ok(2));
        assert_eq!(c.day, 27);
        assert!(matches!(
            one("123", "d", &mut c),
            Err(ParseError::OutOfRange { value: 123, .. })
        ));
        assert!(matches!(
            one("x", "d", &mut c),
            Err(ParseError::MissingDigits { .. })
        ));
    }

    #[test]
    fn test_ranges() {
        struct TestCase {
            input: &'static str,
            pattern: &'static str,
            ok: bool,
        }

        let cases = [
            TestCase { input: "00", pattern: "dd", ok: false },
            TestCase { input: "32", pattern: "dd", ok: false },
            TestCase { input: "31", pattern: "dd", ok: true },
            TestCase { input: "00", pattern: "MM", ok: false },
            TestCase { input: "13", pattern: "MM", ok: false },
            TestCase { input: "12", pattern: "MM", ok: true },
            TestCase { input: "24", pattern: "HH", ok: false },
            TestCase { input: "23", pattern: "HH", ok: true },
            TestCase { input: "00", pattern: "hh", ok: false },
            TestCase { input: "13", pattern: "hh", ok: false },
            TestCase { input: "12", pattern: "hh", ok: true },
            TestCase { input: "12", pattern: "KK", ok: false },
            TestCase { input: "00", pattern: "KK", ok: true },
            TestCase { input: "00", pattern: "kk", ok: false },
            TestCase { input: "24", pattern: "kk", ok: true },
            TestCase { input: "60", pattern: "mm", ok: false },
            TestCase { input: "59", pattern: "ss", ok: true },
            TestCase { input: "60", pattern: "s", ok: false },
        ];

        for case in &cases {
            let mut c = components(2024);
            assert_eq!(
                one(case.input, case.pattern, &mut c).is_ok(),
                case.ok,
                "{:?} with {}",
                case.input,
                case.pattern
            );
        }
    }

    #[test]
    fn test_fraction_scaling() {
        let mut c = components(2024);
        assert_eq!(one("5", "S", &mut c), Ok(1));
        assert_eq!(c.milliseconds, 500);
        assert_eq!(one("50", "SS", &mut c), Ok(2));
        assert_eq!(c.milliseconds, 500);
        assert_eq!(one("500", "SSS", &mut c), Ok(3));
        assert_eq!(c.milliseconds, 500);
        assert!(one("07", "SSS", &mut c).is_err());
        // a single S reads a single digit
        assert_eq!(one("55", "S", &mut c), Ok(1));
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(closest_century(24, 2024), 2024);
        assert_eq!(closest_century(74, 2024), 2074);
        assert_eq!(closest_century(75, 2024), 1975);
        assert_eq!(closest_century(99, 2024), 1999);
        assert_eq!(closest_century(1, 1990), 2001);
        assert_eq!(closest_century(50, 2000), 2050);

        let mut c = components(2024);
        assert_eq!(one("99", "yy", &mut c), Ok(2));
        assert_eq!(c.year, 1999);
    }

    #[test]
    fn test_year_widths() {
        let mut c = components(2024);
        assert_eq!(one("12345", "y", &mut c), Ok(5));
        assert_eq!(c.year, 12_345);
        assert_eq!(one("0044", "yyyy", &mut c), Ok(4));
        assert_eq!(c.year, 44);
        assert!(one("202", "yyyy", &mut c).is_err());
        assert!(one("20245", "yyyy", &mut c).is_err());
        assert!(matches!(
            one("99999999999999999999", "y", &mut c),
            Err(ParseError::NumberTooLarge { .. })
        ));
    }

    #[test]
    fn test_day_of_year_uses_leap_year() {
        let mut c = components(2024);
        assert_eq!(one("060", "DDD", &mut c), Ok(3));
        assert_eq!((c.month, c.day), (1, 29));

        let mut c = components(2023);
        assert_eq!(one("060", "DDD", &mut c), Ok(3));
        assert_eq!((c.month, c.day), (2, 1));

        let mut c = components(2023);
        assert!(matches!(
            one("366", "DDD", &mut c),
            Err(ParseError::OutOfRange { value: 366, max: 365, .. })
        ));
        let mut c = components(2024);
        assert_eq!(one("366", "D", &mut c), Ok(3));
        assert_eq!((c.month, c.day), (11, 31));
        assert!(one("0", "D", &mut c).is_err());
    }

    #[test]
    fn test_month_names() {
        let mut c = components(2024);
        assert_eq!(one("March", "MMM", &mut c), Ok(5));
        assert_eq!(c.month, 2);
        assert_eq!(one("Sep", "MMMM", &mut c), Ok(3));
        assert_eq!(c.month, 8);
        assert_eq!(one("dec", "MMM", &mut c), Ok(3));
        assert_eq!(c.month, 11);
        assert!(matches!(
            one("Xyz", "MMM", &mut c),
            Err(ParseError::UnmatchedText { field: Field::Month, .. })
        ));
    }

    #[test]
    fn test_weekday_does_not_write() {
        let mut c = components(2024);
        let before = c;
        assert_eq!(one("Wednesday", "EEEE", &mut c), Ok(9));
        assert_eq!(one("Wed", "E", &mut c), Ok(3));
        assert_eq!(c, before);
    }

    #[test]
    fn test_era_longest_match() {
        let mut c = components(2024);
        c.year = 100;
        assert_eq!(one("BCE", "G", &mut c), Ok(3));
        assert_eq!(c.year, -99);

        let mut c = components(2024);
        c.year = 100;
        assert_eq!(one("BC", "G", &mut c), Ok(2));
        assert_eq!(c.year, -99);

        let mut c = components(2024);
        c.year = 1;
        assert_eq!(one("Before Christ", "GGGG", &mut c), Ok(13));
        assert_eq!(c.year, 0);
    }

    #[test]
    fn test_era_leaves_non_positive_year() {
        let mut c = components(2024);
        c.year = 0;
        assert_eq!(one("BC", "G", &mut c), Ok(2));
        assert_eq!(c.year, 0);

        c.year = 2024;
        assert_eq!(one("AD", "G", &mut c), Ok(2));
        assert_eq!(c.year, 2024);
    }

    #[test]
    fn test_names_match_case_insensitively() {
        let mut c = components(2024);
        // narrow English AM is "a"; "A" matches it
        assert_eq!(one("A", "a", &mut c), Ok(1));
        assert_eq!(c.is_pm, Some(false));
        assert_eq!(one("JANUARY", "MMMM", &mut c), Ok(7));
        assert_eq!(c.month, 0);
    }

    #[test]
    fn test_custom_locale_keeps_english_pool() {
        struct Placeholder;
        impl Locale for Placeholder {
            fn era(&self, _: Era, _: crate::Width) -> &str {
                "?"
            }
            fn month(&self, _: usize, _: crate::Width) -> &str {
                "?"
            }
            fn weekday(&self, _: usize, _: crate::Width) -> &str {
                "?"
            }
            fn day_period(&self, _: crate::DayPeriod, _: crate::Width) -> &str {
                "?"
            }
        }

        let tokens = tokenize("G");
        let placeholder: &dyn Locale = &Placeholder;
        let mut c = components(2024);
        c.year = 10;
        // only the narrow English "B" fits
        assert_eq!(parse_token("bx", 0, &tokens[0], Some(placeholder), &mut c), Ok(1));
        assert_eq!(c.year, -9);
    }

    #[test]
    fn test_initial_fallback() {
        assert_eq!(
            TextField::Era.initials().iter().find(|&&(i, _)| same_letter('B', i)),
            Some(&('b', 0))
        );
        assert!(TextField::Month.initials().is_empty());
    }

    #[test]
    fn test_day_period() {
        let mut c = components(2024);
        assert_eq!(one("PM", "a", &mut c), Ok(2));
        assert_eq!(c.is_pm, Some(true));
        assert_eq!(one("A.M.", "aaaa", &mut c), Ok(4));
        assert_eq!(c.is_pm, Some(false));
        assert_eq!(one("pm", "a", &mut c), Ok(2));
        assert_eq!(c.is_pm, Some(true));
    }

    #[test]
    fn test_twelve_hour_writes_hours12_only() {
        let mut c = components(2024);
        assert_eq!(one("09", "hh", &mut c), Ok(2));
        assert_eq!(c.hours12, Some(9));
        assert_eq!(c.hours, 0);

        assert_eq!(one("0", "K", &mut c), Ok(1));
        assert_eq!(c.hours12, Some(12));

        assert_eq!(one("24", "k", &mut c), Ok(2));
        assert_eq!(c.hours, 0);
    }

    #[test]
    fn test_literals() {
        let mut c = components(2024);
        assert_eq!(one("-", "-", &mut c), Ok(1));
        assert_eq!(one("o'clock", "'o''clock'", &mut c), Ok(7));
        assert_eq!(
            one("/", "-", &mut c),
            Err(ParseError::LiteralMismatch {
                expected: "-".to_owned(),
                position: 0
            })
        );
        // unsupported lengths match their raw text
        assert_eq!(one("ddd", "ddd", &mut c), Ok(3));
        assert!(one("001", "ddd", &mut c).is_err());
    }

    #[test]
    fn test_input_exhausted() {
        let mut c = components(2024);
        assert_eq!(
            one("", "MMM", &mut c),
            Err(ParseError::InputExhausted {
                field: Field::Month,
                position: 0
            })
        );
        assert!(matches!(
            one("", "dd", &mut c),
            Err(ParseError::InputExhausted { .. })
        ));
    }

    #[test]
    fn test_locale_and_fallback_pool() {
        let tokens = tokenize("MMMM");
        let german: &dyn Locale = &GERMAN;

        let mut c = components(2024);
        assert_eq!(parse_token("März", 0, &tokens[0], Some(german), &mut c), Ok(5));
        assert_eq!(c.month, 2);

        // English names are still accepted
        assert_eq!(parse_token("October", 0, &tokens[0], Some(german), &mut c), Ok(7));
        assert_eq!(c.month, 9);

        // "Sept." wins over the shorter "Sep"
        assert_eq!(parse_token("Sept.", 0, &tokens[0], Some(german), &mut c), Ok(5));
        assert_eq!(c.month, 8);
    }

    #[test]
    fn test_prefix_len() {
        assert_eq!(prefix_len("March 3", "March"), Some(5));
        assert_eq!(prefix_len("MÄRZ", "März"), Some(5));
        assert_eq!(prefix_len("Ma", "March"), None);
        assert_eq!(prefix_len("anything", ""), Some(0));
    }
}
