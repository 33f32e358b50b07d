//! Token-level formatting.

use crate::Date;
use crate::locale::{ENGLISH, Locale};
use crate::token::{Symbol, Token, TokenKind};
use crate::types::{DayPeriod, Era, Width};

/// Renders a single token for `date`.
///
/// Literal and quoted tokens come back verbatim (without quoting). Field
/// tokens with an unsupported length come back as their raw pattern text.
/// Localized names use `locale`, or English when it is `None`.
pub fn format_token(date: &Date, token: &Token<'_>, locale: Option<&dyn Locale>) -> String {
    let &TokenKind::Field { symbol, len } = token.kind() else {
        return token.literal_text().to_owned();
    };
    let locale = locale.unwrap_or(&ENGLISH);

    let rendered = match symbol {
        Symbol::Year => Some(format_year(date.year(), len)),
        Symbol::Month | Symbol::StandaloneMonth => format_month(date.month(), len, locale),
        Symbol::Day => numeric(date.day(), len, 2),
        Symbol::DayOfYear => numeric(date.day_of_year(), len, 3),
        Symbol::Weekday | Symbol::StandaloneWeekday => Width::from_token_len(len)
            .map(|width| locale.weekday(usize::from(date.weekday()), width).to_owned()),
        Symbol::Era => Width::from_token_len(len)
            .map(|width| locale.era(Era::from_year(date.year()), width).to_owned()),
        Symbol::DayPeriod => Width::from_token_len(len).map(|width| {
            locale
                .day_period(DayPeriod::from_hours(date.hours()), width)
                .to_owned()
        }),
        Symbol::Hour12 => numeric(hour_of_half_day(date.hours()), len, 2),
        Symbol::Hour23 => numeric(date.hours(), len, 2),
        Symbol::Hour11 => numeric(date.hours() % 12, len, 2),
        Symbol::Hour24 => numeric(if date.hours() == 0 { 24 } else { date.hours() }, len, 2),
        Symbol::Minute => numeric(date.minutes(), len, 2),
        Symbol::Second => numeric(date.seconds(), len, 2),
        Symbol::FractionalSecond => format_fraction(date.milliseconds(), len),
    };

    rendered.unwrap_or_else(|| token.raw().to_owned())
}

/// Zero-pads `value` to `len` digits, for token lengths `1..=max_len`
fn numeric(value: impl Into<u64>, len: usize, max_len: usize) -> Option<String> {
    let value: u64 = value.into();
    (1..=max_len)
        .contains(&len)
        .then(|| format!("{value:0len$}"))
}

/// 0 and 12 both show as 12
const fn hour_of_half_day(hours: u8) -> u8 {
    match hours % 12 {
        0 => 12,
        h => h,
    }
}

/// Renders the year of era: `y` is unpadded, `yy` the last two digits,
/// `yyy` the last three, longer runs pad the full year.
fn format_year(year: i64, len: usize) -> String {
    let year_of_era = (if year <= 0 { 1 - year } else { year }).unsigned_abs();
    match len {
        1 => year_of_era.to_string(),
        2 => format!("{:02}", year_of_era % 100),
        3 => format!("{:03}", year_of_era % 1000),
        _ => format!("{year_of_era:0len$}"),
    }
}

fn format_month(month: u8, len: usize, locale: &dyn Locale) -> Option<String> {
    match len {
        1 | 2 => numeric(month + 1, len, 2),
        _ => Width::from_token_len(len).map(|width| locale.month(usize::from(month), width).to_owned()),
    }
}

/// Keeps the leading `len` digits of the millisecond
fn format_fraction(milliseconds: u16, len: usize) -> Option<String> {
    let divisor = match len {
        1 => 100,
        2 => 10,
        3 => 1,
        _ => return None,
    };
    Some(format!("{:0len$}", milliseconds / divisor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::GERMAN;
    use crate::token::tokenize;

    fn render(date: &Date, pattern: &str, locale: Option<&dyn Locale>) -> String {
        tokenize(pattern)
            .iter()
            .map(|t| format_token(date, t, locale))
            .collect()
    }

    fn sample() -> Date {
        // Friday
        Date::new(2024, 2, 8, 14, 5, 9, 87).unwrap()
    }

    #[test]
    fn test_year_widths() {
        struct TestCase {
            year: i64,
            pattern: &'static str,
            expected: &'static str,
        }

        let cases = [
            TestCase { year: 2024, pattern: "y", expected: "2024" },
            TestCase { year: 2024, pattern: "yy", expected: "24" },
            TestCase { year: 2005, pattern: "yy", expected: "05" },
            TestCase { year: 2024, pattern: "yyy", expected: "024" },
            TestCase { year: 2024, pattern: "yyyy", expected: "2024" },
            TestCase { year: 44, pattern: "yyyy", expected: "0044" },
            TestCase { year: 2024, pattern: "yyyyyy", expected: "002024" },
            TestCase { year: 7, pattern: "y", expected: "7" },
            TestCase { year: 12_345, pattern: "yyyy", expected: "12345" },
            // astronomical 0 is 1 BC, -99 is 100 BC
            TestCase { year: 0, pattern: "y", expected: "1" },
            TestCase { year: -99, pattern: "yyyy", expected: "0100" },
        ];

        for case in &cases {
            let date = Date::from_ymd(case.year, 0, 1).unwrap();
            assert_eq!(
                render(&date, case.pattern, None),
                case.expected,
                "year {} with {}",
                case.year,
                case.pattern
            );
        }
    }

    #[test]
    fn test_month_forms() {
        let d = sample();
        assert_eq!(render(&d, "M", None), "3");
        assert_eq!(render(&d, "MM", None), "03");
        assert_eq!(render(&d, "MMM", None), "Mar");
        assert_eq!(render(&d, "MMMM", None), "March");
        assert_eq!(render(&d, "MMMMM", None), "M");
        assert_eq!(render(&d, "LLLL", None), "March");
        assert_eq!(render(&d, "MMMMMM", None), "MMMMMM");
    }

    #[test]
    fn test_weekday_forms() {
        let d = sample();
        assert_eq!(render(&d, "E", None), "Fri");
        assert_eq!(render(&d, "EEE", None), "Fri");
        assert_eq!(render(&d, "EEEE", None), "Friday");
        assert_eq!(render(&d, "EEEEE", None), "F");
        assert_eq!(render(&d, "cccc", None), "Friday");
    }

    #[test]
    fn test_era_forms() {
        let ad = sample();
        let bc = Date::from_ymd(-99, 0, 1).unwrap();
        assert_eq!(render(&ad, "G", None), "AD");
        assert_eq!(render(&bc, "GGG", None), "BC");
        assert_eq!(render(&bc, "GGGG", None), "Before Christ");
        assert_eq!(render(&bc, "GGGGG", None), "B");
        assert_eq!(render(&bc, "y G", None), "100 BC");
    }

    #[test]
    fn test_day_period_forms() {
        let pm = sample();
        let am = Date::new(2024, 0, 1, 0, 30, 0, 0).unwrap();
        assert_eq!(render(&pm, "a", None), "PM");
        assert_eq!(render(&am, "aaa", None), "AM");
        assert_eq!(render(&am, "aaaa", None), "A.M.");
        assert_eq!(render(&pm, "aaaaa", None), "p");
    }

    #[test]
    fn test_hours() {
        let midnight = Date::new(2024, 0, 1, 0, 0, 0, 0).unwrap();
        let noon = Date::new(2024, 0, 1, 12, 0, 0, 0).unwrap();
        let evening = Date::new(2024, 0, 1, 19, 0, 0, 0).unwrap();

        assert_eq!(render(&midnight, "h", None), "12");
        assert_eq!(render(&noon, "h", None), "12");
        assert_eq!(render(&evening, "hh", None), "07");
        assert_eq!(render(&midnight, "H", None), "0");
        assert_eq!(render(&midnight, "HH", None), "00");
        assert_eq!(render(&evening, "H", None), "19");
        assert_eq!(render(&midnight, "K", None), "0");
        assert_eq!(render(&noon, "KK", None), "00");
        assert_eq!(render(&midnight, "k", None), "24");
        assert_eq!(render(&evening, "kk", None), "19");
    }

    #[test]
    fn test_padding() {
        let d = sample();
        assert_eq!(render(&d, "d", None), "8");
        assert_eq!(render(&d, "dd", None), "08");
        assert_eq!(render(&d, "m:mm", None), "5:05");
        assert_eq!(render(&d, "s:ss", None), "9:09");
        assert_eq!(render(&d, "ddd", None), "ddd");
    }

    #[test]
    fn test_fraction_truncates() {
        let d = Date::new(2024, 0, 1, 0, 0, 0, 987).unwrap();
        assert_eq!(render(&d, "S", None), "9");
        assert_eq!(render(&d, "SS", None), "98");
        assert_eq!(render(&d, "SSS", None), "987");

        let d = sample();
        assert_eq!(render(&d, "S", None), "0");
        assert_eq!(render(&d, "SS", None), "08");
        assert_eq!(render(&d, "SSS", None), "087");
        assert_eq!(render(&d, "SSSS", None), "SSSS");
    }

    #[test]
    fn test_day_of_year() {
        let d = Date::from_ymd(2024, 1, 29).unwrap();
        assert_eq!(render(&d, "D", None), "60");
        assert_eq!(render(&d, "DD", None), "60");
        assert_eq!(render(&d, "DDD", None), "060");

        let d = Date::from_ymd(2023, 0, 5).unwrap();
        assert_eq!(render(&d, "DD", None), "05");

        let d = Date::from_ymd(2024, 11, 31).unwrap();
        assert_eq!(render(&d, "D", None), "366");
    }

    #[test]
    fn test_literals() {
        let d = sample();
        assert_eq!(render(&d, "yyyy-MM-dd'T'HH:mm:ss.SSS", None), "2024-03-08T14:05:09.087");
        assert_eq!(render(&d, "h 'o''clock' a", None), "2 o'clock PM");
        assert_eq!(render(&d, "'unterminated y", None), "unterminated y");
        assert_eq!(render(&d, "Q x", None), "Q x");
    }

    #[test]
    fn test_locale() {
        let d = sample();
        let german: &dyn Locale = &GERMAN;
        assert_eq!(render(&d, "EEEE, d. MMMM y", Some(german)), "Freitag, 8. März 2024");
        assert_eq!(render(&d, "MMM", Some(german)), "März");
        assert_eq!(render(&d, "G", Some(german)), "n. Chr.");
    }
}
