//! Localized names for months, weekdays, eras and day periods.
//!
//! The formatter and parser only ever read a locale through the [`Locale`]
//! trait. [`TableLocale`] implements it over static string tables and backs
//! the built-in [`ENGLISH`] and [`GERMAN`] locales. English is also the
//! fallback pool the parser always consults.

use crate::types::{DayPeriod, Era, Width};

/// Source of localized names.
///
/// Indices are 0-based: months run 0 (January) to 11, weekdays 0 (Sunday)
/// to 6. Implementations must be immutable; the crate only reads from them.
pub trait Locale {
    fn era(&self, era: Era, width: Width) -> &str;
    fn month(&self, index: usize, width: Width) -> &str;
    fn weekday(&self, index: usize, width: Width) -> &str;
    fn day_period(&self, period: DayPeriod, width: Width) -> &str;
}

/// The three widths of one set of names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Names<const N: usize> {
    pub narrow: [&'static str; N],
    pub abbr: [&'static str; N],
    pub wide: [&'static str; N],
}

impl<const N: usize> Names<N> {
    /// Name at `index`, or `""` when the index is out of range
    pub fn get(&self, index: usize, width: Width) -> &'static str {
        let table = match width {
            Width::Narrow => &self.narrow,
            Width::Abbreviated => &self.abbr,
            Width::Wide => &self.wide,
        };
        table.get(index).copied().unwrap_or_default()
    }
}

/// A locale described entirely by static tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLocale {
    /// BCP 47 language tag, informational only
    pub code: &'static str,
    pub eras: Names<2>,
    pub months: Names<12>,
    pub weekdays: Names<7>,
    pub day_periods: Names<2>,
}

impl Locale for TableLocale {
    fn era(&self, era: Era, width: Width) -> &str {
        self.eras.get(era.index(), width)
    }

    fn month(&self, index: usize, width: Width) -> &str {
        self.months.get(index, width)
    }

    fn weekday(&self, index: usize, width: Width) -> &str {
        self.weekdays.get(index, width)
    }

    fn day_period(&self, period: DayPeriod, width: Width) -> &str {
        self.day_periods.get(period.index(), width)
    }
}

pub static ENGLISH: TableLocale = TableLocale {
    code: "en-US",
    eras: Names {
        narrow: ["B", "A"],
        abbr: ["BC", "AD"],
        wide: ["Before Christ", "Anno Domini"],
    },
    months: Names {
        narrow: ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"],
        abbr: [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ],
        wide: [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ],
    },
    weekdays: Names {
        narrow: ["S", "M", "T", "W", "T", "F", "S"],
        abbr: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
        wide: [
            "Sunday",
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
        ],
    },
    day_periods: Names {
        narrow: ["a", "p"],
        abbr: ["AM", "PM"],
        wide: ["A.M.", "P.M."],
    },
};

pub static GERMAN: TableLocale = TableLocale {
    code: "de-DE",
    eras: Names {
        narrow: ["v. Chr.", "n. Chr."],
        abbr: ["v. Chr.", "n. Chr."],
        wide: ["vor Christus", "nach Christus"],
    },
    months: Names {
        narrow: ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"],
        abbr: [
            "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
            "Dez.",
        ],
        wide: [
            "Januar",
            "Februar",
            "März",
            "April",
            "Mai",
            "Juni",
            "Juli",
            "August",
            "September",
            "Oktober",
            "November",
            "Dezember",
        ],
    },
    weekdays: Names {
        narrow: ["S", "M", "D", "M", "D", "F", "S"],
        abbr: ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
        wide: [
            "Sonntag",
            "Montag",
            "Dienstag",
            "Mittwoch",
            "Donnerstag",
            "Freitag",
            "Samstag",
        ],
    },
    day_periods: Names {
        narrow: ["AM", "PM"],
        abbr: ["AM", "PM"],
        wide: ["AM", "PM"],
    },
};

/// English era spellings accepted when parsing in addition to the table
const ENGLISH_ERA_ALIASES: [(&str, Era); 2] = [("BCE", Era::Bc), ("CE", Era::Ad)];

/// Which set of localized names a text token reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextField {
    Era,
    Month,
    Weekday,
    DayPeriod,
}

impl TextField {
    const fn count(self) -> usize {
        match self {
            Self::Era | Self::DayPeriod => 2,
            Self::Month => 12,
            Self::Weekday => 7,
        }
    }

    fn name<'a>(self, locale: &'a dyn Locale, index: usize, width: Width) -> &'a str {
        match self {
            Self::Era => locale.era(Era::ALL[index], width),
            Self::Month => locale.month(index, width),
            Self::Weekday => locale.weekday(index, width),
            Self::DayPeriod => locale.day_period(DayPeriod::ALL[index], width),
        }
    }

    /// Case-insensitive first letters tried when no full name matches
    pub(crate) const fn initials(self) -> &'static [(char, usize)] {
        match self {
            Self::Era => &[('b', 0), ('a', 1)],
            Self::DayPeriod => &[('a', 0), ('p', 1)],
            Self::Month | Self::Weekday => &[],
        }
    }
}

/// A name the parser may match, with the index it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Candidate<'a> {
    pub(crate) text: &'a str,
    pub(crate) value: usize,
}

/// Every name of `field` in every width: the supplied locale's first, then
/// the English pool. Sorted longest first; the sort is stable so the
/// supplied locale wins ties.
pub(crate) fn candidates<'a>(locale: Option<&'a dyn Locale>, field: TextField) -> Vec<Candidate<'a>> {
    let english: &'a dyn Locale = &ENGLISH;
    let mut pool = Vec::new();

    for source in locale.into_iter().chain([english]) {
        for width in Width::ALL {
            for value in 0..field.count() {
                let text = field.name(source, value, width);
                if !text.is_empty() {
                    pool.push(Candidate { text, value });
                }
            }
        }
    }
    if field == TextField::Era {
        pool.extend(
            ENGLISH_ERA_ALIASES
                .iter()
                .map(|&(text, era)| Candidate { text, value: era.index() }),
        );
    }

    pool.sort_by_key(|c| std::cmp::Reverse(c.text.chars().count()));
    pool
}
