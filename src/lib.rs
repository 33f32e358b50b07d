#[macro_use]
mod logging;

mod calendar;
mod components;
mod consts;
mod date;
mod formatter;
mod locale;
mod parser;
mod prelude;
mod token;
mod types;

pub use components::DateComponents;
pub use consts::*;
pub use date::{Date, DateError, DateInput};
pub use formatter::format_token;
pub use locale::{ENGLISH, GERMAN, Locale, Names, TableLocale};
pub use parser::parse_token;
pub use token::{Symbol, Token, TokenKind, tokenize};
pub use types::{DayPeriod, Era, Field, Unit, Width, days_in_month, days_in_year, is_leap_year};

use std::fmt;

/// Why a string does not match a pattern.
///
/// Positions are byte offsets into the parsed text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Expected {expected:?} at position {position}")]
    LiteralMismatch { expected: String, position: usize },

    #[error("Input ended at position {position} while reading the {field}")]
    InputExhausted { field: Field, position: usize },

    #[error("Expected {expected} digits for the {field} at position {position}, found {found}")]
    DigitCount {
        field: Field,
        expected: usize,
        found: usize,
        position: usize,
    },

    #[error("Expected digits for the {field} at position {position}")]
    MissingDigits { field: Field, position: usize },

    #[error("Number for the {field} at position {position} is too large")]
    NumberTooLarge { field: Field, position: usize },

    #[error("Invalid {field}: {value} (must be {min}-{max})")]
    OutOfRange {
        field: Field,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("No {field} name matches at position {position}")]
    UnmatchedText { field: Field, position: usize },

    #[error("Unexpected trailing input at position {position}: {rest:?}")]
    TrailingInput { position: usize, rest: String },

    #[error(transparent)]
    InvalidDate(#[from] DateError),
}

/// Settings for [`parse`].
///
/// ```
/// use gregorian_pattern::{Date, GERMAN, ParseOptions, parse};
///
/// let options = ParseOptions::new()
///     .with_locale(&GERMAN)
///     .with_reference_date(Date::EPOCH);
/// let date = parse("8. März 2024", "d. MMMM y", &options).unwrap();
/// assert_eq!(date, Date::from_ymd(2024, 2, 8).unwrap());
/// ```
#[derive(Clone, Copy, Default)]
pub struct ParseOptions<'l> {
    locale: Option<&'l dyn Locale>,
    reference_date: Option<DateInput>,
}

impl<'l> ParseOptions<'l> {
    /// English names and the current time as the reference date
    pub const fn new() -> Self {
        Self {
            locale: None,
            reference_date: None,
        }
    }

    /// Names tried before the built-in English ones
    #[must_use]
    pub const fn with_locale(mut self, locale: &'l dyn Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Date whose calendar day fills in fields the pattern does not parse.
    #[must_use]
    pub fn with_reference_date(mut self, reference: impl Into<DateInput>) -> Self {
        self.reference_date = Some(reference.into());
        self
    }

    pub const fn locale(&self) -> Option<&'l dyn Locale> {
        self.locale
    }

    /// The configured reference date, or now when none was set.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the reference was given as an
    /// unrepresentable timestamp.
    pub fn reference_date(&self) -> Result<Date, DateError> {
        self.reference_date.map_or_else(|| Ok(Date::now()), DateInput::to_date)
    }
}

impl fmt::Debug for ParseOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("locale", &self.locale.map(|_| "..."))
            .field("reference_date", &self.reference_date)
            .finish()
    }
}

/// Renders `date` with `pattern`.
///
/// Names come from `locale`, or English when it is `None`. A timestamp
/// outside the representable range renders as [`INVALID_DATE`].
///
/// ```
/// use gregorian_pattern::{Date, format};
///
/// let date = Date::new(2024, 2, 8, 14, 5, 0, 0).unwrap();
/// assert_eq!(format(date, "EEEE, MMMM d, y 'at' h:mm a", None), "Friday, March 8, 2024 at 2:05 PM");
/// ```
pub fn format(date: impl Into<DateInput>, pattern: &str, locale: Option<&dyn Locale>) -> String {
    let input: DateInput = date.into();
    let Ok(date) = input.to_date() else {
        debug!("formatting an unrepresentable timestamp with {pattern:?}");
        return INVALID_DATE.to_owned();
    };

    tokenize(pattern)
        .iter()
        .map(|token| format_token(&date, token, locale))
        .collect()
}

/// Parses `text` with `pattern`.
///
/// Every token must match in order and the whole text must be consumed.
/// Date fields the pattern does not cover come from the reference date;
/// time fields default to midnight.
///
/// ```
/// use gregorian_pattern::{Date, ParseOptions, parse};
///
/// let date = parse("100 BC", "y G", &ParseOptions::new()).unwrap();
/// assert_eq!(date.year(), -99);
/// ```
///
/// # Errors
/// Returns a `ParseError` describing the first token that fails to match,
/// trailing text after the last token, or a date that is not representable.
pub fn parse(text: &str, pattern: &str, options: &ParseOptions<'_>) -> Result<Date, ParseError> {
    let tokens = tokenize(pattern);
    let locale = options.locale();
    let seed = (DateComponents::from_reference(options.reference_date()?), 0);

    let (components, position) =
        tokens
            .iter()
            .try_fold(seed, |(mut components, position), token| {
                parse_token(text, position, token, locale, &mut components)
                    .map(|next| (components, next))
                    .map_err(|err| {
                        debug!("token {token} of {pattern:?} failed on {text:?}: {err}");
                        err
                    })
            })?;

    if position < text.len() {
        debug!("{text:?} has input left after {pattern:?}");
        return Err(ParseError::TrailingInput {
            position,
            rest: text[position..].to_owned(),
        });
    }

    components.finalize()
}

/// Whether `text` parses with `pattern`.
pub fn is_match(text: &str, pattern: &str, options: &ParseOptions<'_>) -> bool {
    parse(text, pattern, options).is_ok()
}
