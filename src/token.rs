//! Pattern tokenizer.
//!
//! A pattern is split into three kinds of token: runs of one repeated field
//! letter (`yyyy`, `MMM`, `a`), quoted literals (`'at'`, with `''` standing
//! for a single quote) and single passthrough characters (`-`, `:`, `T`).
//! Every token remembers the slice of the pattern it was scanned from, so
//! joining the raw slices of [`tokenize`]'s output reproduces the pattern.

use std::borrow::Cow;
use std::fmt;

const QUOTE: char = '\'';

/// Calendar field selected by a pattern letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// `y`, year of era
    Year,
    /// `M`, month
    Month,
    /// `L`, stand-alone month
    StandaloneMonth,
    /// `d`, day of month
    Day,
    /// `D`, day of year
    DayOfYear,
    /// `E`, day of week
    Weekday,
    /// `c`, stand-alone day of week
    StandaloneWeekday,
    /// `G`, era
    Era,
    /// `a`, AM/PM
    DayPeriod,
    /// `h`, hour 1-12
    Hour12,
    /// `H`, hour 0-23
    Hour23,
    /// `K`, hour 0-11
    Hour11,
    /// `k`, hour 1-24
    Hour24,
    /// `m`, minute
    Minute,
    /// `s`, second
    Second,
    /// `S`, fraction of a second
    FractionalSecond,
}

impl Symbol {
    /// Maps a pattern letter to its field, or `None` for letters outside the
    /// supported alphabet.
    pub const fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'y' => Self::Year,
            'M' => Self::Month,
            'L' => Self::StandaloneMonth,
            'd' => Self::Day,
            'D' => Self::DayOfYear,
            'E' => Self::Weekday,
            'c' => Self::StandaloneWeekday,
            'G' => Self::Era,
            'a' => Self::DayPeriod,
            'h' => Self::Hour12,
            'H' => Self::Hour23,
            'K' => Self::Hour11,
            'k' => Self::Hour24,
            'm' => Self::Minute,
            's' => Self::Second,
            'S' => Self::FractionalSecond,
            _ => return None,
        })
    }
}

/// What a token stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<'p> {
    /// A run of `len` copies of one field letter
    Field { symbol: Symbol, len: usize },
    /// A quoted literal with the quoting removed
    Quoted(Cow<'p, str>),
    /// A single character copied verbatim
    Literal,
}

/// One unit of a tokenized pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'p> {
    raw: &'p str,
    kind: TokenKind<'p>,
}

impl<'p> Token<'p> {
    /// The exact slice of the pattern this token was scanned from
    pub const fn raw(&self) -> &'p str {
        self.raw
    }

    pub const fn kind(&self) -> &TokenKind<'p> {
        &self.kind
    }

    /// Text the token stands for when it is not a supported field: quoted
    /// tokens lose their quotes, everything else is the raw text.
    pub fn literal_text(&self) -> &str {
        match &self.kind {
            TokenKind::Quoted(text) => text,
            TokenKind::Field { .. } | TokenKind::Literal => self.raw,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}

/// Splits `pattern` into tokens. Never fails.
///
/// An unterminated quote runs to the end of the pattern.
pub fn tokenize(pattern: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = pattern;

    while let Some(first) = rest.chars().next() {
        let token = if first == QUOTE {
            scan_quoted(rest)
        } else if let Some(symbol) = Symbol::from_letter(first) {
            let end = rest.find(|c: char| c != first).unwrap_or(rest.len());
            Token {
                raw: &rest[..end],
                // every letter in the alphabet is one byte long
                kind: TokenKind::Field { symbol, len: end },
            }
        } else {
            Token {
                raw: &rest[..first.len_utf8()],
                kind: TokenKind::Literal,
            }
        };
        rest = &rest[token.raw.len()..];
        tokens.push(token);
    }

    tokens
}

/// Scans a quoted span at the start of `rest`, which begins with a quote.
fn scan_quoted(rest: &str) -> Token<'_> {
    if rest[1..].starts_with(QUOTE) {
        return Token {
            raw: &rest[..2],
            kind: TokenKind::Quoted(Cow::Borrowed(&rest[1..2])),
        };
    }

    let body_start = QUOTE.len_utf8();
    let mut text = Cow::Borrowed("");
    let mut cursor = body_start;
    loop {
        let Some(offset) = rest[cursor..].find(QUOTE) else {
            // unterminated: the literal runs to the end of the pattern
            append(&mut text, &rest[cursor..]);
            return Token {
                raw: rest,
                kind: TokenKind::Quoted(text),
            };
        };
        let quote_at = cursor + offset;
        append(&mut text, &rest[cursor..quote_at]);

        if rest[quote_at + 1..].starts_with(QUOTE) {
            append(&mut text, &rest[quote_at..=quote_at]);
            cursor = quote_at + 2;
        } else {
            return Token {
                raw: &rest[..=quote_at],
                kind: TokenKind::Quoted(text),
            };
        }
    }
}

/// Appends `piece`, borrowing as long as the text is a single piece.
fn append<'p>(text: &mut Cow<'p, str>, piece: &'p str) {
    if text.is_empty() {
        *text = Cow::Borrowed(piece);
    } else if !piece.is_empty() {
        text.to_mut().push_str(piece);
    }
}
