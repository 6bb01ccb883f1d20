mod consts;
mod prelude;
mod square;
mod token;

pub use consts::*;
pub use square::{MagicSquare, Quadrant};
pub use token::{ShareToken, TokenError};

use crate::prelude::*;
use std::str::FromStr;

/// The four integer components a date contributes to its echo square.
///
/// Parsed from a strict `DD/MM/YYYY` string. The day and month are carried
/// as-is without calendar validation: whether `45/13/2024` names a real date
/// is the caller's concern, the square generator is pure arithmetic over
/// whatever integers it receives. The year is split into a century component
/// (`year / 100`) and a year-of-century component (`year % 100`), both with
/// truncating division. For sub-100 years this split is unintuitive but
/// contractual: year 1 yields century 0 and year-of-century 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{:02}/{:02}/{:04}", "day", "month", "self.full_year()")]
pub struct EchoDate {
    day: i32,
    month: i32,
    century: i32,
    year_of_century: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid numeric field: {_0}")]
    InvalidNumber(String),
    #[display(
        fmt = "Wrong field count: expected {} {}-separated fields, found {_0}",
        DATE_FIELD_COUNT,
        DATE_SEPARATOR
    )]
    WrongFieldCount(usize),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl EchoDate {
    /// Creates a date from its four raw components, no validation applied.
    pub const fn new(day: i32, month: i32, century: i32, year_of_century: i32) -> Self {
        Self {
            day,
            month,
            century,
            year_of_century,
        }
    }

    /// Creates a date from calendar fields, splitting the year into its
    /// century and year-of-century components.
    pub const fn from_calendar(day: i32, month: i32, year: i32) -> Self {
        Self {
            day,
            month,
            century: year / CENTURY_DIVISOR,
            year_of_century: year % CENTURY_DIVISOR,
        }
    }

    /// Returns the day-of-month component (DD)
    #[inline]
    pub const fn day(&self) -> i32 {
        self.day
    }

    /// Returns the month component (MM)
    #[inline]
    pub const fn month(&self) -> i32 {
        self.month
    }

    /// Returns the century component (CC)
    #[inline]
    pub const fn century(&self) -> i32 {
        self.century
    }

    /// Returns the year-of-century component (YY)
    #[inline]
    pub const fn year_of_century(&self) -> i32 {
        self.year_of_century
    }

    /// Reconstructs the full year from the century split.
    /// Exact for every year the parser can produce, since truncating
    /// division and remainder satisfy `(y / 100) * 100 + y % 100 == y`.
    #[inline]
    pub const fn full_year(&self) -> i32 {
        self.century * CENTURY_DIVISOR + self.year_of_century
    }

    /// Returns all four components as a tuple: (day, month, century, year-of-century)
    pub const fn components(&self) -> (i32, i32, i32, i32) {
        (self.day, self.month, self.century, self.year_of_century)
    }

    /// Generates the 4x4 echo square for this date.
    pub fn echo_square(&self) -> MagicSquare {
        MagicSquare::generate(self.day, self.month, self.century, self.year_of_century)
    }
}

impl EchoDate {
    /// Helper to parse a date field with the original text in the error
    fn parse_field(s: &str) -> Result<i32, ParseError> {
        s.parse::<i32>()
            .map_err(|_| ParseError::InvalidNumber(s.to_owned()))
    }
}

impl FromStr for EchoDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // Strict fixed format: exactly DD/MM/YYYY, no other delimiters
        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        if parts.len() != DATE_FIELD_COUNT {
            return Err(ParseError::WrongFieldCount(parts.len()));
        }

        let day = Self::parse_field(parts[0])?;
        let month = Self::parse_field(parts[1])?;
        let year = Self::parse_field(parts[2])?;

        Ok(Self::from_calendar(day, month, year))
    }
}

impl From<EchoDate> for (i32, i32, i32, i32) {
    fn from(date: EchoDate) -> Self {
        date.components()
    }
}

impl serde::Serialize for EchoDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for EchoDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses a `DD/MM/YYYY` string and generates its echo square in one step.
///
/// # Errors
/// Returns `ParseError` if the input is not a well-formed date string.
pub fn date_to_magic_square(input: &str) -> Result<MagicSquare, ParseError> {
    input.parse::<EchoDate>().map(|date| date.echo_square())
}
