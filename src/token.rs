use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DATE_SEPARATOR, EchoDate, ParseError, TOKEN_SEPARATOR, prelude::*};

/// A URL-safe encoding of the date behind a shared square.
///
/// Shared links carry the originating date, never the generated matrix:
/// the receiving view regenerates the square from the date. The token is
/// the canonical date string with `.` in place of `/`, so it drops into a
/// URL path or query without percent-encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(
    fmt = "{:02}{}{:02}{}{:04}",
    "date.day()",
    TOKEN_SEPARATOR,
    "date.month()",
    TOKEN_SEPARATOR,
    "date.full_year()"
)]
pub struct ShareToken {
    date: EchoDate,
}

/// Error type for share token decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Error parsing a date component inside the token.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid token format.
    #[error("Invalid share token: {0}")]
    InvalidFormat(String),
}

impl ShareToken {
    /// Wraps a date for sharing
    pub const fn new(date: EchoDate) -> Self {
        Self { date }
    }

    /// Returns the encoded date
    pub const fn date(&self) -> EchoDate {
        self.date
    }
}

impl EchoDate {
    /// Returns the URL-safe share token for this date.
    pub const fn share_token(self) -> ShareToken {
        ShareToken::new(self)
    }
}

impl From<EchoDate> for ShareToken {
    fn from(date: EchoDate) -> Self {
        Self::new(date)
    }
}

impl FromStr for ShareToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // A raw date string is not a token; reject before rewriting
        // separators so the error names the right format.
        if trimmed.contains(DATE_SEPARATOR) {
            return Err(TokenError::InvalidFormat(format!(
                "Unexpected '{DATE_SEPARATOR}' in token: {s}"
            )));
        }

        let separator_count = trimmed.matches(TOKEN_SEPARATOR).count();
        if separator_count != 2 {
            return Err(TokenError::InvalidFormat(format!(
                "Expected 2 '{TOKEN_SEPARATOR}' separators, found {separator_count}: {s}"
            )));
        }

        let date_str = trimmed.replace(TOKEN_SEPARATOR, &DATE_SEPARATOR.to_string());
        let date = date_str.parse::<EchoDate>()?;

        Ok(Self { date })
    }
}

impl Serialize for ShareToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ShareToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
