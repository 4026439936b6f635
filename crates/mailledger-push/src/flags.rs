//! Message flags carried by flag-change events.
//!
//! Flag names are reported exactly as the server wrote them. A token is
//! only recognized as a system flag when it uses the RFC 3501 spelling
//! (`\Seen`, `\Deleted`, ...). Anything else, including `\seen`, is kept as
//! a [`Flag::Keyword`] so the output repeats the server's token unchanged.

use std::fmt;

use serde::{Serialize, Serializer};

/// A message flag named in a notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Flag {
    /// `\Seen`
    Seen,
    /// `\Answered`
    Answered,
    /// `\Flagged`
    Flagged,
    /// `\Deleted`
    Deleted,
    /// `\Draft`
    Draft,
    /// `\Recent`
    Recent,
    /// Any other token, verbatim.
    Keyword(String),
}

impl Flag {
    /// Parses one flag token.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token {
            "\\Seen" => Self::Seen,
            "\\Answered" => Self::Answered,
            "\\Flagged" => Self::Flagged,
            "\\Deleted" => Self::Deleted,
            "\\Draft" => Self::Draft,
            "\\Recent" => Self::Recent,
            other => Self::Keyword(other.to_string()),
        }
    }

    /// Returns the token this flag was parsed from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Seen => "\\Seen",
            Self::Answered => "\\Answered",
            Self::Flagged => "\\Flagged",
            Self::Deleted => "\\Deleted",
            Self::Draft => "\\Draft",
            Self::Recent => "\\Recent",
            Self::Keyword(token) => token,
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Splits a space-separated `flagNames` value into flags.
///
/// Runs of whitespace do not produce empty flags.
#[must_use]
pub fn parse_flag_names(names: &str) -> Vec<Flag> {
    names.split_whitespace().map(Flag::parse).collect()
}
