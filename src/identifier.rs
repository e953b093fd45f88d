//! NIK identifier normalization.
//!
//! An [`Identifier`] is exactly 16 ASCII digits whose first digit is `3`. The only ways to get
//! one are [`normalize`], [`normalize_str`] and the validating [`TryFrom<String>`], so any
//! `Identifier` in hand satisfies the rule.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Value;

/// Number of digits in a valid identifier.
pub const IDENTIFIER_LEN: usize = 16;

/// Required first digit of a valid identifier.
pub const IDENTIFIER_PREFIX: char = '3';

/// Column name under which the canonical identifier is exported.
pub const IDENTIFIER_COLUMN: &str = "NIK";

/// A validated identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// The identifier digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_digits(digits: String) -> Option<Self> {
        (digits.len() == IDENTIFIER_LEN && digits.starts_with(IDENTIFIER_PREFIX)).then_some(Self(digits))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

/// Rejected input for [`Identifier::try_from`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a 16-digit identifier starting with '3'")]
pub struct InvalidIdentifier(pub String);

impl TryFrom<String> for Identifier {
    type Error = InvalidIdentifier;

    /// Accepts the canonical form only: no separators, no surrounding text.
    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.bytes().all(|b| b.is_ascii_digit()) {
            Self::from_digits(s.clone()).ok_or(InvalidIdentifier(s))
        } else {
            Err(InvalidIdentifier(s))
        }
    }
}

/// Normalize a raw cell value into an identifier.
///
/// The value is rendered with [`Value::render`] (missing values and `NaN` yield `None`;
/// integral floats render without `.0`), every non-digit character is dropped, and the
/// remaining digits must be 16 long and start with `3`.
pub fn normalize(value: &Value) -> Option<Identifier> {
    match value {
        Value::Utf8(s) => normalize_str(s),
        other => normalize_str(&other.render()?),
    }
}

/// Normalize text into an identifier. See [`normalize`].
///
/// ```
/// use nik_reconcile::identifier::normalize_str;
///
/// let id = normalize_str("32-0123 4567/8901 23").unwrap();
/// assert_eq!(id.as_str(), "3201234567890123");
/// assert!(normalize_str("4201234567890123").is_none());
/// ```
pub fn normalize_str(raw: &str) -> Option<Identifier> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    Identifier::from_digits(digits)
}
