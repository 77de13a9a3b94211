//! CAS Registry Number normalization.
//!
//! Normalization is purely syntactic: every non-digit is dropped and the
//! remaining digits are regrouped as `A-BB-C`. Nothing here checks that the
//! number denotes a real substance, and the check digit is not verified.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Fewest digits a CAS RN can carry.
pub const MIN_DIGITS: usize = 3;
/// Most digits a CAS RN can carry.
pub const MAX_DIGITS: usize = 10;

/// A canonical, hyphenated CAS RN such as `375-73-5`.
///
/// Only [`normalize`] (and the `FromStr`/serde paths built on it) can create
/// one, so the inner string always has the `A-BB-C` shape.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CasRn(String);

impl CasRn {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CasRn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CasRn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CasRn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s).ok_or_else(|| Error::InvalidCasRn {
            input: s.to_string(),
        })
    }
}

impl TryFrom<String> for CasRn {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CasRn> for String {
    fn from(value: CasRn) -> Self {
        value.0
    }
}

/// Normalize a raw CAS RN to `XXXXXX-YY-Z`, or `None` if it cannot be grouped.
///
/// All non-ASCII-digit characters are discarded. The digits are split into
/// everything but the last three, the next two, and the final check digit;
/// the first group must hold at least two digits.
pub fn normalize(raw: &str) -> Option<CasRn> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
        return None;
    }

    let (first, rest) = digits.split_at(digits.len() - 3);
    if first.len() < 2 {
        return None;
    }
    let (second, check) = rest.split_at(2);

    Some(CasRn(format!("{first}-{second}-{check}")))
}

/// Best-effort query key for input that does not normalize: keeps ASCII
/// letters, digits and hyphens.
pub fn sanitize_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}
