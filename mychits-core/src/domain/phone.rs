//! Indian mobile numbers

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::result::{Error, Result};

/// A validated 10-digit Indian mobile number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse user input such as `98765 43210`, `+91-98765-43210` or `098765 43210`.
    pub fn parse(input: &str) -> Result<Self> {
        let digits: String = input
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
            .collect();

        let digits = digits.strip_prefix('+').unwrap_or(&digits);
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::validation("Phone number may only contain digits"));
        }

        let national = match digits.len() {
            12 if digits.starts_with("91") => &digits[2..],
            11 if digits.starts_with('0') => &digits[1..],
            _ => digits,
        };

        if national.len() != 10 {
            return Err(Error::validation("Phone number must have 10 digits"));
        }
        if !matches!(national.as_bytes()[0], b'6'..=b'9') {
            return Err(Error::validation("Phone number must start with 6, 7, 8 or 9"));
        }

        Ok(Self(national.to_string()))
    }

    /// The bare 10 digits, as the backend expects them
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `+91 98765 43210`
    pub fn international(&self) -> String {
        format!("+91 {}", self)
    }

    /// `98XXXXXX10`, safe for logs
    pub fn masked(&self) -> String {
        format!("{}XXXXXX{}", &self.0[..2], &self.0[8..])
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", &self.0[..5], &self.0[5..])
    }
}

impl FromStr for PhoneNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
