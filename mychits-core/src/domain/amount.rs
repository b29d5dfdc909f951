//! Currency amount as it arrives from the backend or the user

use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary value that may be a JSON number, a numeric string, or absent.
///
/// The backend is inconsistent about amount encoding, so this accepts
/// `null`, `1234.5` and `"1234.5"` alike.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurrencyAmount {
    #[default]
    Missing,
    Number(serde_json::Number),
    Text(String),
}

impl CurrencyAmount {
    /// Textual form used by the formatters, `None` when missing
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CurrencyAmount::Missing => None,
            CurrencyAmount::Number(n) => Some(Cow::Owned(number_text(n))),
            CurrencyAmount::Text(s) => Some(Cow::Borrowed(s.trim())),
        }
    }

    /// Parse into a decimal, if the value is numeric
    pub fn to_decimal(&self) -> Option<Decimal> {
        let text = self.as_text()?;
        text.parse::<Decimal>()
            .ok()
            .or_else(|| Decimal::from_scientific(&text).ok())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CurrencyAmount::Missing)
    }
}

/// Integers print as-is. Floats use the shortest plain decimal form, so
/// `1e5` and `1000.0` print as `100000` and `1000`, and `-0.0` as `0`.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => {
            if f == 0.0 {
                "0".to_string()
            } else {
                f.to_string()
            }
        }
        _ => n.to_string(),
    }
}

impl From<i64> for CurrencyAmount {
    fn from(value: i64) -> Self {
        CurrencyAmount::Number(value.into())
    }
}

impl From<i32> for CurrencyAmount {
    fn from(value: i32) -> Self {
        CurrencyAmount::Number(value.into())
    }
}

impl From<u64> for CurrencyAmount {
    fn from(value: u64) -> Self {
        CurrencyAmount::Number(value.into())
    }
}

impl From<f64> for CurrencyAmount {
    fn from(value: f64) -> Self {
        match serde_json::Number::from_f64(value) {
            Some(n) => CurrencyAmount::Number(n),
            // NaN and infinities have no JSON form
            None => CurrencyAmount::Text(value.to_string()),
        }
    }
}

impl From<Decimal> for CurrencyAmount {
    fn from(value: Decimal) -> Self {
        CurrencyAmount::Text(value.to_string())
    }
}

impl From<&str> for CurrencyAmount {
    fn from(value: &str) -> Self {
        CurrencyAmount::Text(value.to_string())
    }
}

impl From<String> for CurrencyAmount {
    fn from(value: String) -> Self {
        CurrencyAmount::Text(value)
    }
}

impl<T: Into<CurrencyAmount>> From<Option<T>> for CurrencyAmount {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
