//! Indian digit grouping for currency amounts
//!
//! The last three integer digits form one group and everything before them is
//! grouped in pairs: `1234567` → `12,34,567`. The fractional part is passed
//! through untouched unless a fixed precision is requested.

use std::borrow::Cow;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::CurrencyAmount;

/// Rupee sign
pub const RUPEE: &str = "₹";

/// Format with Indian grouping, keeping any fractional part verbatim.
///
/// A missing amount formats as `"0"`.
pub fn format_amount(amount: impl Into<CurrencyAmount>) -> String {
    CurrencyFormat::new().format(amount)
}

/// Round half away from zero to `precision` decimals, pad, then group.
/// Used for loan repayment figures.
pub fn format_amount_fixed(amount: impl Into<CurrencyAmount>, precision: u32) -> String {
    CurrencyFormat::new().precision(precision).format(amount)
}

/// Formatting options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyFormat {
    precision: Option<u32>,
    symbol: Option<String>,
}

impl CurrencyFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// `₹` prefix, placed after any minus sign
    pub fn rupees() -> Self {
        Self::new().symbol(RUPEE)
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn format(&self, amount: impl Into<CurrencyAmount>) -> String {
        let amount = amount.into();
        let symbol = self.symbol.as_deref().unwrap_or("");

        let Some(text) = amount.as_text() else {
            return format!("{}0", symbol);
        };

        let text = match self.precision.zip(amount.to_decimal()) {
            Some((precision, value)) => Cow::Owned(fixed(value, precision)),
            None => text,
        };

        match split_number(&text) {
            Some(parts) => format!(
                "{}{}{}{}",
                if parts.negative { "-" } else { "" },
                symbol,
                group_indian(parts.integer),
                parts.fraction
            ),
            // Not a plain number; show it as-is
            None => text.into_owned(),
        }
    }
}

fn fixed(value: Decimal, precision: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    format!("{:.*}", precision as usize, rounded)
}

struct NumberParts<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
}

/// Split `-1234.5` into sign, `1234` and `.5`
fn split_number(text: &str) -> Option<NumberParts<'_>> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (integer, fraction) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    if integer.is_empty() || !integer.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(NumberParts {
        negative,
        integer,
        fraction,
    })
}

/// Group an all-digit string in the Indian style
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(tail);
    out
}
