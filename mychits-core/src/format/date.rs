//! Display dates
//!
//! Backend dates arrive as RFC 3339 timestamps, naive timestamps or plain
//! calendar dates. Anything missing or unparsable renders as `N/A`.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

/// Placeholder for a missing or unparsable date
pub const NOT_AVAILABLE: &str = "N/A";

/// India Standard Time, UTC+05:30
pub const IST_OFFSET_MINUTES: i32 = 330;

/// Short display styles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocaleDateStyle {
    /// `05 Mar 2024`
    #[default]
    Short,
    /// `05/03/2024`
    Numeric,
}

impl LocaleDateStyle {
    fn pattern(self) -> &'static str {
        match self {
            LocaleDateStyle::Short => "%d %b %Y",
            LocaleDateStyle::Numeric => "%d/%m/%Y",
        }
    }
}

enum ParsedDate {
    /// A point in time
    Instant(DateTime<Utc>),
    /// A calendar date with no time of day; never shifted
    Calendar(NaiveDate),
}

fn parse(value: &str) -> Option<ParsedDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(ParsedDate::Instant(dt.with_timezone(&Utc)));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(ParsedDate::Instant(naive.and_utc()));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(ParsedDate::Calendar)
}

/// `YYYY-MM-DD` of the value in UTC, or `N/A`
pub fn format_iso_date(value: Option<&str>) -> String {
    match value.and_then(parse) {
        Some(ParsedDate::Instant(dt)) => dt.date_naive().format("%Y-%m-%d").to_string(),
        Some(ParsedDate::Calendar(date)) => date.format("%Y-%m-%d").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Short display date in the given offset, or `N/A`
pub fn format_locale_date(value: Option<&str>, style: LocaleDateStyle, offset: FixedOffset) -> String {
    let date = match value.and_then(parse) {
        Some(ParsedDate::Instant(dt)) => dt.with_timezone(&offset).date_naive(),
        Some(ParsedDate::Calendar(date)) => date,
        None => return NOT_AVAILABLE.to_string(),
    };
    date.format(style.pattern()).to_string()
}

/// Date formatting bound to the configured display offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormatter {
    offset: FixedOffset,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::ist()
    }
}

impl DateFormatter {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Offset given in minutes east of UTC
    pub fn from_offset_minutes(minutes: i32) -> Result<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
            .ok_or_else(|| Error::Config(format!("UTC offset out of range: {} minutes", minutes)))
    }

    pub fn ist() -> Self {
        Self::new(FixedOffset::east_opt(IST_OFFSET_MINUTES * 60).expect("IST offset is in range"))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn iso(&self, value: Option<&str>) -> String {
        format_iso_date(value)
    }

    pub fn short(&self, value: Option<&str>) -> String {
        format_locale_date(value, LocaleDateStyle::Short, self.offset)
    }

    pub fn numeric(&self, value: Option<&str>) -> String {
        format_locale_date(value, LocaleDateStyle::Numeric, self.offset)
    }
}
