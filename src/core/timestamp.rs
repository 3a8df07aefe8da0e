//! Timestamp formatting for the `%t` header directive
//!
//! Supports RFC 3339, ISO 8601, Unix timestamps, and custom strftime formats.

use chrono::{DateTime, SecondsFormat, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Write};

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use category_logger::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Rfc3339.format(&at), "2025-01-08T10:30:45Z");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 with second precision: `2025-01-08T10:30:45+02:00`
    ///
    /// UTC times are written with a `Z` suffix.
    #[default]
    Rfc3339,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123+02:00`
    Iso8601,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    ///
    /// A string chrono cannot render falls back to [`TimestampFormat::Rfc3339`].
    ///
    /// ```
    /// use category_logger::TimestampFormat;
    ///
    /// // Apache log format
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self {
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimestampFormat::Iso8601 => datetime.to_rfc3339_opts(SecondsFormat::Millis, true),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
                }
            }
        }
    }
}

/// A strftime string; the empty string selects [`TimestampFormat::Rfc3339`]
impl From<&str> for TimestampFormat {
    fn from(format_str: &str) -> Self {
        if format_str.is_empty() {
            TimestampFormat::Rfc3339
        } else {
            TimestampFormat::Custom(format_str.to_string())
        }
    }
}

impl From<String> for TimestampFormat {
    fn from(format_str: String) -> Self {
        if format_str.is_empty() {
            TimestampFormat::Rfc3339
        } else {
            TimestampFormat::Custom(format_str)
        }
    }
}
