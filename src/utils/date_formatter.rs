use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartDateFormat {
    Year,       // 2024
    MonthYear,  // Jan 2024
    DayMonth,   // 12 Jan
    HourMin,    // 10:30
    HourMinSec, // 10:30:15
}

impl SmartDateFormat {
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::MonthYear => "%b %Y",
            Self::DayMonth => "%d %b",
            Self::HourMin => "%H:%M",
            Self::HourMinSec => "%H:%M:%S",
        }
    }
}

/// Determines the best date format for a dataset spanning `span_sec` seconds.
pub fn determine_date_format(span_sec: f64) -> SmartDateFormat {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 3600.0;
    const DAY: f64 = 24.0 * HOUR;
    const MONTH: f64 = 30.0 * DAY;
    const YEAR: f64 = 365.0 * DAY;

    if span_sec > YEAR * 2.0 {
        SmartDateFormat::Year
    } else if span_sec > MONTH * 2.0 {
        SmartDateFormat::MonthYear
    } else if span_sec > DAY * 1.5 {
        SmartDateFormat::DayMonth
    } else if span_sec > MINUTE * 5.0 {
        SmartDateFormat::HourMin
    } else {
        SmartDateFormat::HourMinSec
    }
}

/// Formats `timestamp` in `tz` with a strftime `pattern`.
/// Malformed patterns fall back to RFC 3339 instead of panicking.
pub fn format_timestamp(timestamp: DateTime<Utc>, tz: Tz, pattern: &str) -> String {
    let local = timestamp.with_timezone(&tz);
    let mut out = String::new();
    if write!(out, "{}", local.format(pattern)).is_err() {
        out.clear();
        out.push_str(&local.to_rfc3339());
    }
    out
}
