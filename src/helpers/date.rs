//! Date helpers

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Display and sort format for post dates
pub const POST_DATE_FORMAT: &str = "%Y/%m/%d";

/// Parse a front-matter date. Only the calendar day is kept.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    const DATE_TIME_FORMATS: [&str; 6] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// `2018/09/01`
pub fn format_post_date(date: &NaiveDate) -> String {
    date.format(POST_DATE_FORMAT).to_string()
}

/// `September 1, 2018`
pub fn format_long_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
