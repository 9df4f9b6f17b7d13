//! Date normalization for the free-text `Date` column.
//!
//! Every value is parsed on its own into a UTC instant and the timezone is
//! dropped. Values that do not parse are treated as missing. Records dated
//! before the configured cutoff are excluded from temporal aggregation; they
//! stay in the corpus for everything else.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const MISSING: [&str; 5] = ["nan", "nat", "none", "null", "n/a"];

/// Formats carrying an explicit numeric offset.
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

/// Date-time formats without an offset; read as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 10] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%B %d, %Y %I:%M %p",
    "%B %d, %Y %H:%M",
    "%B %d, %Y at %I:%M %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M",
    "%d %B %Y %H:%M",
];

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%A, %B %d, %Y",
    "%A %B %d, %Y",
];

/// Zone abbreviations seen on the scraped sites, as hours east of UTC.
const ZONES: [(&str, i64); 10] = [
    ("UTC", 0),
    ("GMT", 0),
    ("Z", 0),
    ("EST", -5),
    ("EDT", -4),
    ("ET", -5),
    ("CST", -6),
    ("CDT", -5),
    ("PST", -8),
    ("PDT", -7),
];

static PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(published|updated|posted|last updated)\s*:?\s*").unwrap());
static ORDINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)(st|nd|rd|th)\b").unwrap());
static ABBREV_DOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Za-z]{3,4})\.").unwrap());
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Parse a raw date value into a timezone-naive UTC date-time.
///
/// Returns `None` for empty, missing-marker or unparseable values.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() || MISSING.contains(&s.to_ascii_lowercase().as_str()) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_utc());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_utc());
        }
    }

    let tidy = tidy(s);
    let (body, offset_hours) = split_zone(&tidy);
    let to_utc = |local: NaiveDateTime| local - Duration::hours(offset_hours);

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(body, fmt) {
            return Some(to_utc(dt));
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(body, fmt) {
            return Some(to_utc(d.and_time(NaiveTime::MIN)));
        }
    }

    debug!(raw = %s, "Unparseable date");
    None
}

/// Strip site boilerplate so the format table can match.
fn tidy(s: &str) -> String {
    let s = PREFIX.replace(s, "");
    let s = ORDINAL.replace_all(&s, "$1");
    let s = ABBREV_DOT.replace_all(&s, "$1");
    let s = s.replace("Sept ", "Sep ");
    SPACES.replace_all(s.trim(), " ").into_owned()
}

/// Split a trailing zone abbreviation off, returning its UTC offset.
fn split_zone(s: &str) -> (&str, i64) {
    if let Some((body, last)) = s.rsplit_once(' ') {
        if let Some((_, hours)) = ZONES.iter().find(|(name, _)| name.eq_ignore_ascii_case(last)) {
            return (body.trim_end(), *hours);
        }
    }
    (s, 0)
}

/// Pair each item with its parsed date, keeping only those on or after
/// `cutoff`.
///
/// Items with unparseable dates and items before the cutoff are dropped.
pub fn on_or_after<'a, T>(
    items: &'a [T],
    raw_date: impl Fn(&T) -> &str,
    cutoff: NaiveDate,
) -> Vec<(NaiveDateTime, &'a T)> {
    let start = cutoff.and_time(NaiveTime::MIN);
    let mut unparsed = 0usize;
    let mut early = 0usize;

    let kept: Vec<_> = items
        .iter()
        .filter_map(|item| {
            let Some(at) = parse_date(raw_date(item)) else {
                unparsed += 1;
                return None;
            };
            if at < start {
                early += 1;
                return None;
            }
            Some((at, item))
        })
        .collect();

    debug!(kept = kept.len(), unparsed, early, %cutoff, "Applied date window");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_iso_with_offset_converted_to_utc() {
        assert_eq!(parse_date("2025-01-10T14:05:00-05:00"), Some(dt(2025, 1, 10, 19, 5)));
        assert_eq!(parse_date("2025-01-10T14:05:00Z"), Some(dt(2025, 1, 10, 14, 5)));
        assert_eq!(parse_date("2025-01-10 14:05:00+0800"), Some(dt(2025, 1, 10, 6, 5)));
    }

    #[test]
    fn test_naive_iso() {
        assert_eq!(parse_date("2025-02-03"), Some(dt(2025, 2, 3, 0, 0)));
        assert_eq!(parse_date("2025-02-03T08:30:00"), Some(dt(2025, 2, 3, 8, 30)));
        assert_eq!(parse_date("2025-02-03 08:30:00.250"), Some(dt(2025, 2, 3, 8, 30) + Duration::milliseconds(250)));
    }

    #[test]
    fn test_long_form_dates() {
        assert_eq!(parse_date("February 3, 2025"), Some(dt(2025, 2, 3, 0, 0)));
        assert_eq!(parse_date("Feb 3, 2025"), Some(dt(2025, 2, 3, 0, 0)));
        assert_eq!(parse_date("Feb. 3, 2025"), Some(dt(2025, 2, 3, 0, 0)));
        assert_eq!(parse_date("Sept. 30, 2025"), Some(dt(2025, 9, 30, 0, 0)));
        assert_eq!(parse_date("March 3rd, 2025"), Some(dt(2025, 3, 3, 0, 0)));
        assert_eq!(parse_date("Published: March 4, 2025"), Some(dt(2025, 3, 4, 0, 0)));
        assert_eq!(parse_date("Monday, March 3, 2025"), Some(dt(2025, 3, 3, 0, 0)));
        assert_eq!(parse_date("3 March 2025"), Some(dt(2025, 3, 3, 0, 0)));
    }

    #[test]
    fn test_times_and_zone_abbreviations() {
        assert_eq!(parse_date("March 1, 2025 8:00 AM"), Some(dt(2025, 3, 1, 8, 0)));
        assert_eq!(parse_date("01/10/2025 02:05 PM EST"), Some(dt(2025, 1, 10, 19, 5)));
        assert_eq!(parse_date("January 1, 2025 8:00 PM PST"), Some(dt(2025, 1, 2, 4, 0)));
    }

    #[test]
    fn test_rfc2822() {
        assert_eq!(parse_date("Fri, 10 Jan 2025 14:05:00 +0000"), Some(dt(2025, 1, 10, 14, 5)));
    }

    #[test]
    fn test_missing_and_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("nan"), None);
        assert_eq!(parse_date("NaN"), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2025-13-45"), None);
    }

    #[test]
    fn test_on_or_after_cutoff_boundary() {
        let rows = vec![
            "2024-12-31T23:59:59Z",
            "2025-01-01",
            "2024-12-31T20:00:00-05:00",
            "January 1, 2025",
            "December 30, 2024",
            "garbage",
            "2025-06-15T12:00:00+02:00",
        ];
        let cutoff = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let kept = on_or_after(&rows, |r| *r, cutoff);
        let kept: Vec<&str> = kept.iter().map(|(_, r)| **r).collect();
        assert_eq!(
            kept,
            vec![
                "2025-01-01",
                "2024-12-31T20:00:00-05:00",
                "January 1, 2025",
                "2025-06-15T12:00:00+02:00"
            ]
        );
    }

    #[test]
    fn test_on_or_after_every_kept_row_is_past_cutoff() {
        let rows = vec!["2023-05-01", "2025-05-01", "May 2, 2024", "2026-01-01T00:00:00Z"];
        let cutoff = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        for (at, _) in on_or_after(&rows, |r| *r, cutoff) {
            assert!(at.date() >= cutoff);
        }
        assert_eq!(on_or_after(&rows, |r| *r, cutoff).len(), 2);
    }
}
