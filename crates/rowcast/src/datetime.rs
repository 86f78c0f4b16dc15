//! ISO-8601 timestamp normalization
//!
//! Timestamp columns are emitted as `YYYY-MM-DDTHH:MM:SS.fffZ` in UTC. A
//! string already in that shape is passed through without parsing; anything
//! else is parsed once, shifted to UTC and reformatted.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static CANONICAL_UTC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[0-9]{4}-(?:0[1-9]|1[0-2])-(?:0[1-9]|[12][0-9]|3[01])",
        r"T(?:[01][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9](?:\.[0-9]+)?Z$",
    ))
    .expect("canonical timestamp pattern is valid")
});

// date, optional time, optional zone (only after a time)
static ACCEPTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)^
        ([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})
        (?:
            [Tt\x20]
            ([0-9]{1,2}):([0-9]{2})
            (?: :([0-9]{2}) (?:[.,]([0-9]+))? )?
            \x20*
            (?:
                ([Zz]|UTC)
                |
                ([+-])([0-9]{2})(?::?([0-9]{2}))?
            )?
        )?
        $",
    )
    .expect("accepted timestamp pattern is valid")
});

/// Check if a string is already a strict ISO-8601 UTC timestamp
///
/// The pattern bounds each field; the calendar check rejects days a month
/// does not have, such as `2023-02-31`.
pub fn is_canonical_utc(value: &str) -> bool {
    value.ends_with('Z')
        && CANONICAL_UTC.is_match(value)
        && NaiveDate::parse_from_str(&value[..10], "%Y-%m-%d").is_ok()
}

/// Parse a timestamp in any accepted form into UTC
///
/// Timestamps without a zone are taken to be UTC, which is how the
/// database layer stores them.
pub fn parse_utc(value: &str) -> Option<DateTime<Utc>> {
    let caps = ACCEPTED.captures(value.trim())?;
    let number = |i: usize| -> Option<u32> {
        caps.get(i).map_or(Some(0), |m| m.as_str().parse().ok())
    };

    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, number(2)?, number(3)?)?;

    let nanos = match caps.get(7) {
        Some(fraction) => fraction_to_nanos(fraction.as_str())?,
        None => 0,
    };
    let time = NaiveTime::from_hms_nano_opt(number(4)?, number(5)?, number(6)?, nanos)?;
    let local = NaiveDateTime::new(date, time);

    let offset_seconds = match caps.get(9) {
        Some(sign) => {
            let seconds = (number(10)? * 3600 + number(11)? * 60) as i32;
            if sign.as_str() == "-" { -seconds } else { seconds }
        }
        None => 0,
    };
    let offset = FixedOffset::east_opt(offset_seconds)?;
    let instant = offset.from_local_datetime(&local).single()?;
    Some(instant.with_timezone(&Utc))
}

fn fraction_to_nanos(digits: &str) -> Option<u32> {
    let mut padded: String = digits.chars().take(9).collect();
    while padded.len() < 9 {
        padded.push('0');
    }
    padded.parse().ok()
}

/// Format an instant as a canonical UTC timestamp
///
/// The fraction is truncated, not rounded, to `precision` digits.
pub fn format_utc(instant: &DateTime<Utc>, precision: u8) -> String {
    let mut out = instant.format("%Y-%m-%dT%H:%M:%S").to_string();
    let digits = usize::from(precision.min(9));
    if digits > 0 {
        let nanos = format!("{:09}", instant.nanosecond() % 1_000_000_000);
        out.push('.');
        out.push_str(&nanos[..digits]);
    }
    out.push('Z');
    out
}

/// Reparse and reformat a timestamp; `None` when it cannot be parsed
pub fn reformat(value: &str, precision: u8) -> Option<String> {
    parse_utc(value).map(|instant| format_utc(&instant, precision))
}

/// Turns timestamp strings into canonical UTC form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeNormalizer {
    precision: u8,
}

impl Default for DateTimeNormalizer {
    fn default() -> Self {
        Self { precision: 3 }
    }
}

impl DateTimeNormalizer {
    pub fn new(precision: u8) -> Self {
        Self { precision }
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Canonical form of `value`
    ///
    /// Borrowed when the input is already canonical, owned when it had to be
    /// reformatted, `None` when it is not a timestamp at all.
    pub fn normalize<'a>(&self, value: &'a str) -> Option<Cow<'a, str>> {
        if is_canonical_utc(value) {
            return Some(Cow::Borrowed(value));
        }
        reformat(value, self.precision).map(Cow::Owned)
    }
}
