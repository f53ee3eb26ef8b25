//! Canonical close-approach time handling
//!
//! Close-approach times arrive as calendar strings such as `2020-Jan-01 12:30`
//! and are always rendered back in that same minute-precision form. Seconds
//! (and fractions) present in a source string are parsed but dropped: the
//! canonical form has no room for them.

use chrono::{DateTime, NaiveDateTime, SubsecRound, TimeDelta, Timelike, Utc};

/// Canonical minute-precision format, used for both parsing and display
pub const CANONICAL_FORMAT: &str = "%Y-%b-%d %H:%M";

const SECONDS_FORMATS: [&str; 2] = ["%Y-%b-%d %H:%M:%S", "%Y-%b-%d %H:%M:%S%.f"];

/// Parse a calendar date/time string into a UTC timestamp truncated to the minute
///
/// Returns `None` when the string matches none of the accepted layouts.
pub fn parse_calendar_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    let naive = NaiveDateTime::parse_from_str(value, CANONICAL_FORMAT)
        .ok()
        .or_else(|| {
            SECONDS_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        })?;

    Some(truncate_to_minute(naive).and_utc())
}

/// Render a timestamp in the canonical minute-precision form
pub fn format_calendar_time(time: &DateTime<Utc>) -> String {
    time.format(CANONICAL_FORMAT).to_string()
}

fn truncate_to_minute(naive: NaiveDateTime) -> NaiveDateTime {
    let whole_seconds = naive.trunc_subsecs(0);
    whole_seconds - TimeDelta::seconds(i64::from(whole_seconds.second()))
}
