//! Time-of-day helpers.

use chrono::{Local, NaiveTime};

/// The current local wall-clock time of day.
#[must_use]
pub fn now_local() -> NaiveTime {
    Local::now().time()
}

/// Parse a `HH:MM` or `HH:MM:SS` wall-clock time.
///
/// # Errors
///
/// Returns a [`chrono::format::ParseError`] when `raw` matches neither form.
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, chrono::format::ParseError> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
}
