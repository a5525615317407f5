//! Date/time display and input parsing.
//!
//! All timestamps travel as RFC 3339 and live in memory as `DateTime<Utc>`.
//! Display and form input happen in one fixed offset chosen by configuration
//! (`DISPLAY_UTC_OFFSET`), so output does not depend on the host's locale.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// `DD/MM/YYYY`
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// `DD/MM/YYYY HH:MM:SS`
pub const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Errors from parsing user-entered dates and offsets.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimeInputError {
    #[error("Unrecognized date '{0}', expected DD/MM/YYYY [HH:MM[:SS]] or RFC 3339")]
    InvalidFormat(String),

    #[error("Invalid UTC offset '{0}', expected e.g. +07:00")]
    InvalidOffset(String),
}

/// Renders a date as `DD/MM/YYYY` in `offset`.
pub fn format_date(at: &DateTime<Utc>, offset: &FixedOffset) -> String {
    at.with_timezone(offset).format(DATE_FORMAT).to_string()
}

/// Renders a timestamp as `DD/MM/YYYY HH:MM:SS UTC+HH:MM` in `offset`.
pub fn format_date_time(at: &DateTime<Utc>, offset: &FixedOffset) -> String {
    format!(
        "{} {}",
        at.with_timezone(offset).format(DATE_TIME_FORMAT),
        offset_label(offset)
    )
}

/// Timezone label, e.g. `UTC+07:00`.
pub fn offset_label(offset: &FixedOffset) -> String {
    format!("UTC{offset}")
}

/// A coupon is expired once `now` has passed its expiry instant.
pub fn is_expired(expires_at: &DateTime<Utc>, now: &DateTime<Utc>) -> bool {
    expires_at < now
}

/// Parses `+HH:MM`, `-HH:MM`, `+HH`, `Z` or `UTC`, optionally prefixed by `UTC`.
///
/// # Errors
///
/// Returns [`TimeInputError::InvalidOffset`] for anything else, including
/// offsets beyond ±23:59.
pub fn parse_utc_offset(input: &str) -> Result<FixedOffset, TimeInputError> {
    let invalid = || TimeInputError::InvalidOffset(input.to_string());
    let s = input.trim();
    let s = s.strip_prefix("UTC").unwrap_or(s);

    if s.is_empty() || s == "Z" {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = if let Some(rest) = s.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = s.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid());
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None => (rest, "0"),
    };

    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// Parses a user-entered timestamp.
///
/// Accepted forms:
///
/// - RFC 3339 (`2026-12-31T23:59:59+07:00`), offset taken from the input
/// - `DD/MM/YYYY HH:MM:SS` and `DD/MM/YYYY HH:MM` in `offset`
/// - `DD/MM/YYYY`, midnight in `offset`
///
/// # Errors
///
/// Returns [`TimeInputError::InvalidFormat`] if no form matches.
pub fn parse_date_time_input(
    input: &str,
    offset: &FixedOffset,
) -> Result<DateTime<Utc>, TimeInputError> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%d/%m/%Y %H:%M"))
        .or_else(|_| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|_| TimeInputError::InvalidFormat(input.to_string()))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| TimeInputError::InvalidFormat(input.to_string()))
}
