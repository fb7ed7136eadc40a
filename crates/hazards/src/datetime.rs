//! Date resolution for partial and two-digit-year timestamps
//!
//! Bulletins rarely carry a complete date. The UGC expiration
//! time and the WMO heading give only `DDHHMM`, and VTEC codes
//! give a two-digit year. The missing parts come from the
//! *anchor date*: the date encoded in the name of the file that
//! the bulletin arrived in.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

use crate::error::ParseError;

/// VTEC time which means "not specified"
pub const VTEC_TIME_UNSPECIFIED: &str = "000000T0000Z";

/// Resolve a `DDHHMM` triple against an anchor date
///
/// The result takes its year and month from the `anchor`. If
/// `day` is earlier than the anchor's day of month, the
/// message must refer to the following month, and a December
/// anchor rolls over into January of the following year.
///
/// An error is returned if the fields do not form a valid
/// calendar date, like day 31 of a 30-day month.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use hazards::resolve_day_time;
///
/// let anchor = Utc.with_ymd_and_hms(2015, 12, 30, 17, 0, 0).unwrap();
/// assert_eq!(
///     Utc.with_ymd_and_hms(2016, 1, 1, 3, 0, 0).unwrap(),
///     resolve_day_time(&anchor, 1, 3, 0).unwrap()
/// );
/// ```
pub fn resolve_day_time(
    anchor: &DateTime<Utc>,
    day: u32,
    hour: u32,
    minute: u32,
) -> Result<DateTime<Utc>, ParseError> {
    let (year, month) = if day < anchor.day() {
        if anchor.month() == 12 {
            (anchor.year().saturating_add(1), 1)
        } else {
            (anchor.year(), anchor.month() + 1)
        }
    } else {
        (anchor.year(), anchor.month())
    };

    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .ok_or_else(|| {
            ParseError::InvalidDate(format!(
                "{:04}-{:02}-{:02} {:02}:{:02}",
                year, month, day, hour, minute
            ))
        })
}

/// Parse a VTEC timestamp like `150621T2130Z`
///
/// The year is always in the 2000s. The all-zero time
/// [`VTEC_TIME_UNSPECIFIED`] decodes as `None`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use hazards::parse_vtec_time;
///
/// assert_eq!(None, parse_vtec_time("000000T0000Z").unwrap());
/// assert_eq!(
///     Some(Utc.with_ymd_and_hms(2015, 6, 21, 21, 30, 0).unwrap()),
///     parse_vtec_time("150621T2130Z").unwrap()
/// );
/// ```
pub fn parse_vtec_time(text: &str) -> Result<Option<DateTime<Utc>>, ParseError> {
    if text == VTEC_TIME_UNSPECIFIED {
        return Ok(None);
    }

    let invalid = || ParseError::InvalidDate(text.to_owned());
    if text.len() != 12
        || !text.is_ascii()
        || &text[6..7] != "T"
        || &text[11..12] != "Z"
    {
        return Err(invalid());
    }

    let field = |range: std::ops::Range<usize>| -> Result<u32, ParseError> {
        text[range].parse::<u32>().map_err(|_| invalid())
    };

    let year = 2000 + field(0..2)? as i32;
    let month = field(2..4)?;
    let day = field(4..6)?;
    let hour = field(7..9)?;
    let minute = field(9..11)?;

    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .map(Some)
        .ok_or_else(invalid)
}

/// Format a timestamp as a VTEC time, like `150621T2130Z`
///
/// Only the last two digits of the year are kept.
pub fn format_vtec_time(time: &DateTime<Utc>) -> String {
    time.format("%y%m%dT%H%MZ").to_string()
}

/// Anchor date from a bulletin file name
///
/// Bulletin files are named like `2015062121.severe`. The first
/// ten characters are the `YYYYMMDDHH` date at which the file
/// was assembled. Returns `None` if they are not a valid date.
pub fn anchor_from_name(name: &str) -> Option<DateTime<Utc>> {
    let stamp = name.get(0..10)?;
    if !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Utc.with_ymd_and_hms(
        stamp[0..4].parse().ok()?,
        stamp[4..6].parse().ok()?,
        stamp[6..8].parse().ok()?,
        stamp[8..10].parse().ok()?,
        0,
        0,
    )
    .single()
}

/// Resolve `HHMM` on the anchor's calendar date
///
/// Storm-motion times are same-day by convention and do not roll
/// over into the next month.
pub(crate) fn same_day_time(
    anchor: &DateTime<Utc>,
    hour: u32,
    minute: u32,
) -> Result<DateTime<Utc>, ParseError> {
    anchor
        .with_hour(hour)
        .and_then(|t| t.with_minute(minute))
        .and_then(|t| t.with_second(0))
        .ok_or_else(|| ParseError::InvalidDate(format!("{:02}{:02}Z", hour, minute)))
}
