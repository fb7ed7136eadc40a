//! Mass News Disseminator (MND) header
//!
//! The MND header is the human-readable block at the top of a
//! product or segment. Its last line is the issuance time, in
//! local time:
//!
//! ```txt
//! 514 PM EDT SUN JUN 21 2015
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};
use lazy_static::lazy_static;
use log::debug;
use phf::phf_map;
use regex::Regex;

/// UTC offsets, in hours, of time zone abbreviations used in
/// NWS products
static TIMEZONES: phf::Map<&'static str, i64> = phf_map! {
    "AST" => -4,
    "EST" => -5,
    "EDT" => -4,
    "CST" => -6,
    "CDT" => -5,
    "MST" => -7,
    "MDT" => -6,
    "PST" => -8,
    "PDT" => -7,
    "AKST" => -9,
    "AKDT" => -8,
    "HST" => -10,
    "HAST" => -10,
    "HADT" => -9,
    "SST" => -11,
    "SDT" => -10,
    "CHST" => 10,
};

static MONTHS: phf::Map<&'static str, u32> = phf_map! {
    "JAN" => 1,
    "FEB" => 2,
    "MAR" => 3,
    "APR" => 4,
    "MAY" => 5,
    "JUN" => 6,
    "JUL" => 7,
    "AUG" => 8,
    "SEP" => 9,
    "OCT" => 10,
    "NOV" => 11,
    "DEC" => 12,
};

/// Find and decode the MND issuance time in `text`, as UTC
///
/// Returns `None` if there is no issuance line or if its time
/// zone or date cannot be interpreted.
pub(crate) fn parse_issuance_time(text: &str) -> Option<DateTime<Utc>> {
    lazy_static! {
        static ref ISSUANCE: Regex = Regex::new(
            r"(?x)
            (?P<hour>[0-9]{1,2})(?P<minute>[0-9]{2})\x20
            (?P<meridiem>[AP])M\x20
            (?P<tz>[A-Z]{3,4})\x20
            (?:SUN|MON|TUE|WED|THU|FRI|SAT)\x20
            (?P<month>[A-Z]{3})\x20
            (?P<day>[0-9]{1,2})\x20
            (?P<year>[0-9]{4})"
        )
        .expect("bad MND issuance regexp");
    }

    let caps = ISSUANCE.captures(text)?;

    let offset = match TIMEZONES.get(&caps["tz"]) {
        Some(offset) => *offset,
        None => {
            debug!("MND header: unknown time zone {}", &caps["tz"]);
            return None;
        }
    };
    let month = match MONTHS.get(&caps["month"]) {
        Some(month) => *month,
        None => {
            debug!("MND header: unknown month {}", &caps["month"]);
            return None;
        }
    };

    // 12:xx AM is just after midnight, and 12:xx PM is just after noon
    let hour12: u32 = caps["hour"].parse().ok()?;
    if hour12 == 0 || hour12 > 12 {
        return None;
    }
    let hour = match &caps["meridiem"] {
        "P" => hour12 % 12 + 12,
        _ => hour12 % 12,
    };

    let local = Utc
        .with_ymd_and_hms(
            caps["year"].parse().ok()?,
            month,
            caps["day"].parse().ok()?,
            hour,
            caps["minute"].parse().ok()?,
            0,
        )
        .single()?;

    Some(local - Duration::hours(offset))
}
