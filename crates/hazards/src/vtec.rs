//! Valid Time Event Codes (VTEC)
//!
//! A VTEC code is a machine-readable line embedded in a product
//! segment which tracks a hazard from issuance to expiration:
//!
//! ```txt
//! /O.CON.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z/
//! ```
//!
//! The general format is `/k.aaa.cccc.pp.s.####.yymmddThhnnZ-yymmddThhnnZ/`,
//! with fields
//!
//! | Field          | Meaning                                  |
//! |----------------|------------------------------------------|
//! | `k`            | [product class](ProductClass)            |
//! | `aaa`          | [action](Action)                         |
//! | `cccc`         | issuing office                           |
//! | `pp`           | [phenomenon](Phenomenon)                 |
//! | `s`            | [significance](Significance)             |
//! | `####`         | event tracking number                    |
//! | `yymmddThhnnZ` | event beginning and ending times, in UTC |
//!
//! See NWSI 10-1703.

mod action;
mod class;
mod phenomenon;
mod significance;

use std::fmt;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::datetime::parse_vtec_time;
use crate::error::ParseError;

pub use action::Action;
pub use class::ProductClass;
pub use phenomenon::Phenomenon;
pub use significance::Significance;

lazy_static! {
    static ref VTEC: Regex = Regex::new(
        r"(?x)
        /
        (?P<class>\w)\.
        (?P<action>\w{3})\.
        (?P<office>\w{4})\.
        (?P<phenomenon>\w{2})\.
        (?P<significance>\w)\.
        (?P<tracking>[0-9]{4})\.
        (?P<begin>[0-9]{6}T[0-9]{4}Z)-
        (?P<end>[0-9]{6}T[0-9]{4}Z)"
    )
    .expect("bad VTEC regexp");
}

/// A decoded VTEC code
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use hazards::{Action, Phenomenon, ProductClass, Significance, VtecCode};
///
/// let vtec = VtecCode::new("/O.CON.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z/").unwrap();
/// assert_eq!(ProductClass::Operational, vtec.class());
/// assert_eq!(Action::Continued, vtec.action());
/// assert_eq!("KPBZ", vtec.office());
/// assert_eq!(Phenomenon::SevereThunderstorm, vtec.phenomenon());
/// assert_eq!(Significance::Warning, vtec.significance());
/// assert_eq!(94, vtec.tracking_id());
/// assert_eq!(None, vtec.begin());
/// assert_eq!(
///     Some(Utc.with_ymd_and_hms(2015, 6, 21, 21, 30, 0).unwrap()),
///     vtec.end()
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VtecCode {
    code: String,
    class: ProductClass,
    action: Action,
    office: String,
    phenomenon: Phenomenon,
    significance: Significance,
    tracking_id: u16,
    begin: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

/// The fields of a VTEC code which identify one hazard event
///
/// Two codes with the same identity describe the same event,
/// even if their [significance](Significance) differs. A fire
/// weather watch which is upgraded to a warning keeps its
/// tracking number and remains the same event.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventIdentity {
    /// Product class
    pub class: ProductClass,
    /// Issuing office
    pub office: String,
    /// Phenomenon
    pub phenomenon: Phenomenon,
    /// Event tracking number
    pub tracking_id: u16,
}

impl VtecCode {
    /// Decode the first VTEC code in `text`
    ///
    /// Returns [`ParseError::NoVtecCode`] if there is none.
    pub fn new<S>(text: S) -> Result<Self, ParseError>
    where
        S: AsRef<str>,
    {
        match VTEC.captures(text.as_ref()) {
            Some(caps) => Self::from_captures(&caps),
            None => Err(ParseError::NoVtecCode),
        }
    }

    /// Decode every VTEC code in `text`, in order of appearance
    ///
    /// Finding no codes at all is not an error: plenty of
    /// products are purely textual.
    pub fn parse_all(text: &str) -> Result<Vec<Self>, ParseError> {
        VTEC.captures_iter(text)
            .map(|caps| Self::from_captures(&caps))
            .collect()
    }

    /// Original code text, like `/O.CON.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z`
    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// Product class: operational, test, or experimental
    pub fn class(&self) -> ProductClass {
        self.class
    }

    /// Action taken on the event by this issuance
    pub fn action(&self) -> Action {
        self.action
    }

    /// Four-letter issuing office, like `KPBZ`
    pub fn office(&self) -> &str {
        &self.office
    }

    /// What is happening
    pub fn phenomenon(&self) -> Phenomenon {
        self.phenomenon
    }

    /// Warning, watch, advisory, or statement
    pub fn significance(&self) -> Significance {
        self.significance
    }

    /// Event tracking number
    ///
    /// Assigned in sequence by the issuing office, per
    /// phenomenon and significance.
    pub fn tracking_id(&self) -> u16 {
        self.tracking_id
    }

    /// Event beginning time (UTC)
    ///
    /// `None` if the event is already in progress or the time
    /// is otherwise not specified.
    pub fn begin(&self) -> Option<DateTime<Utc>> {
        self.begin
    }

    /// Event ending time (UTC), if specified
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Fields which identify the event this code belongs to
    pub fn identity(&self) -> EventIdentity {
        EventIdentity {
            class: self.class,
            office: self.office.clone(),
            phenomenon: self.phenomenon,
            tracking_id: self.tracking_id,
        }
    }

    fn from_captures(caps: &Captures<'_>) -> Result<Self, ParseError> {
        let code = caps.get(0).expect("regexp has no group zero").as_str();
        let invalid = || ParseError::InvalidVtec(code.to_owned());

        Ok(Self {
            code: code.to_owned(),
            class: caps["class"].parse().map_err(|_| invalid())?,
            action: caps["action"].parse().map_err(|_| invalid())?,
            office: caps["office"].to_owned(),
            phenomenon: Phenomenon::from(&caps["phenomenon"]),
            significance: caps["significance"].parse().map_err(|_| invalid())?,
            tracking_id: caps["tracking"].parse().map_err(|_| invalid())?,
            begin: parse_vtec_time(&caps["begin"])?,
            end: parse_vtec_time(&caps["end"])?,
        })
    }
}

impl fmt::Display for VtecCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.code.fmt(f)
    }
}

impl AsRef<str> for VtecCode {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for VtecCode {
    type Error = ParseError;

    #[inline]
    fn try_from(inp: &str) -> Result<Self, Self::Error> {
        Self::new(inp)
    }
}

impl fmt::Display for EventIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#}.{}.{:#}.{:04}",
            self.class, self.office, self.phenomenon, self.tracking_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    use crate::datetime::format_vtec_time;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_vtec_continued() {
        let vtec = VtecCode::new("/O.CON.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z/").unwrap();
        assert_eq!(ProductClass::Operational, vtec.class());
        assert_eq!(Action::Continued, vtec.action());
        assert_eq!("KPBZ", vtec.office());
        assert_eq!(Phenomenon::SevereThunderstorm, vtec.phenomenon());
        assert_eq!(Significance::Warning, vtec.significance());
        assert_eq!(94, vtec.tracking_id());
        assert_eq!(None, vtec.begin());
        assert_eq!(Some(utc(2015, 6, 21, 21, 30)), vtec.end());
        assert_eq!(
            "/O.CON.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z",
            vtec.to_string()
        );
        assert_eq!("O.KPBZ.SV.0094", vtec.identity().to_string());
    }

    #[test]
    fn test_vtec_multiple() {
        const TXT: &str = "IDZ401-402-280900-
/O.UPG.KBOI.FW.A.0001.150628T2100Z-150629T0600Z/
/O.NEW.KBOI.FW.W.0001.150628T2100Z-150629T0600Z/
";
        let codes = VtecCode::parse_all(TXT).unwrap();
        assert_eq!(2, codes.len());

        assert_eq!(Action::Upgraded, codes[0].action());
        assert_eq!("KBOI", codes[0].office());
        assert_eq!(Phenomenon::FireWeather, codes[0].phenomenon());
        assert_eq!(Significance::Watch, codes[0].significance());
        assert_eq!(1, codes[0].tracking_id());
        assert_eq!(Some(utc(2015, 6, 28, 21, 0)), codes[0].begin());
        assert_eq!(Some(utc(2015, 6, 29, 6, 0)), codes[0].end());

        assert_eq!(Action::New, codes[1].action());
        assert_eq!(Significance::Warning, codes[1].significance());
        assert_eq!(codes[0].begin(), codes[1].begin());
        assert_eq!(codes[0].end(), codes[1].end());

        // significance is not part of the identity
        assert_eq!(codes[0].identity(), codes[1].identity());
    }

    #[test]
    fn test_vtec_none() {
        assert_eq!(Ok(vec![]), VtecCode::parse_all("NO CODES HERE\n"));
        assert_eq!(Err(ParseError::NoVtecCode), VtecCode::new("NO CODES HERE"));
    }

    #[test]
    fn test_vtec_invalid_fields() {
        // unknown action
        assert!(matches!(
            VtecCode::new("/O.ZZZ.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z/"),
            Err(ParseError::InvalidVtec(_))
        ));

        // unknown significance
        assert!(matches!(
            VtecCode::new("/O.CON.KPBZ.SV.Q.0094.000000T0000Z-150621T2130Z/"),
            Err(ParseError::InvalidVtec(_))
        ));

        // bad date
        assert!(matches!(
            VtecCode::new("/O.CON.KPBZ.SV.W.0094.000000T0000Z-151321T2130Z/"),
            Err(ParseError::InvalidDate(_))
        ));

        // unknown phenomenon is tolerated
        let vtec = VtecCode::new("/O.NEW.KPBZ.QQ.W.0001.000000T0000Z-150621T2130Z/").unwrap();
        assert!(vtec.phenomenon().is_unrecognized());
    }

    #[test]
    fn test_vtec_time_round_trip() {
        let vtec = VtecCode::new("/T.EXT.PAFG.WS.A.0012.151231T2330Z-160101T0615Z/").unwrap();
        assert_eq!(ProductClass::Test, vtec.class());
        assert_eq!("151231T2330Z", format_vtec_time(&vtec.begin().unwrap()));
        assert_eq!("160101T0615Z", format_vtec_time(&vtec.end().unwrap()));
    }
}
