//! Product segments
//!
//! A segment is the part of a product which applies to one set
//! of counties or zones. Segments are separated by `$$` and
//! decoded in a fixed order:
//!
//! 1. MND issuance line, if any
//! 2. UGC geography and expiration time
//! 3. VTEC codes (zero or more)
//! 4. headline
//! 5. call to action
//! 6. polygon
//! 7. storm time, motion, and location
//!
//! Every stage after the UGC block only searches the text which
//! follows that block.

use std::fmt;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::datetime::resolve_day_time;
use crate::error::{is_blank, ParseError};
use crate::mnd::parse_issuance_time;
use crate::polygon::{Polygon, TimeMotionLocation};
use crate::ugc::Ugc;
use crate::vtec::VtecCode;

/// A decoded product segment
///
/// Segments are built by [`Segment::parse()`] and are not
/// modified afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    text: String,
    headline: Option<String>,
    geography: Ugc,
    expiration: DateTime<Utc>,
    vtec: Vec<VtecCode>,
    polygon: Polygon,
    time_motion_location: Option<TimeMotionLocation>,
    issuance_time: Option<DateTime<Utc>>,
    call_to_action: Option<String>,
}

impl Segment {
    /// Decode one segment
    ///
    /// The `anchor` is the date of the bulletin file. It fixes the
    /// month and year of the segment's `DDHHMM` expiration time,
    /// which must fall strictly after it.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use hazards::{Action, Segment};
    ///
    /// const TXT: &str = "PAC007-073-212130-
    /// /O.CON.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z/
    ///
    /// ...A SEVERE THUNDERSTORM WARNING REMAINS IN EFFECT UNTIL 530 PM EDT...
    ///
    /// LAT...LON 4084 8043 4089 8032 4083 8016 4069 8015
    /// ";
    ///
    /// let anchor = Utc.with_ymd_and_hms(2015, 6, 21, 21, 0, 0).unwrap();
    /// let seg = Segment::parse(TXT, &anchor).unwrap();
    ///
    /// assert_eq!(Utc.with_ymd_and_hms(2015, 6, 21, 21, 30, 0).unwrap(), seg.expiration());
    /// assert_eq!(Action::Continued, seg.primary_vtec().unwrap().action());
    /// assert_eq!(
    ///     Some("A SEVERE THUNDERSTORM WARNING REMAINS IN EFFECT UNTIL 530 PM EDT"),
    ///     seg.headline()
    /// );
    /// assert_eq!(
    ///     Some("POLYGON((80.43 40.84, 80.32 40.89, 80.16 40.83, 80.15 40.69, 80.43 40.84))".to_owned()),
    ///     seg.wkt()
    /// );
    /// ```
    pub fn parse(text: &str, anchor: &DateTime<Utc>) -> Result<Self, ParseError> {
        if is_blank(text) {
            return Err(ParseError::EmptySegment);
        }

        let issuance_time = parse_issuance_time(text);

        let (geography, (day, hour, minute), ugc_end) = Ugc::locate_block(text)?;
        let expiration = resolve_day_time(anchor, day, hour, minute)?;
        if expiration <= *anchor {
            return Err(ParseError::ExpirationBeforeAnchor {
                expiration,
                anchor: *anchor,
            });
        }

        let body = &text[ugc_end..];
        let vtec = VtecCode::parse_all(body)?;
        let headline = parse_headline(body);
        let call_to_action = parse_call_to_action(body);
        let polygon = Polygon::parse_lat_lon(body)?;
        let time_motion_location = TimeMotionLocation::parse(body, anchor)?;

        trace!(
            "segment: {} VTEC code(s), {} {}(s), expires {}",
            vtec.len(),
            geography.len(),
            geography.kind(),
            expiration
        );

        Ok(Self {
            text: text
                .trim_matches(|c: char| c.is_whitespace() || c.is_control())
                .to_owned(),
            headline,
            geography,
            expiration,
            vtec,
            polygon,
            time_motion_location,
            issuance_time,
            call_to_action,
        })
    }

    /// Segment text, with surrounding whitespace removed
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Headline, like `...A SEVERE THUNDERSTORM WARNING REMAINS IN EFFECT...`
    ///
    /// The `...` delimiters are removed and line breaks become
    /// single spaces.
    pub fn headline(&self) -> Option<&str> {
        self.headline.as_deref()
    }

    /// Counties or zones this segment applies to
    pub fn geography(&self) -> &Ugc {
        &self.geography
    }

    /// Time after which this segment should no longer be used
    pub fn expiration(&self) -> DateTime<Utc> {
        self.expiration
    }

    /// VTEC codes, in order of appearance
    pub fn vtec(&self) -> &[VtecCode] {
        &self.vtec
    }

    /// The first VTEC code
    ///
    /// Returns [`ParseError::NoVtecCode`] if the segment has none.
    pub fn primary_vtec(&self) -> Result<&VtecCode, ParseError> {
        self.vtec.first().ok_or(ParseError::NoVtecCode)
    }

    /// Hazard polygon, which is empty if the segment has none
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Hazard polygon as well-known text
    pub fn wkt(&self) -> Option<String> {
        self.polygon.to_wkt()
    }

    /// Storm time, motion, and location
    pub fn time_motion_location(&self) -> Option<&TimeMotionLocation> {
        self.time_motion_location.as_ref()
    }

    /// Issuance time from the MND header, if it could be read
    pub fn issuance_time(&self) -> Option<DateTime<Utc>> {
        self.issuance_time
    }

    /// Precautionary/preparedness actions
    pub fn call_to_action(&self) -> Option<&str> {
        self.call_to_action.as_deref()
    }

    // Copy of this segment which carries only the given VTEC codes
    pub(crate) fn with_vtec(&self, vtec: Vec<VtecCode>) -> Self {
        Self {
            vtec,
            ..self.clone()
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hazard: {}", self.headline().unwrap_or("None"))?;
        for code in &self.vtec {
            writeln!(f, "Product: {}", code.class())?;
            writeln!(f, "Action: {}", code.action())?;
            writeln!(f, "Office: {}", code.office())?;
            writeln!(f, "Phenomena: {}", code.phenomenon())?;
            writeln!(f, "Significance: {}", code.significance())?;
            writeln!(f, "Event Tracking Number: {}", code.tracking_id())?;
            writeln!(f, "Beginning Time: {}", DisplayTime(code.begin()))?;
            writeln!(f, "Ending Time: {}", DisplayTime(code.end()))?;
        }
        write!(
            f,
            "Well known text: {}",
            self.wkt().as_deref().unwrap_or("None")
        )
    }
}

struct DisplayTime(Option<DateTime<Utc>>);

impl fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(tm) => write!(f, "{}", tm.format("%Y-%m-%d %H:%M:%S")),
            None => f.write_str("None"),
        }
    }
}

// Collapse runs of whitespace, including line breaks, to single spaces
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_headline(text: &str) -> Option<String> {
    lazy_static! {
        static ref HEADLINE: Regex =
            Regex::new(r"\n\n\.\.\.(?P<headline>[\w\s./',():;-]*?)\.\.\.\n\n")
                .expect("bad headline regexp");
    }

    let caps = HEADLINE.captures(text)?;
    let headline = collapse_whitespace(&caps["headline"]);
    if headline.is_empty() {
        None
    } else {
        Some(headline)
    }
}

fn parse_call_to_action(text: &str) -> Option<String> {
    lazy_static! {
        static ref CTA: Regex = Regex::new(
            r"PRECAUTIONARY/PREPAREDNESS\x20ACTIONS\.\.\.(?P<cta>(?s:.*?))\n\s*&&"
        )
        .expect("bad call-to-action regexp");
    }

    let caps = CTA.captures(text)?;
    let cta = collapse_whitespace(&caps["cta"]);
    if cta.is_empty() {
        None
    } else {
        Some(cta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;
    use chrono::TimeZone;

    use crate::ugc::GeographyKind;
    use crate::vtec::{Action, Phenomenon, Significance};

    const SEGMENT: &str = "
OHC029-PAC007-073-212130-
/O.CON.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z/

BEAVER PA-LAWRENCE PA-COLUMBIANA OH-
514 PM EDT SUN JUN 21 2015

...A SEVERE THUNDERSTORM WARNING REMAINS IN EFFECT UNTIL 530 PM EDT FOR
NORTHEASTERN BEAVER AND SOUTH CENTRAL LAWRENCE COUNTIES...

AT 513 PM EDT...DOPPLER RADAR INDICATED A SEVERE THUNDERSTORM CAPABLE OF
PRODUCING QUARTER SIZE HAIL AND DAMAGING WINDS IN EXCESS OF 60 MPH. THIS
STORM WAS LOCATED NEAR ELLWOOD CITY...MOVING EAST AT 30 MPH.

PRECAUTIONARY/PREPAREDNESS ACTIONS...

FOR YOUR PROTECTION MOVE TO AN INTERIOR ROOM ON THE LOWEST FLOOR OF A
BUILDING.

&&

LAT...LON 4084 8043 4089 8032 4083 8016 4069 8015
TIME...MOT...LOC 2113Z 260DEG 25KT 4083 8027

HAIL...1.00IN
WIND...60MPH

";

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_parse_segment() {
        let anchor = utc(2015, 6, 21, 21, 0);
        let seg = Segment::parse(SEGMENT, &anchor).unwrap();

        assert_eq!(
            Some(
                "A SEVERE THUNDERSTORM WARNING REMAINS IN EFFECT UNTIL 530 PM EDT FOR \
                 NORTHEASTERN BEAVER AND SOUTH CENTRAL LAWRENCE COUNTIES"
            ),
            seg.headline()
        );
        assert_eq!(utc(2015, 6, 21, 21, 30), seg.expiration());
        assert_eq!(Some(utc(2015, 6, 21, 21, 14)), seg.issuance_time());

        assert_eq!(GeographyKind::County, seg.geography().kind());
        assert_eq!(Some(&vec![29]), seg.geography().codes("OH"));
        assert_eq!(Some(&vec![7, 73]), seg.geography().codes("PA"));

        assert_eq!(1, seg.vtec().len());
        let vtec = seg.primary_vtec().unwrap();
        assert_eq!(Action::Continued, vtec.action());
        assert_eq!(Phenomenon::SevereThunderstorm, vtec.phenomenon());
        assert_eq!(Significance::Warning, vtec.significance());
        assert_eq!(94, vtec.tracking_id());

        assert_eq!(
            Some(
                "POLYGON((80.43 40.84, 80.32 40.89, 80.16 40.83, 80.15 40.69, 80.43 40.84))"
                    .to_owned()
            ),
            seg.wkt()
        );

        let tml = seg.time_motion_location().unwrap();
        assert_eq!(utc(2015, 6, 21, 21, 13), tml.time());
        assert_eq!(260, tml.direction());
        assert_eq!(25, tml.speed());
        assert_approx_eq!(80.27, tml.location()[0].lon);

        assert_eq!(
            Some(
                "FOR YOUR PROTECTION MOVE TO AN INTERIOR ROOM ON THE LOWEST FLOOR OF A BUILDING."
            ),
            seg.call_to_action()
        );

        assert!(seg.text().starts_with("OHC029-PAC007-073-212130-"));
        assert!(seg.text().ends_with("WIND...60MPH"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let anchor = utc(2015, 6, 21, 21, 0);
        assert_eq!(
            Segment::parse(SEGMENT, &anchor).unwrap(),
            Segment::parse(SEGMENT, &anchor).unwrap()
        );
    }

    #[test]
    fn test_display() {
        let anchor = utc(2015, 6, 21, 21, 0);
        let seg = Segment::parse(SEGMENT, &anchor).unwrap();
        assert_eq!(
            "Hazard: A SEVERE THUNDERSTORM WARNING REMAINS IN EFFECT UNTIL 530 PM EDT FOR \
             NORTHEASTERN BEAVER AND SOUTH CENTRAL LAWRENCE COUNTIES
Product: Operational product
Action: Event continued
Office: KPBZ
Phenomena: Severe Thunderstorm
Significance: Warning
Event Tracking Number: 94
Beginning Time: None
Ending Time: 2015-06-21 21:30:00
Well known text: POLYGON((80.43 40.84, 80.32 40.89, 80.16 40.83, 80.15 40.69, 80.43 40.84))",
            seg.to_string()
        );
    }

    #[test]
    fn test_minimal_segment() {
        let anchor = utc(2015, 6, 21, 21, 0);
        let seg = Segment::parse("\nPAZ021-220000-\nNOTHING ELSE TO SAY.\n", &anchor).unwrap();
        assert_eq!(None, seg.headline());
        assert!(seg.vtec().is_empty());
        assert_eq!(Err(ParseError::NoVtecCode), seg.primary_vtec());
        assert!(seg.polygon().is_empty());
        assert_eq!(None, seg.wkt());
        assert_eq!(None, seg.time_motion_location());
        assert_eq!(None, seg.issuance_time());
        assert_eq!(None, seg.call_to_action());
        assert_eq!(
            "Hazard: None\nWell known text: None",
            seg.to_string()
        );
    }

    #[test]
    fn test_expiration_rolls_into_next_month() {
        let anchor = utc(2015, 6, 30, 22, 0);
        let seg = Segment::parse("\nPAZ021-010400-\n", &anchor).unwrap();
        assert_eq!(utc(2015, 7, 1, 4, 0), seg.expiration());
    }

    #[test]
    fn test_parse_errors() {
        let anchor = utc(2015, 6, 21, 21, 0);

        assert_eq!(
            Err(ParseError::EmptySegment),
            Segment::parse("\n\x03 \n", &anchor)
        );
        assert_eq!(
            Err(ParseError::TestMessage),
            Segment::parse("\nTHIS IS A TEST MESSAGE. DO NOT USE.\n", &anchor)
        );
        assert!(matches!(
            Segment::parse("\nNO GEOGRAPHY\n", &anchor),
            Err(ParseError::Geography(_))
        ));

        // expires exactly at the anchor
        let err = Segment::parse("\nPAZ021-212100-\n", &anchor).unwrap_err();
        assert_eq!(
            ParseError::ExpirationBeforeAnchor {
                expiration: anchor,
                anchor
            },
            err
        );

        // expires earlier on the anchor's day
        let err = Segment::parse("\nPAZ021-211500-\n", &anchor).unwrap_err();
        assert!(matches!(err, ParseError::ExpirationBeforeAnchor { .. }));

        assert!(matches!(
            Segment::parse("\nPAZ021-310000-\n", &anchor),
            Err(ParseError::InvalidDate(_))
        ));
        assert_eq!(
            Err(ParseError::OddCoordinateCount(3)),
            Segment::parse("\nPAZ021-220000-\n\nLAT...LON 4084 8043 4089\n", &anchor)
        );
    }

    #[test]
    fn test_headline_needs_blank_lines() {
        let anchor = utc(2015, 6, 21, 21, 0);
        let seg = Segment::parse(
            "\nPAZ021-220000-\nAT 513 PM EDT...DOPPLER RADAR...\n",
            &anchor,
        )
        .unwrap();
        assert_eq!(None, seg.headline());

        let seg = Segment::parse(
            "\nPAZ021-220000-\n\n...HEAT ADVISORY REMAINS IN EFFECT UNTIL 9 PM EDT THIS EVENING...\n\n",
            &anchor,
        )
        .unwrap();
        assert_eq!(
            Some("HEAT ADVISORY REMAINS IN EFFECT UNTIL 9 PM EDT THIS EVENING"),
            seg.headline()
        );
    }

    #[test]
    fn test_with_vtec() {
        let anchor = utc(2015, 6, 21, 21, 0);
        let seg = Segment::parse(SEGMENT, &anchor).unwrap();
        let bare = seg.with_vtec(vec![]);
        assert!(bare.vtec().is_empty());
        assert_eq!(seg.headline(), bare.headline());
        assert_eq!(seg.expiration(), bare.expiration());
    }
}
