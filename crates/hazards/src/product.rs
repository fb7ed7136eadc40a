//! Products
//!
//! A product is one complete bulletin. It starts with a WMO
//! abbreviated heading and an AWIPS identifier,
//!
//! ```txt
//! WWUS51 KPBZ 212114
//! SVSPBZ
//! ```
//!
//! and contains one or more segments, each terminated by `$$`.
//! Whatever follows the last `$$` is the product trailer.

use std::fmt;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

use crate::datetime::resolve_day_time;
use crate::error::{is_blank, ParseError, TEST_MESSAGE_MARKER};
use crate::segment::Segment;

/// A decoded product
///
/// Segments which fail to decode are not fatal to the product.
/// They are dropped, and the errors for any which were not
/// [skipped](crate::Severity::Skip) are available from
/// [`failures()`](Product::failures).
#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    wmo_dtype: String,
    wmo_geog: String,
    wmo_code: u8,
    office: String,
    issuance_time: DateTime<Utc>,
    retransmission: Option<String>,
    awips_product: String,
    awips_location_id: String,
    segments: Vec<Segment>,
    failures: Vec<ParseError>,
}

impl Product {
    /// Decode a product
    ///
    /// The `anchor` is the date of the bulletin file, which fixes
    /// the month and year of every `DDHHMM` time in the product.
    ///
    /// Returns [`ParseError::EmptyProduct`] if the text is blank,
    /// [`ParseError::TestMessage`] for test messages, and
    /// [`ParseError::InvalidProduct`] if there is no WMO heading.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use hazards::Product;
    ///
    /// const TXT: &str = "\x01
    /// 000
    /// WWUS51 KPBZ 212114
    /// SVSPBZ
    ///
    /// PAC007-212130-
    /// /O.CON.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z/
    ///
    /// $$
    ///
    /// \x03";
    ///
    /// let anchor = Utc.with_ymd_and_hms(2015, 6, 21, 21, 0, 0).unwrap();
    /// let product = Product::parse(TXT, &anchor).unwrap();
    /// assert_eq!("KPBZ", product.office());
    /// assert_eq!("SVS", product.awips_product());
    /// assert_eq!(1, product.len());
    /// assert_eq!("Product:  1 segments", product.to_string());
    /// ```
    pub fn parse(text: &str, anchor: &DateTime<Utc>) -> Result<Self, ParseError> {
        lazy_static! {
            static ref HEADING: Regex = Regex::new(
                r"(?x)
                (?P<dtype>\w{2})(?P<geog>\w{2})(?P<code>[0-9]{2})\x20
                (?P<office>\w{4})\x20
                (?P<day>[0-9]{2})(?P<hour>[0-9]{2})(?P<minute>[0-9]{2})
                (?:\x20(?P<retrans>[A-Z]{3}))?\x20*\n
                (?P<awips_product>\w{3})(?P<awips_location>\w[\w\x20]{2})"
            )
            .expect("bad WMO heading regexp");
        }

        let caps = match HEADING.captures(text) {
            Some(caps) => caps,
            None if is_blank(text) => return Err(ParseError::EmptyProduct),
            None if text.contains(TEST_MESSAGE_MARKER) => return Err(ParseError::TestMessage),
            None => return Err(ParseError::InvalidProduct),
        };

        let field = |name: &str| -> u32 {
            caps[name]
                .parse()
                .expect("WMO heading regexp admitted a non-number")
        };
        let issuance_time = resolve_day_time(anchor, field("day"), field("hour"), field("minute"))?;

        let mut product = Self {
            wmo_dtype: caps["dtype"].to_owned(),
            wmo_geog: caps["geog"].to_owned(),
            wmo_code: field("code") as u8,
            office: caps["office"].to_owned(),
            issuance_time,
            retransmission: caps.name("retrans").map(|m| m.as_str().to_owned()),
            awips_product: caps["awips_product"].to_owned(),
            awips_location_id: caps["awips_location"].trim_end().to_owned(),
            segments: vec![],
            failures: vec![],
        };

        for segment_text in segment_texts(text) {
            match Segment::parse(segment_text, anchor) {
                Ok(segment) => product.segments.push(segment),
                Err(err) if err.is_skip() => {
                    debug!(
                        "{}{}: skipping segment: {}",
                        product.awips_product, product.awips_location_id, err
                    );
                }
                Err(err) => {
                    warn!(
                        "{}{}: dropping segment ({:?}): {}",
                        product.awips_product,
                        product.awips_location_id,
                        err.severity(),
                        err
                    );
                    product.failures.push(err);
                }
            }
        }

        Ok(product)
    }

    /// WMO data type and form, like `WW`
    pub fn wmo_dtype(&self) -> &str {
        &self.wmo_dtype
    }

    /// WMO geographic designator, like `US`
    pub fn wmo_geog(&self) -> &str {
        &self.wmo_geog
    }

    /// WMO distribution code, like `51`
    pub fn wmo_code(&self) -> u8 {
        self.wmo_code
    }

    /// Four-letter issuing office, like `KPBZ`
    pub fn office(&self) -> &str {
        &self.office
    }

    /// Issuance time from the WMO heading (UTC)
    pub fn issuance_time(&self) -> DateTime<Utc> {
        self.issuance_time
    }

    /// Retransmission or correction indicator, like `RRA` or `CCA`
    pub fn retransmission(&self) -> Option<&str> {
        self.retransmission.as_deref()
    }

    /// AWIPS product category, like `SVS`
    pub fn awips_product(&self) -> &str {
        &self.awips_product
    }

    /// AWIPS location identifier, like `PBZ`
    pub fn awips_location_id(&self) -> &str {
        &self.awips_location_id
    }

    /// Successfully decoded segments, in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Errors for segments which were rejected
    pub fn failures(&self) -> &[ParseError] {
        &self.failures
    }

    /// Number of decoded segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if no segments decoded
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment by index
    pub fn get(&self, idx: usize) -> Option<&Segment> {
        self.segments.get(idx)
    }

    /// Iterator over decoded segments
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

impl<'a> IntoIterator for &'a Product {
    type Item = &'a Segment;

    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Product:  {} segments", self.len())
    }
}

// Split product text into segment texts
//
// Every piece before the last `$$` is a segment. The trailer
// is discarded. A product with no `$$` is one segment.
fn segment_texts(text: &str) -> Vec<&str> {
    let mut pieces: Vec<&str> = text.split("$$").collect();
    if pieces.len() > 1 {
        pieces.pop();
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    const PRODUCT: &str = "\x01
000
WWUS51 KPBZ 212114 CCA
SVSPBZ

SEVERE WEATHER STATEMENT
NATIONAL WEATHER SERVICE PITTSBURGH PA
514 PM EDT SUN JUN 21 2015

OHC029-PAC007-073-212130-
/O.CON.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z/

BEAVER PA-LAWRENCE PA-COLUMBIANA OH-
514 PM EDT SUN JUN 21 2015

...A SEVERE THUNDERSTORM WARNING REMAINS IN EFFECT UNTIL 530 PM EDT...

LAT...LON 4084 8043 4089 8032 4083 8016 4069 8015

$$

PAC019-212130-
/O.CAN.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z/

BUTLER PA-
514 PM EDT SUN JUN 21 2015

...THE SEVERE THUNDERSTORM WARNING FOR BUTLER COUNTY IS CANCELLED...

$$

PAZ021-211500-
/O.CON.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z/

$$

$$

88
\x03";

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_parse_product() {
        let anchor = utc(2015, 6, 21, 21, 0);
        let product = Product::parse(PRODUCT, &anchor).unwrap();

        assert_eq!("WW", product.wmo_dtype());
        assert_eq!("US", product.wmo_geog());
        assert_eq!(51, product.wmo_code());
        assert_eq!("KPBZ", product.office());
        assert_eq!(utc(2015, 6, 21, 21, 14), product.issuance_time());
        assert_eq!(Some("CCA"), product.retransmission());
        assert_eq!("SVS", product.awips_product());
        assert_eq!("PBZ", product.awips_location_id());

        // the third segment expires before the anchor; the fourth is blank
        assert_eq!(2, product.len());
        assert_eq!(1, product.failures().len());
        assert!(matches!(
            product.failures()[0],
            ParseError::ExpirationBeforeAnchor { .. }
        ));

        let seg = product.get(0).unwrap();
        assert_eq!(Some(&vec![29]), seg.geography().codes("OH"));
        assert!(seg.wkt().is_some());

        let seg = product.get(1).unwrap();
        assert_eq!(
            Some("THE SEVERE THUNDERSTORM WARNING FOR BUTLER COUNTY IS CANCELLED"),
            seg.headline()
        );
        assert!(product.get(2).is_none());

        assert_eq!(2, product.iter().count());
        assert_eq!("Product:  2 segments", product.to_string());
    }

    #[test]
    fn test_product_without_segment_terminator() {
        const TXT: &str = "\x01
000
WWUS81 KPBZ 212114
SPSPBZ

PAZ021-212200-
SPECIAL WEATHER STATEMENT
\x03";
        let anchor = utc(2015, 6, 21, 21, 0);
        let product = Product::parse(TXT, &anchor).unwrap();
        assert_eq!(None, product.retransmission());
        assert_eq!("SPS", product.awips_product());
        assert_eq!(1, product.len());
        assert_eq!(Some(&vec![21]), product.segments()[0].geography().codes("PA"));
    }

    #[test]
    fn test_product_errors() {
        let anchor = utc(2015, 6, 21, 21, 0);
        assert_eq!(
            Err(ParseError::EmptyProduct),
            Product::parse("\x01\n\n\n\x03", &anchor)
        );
        assert_eq!(
            Err(ParseError::TestMessage),
            Product::parse("\x01\nTHIS IS A TEST MESSAGE.\n\x03", &anchor)
        );
        assert_eq!(
            Err(ParseError::InvalidProduct),
            Product::parse("\x01\nNOT A PRODUCT\n\x03", &anchor)
        );
        assert!(matches!(
            Product::parse("WWUS51 KPBZ 312114\nSVSPBZ\n", &anchor),
            Err(ParseError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_segment_texts() {
        assert_eq!(vec!["a", "b"], segment_texts("a$$b$$c"));
        assert_eq!(vec!["abc"], segment_texts("abc"));
        assert_eq!(vec!["abc"], segment_texts("abc$$"));
    }
}
