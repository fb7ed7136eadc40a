//! Bulletin files
//!
//! A bulletin file is a concatenation of products, each framed
//! by the start-of-header (`0x01`) and end-of-text (`0x03`)
//! control characters. The file name begins with the hour the
//! file was collected, as `YYYYMMDDHH`. This *anchor date*
//! supplies the month and year which the products' `DDHHMM`
//! times lack.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use thiserror::Error;

use crate::datetime::anchor_from_name;
use crate::error::ParseError;
use crate::product::Product;

/// Separator between consecutive products: ETX followed by SOH
const PRODUCT_SEPARATOR: &str = "\x03\x01";

/// Error loading a bulletin file from disk
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read
    #[error("unable to read bulletin file: {0}")]
    Io(#[from] io::Error),

    /// The file name carries no anchor date
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A decoded bulletin file
///
/// ```
/// use hazards::BulletinFile;
///
/// let file = BulletinFile::parse(
///     "2015062121.severe",
///     "\x01\r\r\n000 \r\r\nWWUS51 KPBZ 212114\r\r\nSVSPBZ\r\r\n\r\r\nPAC007-212130-\r\r\n$$\r\r\n\x03",
/// )
/// .unwrap();
///
/// assert_eq!(1, file.len());
/// assert_eq!("PBZ", file[0].awips_location_id());
/// assert_eq!("Filename:  2015062121.severe", file.to_string());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BulletinFile {
    name: String,
    anchor: DateTime<Utc>,
    products: Vec<Product>,
    failures: Vec<ParseError>,
}

impl BulletinFile {
    /// Read and decode the bulletin file at `path`
    ///
    /// The anchor date is taken from the file's base name. Bytes
    /// which are not valid UTF-8 are replaced.
    pub fn from_path<P>(path: P) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let raw = fs::read(path)?;
        Ok(Self::parse(name, &String::from_utf8_lossy(&raw))?)
    }

    /// Decode bulletin file `text`
    ///
    /// The anchor date is taken from the first ten characters
    /// of `name`. If these are not a valid `YYYYMMDDHH` date,
    /// [`ParseError::InvalidAnchor`] is returned and nothing in
    /// the file is decoded.
    pub fn parse<S>(name: S, text: &str) -> Result<Self, ParseError>
    where
        S: Into<String>,
    {
        let name = name.into();
        match anchor_from_name(&name) {
            Some(anchor) => Ok(Self::with_anchor(name, anchor, text)),
            None => Err(ParseError::InvalidAnchor(name)),
        }
    }

    /// Decode bulletin file `text` against an explicit anchor date
    pub fn with_anchor<S>(name: S, anchor: DateTime<Utc>, text: &str) -> Self
    where
        S: Into<String>,
    {
        let mut out = Self {
            name: name.into(),
            anchor,
            products: vec![],
            failures: vec![],
        };

        let text = normalize_line_endings(text);
        for product_text in text.split(PRODUCT_SEPARATOR) {
            match Product::parse(product_text, &anchor) {
                Ok(product) => out.products.push(product),
                Err(err) if err.is_skip() => {
                    debug!("{}: skipping product: {}", out.name, err);
                }
                Err(err) => {
                    warn!(
                        "{}: dropping product ({:?}): {}",
                        out.name,
                        err.severity(),
                        err
                    );
                    out.failures.push(err);
                }
            }
        }

        debug!(
            "{}: decoded {} product(s), {} failure(s)",
            out.name,
            out.products.len(),
            out.failures.len()
        );
        out
    }

    /// File name, as given
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Anchor date
    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    /// Successfully decoded products, in file order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Errors for products which were rejected
    ///
    /// Skipped products, like empty products and test messages,
    /// are not reported here.
    pub fn failures(&self) -> &[ParseError] {
        &self.failures
    }

    /// Number of decoded products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True if no products decoded
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Product by index
    pub fn get(&self, idx: usize) -> Option<&Product> {
        self.products.get(idx)
    }

    /// Iterator over decoded products
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }
}

impl std::ops::Index<usize> for BulletinFile {
    type Output = Product;

    fn index(&self, idx: usize) -> &Product {
        &self.products[idx]
    }
}

impl<'a> IntoIterator for &'a BulletinFile {
    type Item = &'a Product;

    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for BulletinFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Filename:  {}", self.name)
    }
}

// Convert CR CR LF, CR LF, and bare CR line endings to LF
fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\r\n", "\n")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/2015062121.severe");

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!("a\nb\nc\nd\n", normalize_line_endings("a\r\r\nb\r\nc\rd\n"));
        assert_eq!("a\n\nb", normalize_line_endings("a\r\r\n\r\r\nb"));
    }

    #[test]
    fn test_from_path() {
        let file = BulletinFile::from_path(FIXTURE).unwrap();
        assert_eq!("2015062121.severe", file.name());
        assert_eq!(utc(2015, 6, 21, 21, 0), file.anchor());
        assert_eq!("Filename:  2015062121.severe", file.to_string());

        // the test message and empty product are skipped; the
        // product with no heading is rejected
        assert_eq!(2, file.len());
        assert_eq!(vec![ParseError::InvalidProduct], file.failures());

        let svs = &file[0];
        assert_eq!("KPBZ", svs.office());
        assert_eq!("SVS", svs.awips_product());
        assert_eq!(2, svs.len());
        assert_eq!(
            Some(
                "A SEVERE THUNDERSTORM WARNING REMAINS IN EFFECT UNTIL 530 PM EDT FOR \
                 NORTHEASTERN BEAVER AND SOUTH CENTRAL LAWRENCE COUNTIES"
            ),
            svs.segments()[0].headline()
        );
        assert_eq!(
            Some(
                "POLYGON((80.43 40.84, 80.32 40.89, 80.16 40.83, 80.15 40.69, 80.43 40.84))"
                    .to_owned()
            ),
            svs.segments()[0].wkt()
        );
        assert_eq!(utc(2015, 6, 21, 21, 30), svs.segments()[0].expiration());

        let rfw = file.get(1).unwrap();
        assert_eq!("KBOI", rfw.office());
        assert_eq!(1, rfw.len());
        assert_eq!(2, rfw.segments()[0].vtec().len());
        assert_eq!(utc(2015, 6, 22, 10, 0), rfw.segments()[0].expiration());
        assert_eq!(Some(utc(2015, 6, 21, 21, 0)), rfw.segments()[0].issuance_time());

        assert_eq!(3, file.iter().map(Product::len).sum::<usize>());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = fs::read_to_string(FIXTURE).unwrap();
        assert_eq!(
            BulletinFile::parse("2015062121.severe", &text).unwrap(),
            BulletinFile::parse("2015062121.severe", &text).unwrap()
        );
    }

    #[test]
    fn test_invalid_anchor() {
        assert_eq!(
            Err(ParseError::InvalidAnchor("latest.txt".to_owned())),
            BulletinFile::parse("latest.txt", "")
        );
        assert_eq!(
            Err(ParseError::InvalidAnchor("2015063125.txt".to_owned())),
            BulletinFile::parse("2015063125.txt", "")
        );

        let err = BulletinFile::from_path(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/testdata/does-not-exist"
        ))
        .unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_with_anchor() {
        let text = fs::read_to_string(FIXTURE).unwrap();

        // the severe thunderstorm segments have expired by 2300Z
        let file = BulletinFile::with_anchor("later", utc(2015, 6, 21, 23, 0), &text);
        assert_eq!("later", file.name());
        assert_eq!(2, file.len());

        let svs = &file[0];
        assert!(svs.is_empty());
        assert_eq!(2, svs.failures().len());
        assert!(svs
            .failures()
            .iter()
            .all(|err| matches!(err, ParseError::ExpirationBeforeAnchor { .. })));

        assert_eq!(1, file[1].len());
    }

    #[test]
    fn test_non_ascii_digits_are_rejected() {
        // U+0664 and U+0667 are digits, but not ASCII ones
        const TXT: &str = "\x01
000 
WWUS51 KPBZ 21211\u{664}
SVSPBZ

OHC029-212130-

$$
\x03\x01
000 
WWUS51 KPBZ 212114
SVSPBZ

PAC0\u{667}7-212130-
/O.CON.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z/

$$
\x03\x01
000 
WWUS51 KPBZ 212114
SVSPBZ

OHC029-212130-
/O.CON.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z/

LAT...LON 4084 8043 4089 803\u{667}

$$
\x03\x01
000 
WWUS51 KPBZ 212114
SVSPBZ

OHC029-212130-
/O.CON.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z/

$$
\x03";

        let file = BulletinFile::parse("2015062121.garbled", TXT).unwrap();
        assert_eq!(vec![ParseError::InvalidProduct], file.failures());
        assert_eq!(3, file.len());

        assert!(file[0].is_empty());
        assert!(matches!(file[0].failures(), [ParseError::Geography(_)]));

        assert!(file[1].is_empty());
        assert_eq!(&[ParseError::OddCoordinateCount(3)], file[1].failures());

        // the rest of the file still decodes
        assert_eq!(1, file[2].len());
        assert_eq!(Some(&vec![29]), file[2].segments()[0].geography().codes("OH"));
    }

    #[test]
    fn test_empty_file() {
        let file = BulletinFile::parse("2015062121.empty", "").unwrap();
        assert!(file.is_empty());
        assert!(file.failures().is_empty());
    }
}
