//! Parse errors and their severity

use chrono::{DateTime, Utc};
use thiserror::Error;

/// How a caller should treat a failed unit
///
/// Every [`ParseError`] maps to exactly one severity. None of
/// them are fatal to an entire bulletin file: the failed product
/// or segment is dropped and decoding continues with the next
/// one.
///
/// ```
/// use hazards::{ParseError, Severity};
///
/// assert_eq!(Severity::Skip, ParseError::TestMessage.severity());
/// assert_eq!(Severity::Reject, ParseError::InvalidProduct.severity());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Nothing to decode here; drop the unit quietly
    Skip,

    /// The unit is malformed; drop it and report it
    Reject,

    /// The unit decoded into something that cannot be true,
    /// usually a corrupt date field. Stop processing it.
    Abort,
}

/// Error decoding a bulletin, product, or segment
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParseError {
    /// The product text is blank
    #[error("empty product")]
    EmptyProduct,

    /// The segment text is blank
    #[error("empty segment")]
    EmptySegment,

    /// The text is marked `THIS IS A TEST MESSAGE.`
    #[error("test message")]
    TestMessage,

    /// No WMO abbreviated heading and AWIPS identifier
    #[error("invalid product: no WMO heading or AWIPS identifier")]
    InvalidProduct,

    /// No UGC geography and expiration time could be found
    #[error("could not parse the UGC geography or expiration time:\n{0}")]
    Geography(String),

    /// At least one VTEC code was required, but none are present
    #[error("no VTEC code in segment")]
    NoVtecCode,

    /// A VTEC code matched the general pattern but has unknown fields
    #[error("invalid VTEC code \"{0}\"")]
    InvalidVtec(String),

    /// Date/time fields do not form a calendar date
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// A lat/lon list cannot be split into pairs
    #[error("lat/lon list has an odd number of values ({0})")]
    OddCoordinateCount(usize),

    /// Text is not a single-ring WKT polygon
    #[error("invalid WKT polygon \"{0}\"")]
    InvalidWkt(String),

    /// The segment expires at or before the file's anchor date
    #[error("expiration time {expiration} is not after anchor date {anchor}")]
    ExpirationBeforeAnchor {
        /// Resolved expiration time
        expiration: DateTime<Utc>,
        /// Anchor date of the bulletin file
        anchor: DateTime<Utc>,
    },

    /// The file name does not begin with a `YYYYMMDDHH` date
    #[error("file name \"{0}\" does not begin with a valid YYYYMMDDHH date")]
    InvalidAnchor(String),
}

impl ParseError {
    /// How callers should treat this failure
    pub fn severity(&self) -> Severity {
        match self {
            ParseError::EmptyProduct | ParseError::EmptySegment | ParseError::TestMessage => {
                Severity::Skip
            }
            ParseError::InvalidProduct
            | ParseError::Geography(_)
            | ParseError::NoVtecCode
            | ParseError::InvalidVtec(_)
            | ParseError::InvalidDate(_)
            | ParseError::OddCoordinateCount(_)
            | ParseError::InvalidWkt(_) => Severity::Reject,
            ParseError::ExpirationBeforeAnchor { .. } | ParseError::InvalidAnchor(_) => {
                Severity::Abort
            }
        }
    }

    /// True if the unit should be dropped without a report
    pub fn is_skip(&self) -> bool {
        self.severity() == Severity::Skip
    }
}

/// Literal marker carried by test messages
pub(crate) const TEST_MESSAGE_MARKER: &str = "THIS IS A TEST MESSAGE.";

/// True if `text` contains nothing but whitespace and control characters
pub(crate) fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity() {
        assert_eq!(Severity::Skip, ParseError::EmptyProduct.severity());
        assert_eq!(Severity::Skip, ParseError::EmptySegment.severity());
        assert!(ParseError::TestMessage.is_skip());
        assert_eq!(
            Severity::Reject,
            ParseError::Geography("xyz".to_owned()).severity()
        );
        assert_eq!(Severity::Reject, ParseError::NoVtecCode.severity());
        assert_eq!(
            Severity::Abort,
            ParseError::InvalidAnchor("foo".to_owned()).severity()
        );
        assert!(Severity::Skip < Severity::Reject);
        assert!(Severity::Reject < Severity::Abort);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("\n\n  \n"));
        assert!(is_blank("\x01\n\x03"));
        assert!(!is_blank("\n$$\n"));
    }
}
