//! Universal Geographic Code (UGC) blocks
//!
//! A UGC block names the counties or zones that a segment
//! applies to and ends with the segment's expiration time:
//!
//! ```txt
//! GAZ087-088-099>101-114>119-137>141-SCZ040-042>045-047>052-242200-
//! ```
//!
//! Each group starts with a two-letter state code and a format
//! letter (`C` for county, `Z` for zone), followed by three-digit
//! codes. `LOW>HIGH` denotes an inclusive range. The block ends in
//! a `DDHHMM-` expiration time. See NWSI 10-1702.

use std::collections::BTreeMap;
use std::fmt;

use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

use crate::error::{ParseError, TEST_MESSAGE_MARKER};

/// Whether UGC codes name counties or zones
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumString)]
pub enum GeographyKind {
    /// County, parish, or independent city (FIPS county code)
    #[strum(serialize = "C")]
    County,

    /// NWS public, fire, or marine zone
    #[strum(serialize = "Z")]
    Zone,
}

impl GeographyKind {
    /// Human-readable string, either `county` or `zone`
    pub fn as_display_str(&self) -> &'static str {
        match self {
            GeographyKind::County => "county",
            GeographyKind::Zone => "zone",
        }
    }
}

impl fmt::Display for GeographyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

/// Expiration time fields, as `(day, hour, minute)`
pub type ExpirationFields = (u32, u32, u32);

/// Decoded UGC geography
///
/// Maps each two-letter state code to the county or zone
/// numbers listed for it, with ranges expanded.
///
/// ```
/// use hazards::{GeographyKind, Ugc};
///
/// let (ugc, expires) = Ugc::parse_block("GAZ087-088-099>101-242200-").unwrap();
/// assert_eq!(GeographyKind::Zone, ugc.kind());
/// assert_eq!(Some(&vec![87, 88, 99, 100, 101]), ugc.codes("GA"));
/// assert_eq!((24, 22, 0), expires);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ugc {
    states: BTreeMap<String, Vec<u16>>,
    kind: GeographyKind,
}

impl Ugc {
    /// Find and decode the first UGC block in `text`
    ///
    /// Returns the geography and the raw expiration time fields,
    /// which must be resolved against an anchor date. Line breaks
    /// inside the block are ignored.
    ///
    /// If no block is found, text carrying the test message
    /// marker yields [`ParseError::TestMessage`]. Anything else is
    /// a [`ParseError::Geography`].
    pub fn parse_block(text: &str) -> Result<(Self, ExpirationFields), ParseError> {
        Self::locate_block(text).map(|(ugc, expires, _end)| (ugc, expires))
    }

    // As parse_block, but also returns the byte offset at which
    // the block ends
    pub(crate) fn locate_block(text: &str) -> Result<(Self, ExpirationFields, usize), ParseError> {
        lazy_static! {
            static ref BLOCK: Regex = Regex::new(
                r"(?x)
                (?:[A-Z]{2}[CZ](?:[0-9]{3}[->]\x20?\n?)+)+
                (?P<day>[0-9]{2})(?P<hour>[0-9]{2})(?P<minute>[0-9]{2})-"
            )
            .expect("bad UGC regexp");
        }

        let caps = match BLOCK.captures(text) {
            Some(caps) => caps,
            None if text.contains(TEST_MESSAGE_MARKER) => return Err(ParseError::TestMessage),
            None => return Err(ParseError::Geography(text.trim().to_owned())),
        };

        let field = |name: &str| -> u32 {
            caps[name]
                .parse()
                .expect("UGC regexp admitted a non-numeric time")
        };
        let expires = (field("day"), field("hour"), field("minute"));

        let whole = caps.get(0).expect("regexp has no group zero");
        let block = &whole.as_str()[..whole.len() - 7];
        Ok((Self::parse_geography(block), expires, whole.end()))
    }

    /// State code → county/zone numbers
    pub fn states(&self) -> &BTreeMap<String, Vec<u16>> {
        &self.states
    }

    /// County/zone numbers listed for one `state`
    pub fn codes(&self, state: &str) -> Option<&Vec<u16>> {
        self.states.get(state)
    }

    /// County or zone
    pub fn kind(&self) -> GeographyKind {
        self.kind
    }

    /// Total number of counties/zones
    pub fn len(&self) -> usize {
        self.states.values().map(Vec::len).sum()
    }

    /// True if no counties/zones are listed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Decode state groups from a block which has had its
    // expiration time removed
    fn parse_geography(block: &str) -> Self {
        lazy_static! {
            static ref GROUP: Regex =
                Regex::new(r"(?P<state>[A-Z]{2})(?P<format>[CZ])(?P<codes>(?:[0-9]{3}[->]\x20?\n?)+)")
                    .expect("bad UGC group regexp");
            static ref CODE: Regex =
                Regex::new(r"(?P<low>[0-9]{3})(?:>(?P<high>[0-9]{3}))?-").expect("bad UGC code regexp");
        }

        let mut states: BTreeMap<String, Vec<u16>> = BTreeMap::new();
        let mut kind = None;

        for group in GROUP.captures_iter(block) {
            let format: GeographyKind = group["format"]
                .parse()
                .expect("UGC regexp admitted a bad format letter");
            if let Some(k) = kind {
                if k != format {
                    warn!("UGC block mixes counties and zones: {}", block.trim());
                }
            } else {
                kind = Some(format);
            }

            let codes: String = group["codes"]
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();

            let list = states.entry(group["state"].to_owned()).or_default();
            for code in CODE.captures_iter(&codes) {
                let low: u16 = code["low"].parse().expect("bad UGC code");
                match code.name("high") {
                    Some(high) => {
                        let high: u16 = high.as_str().parse().expect("bad UGC code");
                        list.extend(low..=high);
                    }
                    None => list.push(low),
                }
            }
        }

        Self {
            states,
            kind: kind.unwrap_or(GeographyKind::Zone),
        }
    }
}
