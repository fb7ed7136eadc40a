//! Hazard polygons and storm motion
//!
//! Warnings for convective hazards carry a polygon and, often, a
//! storm motion vector:
//!
//! ```txt
//! LAT...LON 4862 10197 4828 10190 4827 10223 4851 10259
//!       4870 10238
//! TIME...MOT...LOC 2108Z 303DEG 38KT 4851 10225
//! ```
//!
//! Coordinates are hundredths of a degree, listed latitude
//! first. Longitudes are degrees *west* and are kept positive.

use std::fmt;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::datetime::same_day_time;
use crate::error::ParseError;

/// A geographic point, in decimal degrees
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Point {
    /// Longitude (degrees west, positive)
    pub lon: f64,
    /// Latitude (degrees north)
    pub lat: f64,
}

impl From<(f64, f64)> for Point {
    /// Convert from `(lon, lat)`
    fn from(lon_lat: (f64, f64)) -> Point {
        Point {
            lon: lon_lat.0,
            lat: lon_lat.1,
        }
    }
}

impl fmt::Display for Point {
    /// `lon lat`, as written in WKT
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.lon, self.lat)
    }
}

/// Hazard polygon
///
/// An open ring of points, in order. The closing point is
/// added only when the polygon is rendered as WKT.
///
/// ```
/// use hazards::{Point, Polygon};
///
/// let poly = Polygon::parse_lat_lon("LAT...LON 4862 10197 4828 10190\n").unwrap();
/// assert_eq!(
///     &[Point::from((101.97, 48.62)), Point::from((101.90, 48.28))],
///     poly.points()
/// );
/// assert_eq!(
///     Some("POLYGON((101.97 48.62, 101.9 48.28, 101.97 48.62))".to_owned()),
///     poly.to_wkt()
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Polygon from a list of points
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Find and decode the `LAT...LON` block in `text`
    ///
    /// If there is no such block, the polygon is empty. An odd
    /// number of coordinate values is an error.
    pub fn parse_lat_lon(text: &str) -> Result<Self, ParseError> {
        lazy_static! {
            static ref LATLON: Regex =
                Regex::new(r"LAT\.\.\.LON(?P<latlon>(?:\s+[0-9]{4,5}\b)+)").expect("bad LAT...LON regexp");
        }

        match LATLON.captures(text) {
            Some(caps) => Ok(Self::new(parse_lat_lon_pairs(&caps["latlon"])?)),
            None => Ok(Self::default()),
        }
    }

    /// Parse a `POLYGON((lon lat, ...))` string
    ///
    /// The ring must be closed. The closing point is dropped, so
    /// this is the inverse of [`to_wkt()`](Polygon::to_wkt).
    pub fn from_wkt(text: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidWkt(text.to_owned());

        let ring = text
            .trim()
            .strip_prefix("POLYGON((")
            .and_then(|s| s.strip_suffix("))"))
            .ok_or_else(invalid)?;

        let mut points = ring
            .split(',')
            .map(|pair| {
                let mut nums = pair.split_whitespace().map(str::parse::<f64>);
                match (nums.next(), nums.next(), nums.next()) {
                    (Some(Ok(lon)), Some(Ok(lat)), None) => Ok(Point { lon, lat }),
                    _ => Err(invalid()),
                }
            })
            .collect::<Result<Vec<Point>, ParseError>>()?;

        if points.len() < 2 || points.first() != points.last() {
            return Err(invalid());
        }

        points.pop();
        Ok(Self::new(points))
    }

    /// Points, in order, without a closing point
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if there are no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Well-known text for this polygon
    ///
    /// The ring is closed by repeating the first point. Returns
    /// `None` if the polygon is empty.
    pub fn to_wkt(&self) -> Option<String> {
        let first = self.points.first()?;
        let ring: Vec<String> = self
            .points
            .iter()
            .chain(std::iter::once(first))
            .map(Point::to_string)
            .collect();

        Some(format!("POLYGON(({}))", ring.join(", ")))
    }
}

/// Storm time, motion, and location
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use hazards::{Point, TimeMotionLocation};
///
/// let anchor = Utc.with_ymd_and_hms(2015, 6, 21, 21, 0, 0).unwrap();
/// let tml = TimeMotionLocation::parse(
///     "TIME...MOT...LOC 2108Z 303DEG 38KT 4851 10225\n",
///     &anchor,
/// )
/// .unwrap()
/// .unwrap();
///
/// assert_eq!(Utc.with_ymd_and_hms(2015, 6, 21, 21, 8, 0).unwrap(), tml.time());
/// assert_eq!(303, tml.direction());
/// assert_eq!(38, tml.speed());
/// assert_eq!(&[Point::from((102.25, 48.51))], tml.location());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TimeMotionLocation {
    time: DateTime<Utc>,
    direction: u16,
    speed: u16,
    location: Vec<Point>,
}

impl TimeMotionLocation {
    /// Find and decode the `TIME...MOT...LOC` line in `text`
    ///
    /// The time is placed on the `anchor`'s calendar date.
    /// Returns `Ok(None)` if there is no such line.
    pub fn parse(text: &str, anchor: &DateTime<Utc>) -> Result<Option<Self>, ParseError> {
        lazy_static! {
            static ref TML: Regex = Regex::new(
                r"(?x)
                TIME\.\.\.MOT\.\.\.LOC\s+
                (?P<hour>[0-9]{1,2})(?P<minute>[0-9]{2})Z\s+
                (?P<direction>[0-9]{3})DEG\s+
                (?P<speed>[0-9]{1,3})KT
                (?P<location>(?:\s+[0-9]{4,5}\b)+)"
            )
            .expect("bad TIME...MOT...LOC regexp");
        }

        let caps = match TML.captures(text) {
            Some(caps) => caps,
            None => return Ok(None),
        };

        let num = |name: &str| -> u16 {
            caps[name]
                .parse()
                .expect("TIME...MOT...LOC regexp admitted a non-number")
        };

        Ok(Some(Self {
            time: same_day_time(anchor, num("hour") as u32, num("minute") as u32)?,
            direction: num("direction"),
            speed: num("speed"),
            location: parse_lat_lon_pairs(&caps["location"])?,
        }))
    }

    /// Time of the observation (UTC)
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Direction the storm is moving *from*, in degrees
    pub fn direction(&self) -> u16 {
        self.direction
    }

    /// Storm speed, in knots
    pub fn speed(&self) -> u16 {
        self.speed
    }

    /// Storm location(s)
    pub fn location(&self) -> &[Point] {
        &self.location
    }
}

// Parse whitespace-separated lat/lon pairs, which may span lines.
// The caller's regexp guarantees that every token is a number.
fn parse_lat_lon_pairs(text: &str) -> Result<Vec<Point>, ParseError> {
    let nums: Vec<f64> = text
        .split_whitespace()
        .map(|n| n.parse::<u32>().expect("lat/lon regexp admitted a non-number") as f64 / 100.0)
        .collect();

    if nums.len() % 2 != 0 {
        return Err(ParseError::OddCoordinateCount(nums.len()));
    }

    Ok(nums
        .chunks_exact(2)
        .map(|pair| Point {
            lat: pair[0],
            lon: pair[1],
        })
        .collect())
}
