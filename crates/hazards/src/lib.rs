//! # hazards: NWS Hazard Bulletin Decoding
//!
//! This crate decodes the text bulletins which National Weather
//! Service forecast offices issue for watches, warnings, and
//! advisories. It breaks each bulletin file into products and
//! segments and decodes, for each segment,
//!
//! * the [UGC](Ugc) counties or zones it applies to, and its
//!   expiration time;
//! * its [VTEC codes](VtecCode), which identify the hazard and
//!   its time window;
//! * its headline; and
//! * its hazard [polygon](Polygon), as well-known text.
//!
//! Segments from successive bulletins which describe the same
//! hazard are then correlated into [events](Event).
//!
//! ## Disclaimer
//!
//! This crate is dual-licensed MIT and Apache 2.0. Read these licenses
//! carefully as they may affect your rights.
//!
//! This crate is not an official source of weather alerts. Do not
//! use it in safety-critical applications.
//!
//! ## Example
//!
//! Bulletin files are named for the hour they were assembled, like
//! `2015062121.severe`. This *anchor date* supplies the month and
//! year that the bulletins' own timestamps lack.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use hazards::{fetch_events_at, Action, BulletinFile, Phenomenon};
//!
//! const TXT: &str = "\x01\r\r
//! 000 \r\r
//! WWUS51 KPBZ 212114\r\r
//! SVSPBZ\r\r
//! \r\r
//! OHC029-PAC007-073-212130-\r\r
//! /O.CON.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z/\r\r
//! \r\r
//! ...A SEVERE THUNDERSTORM WARNING REMAINS IN EFFECT UNTIL 530 PM EDT...\r\r
//! \r\r
//! LAT...LON 4084 8043 4089 8032 4083 8016 4069 8015\r\r
//! \r\r
//! $$\r\r
//! \x03";
//!
//! let file = BulletinFile::parse("2015062121.severe", TXT).expect("bad file name");
//! for product in &file {
//!     for segment in product {
//!         let vtec = segment.primary_vtec().expect("no VTEC");
//!         assert_eq!(Action::Continued, vtec.action());
//!         assert_eq!(Phenomenon::SevereThunderstorm, vtec.phenomenon());
//!         assert_eq!(Some(&vec![7, 73]), segment.geography().codes("PA"));
//!         println!("{}", segment);
//!     }
//! }
//!
//! // events still in effect at 2125Z
//! let now = Utc.with_ymd_and_hms(2015, 6, 21, 21, 25, 0).unwrap();
//! let events = fetch_events_at(&[file], None, true, now);
//! assert_eq!(1, events.len());
//! assert_eq!("O.KPBZ.SV.0094", events[0].identity().to_string());
//! ```
//!
//! Products and segments which cannot be decoded do not stop the
//! rest of the file from decoding. Each failure is a
//! [`ParseError`] with a [`Severity`]. Empty units and test
//! messages are skipped quietly; everything else is logged and
//! kept in the `failures()` of the enclosing
//! [product](Product::failures) or [file](BulletinFile::failures).
//!
//! ## Logging
//!
//! This crate logs through the [log](https://crates.io/crates/log)
//! facade. Rejected products and segments are logged at `warn`.

mod bulletin;
mod datetime;
mod error;
mod event;
mod mnd;
mod polygon;
mod product;
mod segment;
mod ugc;
mod vtec;

pub use bulletin::{BulletinFile, LoadError};
pub use datetime::{
    anchor_from_name, format_vtec_time, parse_vtec_time, resolve_day_time, VTEC_TIME_UNSPECIFIED,
};
pub use error::{ParseError, Severity};
pub use event::{fetch_events, fetch_events_at, Event, EventQuery};
pub use polygon::{Point, Polygon, TimeMotionLocation};
pub use product::Product;
pub use segment::Segment;
pub use ugc::{ExpirationFields, GeographyKind, Ugc};
pub use vtec::{Action, EventIdentity, Phenomenon, ProductClass, Significance, VtecCode};
