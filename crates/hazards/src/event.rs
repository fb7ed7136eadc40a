//! Event correlation
//!
//! Successive products track the same hazard with the same VTEC
//! event identity: product class, issuing office, phenomenon, and
//! event tracking number. The correlator gathers every segment
//! which carries a given identity, in bulletin order, into an
//! [`Event`].

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use log::{debug, trace};

use crate::bulletin::BulletinFile;
use crate::segment::Segment;
use crate::vtec::{EventIdentity, VtecCode};

/// The segments which describe one hazard, in issuance order
///
/// Every event has at least one member segment. Each member
/// carries only the VTEC codes which belong to this event.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    identity: EventIdentity,
    members: Vec<Segment>,
}

impl Event {
    /// Identity shared by every member
    pub fn identity(&self) -> &EventIdentity {
        &self.identity
    }

    /// Member segments, oldest first
    pub fn members(&self) -> &[Segment] {
        &self.members
    }

    /// Most recent member segment
    pub fn latest(&self) -> &Segment {
        self.members
            .last()
            .expect("event constructed without members")
    }

    /// Expiration time of the most recent member
    pub fn expiration(&self) -> DateTime<Utc> {
        self.latest().expiration()
    }

    /// True if the event is still in effect at `now`
    ///
    /// An event is in effect until its most recent member
    /// expires.
    pub fn is_active_at(&self, now: &DateTime<Utc>) -> bool {
        *now < self.expiration()
    }

    /// True if the event is still in effect right now
    ///
    /// Reads the system clock.
    pub fn is_active(&self) -> bool {
        self.is_active_at(&Utc::now())
    }

    /// Number of member segments
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; events are never empty
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member by index
    pub fn get(&self, idx: usize) -> Option<&Segment> {
        self.members.get(idx)
    }

    /// Iterator over member segments, oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.members.iter()
    }

    fn new(identity: EventIdentity, first: Segment) -> Self {
        Self {
            identity,
            members: vec![first],
        }
    }

    fn append(&mut self, segment: Segment) {
        self.members.push(segment);
    }
}

impl std::ops::Index<usize> for Event {
    type Output = Segment;

    fn index(&self, idx: usize) -> &Segment {
        &self.members[idx]
    }
}

impl<'a> IntoIterator for &'a Event {
    type Item = &'a Segment;

    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str("\n-----\n")?;
            }
            member.fmt(f)?;
        }
        Ok(())
    }
}

/// Correlates bulletin files into events
///
/// By default, every file is used and every event is returned.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use hazards::{BulletinFile, EventQuery};
///
/// let file = BulletinFile::parse(
///     "2015062121.severe",
///     "WWUS51 KPBZ 212114\nSVSPBZ\n\nPAC007-212130-\n/O.CON.KPBZ.SV.W.0094.000000T0000Z-150621T2130Z/\n$$\n",
/// )
/// .unwrap();
///
/// let now = Utc.with_ymd_and_hms(2015, 6, 21, 21, 15, 0).unwrap();
/// let events = EventQuery::new()
///     .with_most_recent(10)
///     .with_active_only(true)
///     .at(now)
///     .run(&[file]);
///
/// assert_eq!(1, events.len());
/// assert_eq!("O.KPBZ.SV.0094", events[0].identity().to_string());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventQuery {
    most_recent: Option<usize>,
    active_only: bool,
    now: Option<DateTime<Utc>>,
}

impl EventQuery {
    /// New query over all files, returning all events
    pub fn new() -> Self {
        Self::default()
    }

    /// Use only the `n` most recent files
    ///
    /// Files are ordered by anchor date, then by name.
    pub fn with_most_recent(&mut self, n: usize) -> &mut Self {
        self.most_recent = Some(n);
        self
    }

    /// Return only events which are still in effect
    pub fn with_active_only(&mut self, active_only: bool) -> &mut Self {
        self.active_only = active_only;
        self
    }

    /// Evaluate activity at `now` instead of the system clock
    pub fn at(&mut self, now: DateTime<Utc>) -> &mut Self {
        self.now = Some(now);
        self
    }

    /// Correlate `files` into events
    ///
    /// Events are returned in the order in which they were
    /// first seen.
    pub fn run(&self, files: &[BulletinFile]) -> Vec<Event> {
        let mut ordered: Vec<&BulletinFile> = files.iter().collect();
        ordered.sort_by(|a, b| (a.anchor(), a.name()).cmp(&(b.anchor(), b.name())));
        if let Some(n) = self.most_recent {
            let older = ordered.len().saturating_sub(n);
            ordered.drain(..older);
        }

        let mut events: Vec<Event> = vec![];
        let mut index: HashMap<EventIdentity, usize> = HashMap::new();

        for segment in ordered
            .iter()
            .flat_map(|file| file.iter())
            .flat_map(|product| product.iter())
        {
            for (identity, codes) in group_by_identity(segment.vtec()) {
                let member = segment.with_vtec(codes);
                match index.get(&identity) {
                    Some(&idx) => events[idx].append(member),
                    None => {
                        trace!("new event {}", identity);
                        index.insert(identity.clone(), events.len());
                        events.push(Event::new(identity, member));
                    }
                }
            }
        }

        debug!(
            "correlated {} file(s) into {} event(s)",
            ordered.len(),
            events.len()
        );

        if self.active_only {
            let now = self.now.unwrap_or_else(Utc::now);
            events.retain(|evt| evt.is_active_at(&now));
        }

        events
    }
}

/// Correlate bulletin files into events
///
/// If `most_recent_n` is given, only that many of the most
/// recent files are used. If `active_only` is set, events
/// which have expired according to the system clock are
/// dropped.
pub fn fetch_events(
    files: &[BulletinFile],
    most_recent_n: Option<usize>,
    active_only: bool,
) -> Vec<Event> {
    let mut query = EventQuery::new();
    if let Some(n) = most_recent_n {
        query.with_most_recent(n);
    }
    query.with_active_only(active_only).run(files)
}

/// Correlate bulletin files into events, judging activity at `now`
pub fn fetch_events_at(
    files: &[BulletinFile],
    most_recent_n: Option<usize>,
    active_only: bool,
    now: DateTime<Utc>,
) -> Vec<Event> {
    let mut query = EventQuery::new();
    if let Some(n) = most_recent_n {
        query.with_most_recent(n);
    }
    query.with_active_only(active_only).at(now).run(files)
}

// Partition VTEC codes by event identity, in order of first appearance
fn group_by_identity(codes: &[VtecCode]) -> Vec<(EventIdentity, Vec<VtecCode>)> {
    let mut out: Vec<(EventIdentity, Vec<VtecCode>)> = vec![];
    for code in codes {
        let identity = code.identity();
        match out.iter_mut().find(|(id, _)| *id == identity) {
            Some((_, group)) => group.push(code.clone()),
            None => out.push((identity, vec![code.clone()])),
        }
    }
    out
}
