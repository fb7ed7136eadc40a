//! VTEC action codes

use std::fmt;

use strum::EnumMessage;

/// VTEC action code
///
/// The action being taken on an event with this issuance. The
/// first time an event appears, it is `NEW`. Follow-up products
/// use the other codes. `ROU` is reserved for routine products.
///
/// ```
/// use hazards::Action;
///
/// let act: Action = "CON".parse().unwrap();
/// assert_eq!(Action::Continued, act);
/// assert_eq!("Event continued", act.to_string());
/// assert_eq!("CON", format!("{:#}", act));
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum Action {
    /// New event
    #[strum(serialize = "NEW", detailed_message = "New event")]
    New,

    /// Event continued
    #[strum(serialize = "CON", detailed_message = "Event continued")]
    Continued,

    /// Event extended in time
    #[strum(serialize = "EXT", detailed_message = "Event extended (time)")]
    ExtendedTime,

    /// Event extended in area
    #[strum(serialize = "EXA", detailed_message = "Event extended (area)")]
    ExtendedArea,

    /// Event extended in both time and area
    #[strum(serialize = "EXB", detailed_message = "Event extended (both time and area)")]
    ExtendedBoth,

    /// Event upgraded
    #[strum(serialize = "UPG", detailed_message = "Event upgraded")]
    Upgraded,

    /// Event cancelled
    #[strum(serialize = "CAN", detailed_message = "Event cancelled")]
    Cancelled,

    /// Event expiring
    #[strum(serialize = "EXP", detailed_message = "Event expiring")]
    Expiring,

    /// Correction
    #[strum(serialize = "COR", detailed_message = "Correction")]
    Correction,

    /// Routine
    #[strum(serialize = "ROU", detailed_message = "Routine")]
    Routine,
}

impl Action {
    /// Human-readable string representation, like "`Event continued`"
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// Three-character VTEC code
    pub fn as_code_str(&self) -> &'static str {
        self.get_serializations()[0]
    }
}

impl AsRef<str> for Action {
    fn as_ref(&self) -> &'static str {
        self.as_code_str()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.as_code_str().fmt(f)
        } else {
            self.as_display_str().fmt(f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    #[test]
    fn test_action_codes() {
        let mut names = HashSet::new();
        for act in Action::iter() {
            assert_eq!(3, act.as_code_str().len());
            assert_eq!(act, Action::from_str(act.as_code_str()).unwrap());
            assert!(names.insert(act.as_display_str()));
        }
        assert_eq!(10, names.len());
        assert!(Action::from_str("new").is_err());
    }
}
