//! VTEC significance

use std::fmt;

use strum::EnumMessage;

/// VTEC significance code
///
/// Combined with a [`Phenomenon`](crate::Phenomenon), the
/// significance names a specific hazard product. A winter storm
/// watch is phenomenon `WS` with significance `A`, and a winter
/// storm warning is `WS` with significance `W`.
///
/// | Code | Significance                                |
/// |------|---------------------------------------------|
/// | `S`  | [statement](crate::Significance::Statement) |
/// | `Y`  | [advisory](crate::Significance::Advisory)   |
/// | `A`  | [watch](crate::Significance::Watch)         |
/// | `W`  | [warning](crate::Significance::Warning)     |
///
/// ```
/// use hazards::Significance;
///
/// let sig: Significance = "A".parse().unwrap();
/// assert_eq!(Significance::Watch, sig);
/// assert_eq!("Watch", format!("{}", sig));
/// assert_eq!("A", format!("{:#}", sig));
/// assert!(Significance::Watch < Significance::Warning);
/// ```
///
/// Significance is deliberately **not** part of an event's
/// [identity](crate::EventIdentity): a watch that is upgraded to
/// a warning continues the same event.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum Significance {
    /// Statement
    #[strum(serialize = "S", detailed_message = "Statement")]
    Statement,

    /// Advisory
    #[strum(serialize = "Y", detailed_message = "Advisory")]
    Advisory,

    /// Watch
    #[strum(serialize = "A", detailed_message = "Watch")]
    Watch,

    /// Warning
    #[strum(serialize = "W", detailed_message = "Warning")]
    Warning,
}

impl Significance {
    /// Human-readable string representation, like "`Warning`"
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// One-character VTEC code
    pub fn as_code_str(&self) -> &'static str {
        self.get_serializations()[0]
    }
}

impl AsRef<str> for Significance {
    fn as_ref(&self) -> &'static str {
        self.as_code_str()
    }
}

impl fmt::Display for Significance {
    /// Printable string
    ///
    /// * The normal form is a human-readable string like "`Statement`"
    /// * The alternate form is a one-character string like "`S`"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.as_code_str().fmt(f)
        } else {
            self.as_display_str().fmt(f)
        }
    }
}
