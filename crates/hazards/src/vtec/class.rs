//! VTEC product class

use std::fmt;

use strum::EnumMessage;

/// VTEC product class (the `k` field)
///
/// Tells whether the product is operational, a test, or
/// experimental. Test products should never be acted upon.
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
pub enum ProductClass {
    /// Operational product
    #[strum(serialize = "O", detailed_message = "Operational product")]
    Operational,

    /// Test product
    #[strum(serialize = "T", detailed_message = "Test product")]
    Test,

    /// Experimental product
    #[strum(serialize = "E", detailed_message = "Experimental product")]
    Experimental,

    /// Experimental VTEC in an operational product
    #[strum(
        serialize = "X",
        detailed_message = "Experimental VTEC in Operational product"
    )]
    ExperimentalVtec,
}

impl ProductClass {
    /// Human-readable string representation, like "`Operational product`"
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// One-character VTEC code
    pub fn as_code_str(&self) -> &'static str {
        self.get_serializations()[0]
    }
}

impl AsRef<str> for ProductClass {
    fn as_ref(&self) -> &'static str {
        self.as_code_str()
    }
}

impl fmt::Display for ProductClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.as_code_str().fmt(f)
        } else {
            self.as_display_str().fmt(f)
        }
    }
}
