//! VTEC phenomena

use std::fmt;
use std::str::FromStr;

use strum::EnumMessage;

/// VTEC phenomenon code
///
/// The two-character code which describes the meteorological or
/// hydrologic phenomenon covered by a product segment. New codes
/// are added to the list as needs arise, so unknown codes decode
/// as [`Phenomenon::Unrecognized`] instead of failing.
///
/// ```
/// use hazards::Phenomenon;
///
/// let phen = Phenomenon::from("SV");
/// assert_eq!(Phenomenon::SevereThunderstorm, phen);
/// assert_eq!("Severe Thunderstorm", phen.to_string());
/// assert_eq!("SV", phen.as_code_str());
///
/// assert_eq!(Phenomenon::Unrecognized, Phenomenon::from("Q?"));
/// assert_eq!("Unrecognized", Phenomenon::Unrecognized.to_string());
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
#[repr(u8)]
pub enum Phenomenon {
    /// Volcanic Ashfall
    #[strum(serialize = "AF", detailed_message = "Volcanic Ashfall")]
    VolcanicAshfall,

    /// Air Stagnation
    #[strum(serialize = "AS", detailed_message = "Air Stagnation")]
    AirStagnation,

    /// Avalanche
    #[strum(serialize = "AV", detailed_message = "Avalanche")]
    Avalanche,

    /// Blowing/Drifting Snow
    #[strum(serialize = "BS", detailed_message = "Blowing/Drifting Snow")]
    BlowingSnow,

    /// Blizzard
    #[strum(serialize = "BZ", detailed_message = "Blizzard")]
    Blizzard,

    /// Coastal Flood
    #[strum(serialize = "CF", detailed_message = "Coastal Flood")]
    CoastalFlood,

    /// Dust Storm
    #[strum(serialize = "DS", detailed_message = "Dust Storm")]
    DustStorm,

    /// Blowing Dust
    #[strum(serialize = "DU", detailed_message = "Blowing Dust")]
    BlowingDust,

    /// Extreme Cold
    #[strum(serialize = "EC", detailed_message = "Extreme Cold")]
    ExtremeCold,

    /// Excessive Heat
    #[strum(serialize = "EH", detailed_message = "Excessive Heat")]
    ExcessiveHeat,

    /// Areal Flood
    #[strum(serialize = "FA", detailed_message = "Areal Flood")]
    ArealFlood,

    /// Flash Flood
    #[strum(serialize = "FF", detailed_message = "Flash Flood")]
    FlashFlood,

    /// Dense Fog
    #[strum(serialize = "FG", detailed_message = "Dense Fog")]
    DenseFog,

    /// Flood
    #[strum(serialize = "FL", detailed_message = "Flood")]
    Flood,

    /// Frost
    #[strum(serialize = "FR", detailed_message = "Frost")]
    Frost,

    /// Fire Weather (RFW, FWW)
    #[strum(serialize = "FW", detailed_message = "Fire Weather (RFW, FWW)")]
    FireWeather,

    /// Freeze
    #[strum(serialize = "FZ", detailed_message = "Freeze")]
    Freeze,

    /// Gale
    #[strum(serialize = "GL", detailed_message = "Gale")]
    Gale,

    /// Hurricane Force Winds
    #[strum(serialize = "HF", detailed_message = "Hurricane Force Winds")]
    HurricaneForceWind,

    /// Inland Hurricane Wind
    #[strum(serialize = "HI", detailed_message = "Inland Hurricane Wind")]
    InlandHurricaneWind,

    /// Heavy Sleet
    #[strum(serialize = "HP", detailed_message = "Heavy Sleet")]
    HeavySleet,

    /// Heavy Snow
    #[strum(serialize = "HS", detailed_message = "Heavy Snow")]
    HeavySnow,

    /// Heat
    #[strum(serialize = "HT", detailed_message = "Heat")]
    Heat,

    /// Hurricane
    #[strum(serialize = "HU", detailed_message = "Hurricane")]
    Hurricane,

    /// High Wind
    #[strum(serialize = "HW", detailed_message = "High Wind")]
    HighWind,

    /// Sleet
    #[strum(serialize = "IP", detailed_message = "Sleet")]
    Sleet,

    /// Ice Storm
    #[strum(serialize = "IS", detailed_message = "Ice Storm")]
    IceStorm,

    /// Lake Effect Snow & Blowing Snow
    #[strum(serialize = "LB", detailed_message = "Lake Effect Snow & Blowing Snow")]
    LakeEffectSnowAndBlowingSnow,

    /// Lake Effect Snow
    #[strum(serialize = "LE", detailed_message = "Lake Effect Snow")]
    LakeEffectSnow,

    /// Low Water
    #[strum(serialize = "LO", detailed_message = "Low Water")]
    LowWater,

    /// Lakeshore Flood
    #[strum(serialize = "LS", detailed_message = "Lakeshore Flood")]
    LakeshoreFlood,

    /// Lake Wind
    #[strum(serialize = "LW", detailed_message = "Lake Wind")]
    LakeWind,

    /// Marine
    #[strum(serialize = "MA", detailed_message = "Marine")]
    Marine,

    /// Radiological Hazard
    #[strum(serialize = "RH", detailed_message = "Radiological Hazard")]
    RadiologicalHazard,

    /// Snow & Blowing Snow
    #[strum(serialize = "SB", detailed_message = "Snow & Blowing Snow")]
    SnowAndBlowingSnow,

    /// Small Craft
    #[strum(serialize = "SC", detailed_message = "Small Craft")]
    SmallCraft,

    /// Dense Smoke
    #[strum(serialize = "SM", detailed_message = "Dense Smoke")]
    DenseSmoke,

    /// Snow
    #[strum(serialize = "SN", detailed_message = "Snow")]
    Snow,

    /// Storm
    #[strum(serialize = "SR", detailed_message = "Storm")]
    Storm,

    /// High Surf
    #[strum(serialize = "SU", detailed_message = "High Surf")]
    HighSurf,

    /// Severe Thunderstorm
    #[strum(serialize = "SV", detailed_message = "Severe Thunderstorm")]
    SevereThunderstorm,

    /// Inland Tropical Storm Wind
    #[strum(serialize = "TI", detailed_message = "Inland Tropical Storm Wind")]
    InlandTropicalStormWind,

    /// Tornado
    #[strum(serialize = "TO", detailed_message = "Tornado")]
    Tornado,

    /// Tropical Storm
    #[strum(serialize = "TR", detailed_message = "Tropical Storm")]
    TropicalStorm,

    /// Tsunami
    #[strum(serialize = "TS", detailed_message = "Tsunami")]
    Tsunami,

    /// Typhoon
    #[strum(serialize = "TY", detailed_message = "Typhoon")]
    Typhoon,

    /// Ice Accretion
    #[strum(serialize = "UP", detailed_message = "Ice Accretion")]
    IceAccretion,

    /// Volcano
    #[strum(serialize = "VO", detailed_message = "Volcano")]
    Volcano,

    /// Wind Chill
    #[strum(serialize = "WC", detailed_message = "Wind Chill")]
    WindChill,

    /// Wind
    #[strum(serialize = "WI", detailed_message = "Wind")]
    Wind,

    /// Water Storm
    #[strum(serialize = "WS", detailed_message = "Water Storm")]
    WaterStorm,

    /// Winter Weather
    #[strum(serialize = "WW", detailed_message = "Winter Weather")]
    WinterWeather,

    /// Freezing Fog
    #[strum(serialize = "ZF", detailed_message = "Freezing Fog")]
    FreezingFog,

    /// Freezing Rain
    #[strum(serialize = "ZR", detailed_message = "Freezing Rain")]
    FreezingRain,

    /// An unrecognized phenomenon code
    #[strum(disabled)]
    Unrecognized,
}

impl Phenomenon {
    /// Parse from a two-character VTEC code
    ///
    /// Codes which are not known to this crate decode as
    /// [`Phenomenon::Unrecognized`].
    pub fn from<S>(code: S) -> Self
    where
        S: AsRef<str>,
    {
        Phenomenon::from_str(code.as_ref()).unwrap_or(Phenomenon::Unrecognized)
    }

    /// Human-readable string representation, like "`Severe Thunderstorm`"
    pub fn as_display_str(&self) -> &'static str {
        match self {
            Phenomenon::Unrecognized => "Unrecognized",
            _ => self.get_detailed_message().expect("missing definition"),
        }
    }

    /// Two-character VTEC code
    ///
    /// [`Phenomenon::Unrecognized`] has the code "`??`".
    pub fn as_code_str(&self) -> &'static str {
        match self {
            Phenomenon::Unrecognized => "??",
            _ => self.get_serializations()[0],
        }
    }

    /// True if the phenomenon is not known to this crate
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Phenomenon::Unrecognized)
    }
}


impl AsRef<str> for Phenomenon {
    fn as_ref(&self) -> &'static str {
        self.as_code_str()
    }
}

impl fmt::Display for Phenomenon {
    /// Printable string
    ///
    /// * The normal form is a human-readable string like "`Tornado`"
    /// * The alternate form is the two-character code, like "`TO`"
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

    use strum::IntoEnumIterator;

    #[test]
    fn test_phenomenon_completeness() {
        const REQUIRE_NUM_CODES: u8 = 54;
        assert_eq!(REQUIRE_NUM_CODES, Phenomenon::Unrecognized as u8);

        let mut code_set = HashSet::new();
        let mut name_set = HashSet::new();
        for phen in Phenomenon::iter() {
            if phen.is_unrecognized() {
                continue;
            }

            // codes and names are unique
            assert!(code_set.insert(phen.as_code_str()));
            assert!(name_set.insert(phen.as_display_str()));

            // codes are two uppercase characters and convert back
            let code = phen.as_code_str();
            assert_eq!(2, code.len());
            assert!(code.bytes().all(|b| b.is_ascii_uppercase()));
            assert_eq!(phen, Phenomenon::from(code));
        }
        assert_eq!(REQUIRE_NUM_CODES as usize, code_set.len());
    }

    #[test]
    fn test_phenomenon_display() {
        assert_eq!("Fire Weather (RFW, FWW)", Phenomenon::FireWeather.to_string());
        assert_eq!("FW", format!("{:#}", Phenomenon::FireWeather));
        assert_eq!("??", format!("{:#}", Phenomenon::from("")));
    }
}
