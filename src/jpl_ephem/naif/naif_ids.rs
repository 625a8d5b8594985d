//! NAIF integer codes of the bodies involved in the crescent geometry, and SPK segment data types.
use std::fmt;

use crate::crescent_errors::CrescentError;

/// NAIF identifiers of the bodies read from a planetary kernel.
///
/// Only the chain needed to place the Sun, the Earth and the Moon relative to
/// the Solar System Barycenter is named here; other segments of the kernel are
/// still loaded and addressable by their raw integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NaifIds {
    SolarSystemBarycenter,
    EarthMoonBarycenter,
    Sun,
    Earth,
    Moon,
}

impl NaifIds {
    pub fn from_id(id: i32) -> Result<Self, CrescentError> {
        match id {
            0 => Ok(NaifIds::SolarSystemBarycenter),
            3 => Ok(NaifIds::EarthMoonBarycenter),
            10 => Ok(NaifIds::Sun),
            399 => Ok(NaifIds::Earth),
            301 => Ok(NaifIds::Moon),
            _ => Err(CrescentError::InvalidNaifId(id)),
        }
    }

    pub fn to_id(self) -> i32 {
        match self {
            NaifIds::SolarSystemBarycenter => 0,
            NaifIds::EarthMoonBarycenter => 3,
            NaifIds::Sun => 10,
            NaifIds::Earth => 399,
            NaifIds::Moon => 301,
        }
    }

    /// Human-readable name for any NAIF code, falling back to the raw number.
    pub fn describe(id: i32) -> String {
        NaifIds::from_id(id)
            .map(|naif| naif.to_string())
            .unwrap_or_else(|_| format!("NAIF {id}"))
    }
}

impl From<NaifIds> for i32 {
    fn from(naif_id: NaifIds) -> Self {
        naif_id.to_id()
    }
}

impl TryFrom<i32> for NaifIds {
    type Error = CrescentError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        NaifIds::from_id(id)
    }
}

impl fmt::Display for NaifIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NaifIds::SolarSystemBarycenter => write!(f, "Solar System Barycenter"),
            NaifIds::EarthMoonBarycenter => write!(f, "EarthMoonBarycenter"),
            NaifIds::Sun => write!(f, "Sun"),
            NaifIds::Earth => write!(f, "Earth"),
            NaifIds::Moon => write!(f, "Moon"),
        }
    }
}

/// SPK segment representation. Planetary kernels (DE4xx) only use type 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpkDataType {
    ChebyshevPositionOnly,
    ChebyshevPositionVelocity,
    Other(i32),
}

impl From<i32> for SpkDataType {
    fn from(value: i32) -> Self {
        match value {
            2 => SpkDataType::ChebyshevPositionOnly,
            3 => SpkDataType::ChebyshevPositionVelocity,
            other => SpkDataType::Other(other),
        }
    }
}

impl fmt::Display for SpkDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpkDataType::ChebyshevPositionOnly => write!(f, "Chebyshev Position Only"),
            SpkDataType::ChebyshevPositionVelocity => write!(f, "Chebyshev Position Velocity"),
            SpkDataType::Other(code) => write!(f, "SPK type {code}"),
        }
    }
}

#[cfg(test)]
mod test_naif_id {
    use super::*;

    #[test]
    fn test_naif_ids() {
        assert_eq!(NaifIds::from_id(0).unwrap(), NaifIds::SolarSystemBarycenter);
        assert_eq!(NaifIds::from_id(3).unwrap(), NaifIds::EarthMoonBarycenter);
        assert_eq!(NaifIds::from_id(10).unwrap(), NaifIds::Sun);
        assert_eq!(NaifIds::from_id(399).unwrap(), NaifIds::Earth);
        assert_eq!(NaifIds::try_from(301).unwrap(), NaifIds::Moon);
        assert_eq!(
            NaifIds::from_id(401),
            Err(CrescentError::InvalidNaifId(401))
        );
    }

    #[test]
    fn test_naif_ids_round_trip_and_names() {
        for id in [0, 3, 10, 301, 399] {
            assert_eq!(i32::from(NaifIds::from_id(id).unwrap()), id);
        }
        assert_eq!(NaifIds::describe(301), "Moon");
        assert_eq!(NaifIds::describe(5), "NAIF 5");
    }

    #[test]
    fn test_spk_data_type() {
        assert_eq!(SpkDataType::from(2), SpkDataType::ChebyshevPositionOnly);
        assert_eq!(SpkDataType::from(21), SpkDataType::Other(21));
        assert_eq!(SpkDataType::from(2).to_string(), "Chebyshev Position Only");
    }
}
