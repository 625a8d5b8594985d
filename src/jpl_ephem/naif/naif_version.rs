//! Planetary kernel versions distributed by NAIF, and their canonical file names.
use std::fmt;
use std::str::FromStr;

use crate::crescent_errors::CrescentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaifVersion {
    DE421,
    DE430,
    DE432s,
    DE440,
    DE440s,
    DE442,
}

impl NaifVersion {
    /// Canonical NAIF file name, e.g. `"de421.bsp"`.
    pub fn get_filename(&self) -> &'static str {
        match self {
            NaifVersion::DE421 => "de421.bsp",
            NaifVersion::DE430 => "de430.bsp",
            NaifVersion::DE432s => "de432s.bsp",
            NaifVersion::DE440 => "de440.bsp",
            NaifVersion::DE440s => "de440s.bsp",
            NaifVersion::DE442 => "de442.bsp",
        }
    }

    /// Download location on the NAIF generic kernels server.
    pub fn url(&self) -> String {
        format!(
            "https://naif.jpl.nasa.gov/pub/naif/generic_kernels/spk/planets/{}",
            self.get_filename()
        )
    }
}

impl FromStr for NaifVersion {
    type Err = CrescentError;

    /// Parse a version token such as `"DE421"` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DE421" => Ok(NaifVersion::DE421),
            "DE430" => Ok(NaifVersion::DE430),
            "DE432S" => Ok(NaifVersion::DE432s),
            "DE440" => Ok(NaifVersion::DE440),
            "DE440S" => Ok(NaifVersion::DE440s),
            "DE442" => Ok(NaifVersion::DE442),
            _ => Err(CrescentError::InvalidJPLEphemFileVersion(s.to_string())),
        }
    }
}

impl fmt::Display for NaifVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NaifVersion::DE421 => "DE421",
            NaifVersion::DE430 => "DE430",
            NaifVersion::DE432s => "DE432s",
            NaifVersion::DE440 => "DE440",
            NaifVersion::DE440s => "DE440s",
            NaifVersion::DE442 => "DE442",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod test_naif_version {
    use super::*;

    #[test]
    fn test_parse_versions() {
        let version: NaifVersion = "DE421".parse().unwrap();
        assert_eq!(version, NaifVersion::DE421);
        assert_eq!(version.get_filename(), "de421.bsp");
        assert_eq!("de440s".parse::<NaifVersion>().unwrap(), NaifVersion::DE440s);
        assert_eq!(
            "DE999".parse::<NaifVersion>(),
            Err(CrescentError::InvalidJPLEphemFileVersion("DE999".into()))
        );
    }

    #[test]
    fn test_url() {
        assert_eq!(
            NaifVersion::DE421.url(),
            "https://naif.jpl.nasa.gov/pub/naif/generic_kernels/spk/planets/de421.bsp"
        );
        assert_eq!(NaifVersion::DE432s.to_string(), "DE432s");
    }
}
