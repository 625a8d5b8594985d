use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrescentError {
    #[error("Invalid JPL ephemeris file source: {0}")]
    InvalidJPLEphemFileSource(String),

    #[error("Invalid JPL ephemeris file version: {0}")]
    InvalidJPLEphemFileVersion(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON (de)serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[cfg(feature = "jpl-download")]
    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Base dir creation error for JPL ephemeris file: {0}")]
    UnableToCreateBaseDir(String),

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),

    #[error("JPL File not found at: {0}")]
    JPLFileNotFound(String),

    #[error("ROOTS finding error: {0}")]
    RootFindingError(#[from] roots::SearchError),

    #[error("Error during the nom parsing: {0}")]
    NomParsingError(String),

    #[error("Unsupported DAF binary format: {0}")]
    UnsupportedBinaryFormat(String),

    #[error("Invalid SPK data type: {0}")]
    InvalidSpkDataType(i32),

    #[error("Invalid NAIF identifier: {0}")]
    InvalidNaifId(i32),

    #[error("No ephemeris segment for target {target} relative to center {center}")]
    MissingSegment { target: i32, center: i32 },

    #[error("Epoch {et_seconds} s past J2000 TDB is outside the coverage of segment {target}/{center}")]
    EphemerisOutOfRange {
        target: i32,
        center: i32,
        et_seconds: f64,
    },

    #[error("Invalid observer coordinates: {0}")]
    InvalidObserver(String),

    #[error("Invalid calendar date: {0}")]
    InvalidDate(String),

    #[error("UT1 provider error: {0}")]
    Ut1ProviderError(String),
}

impl PartialEq for CrescentError {
    fn eq(&self, other: &Self) -> bool {
        use CrescentError::*;
        match (self, other) {
            (InvalidJPLEphemFileSource(a), InvalidJPLEphemFileSource(b)) => a == b,
            (InvalidJPLEphemFileVersion(a), InvalidJPLEphemFileVersion(b)) => a == b,

            // Wrapped library errors only compare by variant
            (IoError(_), IoError(_)) => true,
            (JsonError(_), JsonError(_)) => true,
            #[cfg(feature = "jpl-download")]
            (ReqwestError(_), ReqwestError(_)) => true,

            (UnableToCreateBaseDir(a), UnableToCreateBaseDir(b)) => a == b,
            (Utf8PathError(a), Utf8PathError(b)) => a == b,
            (JPLFileNotFound(a), JPLFileNotFound(b)) => a == b,
            (RootFindingError(a), RootFindingError(b)) => a == b,
            (NomParsingError(a), NomParsingError(b)) => a == b,
            (UnsupportedBinaryFormat(a), UnsupportedBinaryFormat(b)) => a == b,
            (InvalidSpkDataType(a), InvalidSpkDataType(b)) => a == b,
            (InvalidNaifId(a), InvalidNaifId(b)) => a == b,
            (
                MissingSegment {
                    target: t1,
                    center: c1,
                },
                MissingSegment {
                    target: t2,
                    center: c2,
                },
            ) => t1 == t2 && c1 == c2,
            (
                EphemerisOutOfRange {
                    target: t1,
                    center: c1,
                    et_seconds: e1,
                },
                EphemerisOutOfRange {
                    target: t2,
                    center: c2,
                    et_seconds: e2,
                },
            ) => t1 == t2 && c1 == c2 && e1 == e2,
            (InvalidObserver(a), InvalidObserver(b)) => a == b,
            (InvalidDate(a), InvalidDate(b)) => a == b,
            (Ut1ProviderError(a), Ut1ProviderError(b)) => a == b,

            _ => false,
        }
    }
}

impl<E: std::fmt::Debug> From<nom::Err<E>> for CrescentError {
    fn from(err: nom::Err<E>) -> Self {
        CrescentError::NomParsingError(format!("{err:?}"))
    }
}
