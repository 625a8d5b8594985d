//! Calendar and sidereal-time helpers.
//!
//! The sweep is anchored on a civil date (`YYYY-MM-DD`) and its results carry
//! two renderings of the sunset instant: the TT Julian date and a UTC ISO
//! string rounded to the second. Sidereal time uses the IAU 1982 expression
//! of GMST as a function of UT1.
use std::fmt;
use std::str::FromStr;

use hifitime::{Duration, Epoch};
use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res},
    IResult, Parser,
};

use crate::constants::{DPI, T2000};
use crate::crescent_errors::CrescentError;

/// A civil calendar date in the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    /// Build a date, checking that it exists in the Gregorian calendar.
    ///
    /// Arguments
    /// -----------------
    /// * `year`, `month`, `day`: calendar fields, month and day are 1-based.
    ///
    /// Return
    /// ----------
    /// * The validated [`CalendarDate`], or [`CrescentError::InvalidDate`].
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CrescentError> {
        let date = CalendarDate { year, month, day };
        date.noon_utc()?;
        Ok(date)
    }

    /// 12:00:00 UTC on this date.
    pub fn noon_utc(&self) -> Result<Epoch, CrescentError> {
        Epoch::maybe_from_gregorian_utc(self.year, self.month, self.day, 12, 0, 0, 0)
            .map_err(|e| CrescentError::InvalidDate(format!("{self}: {e}")))
    }

    fn parse(input: &str) -> IResult<&str, (i32, u8, u8)> {
        let (input, (year, _, month, _, day)) = (
            map_res(digit1, |s: &str| s.parse::<i32>()),
            char('-'),
            map_res(digit1, |s: &str| s.parse::<u8>()),
            char('-'),
            map_res(digit1, |s: &str| s.parse::<u8>()),
        )
            .parse(input)?;
        Ok((input, (year, month, day)))
    }
}

impl FromStr for CalendarDate {
    type Err = CrescentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, (year, month, day)) = all_consuming(CalendarDate::parse)
            .parse(s.trim())
            .map_err(|_| CrescentError::InvalidDate(format!("expected YYYY-MM-DD, got '{s}'")))?;
        CalendarDate::new(year, month, day)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Render an epoch as `YYYY-MM-DDTHH:MM:SSZ` in UTC, rounded to the nearest second.
pub fn utc_iso(epoch: &Epoch) -> String {
    // Shift by half a second then truncate the sub-second part.
    let shifted = *epoch + Duration::from_seconds(0.5);
    let (year, month, day, hour, minute, second, _) = shifted.to_gregorian_utc();
    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}Z")
}

/// Julian date of an epoch in the TT time scale.
pub fn jd_tt(epoch: &Epoch) -> f64 {
    epoch.to_jde_tt_days()
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This function implements the IAU 1982 polynomial formula
/// for the mean sidereal time at 0h UT1, plus the fractional-day
/// correction term due to Earth's rotation rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # References
/// * IAU 1982, IERS Conventions 1996.
/// * Explanatory Supplement to the Astronomical Almanac (1992).
pub fn gmst(tjm: f64) -> f64 {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    // GMST at 0h UT1, seconds then radians
    let mut gmst0 = ((C3 * t + C2) * t + C1) * t + C0;
    gmst0 *= DPI / 86400.0;

    // Rotation accumulated during the current UT1 day
    let h = tjm.fract() * DPI;
    let gmst = gmst0 + h * RAP;

    gmst.rem_euclid(DPI)
}

#[cfg(test)]
mod time_test {
    use super::*;

    #[test]
    fn test_gmst() {
        let tut = 57028.478514610404;
        let res_gmst = gmst(tut);
        approx::assert_relative_eq!(res_gmst, 4.851925725092499, epsilon = 1e-12);

        let tut = T2000;
        let res_gmst = gmst(tut);
        approx::assert_relative_eq!(res_gmst, 4.894961212789145, epsilon = 1e-12);
        approx::assert_relative_eq!(res_gmst.to_degrees(), 280.46061837, epsilon = 1e-6);
    }

    #[test]
    fn test_parse_calendar_date() {
        let date: CalendarDate = "2026-02-18".parse().unwrap();
        assert_eq!(
            date,
            CalendarDate {
                year: 2026,
                month: 2,
                day: 18
            }
        );
        assert_eq!(date.to_string(), "2026-02-18");
    }

    #[test]
    fn test_parse_invalid_dates() {
        assert!("2026-02-30".parse::<CalendarDate>().is_err());
        assert!("2026/02/18".parse::<CalendarDate>().is_err());
        assert!("2026-02-18T00:00".parse::<CalendarDate>().is_err());
        assert!("".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn test_noon_and_iso() {
        let date = CalendarDate::new(2026, 2, 18).unwrap();
        let noon = date.noon_utc().unwrap();
        assert_eq!(utc_iso(&noon), "2026-02-18T12:00:00Z");

        let later = noon + Duration::from_seconds(5.0 * 3600.0 + 59.6);
        assert_eq!(utc_iso(&later), "2026-02-18T17:01:00Z");

        let earlier = noon + Duration::from_seconds(59.4);
        assert_eq!(utc_iso(&earlier), "2026-02-18T12:00:59Z");
    }

    #[test]
    fn test_jd_tt() {
        // 2000-01-01T12:00:00 TT is JD 2451545.0; UTC noon is 64.184 s earlier in TT.
        let epoch = Epoch::from_gregorian_utc_at_noon(2000, 1, 1);
        approx::assert_relative_eq!(jd_tt(&epoch), 2451545.0 + 64.184 / 86400.0, epsilon = 1e-8);
    }
}
