//! Observation geometry of the young crescent.
//!
//! [`observe`] collects the raw topocentric quantities at one instant into an
//! [`ObservationSample`]; [`CrescentGeometry::from_sample`] derives the arc of light,
//! the arc of vision and the crescent semi-width fed to the visibility criteria.
use hifitime::Epoch;

use crate::almanac::{Body, EphemerisService};
use crate::constants::{ArcMin, Degree, Kilometer};
use crate::crescent_errors::CrescentError;
use crate::crescent_width::crescent_semiwidth;
use crate::observers::Observer;

/// Topocentric apparent quantities of the Sun and the Moon at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationSample {
    pub sun_altitude_deg: Degree,
    pub sun_azimuth_deg: Degree,
    pub moon_altitude_deg: Degree,
    pub moon_azimuth_deg: Degree,
    /// Sun-Moon angular separation, `[0, 180]`.
    pub elongation_deg: Degree,
    pub moon_distance_km: Kilometer,
    /// Geocentric illuminated fraction of the lunar disk, `[0, 1]`.
    pub illuminated_fraction: f64,
}

/// Quantities entering the Yallop and Odeh criteria.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrescentGeometry {
    /// ARCL, equal to the elongation.
    pub arc_of_light_deg: Degree,
    /// ARCV, Moon altitude minus Sun altitude.
    pub arc_of_vision_deg: Degree,
    /// Topocentric crescent width W′.
    pub crescent_semiwidth_arcmin: ArcMin,
}

/// Sample the Sun and the Moon as seen by `observer` at `instant`.
///
/// Errors
/// ----------
/// * Whatever the ephemeris service reports, e.g. an instant outside the kernel coverage.
pub fn observe<S>(
    observer: &Observer,
    instant: &Epoch,
    ephemeris: &S,
) -> Result<ObservationSample, CrescentError>
where
    S: EphemerisService + ?Sized,
{
    let sun = ephemeris.apparent(observer, Body::Sun, instant)?;
    let moon = ephemeris.apparent(observer, Body::Moon, instant)?;

    Ok(ObservationSample {
        sun_altitude_deg: sun.altitude,
        sun_azimuth_deg: sun.azimuth,
        moon_altitude_deg: moon.altitude,
        moon_azimuth_deg: moon.azimuth,
        elongation_deg: ephemeris.separation(&sun, &moon),
        moon_distance_km: moon.distance_km,
        illuminated_fraction: ephemeris.fraction_illuminated(instant)?,
    })
}

impl CrescentGeometry {
    pub fn from_sample(sample: &ObservationSample) -> Self {
        CrescentGeometry {
            arc_of_light_deg: sample.elongation_deg,
            arc_of_vision_deg: sample.moon_altitude_deg - sample.sun_altitude_deg,
            crescent_semiwidth_arcmin: crescent_semiwidth(
                sample.elongation_deg,
                sample.moon_altitude_deg,
                sample.moon_distance_km,
            ),
        }
    }
}

#[cfg(test)]
mod geometry_test {
    use super::*;
    use crate::almanac::Almanac;
    use crate::jpl_ephem::test_jpl_ephem::toy_ephem;
    use approx::assert_relative_eq;

    #[test]
    fn test_geometry_from_sample() {
        let sample = ObservationSample {
            sun_altitude_deg: -0.8333,
            sun_azimuth_deg: 255.0,
            moon_altitude_deg: 9.1667,
            moon_azimuth_deg: 250.0,
            elongation_deg: 7.0,
            moon_distance_km: 384_400.0,
            illuminated_fraction: 0.004,
        };
        let geometry = CrescentGeometry::from_sample(&sample);
        assert_eq!(geometry.arc_of_light_deg, 7.0);
        assert_relative_eq!(geometry.arc_of_vision_deg, 10.0, epsilon = 1e-12);
        assert_eq!(
            geometry.crescent_semiwidth_arcmin,
            crescent_semiwidth(7.0, 9.1667, 384_400.0)
        );
    }

    #[test]
    fn test_observe_toy_system() {
        let almanac = Almanac::from_ephem(toy_ephem());
        let observer = Observer::new(10.0, 30.0, 0.0).unwrap();
        let instant = Epoch::from_gregorian_utc_at_noon(2000, 1, 1);

        let sample = observe(&observer, &instant, &almanac).unwrap();
        let sun = almanac.apparent(&observer, Body::Sun, &instant).unwrap();

        assert_eq!(sample.sun_altitude_deg, sun.altitude);
        assert_eq!(sample.sun_azimuth_deg, sun.azimuth);
        assert!((0.0..=180.0).contains(&sample.elongation_deg));
        assert!(sample.elongation_deg > 178.5);
        assert!((0.0..=1.0).contains(&sample.illuminated_fraction));
        assert!((377_000.0..391_000.0).contains(&sample.moon_distance_km));
    }
}
