//! Topocentric width of the lunar crescent.
use crate::constants::{ArcMin, Degree, Kilometer, EARTH_MEAN_RADIUS, MOON_SEMIDIAMETER_RATIO};

/// Topocentric crescent width W′ in arcminutes.
///
/// ```text
/// HP  = asin(min(R / Δ, 1))
/// SD  = 0.27245 · HP
/// SD′ = SD · (1 + sin(h) · sin(HP))
/// W′  = SD′ · (1 − cos(ARCL))
/// ```
///
/// with `R` the Earth equatorial radius, `Δ` the Moon distance and `h` the Moon altitude.
/// A distance at or below `R` clamps the parallax to 90° instead of failing.
///
/// Arguments
/// -----------------
/// * `arc_of_light`: Sun-Moon elongation ARCL, degrees.
/// * `moon_altitude`: topocentric altitude of the Moon, degrees.
/// * `moon_distance`: observer-to-Moon distance, km.
pub fn crescent_semiwidth(
    arc_of_light: Degree,
    moon_altitude: Degree,
    moon_distance: Kilometer,
) -> ArcMin {
    let horizontal_parallax = (EARTH_MEAN_RADIUS / moon_distance).min(1.0).asin();
    let semidiameter = MOON_SEMIDIAMETER_RATIO * horizontal_parallax;
    let topocentric_semidiameter =
        semidiameter * (1.0 + moon_altitude.to_radians().sin() * horizontal_parallax.sin());

    let width = topocentric_semidiameter * (1.0 - arc_of_light.to_radians().cos());
    width.to_degrees() * 60.0
}
