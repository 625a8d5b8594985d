//! Vector corrections turning geometric positions into apparent directions.
//!
//! All vectors are in km (positions) or km/s (velocities), ICRF axes.
use nalgebra::Vector3;

use crate::constants::{Degree, VLIGHT};
use crate::crescent_errors::CrescentError;

/// Number of light-time iterations. Three passes converge far below a
/// millisecond for Solar System distances.
const LIGHT_TIME_PASSES: usize = 3;

/// Light-time corrected position of a target relative to an observer.
///
/// Arguments
/// -----------------
/// * `observer_position`: barycentric observer position at reception time `et` (km).
/// * `et`: reception time, seconds past J2000 TDB.
/// * `target_position`: barycentric target position as a function of ET seconds.
///
/// Return
/// ----------
/// * `(relative, tau)`: target position at `et - tau` minus observer position at `et`,
///   and the light time `tau` in seconds.
pub fn light_time_correct<F>(
    observer_position: &Vector3<f64>,
    et: f64,
    target_position: F,
) -> Result<(Vector3<f64>, f64), CrescentError>
where
    F: Fn(f64) -> Result<Vector3<f64>, CrescentError>,
{
    let mut relative = target_position(et)? - observer_position;
    let mut tau = relative.norm() / VLIGHT;

    for _ in 0..LIGHT_TIME_PASSES {
        relative = target_position(et - tau)? - observer_position;
        tau = relative.norm() / VLIGHT;
    }

    Ok((relative, tau))
}

/// Apply stellar aberration to an astrometric direction.
///
/// Relativistic form of the aberration formula, valid to all orders in `v/c`.
///
/// Arguments
/// -----------------
/// * `xrel`: astrometric position of the target relative to the observer (any length unit).
/// * `observer_velocity`: barycentric velocity of the observer, km/s.
///
/// Return
/// ----------
/// * The apparent position: same length as `xrel`, direction displaced towards the
///   observer's motion.
///
/// # See also
/// * [`light_time_correct`] – computes the astrometric `xrel` fed to this function
pub fn correct_aberration(xrel: &Vector3<f64>, observer_velocity: &Vector3<f64>) -> Vector3<f64> {
    let distance = xrel.norm();
    if distance == 0.0 {
        return *xrel;
    }

    let p = xrel / distance;
    let v = observer_velocity / VLIGHT;
    let beta_inv = (1.0 - v.norm_squared()).sqrt();

    let f1 = p.dot(&v);
    let f2 = 1.0 + f1 / (1.0 + beta_inv);

    let apparent = (beta_inv * p + f2 * v) / (1.0 + f1);
    apparent.normalize() * distance
}

/// Angular separation between two directions, in degrees within `[0, 180]`.
///
/// Uses `atan2(|a × b|, a · b)`, well conditioned for both small and near-opposite angles.
pub fn separation(a: &Vector3<f64>, b: &Vector3<f64>) -> Degree {
    a.cross(b).norm().atan2(a.dot(b)).to_degrees()
}

#[cfg(test)]
mod apparent_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_light_time_static_target() {
        let observer = Vector3::zeros();
        let target = Vector3::new(VLIGHT * 2.0, 0.0, 0.0);
        let (rel, tau) = light_time_correct(&observer, 0.0, |_| Ok(target)).unwrap();
        assert_eq!(rel, target);
        assert_relative_eq!(tau, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_light_time_moving_target() {
        // Target receding along x at 1000 km/s from 1 light-second away at t = 0
        let observer = Vector3::zeros();
        let target = |et: f64| Ok(Vector3::new(VLIGHT + 1000.0 * et, 0.0, 0.0));
        let (rel, tau) = light_time_correct(&observer, 0.0, target).unwrap();

        // Seen at t = -tau: c·tau = c - 1000·tau
        let expected_tau = VLIGHT / (VLIGHT + 1000.0);
        assert_relative_eq!(tau, expected_tau, epsilon = 1e-9);
        assert_relative_eq!(rel.x, VLIGHT - 1000.0 * expected_tau, epsilon = 1e-3);
    }

    #[test]
    fn test_light_time_propagates_error() {
        let observer = Vector3::zeros();
        let res = light_time_correct(&observer, 0.0, |_| {
            Err(CrescentError::MissingSegment {
                target: 301,
                center: 3,
            })
        });
        assert_eq!(
            res.unwrap_err(),
            CrescentError::MissingSegment {
                target: 301,
                center: 3
            }
        );
    }

    #[test]
    fn test_aberration() {
        let xrel = Vector3::new(1.0e8, 0.0, 0.0);

        // No motion, no displacement
        let app = correct_aberration(&xrel, &Vector3::zeros());
        assert_relative_eq!(app, xrel, epsilon = 1e-6);

        // Transverse motion at 30 km/s tilts the direction by ~v/c
        let app = correct_aberration(&xrel, &Vector3::new(0.0, 30.0, 0.0));
        assert_relative_eq!(app.norm(), xrel.norm(), epsilon = 1e-6);
        let angle = separation(&app, &xrel).to_radians();
        assert_relative_eq!(angle, 30.0 / VLIGHT, max_relative = 1e-6);
        assert!(app.y > 0.0);

        // Motion along the line of sight leaves the direction unchanged
        let app = correct_aberration(&xrel, &Vector3::new(30.0, 0.0, 0.0));
        assert_relative_eq!(separation(&app, &xrel), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_separation() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 2.0, 0.0);
        assert_relative_eq!(separation(&x, &y), 90.0, epsilon = 1e-12);
        assert_relative_eq!(separation(&x, &(-x)), 180.0, epsilon = 1e-12);
        assert_relative_eq!(separation(&x, &x), 0.0, epsilon = 1e-12);
        assert_relative_eq!(
            separation(&x, &Vector3::new(1.0, 1.0, 0.0)),
            45.0,
            epsilon = 1e-12
        );
    }
}
